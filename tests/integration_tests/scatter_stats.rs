// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use serial_test::serial;

use crate::{get_cmd_output, ms_scatter, test_ms};

#[test]
#[serial]
fn test_scatter_stats_report() {
    let (tmp_dir, ms) = test_ms();
    let report = tmp_dir.path().join("report.json");

    #[rustfmt::skip]
    let cmd = ms_scatter()
        .args([
            "scatter-stats",
            "--no-progress-bars",
            "--ms", &ms,
            "--output", &report.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "scatter-stats failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.contains("Windows with mis-scaled weights: [1]"), "{stdout}");
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    let windows = json["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["xx"]["num_values"], 32);
    assert_abs_diff_eq!(
        windows[0]["xx"]["suggested_sigma_rescale"].as_f64().unwrap(),
        1.0,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        windows[1]["yy"]["suggested_sigma_rescale"].as_f64().unwrap(),
        2.0,
        epsilon = 1e-6
    );
    assert_eq!(json["mis_scaled_data_desc_ids"], serde_json::json!([1]));
}

#[test]
#[serial]
fn test_scatter_stats_rescale_one_window() {
    let (tmp_dir, ms) = test_ms();
    let report = tmp_dir.path().join("report.json");

    #[rustfmt::skip]
    let cmd = ms_scatter()
        .args([
            "scatter-stats",
            "--no-progress-bars",
            "--ms", &ms,
            "--data-desc-ids", "1",
            "--sigma-rescale", "2",
            "--output", &report.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "scatter-stats failed: {}", cmd.err().unwrap());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["windows"].as_array().unwrap().len(), 1);
    assert_eq!(json["windows"][0]["data_desc_id"], 1);
    assert_abs_diff_eq!(
        json["windows"][0]["yy_sigma_rescale"].as_f64().unwrap(),
        2.0,
        epsilon = 1e-6
    );
    assert_eq!(json["mis_scaled_data_desc_ids"], serde_json::json!([]));
}

#[test]
#[serial]
fn test_scatter_stats_bad_data_desc_id() {
    let (_tmp_dir, ms) = test_ms();

    let cmd = ms_scatter()
        .args(["scatter-stats", "--ms", &ms, "--data-desc-ids", "5"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("DATA_DESC_ID 5"), "unexpected stderr: {stderr}");
}

#[test]
#[serial]
fn test_dry_run_and_save_toml() {
    let (tmp_dir, ms) = test_ms();
    let report = tmp_dir.path().join("report.json");
    let toml = tmp_dir.path().join("args.toml");

    #[rustfmt::skip]
    let cmd = ms_scatter()
        .args([
            "scatter-stats",
            "--dry-run",
            "--ms", &ms,
            "--output", &report.display().to_string(),
            "--save-toml", &toml.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "scatter-stats failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run -- exiting now."), "{stdout}");
    assert!(!report.exists());
    assert!(toml.exists());

    // The saved arguments reproduce the run.
    let cmd = ms_scatter()
        .args([
            "scatter-stats",
            "--no-progress-bars",
            &toml.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "scatter-stats failed: {}", cmd.err().unwrap());
    assert!(report.exists());
}

#[test]
#[serial]
fn test_scatter_plot_dry_run() {
    let (tmp_dir, ms) = test_ms();
    let output_directory = tmp_dir.path().join("plots");

    #[rustfmt::skip]
    let cmd = ms_scatter()
        .args([
            "scatter-plot",
            "--dry-run",
            "--ms", &ms,
            "--output-directory", &output_directory.display().to_string(),
        ])
        .ok();
    if cfg!(feature = "plotting") {
        assert!(cmd.is_ok(), "scatter-plot failed: {}", cmd.err().unwrap());
    } else {
        assert!(cmd.is_err());
    }
    assert!(!output_directory.exists());
}
