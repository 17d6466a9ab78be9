// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use tempfile::{Builder, TempDir};

use crate::{get_cmd_output, ms_scatter};

#[test]
fn test_help() {
    let cmd = ms_scatter().arg("--help").ok();
    assert!(cmd.is_ok());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.contains("ms-info"));
    assert!(stdout.contains("scatter-plot"));
    assert!(stdout.contains("scatter-stats"));
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    for sub_command in ["ms-info", "scatter-plot", "scatter-stats"] {
        let cmd = ms_scatter().args([sub_command, "--help"]).ok();
        assert!(cmd.is_ok(), "{sub_command} --help failed");
    }
}

#[test]
fn test_no_args_prints_help() {
    let cmd = ms_scatter().ok();
    assert!(cmd.is_err());
}

#[test]
fn test_no_ms() {
    let cmd = ms_scatter().args(["scatter-stats", "--no-progress-bars"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("No measurement set was given"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_missing_ms() {
    let cmd = ms_scatter()
        .args(["scatter-stats", "--ms", "/does/not/exist.ms"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("does not exist"), "unexpected stderr: {stderr}");
}

#[test]
fn test_bad_arg_file_extension() {
    let arg_file = Builder::new().suffix(".txt").tempfile().unwrap();
    let cmd = ms_scatter()
        .args(["scatter-stats", &arg_file.path().display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("recognised file extension"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_bad_sigma_rescale() {
    let cmd = ms_scatter()
        .args([
            "scatter-stats",
            "--ms",
            "/does/not/exist.ms",
            "--sigma-rescale=-1",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("sigma rescale must be positive"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_arg_file_ms_is_used() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let arg_file = tmp_dir.path().join("args.toml");
    let mut f = std::fs::File::create(&arg_file).unwrap();
    writeln!(f, "[input]\nms = \"/does/not/exist.ms\"").unwrap();
    drop(f);

    let cmd = ms_scatter()
        .args(["scatter-stats", &arg_file.display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("does not exist"), "unexpected stderr: {stderr}");
}
