// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{io::Write, path::PathBuf};

use clap::Parser;
use indoc::indoc;
use tempfile::Builder;

use super::*;

#[test]
fn test_merge_arg_file() {
    let mut arg_file = Builder::new().suffix(".toml").tempfile().unwrap();
    arg_file
        .write_all(
            indoc! {r#"
                rescale_tolerance = 0.2
                output = "report.json"

                [input]
                ms = "file.ms"
                ignore_flags = true
            "#}
            .as_bytes(),
        )
        .unwrap();
    let arg_file_path = arg_file.path().display().to_string();

    let merged = ScatterStatsArgs::parse_from([
        "scatter-stats",
        &arg_file_path,
        "--rescale-tolerance",
        "0.05",
    ])
    .merge()
    .unwrap();
    assert_eq!(merged.input_args.ms, Some(PathBuf::from("file.ms")));
    assert!(merged.input_args.ignore_flags);
    assert_eq!(merged.rescale_tolerance, Some(0.05));
    assert_eq!(merged.output, Some(PathBuf::from("report.json")));
}

#[test]
fn test_rescale_tolerance() {
    let args = ScatterStatsArgs::parse_from(["scatter-stats"]);
    assert_eq!(
        args.parse_rescale_tolerance().unwrap(),
        DEFAULT_RESCALE_TOLERANCE
    );

    let args = ScatterStatsArgs {
        rescale_tolerance: Some(-0.1),
        ..Default::default()
    };
    assert!(matches!(
        args.parse_rescale_tolerance(),
        Err(ScatterStatsArgsError::InvalidRescaleTolerance(_))
    ));
}

#[test]
fn test_missing_ms_is_an_error() {
    let args = ScatterStatsArgs::parse_from(["scatter-stats"]);
    assert!(matches!(args.run(true), Err(MsScatterError::VisRead(_))));
}
