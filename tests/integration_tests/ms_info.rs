// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serial_test::serial;

use crate::{get_cmd_output, ms_scatter, test_ms};

#[test]
#[serial]
fn test_ms_info() {
    let (_tmp_dir, ms) = test_ms();

    let cmd = ms_scatter().args(["ms-info", &ms]).ok();
    assert!(cmd.is_ok(), "ms-info failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.contains("MODEL_DATA"), "{stdout}");
    assert!(stdout.contains("Spectral window IDs: [0, 1]"), "{stdout}");
    assert!(
        stdout.contains("DATA_DESC_ID 1: SPW 1, POLARIZATION 0, 4 channels, 4 polarisations, 8 rows"),
        "{stdout}"
    );
    assert!(stdout.contains("All windows have the same shape"), "{stdout}");
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_ms_info_missing_ms() {
    let cmd = ms_scatter().args(["ms-info", "/does/not/exist.ms"]).ok();
    assert!(cmd.is_err());
}
