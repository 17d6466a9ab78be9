// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod cli_args;
mod ms_info;
mod scatter_stats;

use std::{
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use marlu::{
    c32,
    rubbl_casatables::{
        GlueDataType, Table, TableCreateMode, TableDesc, TableDescCreateMode,
    },
};
use ndarray::prelude::*;
use tempfile::TempDir;

fn ms_scatter() -> Command {
    Command::cargo_bin("ms-scatter").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// The number of rows in each window of the test measurement set.
const NUM_ROWS: usize = 8;
const NUM_CHANS: usize = 4;
const NUM_POLS: usize = 4;

fn new_table(path: &Path, desc: TableDesc, num_rows: usize) -> Table {
    let mut table = Table::new(path, desc, 0, TableCreateMode::New).unwrap();
    table.add_rows(num_rows).unwrap();
    table
}

/// Write a measurement set with two windows of 4-correlation data. The
/// residuals of each window are `±amplitude` in both real and imaginary parts
/// with unit weights, so a window's scatter has a standard deviation of
/// `amplitude`. Window 0 has amplitude 1 and window 1 amplitude 2.
fn create_test_ms(tmp_dir: &Path) -> PathBuf {
    let ms = tmp_dir.join("test.ms");

    let mut main_desc = TableDesc::new("MAIN", TableDescCreateMode::TDM_SCRATCH).unwrap();
    for col in ["DATA_DESC_ID", "ANTENNA1", "ANTENNA2"] {
        main_desc
            .add_scalar_column(GlueDataType::TpInt, col, None, false, false)
            .unwrap();
    }
    main_desc
        .add_array_column(GlueDataType::TpDouble, "UVW", None, Some(&[3]), false, false)
        .unwrap();
    for col in ["DATA", "MODEL_DATA"] {
        main_desc
            .add_array_column(GlueDataType::TpComplex, col, None, None, false, false)
            .unwrap();
    }
    main_desc
        .add_array_column(GlueDataType::TpFloat, "WEIGHT", None, None, false, false)
        .unwrap();
    main_desc
        .add_array_column(GlueDataType::TpBool, "FLAG", None, None, false, false)
        .unwrap();

    let mut main_table = new_table(&ms, main_desc, 2 * NUM_ROWS);
    for row in 0..2 * NUM_ROWS {
        let row_index = row as u64;
        let data_desc_id = (row / NUM_ROWS) as i32;
        let amplitude = (data_desc_id + 1) as f32;
        let sign = if row % 2 == 0 { 1.0 } else { -1.0 };
        main_table
            .put_cell("DATA_DESC_ID", row_index, &data_desc_id)
            .unwrap();
        main_table.put_cell("ANTENNA1", row_index, &0_i32).unwrap();
        main_table.put_cell("ANTENNA2", row_index, &1_i32).unwrap();
        main_table
            .put_cell("UVW", row_index, &vec![1.0_f64, 2.0, 3.0])
            .unwrap();
        let model = Array2::from_elem((NUM_CHANS, NUM_POLS), c32::new(5.0, 5.0));
        let data = model.mapv(|m| m + c32::new(sign * amplitude, -sign * amplitude));
        main_table.put_cell("DATA", row_index, &data).unwrap();
        main_table.put_cell("MODEL_DATA", row_index, &model).unwrap();
        main_table
            .put_cell("WEIGHT", row_index, &vec![1.0_f32; NUM_POLS])
            .unwrap();
        main_table
            .put_cell("FLAG", row_index, &Array2::from_elem((NUM_CHANS, NUM_POLS), false))
            .unwrap();
    }
    drop(main_table);

    let mut desc = TableDesc::new("DATA_DESCRIPTION", TableDescCreateMode::TDM_SCRATCH).unwrap();
    for col in ["SPECTRAL_WINDOW_ID", "POLARIZATION_ID"] {
        desc.add_scalar_column(GlueDataType::TpInt, col, None, false, false)
            .unwrap();
    }
    let mut table = new_table(&ms.join("DATA_DESCRIPTION"), desc, 2);
    for i in 0..2 {
        table
            .put_cell("SPECTRAL_WINDOW_ID", i as u64, &(i as i32))
            .unwrap();
        table.put_cell("POLARIZATION_ID", i as u64, &0_i32).unwrap();
    }
    drop(table);

    let mut desc = TableDesc::new("SPECTRAL_WINDOW", TableDescCreateMode::TDM_SCRATCH).unwrap();
    desc.add_scalar_column(GlueDataType::TpInt, "NUM_CHAN", None, false, false)
        .unwrap();
    let mut table = new_table(&ms.join("SPECTRAL_WINDOW"), desc, 2);
    for i in 0..2 {
        table
            .put_cell("NUM_CHAN", i as u64, &(NUM_CHANS as i32))
            .unwrap();
    }
    drop(table);

    let mut desc = TableDesc::new("POLARIZATION", TableDescCreateMode::TDM_SCRATCH).unwrap();
    desc.add_scalar_column(GlueDataType::TpInt, "NUM_CORR", None, false, false)
        .unwrap();
    let mut table = new_table(&ms.join("POLARIZATION"), desc, 1);
    table
        .put_cell("NUM_CORR", 0, &(NUM_POLS as i32))
        .unwrap();
    drop(table);

    ms
}

/// A temporary directory holding the test measurement set.
fn test_ms() -> (TempDir, String) {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let ms = create_test_ms(tmp_dir.path());
    let ms = ms.display().to_string();
    (tmp_dir, ms)
}
