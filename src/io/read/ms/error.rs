// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with interacting with CASA measurement sets.

use std::path::PathBuf;

use marlu::rubbl_casatables;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MsReadError {
    #[error("Supplied file path {0} does not exist or is not readable!")]
    BadFile(PathBuf),

    #[error("The main table of the measurement set contains no rows!")]
    MainTableEmpty,

    #[error("The DATA_DESCRIPTION table of the measurement set contains no rows!")]
    NoDataDescriptions,

    #[error("Found a negative DATA_DESC_ID ({0}) in the main table; all must be positive")]
    NegativeDataDescId(i32),

    #[error("DATA_DESC_ID {data_desc_id} was requested, but the DATA_DESCRIPTION table only has {num_data_descs} rows")]
    BadDataDescId {
        data_desc_id: usize,
        num_data_descs: usize,
    },

    #[error("The main table of the measurement set has no {column} column")]
    NoColumn { column: &'static str },

    #[error("MS {array_type} from row {row_index} did not have expected {expected_len} elements on axis {axis_num}!")]
    BadArraySize {
        array_type: &'static str,
        row_index: u64,
        expected_len: usize,
        axis_num: usize,
    },

    #[error("The {table} table refers to row {index} of the {sub_table} table, but that table has only {num_rows} rows")]
    BadSubtableIndex {
        table: &'static str,
        sub_table: &'static str,
        index: i32,
        num_rows: usize,
    },

    #[error("Error when trying to interface with measurement set: {0}")]
    Table(#[from] rubbl_casatables::TableError),

    #[error("Error from casacore: {0}")]
    Casacore(#[from] rubbl_casatables::CasacoreError),
}
