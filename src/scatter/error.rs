// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from computing visibility scatter.

use thiserror::Error;

use crate::io::read::VisReadError;

#[derive(Error, Debug)]
pub enum ScatterError {
    #[error("MODEL_DATA is empty; the model visibilities need to be generated (e.g. with a predict or ft step) before the scatter can be computed")]
    MissingModelData,

    #[error("DATA_DESC_ID {0} has no visibilities")]
    EmptyWindow(usize),

    #[error("The sigma rescale factor must be positive and finite, but got {0}")]
    InvalidSigmaRescale(f64),

    #[error("Found a non-positive weight ({weight}) for polarisation {pol}, row {row}")]
    NonPositiveWeight { pol: usize, row: usize, weight: f64 },

    #[error("Cannot select XX and YY from visibilities with {0} polarisations; only 2 or 4 are supported")]
    UnsupportedPolCount(usize),

    #[error("The {column} array has shape {got:?}, but {expected:?} was expected")]
    ShapeMismatch {
        column: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("The {0} column was not returned by the visibility store")]
    MissingColumn(&'static str),

    #[error(transparent)]
    VisRead(#[from] VisReadError),
}
