// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all ms-scatter-related errors. This should be the *only*
//! error enum that is publicly visible from the command-line interface.

use thiserror::Error;

use super::{
    common::InputMsArgsError, scatter_plot::ScatterPlotArgsError,
    scatter_stats::ScatterStatsArgsError,
};
use crate::{
    io::read::{MsReadError, VisReadError},
    params::ScatterStatsError,
    plotting::ScatterPlotError,
    scatter::ScatterError,
};

/// The *only* publicly visible error from the ms-scatter binary.
#[derive(Error, Debug)]
pub enum MsScatterError {
    /// An error related to computing scatter.
    #[error("{0}")]
    Scatter(String),

    /// An error related to scatter-plot.
    #[error("{0}")]
    ScatterPlot(String),

    /// An error related to scatter-stats.
    #[error("{0}")]
    ScatterStats(String),

    /// An error related to reading measurement sets.
    #[error("{0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv).")]
    VisRead(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<InputMsArgsError> for MsScatterError {
    fn from(e: InputMsArgsError) -> Self {
        match e {
            InputMsArgsError::MsRead(e) => Self::from(e),
            InputMsArgsError::VisRead(e) => Self::from(e),
            InputMsArgsError::InvalidSigmaRescale(_)
            | InputMsArgsError::InvalidNonPositiveWeights(_) => Self::Scatter(e.to_string()),
            InputMsArgsError::NoMs
            | InputMsArgsError::BadDataDescId { .. }
            | InputMsArgsError::DuplicateDataDescIds(_)
            | InputMsArgsError::NoDataDescIds => Self::VisRead(e.to_string()),
        }
    }
}

impl From<ScatterPlotArgsError> for MsScatterError {
    fn from(e: ScatterPlotArgsError) -> Self {
        Self::ScatterPlot(e.to_string())
    }
}

impl From<ScatterStatsArgsError> for MsScatterError {
    fn from(e: ScatterStatsArgsError) -> Self {
        Self::ScatterStats(e.to_string())
    }
}

// Library code errors.

impl From<ScatterError> for MsScatterError {
    fn from(e: ScatterError) -> Self {
        match e {
            ScatterError::VisRead(e) => Self::from(e),
            _ => Self::Scatter(e.to_string()),
        }
    }
}

impl From<ScatterPlotError> for MsScatterError {
    fn from(e: ScatterPlotError) -> Self {
        match e {
            ScatterPlotError::Scatter(e) => Self::from(e),
            ScatterPlotError::IO(e) => Self::from(e),
            _ => Self::ScatterPlot(e.to_string()),
        }
    }
}

impl From<ScatterStatsError> for MsScatterError {
    fn from(e: ScatterStatsError) -> Self {
        match e {
            ScatterStatsError::Scatter(e) => Self::from(e),
            ScatterStatsError::IO(e) => Self::from(e),
            ScatterStatsError::Json(_) => Self::ScatterStats(e.to_string()),
        }
    }
}

impl From<VisReadError> for MsScatterError {
    fn from(e: VisReadError) -> Self {
        Self::VisRead(e.to_string())
    }
}

impl From<MsReadError> for MsScatterError {
    fn from(e: MsReadError) -> Self {
        Self::VisRead(e.to_string())
    }
}

impl From<std::io::Error> for MsScatterError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
