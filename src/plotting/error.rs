// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::scatter::ScatterError;

#[derive(Error, Debug)]
pub enum ScatterPlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("ms_scatter was not compiled with the \"plotting\" feature.\nYou need to compile ms_scatter from source with this feature to plot scatter histograms.")]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error("Error from the plotters library: {0}")]
    Draw(#[from] super::DrawError),

    #[error(transparent)]
    Scatter(#[from] ScatterError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
