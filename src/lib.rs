// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Compare the residual scatter of radio-interferometric visibilities in CASA
measurement sets against the scatter expected from their weights.

If the weights are right, `(DATA - MODEL_DATA) / sigma` (with `sigma =
1/sqrt(WEIGHT)`) should follow a standard normal distribution in both its
real and imaginary parts.
 */

pub mod constants;
pub mod io;
pub mod math;
pub mod plotting;
pub mod scatter;

mod cli;
mod params;

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? This should only ever be enabled by CLI
/// code.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

// Re-exports.
pub use cli::{MsScatter, MsScatterError};
pub use io::read::{
    shapes_are_uniform, MemoryStore, MsColumn, MsReadError, MsReader, Selection, VisReadError,
    VisStore, WindowData, WindowShape,
};
pub use math::{gaussian, gaussian_overlay, Histogram, ScatterStats};
pub use plotting::{
    plot_histogram_data_desc_id, scatter_hist, window_title, HistogramPlotOptions,
    ScatterPlotError,
};
pub use scatter::{
    compute_scatter, scatter_from_window, NonPositiveWeights, PolScatter, Scatter, ScatterError,
    ScatterOptions,
};
