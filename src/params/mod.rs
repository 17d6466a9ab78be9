// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for each of the `ms-scatter` subcommands.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly.

mod scatter_plot;
mod scatter_stats;

pub(crate) use scatter_plot::ScatterPlotParams;
pub(crate) use scatter_stats::{ScatterStatsError, ScatterStatsParams};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use vec1::Vec1;

use crate::{io::read::VisStore, scatter::ScatterOptions, PROGRESS_BARS};

/// The visibilities to compute scatter for, and how.
pub(crate) struct InputMsParams {
    pub(crate) store: Box<dyn VisStore>,

    /// Used to name outputs; this is normally the file stem of the
    /// measurement set.
    pub(crate) name: String,

    /// The windows to use, in the order they'll be processed.
    pub(crate) data_desc_ids: Vec1<usize>,

    pub(crate) scatter_options: ScatterOptions,
}

/// A progress bar that counts windows.
pub(super) fn window_progress_bar(num_windows: usize, message: &'static str) -> ProgressBar {
    ProgressBar::with_draw_target(
        Some(num_windows as _),
        if PROGRESS_BARS.load() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_style(
        ProgressStyle::default_bar()
            .template("{msg:18}: [{wide_bar:.blue}] {pos:2}/{len:2} windows ({elapsed_precise}<{eta_precise})").unwrap()
            .progress_chars("=> "),
    )
    .with_position(0)
    .with_message(message)
}
