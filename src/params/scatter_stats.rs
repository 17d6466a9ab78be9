// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use log::{debug, info};
use serde::Serialize;

use super::{window_progress_bar, InputMsParams};
use crate::{
    cli::InfoPrinter,
    math::ScatterStats,
    scatter::{compute_scatter, Scatter, ScatterError, ScatterOptions},
};

pub(crate) struct ScatterStatsParams {
    pub(crate) input_ms_params: InputMsParams,

    /// Windows whose suggested sigma rescale differs from 1 by more than this
    /// are reported.
    pub(crate) rescale_tolerance: f64,

    /// Where to write a JSON report, if anywhere.
    pub(crate) output: Option<PathBuf>,
}

/// The statistics of a single window.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct WindowStats {
    pub(crate) data_desc_id: usize,
    pub(crate) xx: ScatterStats,
    pub(crate) yy: ScatterStats,

    /// The statistics of both polarisations together.
    pub(crate) combined: ScatterStats,

    /// The total sigma rescale each polarisation needs, i.e. the suggestion
    /// of its statistics multiplied by the rescale that was already applied.
    pub(crate) xx_sigma_rescale: f64,
    pub(crate) yy_sigma_rescale: f64,

    /// Is the applied sigma rescale off by more than the tolerance?
    pub(crate) mis_scaled: bool,
}

impl WindowStats {
    pub(crate) fn new(
        scatter: &Scatter,
        applied_sigma_rescale: f64,
        rescale_tolerance: f64,
    ) -> WindowStats {
        let xx = ScatterStats::new(scatter.xx.view().iter());
        let yy = ScatterStats::new(scatter.yy.view().iter());
        let combined = ScatterStats::new(scatter.xx.view().iter().chain(scatter.yy.view().iter()));
        WindowStats {
            data_desc_id: scatter.data_desc_id,
            xx,
            yy,
            combined,
            xx_sigma_rescale: xx.suggested_sigma_rescale * applied_sigma_rescale,
            yy_sigma_rescale: yy.suggested_sigma_rescale * applied_sigma_rescale,
            mis_scaled: xx.is_mis_scaled(rescale_tolerance)
                || yy.is_mis_scaled(rescale_tolerance),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ScatterReport {
    pub(crate) name: String,
    pub(crate) scatter_options: ScatterOptions,
    pub(crate) rescale_tolerance: f64,
    pub(crate) windows: Vec<WindowStats>,

    /// The windows whose weights appear to be mis-scaled.
    pub(crate) mis_scaled_data_desc_ids: Vec<usize>,
}

impl ScatterStatsParams {
    pub(crate) fn run(&mut self) -> Result<ScatterReport, ScatterStatsError> {
        let Self {
            input_ms_params:
                InputMsParams {
                    store,
                    name,
                    data_desc_ids,
                    scatter_options,
                },
            rescale_tolerance,
            output,
        } = self;

        let progress = window_progress_bar(data_desc_ids.len(), "Scatter statistics");
        progress.tick();
        let mut windows = Vec::with_capacity(data_desc_ids.len());
        for &data_desc_id in data_desc_ids.iter() {
            let scatter = compute_scatter(store.as_mut(), data_desc_id, scatter_options)?;
            let stats =
                WindowStats::new(&scatter, scatter_options.sigma_rescale, *rescale_tolerance);
            debug!(
                "DATA_DESC_ID {data_desc_id}: suggested sigma rescale {:.4} (XX), {:.4} (YY)",
                stats.xx_sigma_rescale, stats.yy_sigma_rescale
            );
            windows.push(stats);
            progress.inc(1);
        }
        progress.abandon_with_message("Finished statistics");

        let report = ScatterReport {
            name: name.clone(),
            scatter_options: *scatter_options,
            rescale_tolerance: *rescale_tolerance,
            mis_scaled_data_desc_ids: windows
                .iter()
                .filter(|w| w.mis_scaled)
                .map(|w| w.data_desc_id)
                .collect(),
            windows,
        };
        report.display();

        if let Some(output) = output {
            let mut writer = BufWriter::new(File::create(&output)?);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.flush()?;
            info!("Wrote {}", output.display());
        }

        Ok(report)
    }
}

impl ScatterReport {
    fn display(&self) {
        let mut printer = InfoPrinter::new(format!("Scatter statistics for {}", self.name).into());
        printer.push_line(
            format!(
                "sigma rescale {}, flags {}",
                self.scatter_options.sigma_rescale,
                if self.scatter_options.apply_flags {
                    "applied"
                } else {
                    "ignored"
                }
            )
            .into(),
        );
        for w in &self.windows {
            let mut block = vec![format!("DATA_DESC_ID {}", w.data_desc_id).into()];
            for (pol, stats, sigma_rescale) in [
                ("XX", &w.xx, w.xx_sigma_rescale),
                ("YY", &w.yy, w.yy_sigma_rescale),
            ] {
                block.push(
                    format!(
                        "{pol}: {} values ({} not finite), std re {:.4}, std im {:.4}, suggested rescale {:.4}",
                        stats.num_values,
                        stats.num_non_finite,
                        stats.std_re,
                        stats.std_im,
                        sigma_rescale,
                    )
                    .into(),
                );
            }
            printer.push_block(block);
        }
        if self.mis_scaled_data_desc_ids.is_empty() {
            printer.push_line(
                format!(
                    "No windows differ from the expected scatter by more than {}",
                    self.rescale_tolerance
                )
                .into(),
            );
        } else {
            printer.push_line(
                format!(
                    "Windows with mis-scaled weights: {:?}",
                    self.mis_scaled_data_desc_ids
                )
                .into(),
            );
        }
        printer.display();
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ScatterStatsError {
    #[error(transparent)]
    Scatter(#[from] ScatterError),

    #[error("Couldn't write the JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
