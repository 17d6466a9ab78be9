// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{window_progress_bar, InputMsParams};
use crate::plotting::{plot_histogram_data_desc_id, HistogramPlotOptions, ScatterPlotError};

pub(crate) struct ScatterPlotParams {
    pub(crate) input_ms_params: InputMsParams,
    pub(crate) plot_options: HistogramPlotOptions,
    pub(crate) output_directory: PathBuf,
}

impl ScatterPlotParams {
    /// The file a window's histograms are written to.
    pub(crate) fn output_file(&self, data_desc_id: usize) -> PathBuf {
        plot_filename(
            &self.output_directory,
            &self.input_ms_params.name,
            data_desc_id,
        )
    }

    /// Plot every requested window, returning the files written.
    pub(crate) fn run(&mut self) -> Result<Vec<PathBuf>, ScatterPlotError> {
        let output_files: Vec<PathBuf> = self
            .input_ms_params
            .data_desc_ids
            .iter()
            .map(|&id| self.output_file(id))
            .collect();

        if !self.output_directory.exists() {
            debug!(
                "Creating output directory {}",
                self.output_directory.display()
            );
            std::fs::create_dir_all(&self.output_directory)?;
        }

        let Self {
            input_ms_params:
                InputMsParams {
                    store,
                    data_desc_ids,
                    scatter_options,
                    ..
                },
            plot_options,
            ..
        } = self;

        let progress = window_progress_bar(data_desc_ids.len(), "Plotting scatter");
        progress.tick();
        for (&data_desc_id, output) in data_desc_ids.iter().zip(output_files.iter()) {
            let scatter = plot_histogram_data_desc_id(
                store.as_mut(),
                data_desc_id,
                scatter_options,
                plot_options,
                output,
            )?;
            debug!(
                "DATA_DESC_ID {data_desc_id}: plotted {} XX and {} YY values",
                scatter.xx.len(),
                scatter.yy.len()
            );
            progress.inc(1);
        }
        progress.abandon_with_message("Finished plotting");

        for output in &output_files {
            info!("Wrote {}", output.display());
        }
        Ok(output_files)
    }
}

/// `<dir>/<name>_ddid<id>_scatter.png`
pub(crate) fn plot_filename(directory: &Path, name: &str, data_desc_id: usize) -> PathBuf {
    directory.join(format!("{name}_ddid{data_desc_id}_scatter.png"))
}
