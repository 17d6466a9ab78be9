// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InputMsArgs, ARG_FILE_HELP};
use crate::{
    constants::{DEFAULT_FIGSIZE, DEFAULT_NUM_BINS},
    params::ScatterPlotParams,
    plotting::HistogramPlotOptions,
    MsScatterError,
};

lazy_static::lazy_static! {
    static ref BINS_HELP: String =
        format!("The number of bins in each histogram. Default: {DEFAULT_NUM_BINS}");

    static ref FIGSIZE_HELP: String =
        format!("The width and height of each figure [inches]. Default: {} {}", DEFAULT_FIGSIZE.0, DEFAULT_FIGSIZE.1);
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ScatterPlotArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "input")]
    #[serde(default)]
    pub(super) input_args: InputMsArgs,

    /// Use a logarithmic density axis.
    #[clap(long, help_heading = "PLOTTING")]
    #[serde(default)]
    pub(super) log: bool,

    #[clap(long, help = BINS_HELP.as_str(), help_heading = "PLOTTING")]
    pub(super) bins: Option<usize>,

    #[clap(
        long,
        number_of_values = 2,
        value_names = &["WIDTH", "HEIGHT"],
        help = FIGSIZE_HELP.as_str(),
        help_heading = "PLOTTING"
    )]
    pub(super) figsize: Option<Vec<f64>>,

    /// The directory to write the plots into. It is created if it doesn't
    /// exist. The default is the current directory.
    #[clap(short, long, help_heading = "OUTPUT FILES")]
    pub(super) output_directory: Option<PathBuf>,
}

impl ScatterPlotArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    pub(super) fn merge(self) -> Result<ScatterPlotArgs, MsScatterError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ScatterPlotArgs {
                args_file: _,
                input_args,
                log,
                bins,
                figsize,
                output_directory,
            } = unpack_arg_file!(arg_file);

            Ok(ScatterPlotArgs {
                args_file: None,
                input_args: cli_args.input_args.merge(input_args),
                log: cli_args.log || log,
                bins: cli_args.bins.or(bins),
                figsize: cli_args.figsize.or(figsize),
                output_directory: cli_args.output_directory.or(output_directory),
            })
        } else {
            Ok(cli_args)
        }
    }

    /// Validate the plotting options without touching any data.
    fn parse_plot_options(&self) -> Result<HistogramPlotOptions, ScatterPlotArgsError> {
        let default = HistogramPlotOptions::default();
        let num_bins = match self.bins {
            None => default.num_bins,
            Some(n) => NonZeroUsize::new(n).ok_or(ScatterPlotArgsError::ZeroBins)?,
        };
        let figsize = match self.figsize.as_deref() {
            None => default.figsize,
            Some(&[w, h]) if [w, h].iter().all(|x| x.is_finite() && *x > 0.0) => (w, h),
            Some(other) => return Err(ScatterPlotArgsError::InvalidFigsize(other.to_vec())),
        };

        Ok(HistogramPlotOptions {
            num_bins,
            figsize,
            log: self.log,
        })
    }

    fn parse(self) -> Result<ScatterPlotParams, MsScatterError> {
        debug!("{:#?}", self);

        let plot_options = self.parse_plot_options()?;
        let Self {
            input_args,
            output_directory,
            ..
        } = self;
        let input_ms_params = input_args.parse("Plotting")?;

        display_warnings();

        Ok(ScatterPlotParams {
            input_ms_params,
            plot_options,
            output_directory: output_directory.unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    #[cfg(not(feature = "plotting"))]
    pub(super) fn run(self, _dry_run: bool) -> Result<(), MsScatterError> {
        // Plotting is an optional feature, because the C dependencies needed
        // for it can't always be satisfied.
        Err(MsScatterError::from(
            crate::plotting::ScatterPlotError::NoPlottingFeature,
        ))
    }

    #[cfg(feature = "plotting")]
    pub(super) fn run(self, dry_run: bool) -> Result<(), MsScatterError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let mut params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let files = params.run()?;
        info!("Wrote {} plot(s)", files.len());
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum ScatterPlotArgsError {
    #[error("The number of histogram bins must be at least 1")]
    ZeroBins,

    #[error("The figure size must be two positive numbers (width and height), but got {0:?}")]
    InvalidFigsize(Vec<f64>),
}
