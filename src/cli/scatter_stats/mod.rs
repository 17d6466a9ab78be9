// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InputMsArgs, ARG_FILE_HELP};
use crate::{constants::DEFAULT_RESCALE_TOLERANCE, params::ScatterStatsParams, MsScatterError};

lazy_static::lazy_static! {
    static ref RESCALE_TOLERANCE_HELP: String =
        format!("A window's weights are reported as mis-scaled when the sigma rescale suggested by its scatter differs from 1 by more than this. Default: {DEFAULT_RESCALE_TOLERANCE}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ScatterStatsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "input")]
    #[serde(default)]
    pub(super) input_args: InputMsArgs,

    #[clap(long, help = RESCALE_TOLERANCE_HELP.as_str(), help_heading = "STATISTICS")]
    pub(super) rescale_tolerance: Option<f64>,

    /// Also write the statistics to this JSON file.
    #[clap(short, long, help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl ScatterStatsArgs {
    /// Consolidate the command-line arguments with those in the argument
    /// file, preferring the CLI parameters.
    pub(super) fn merge(self) -> Result<ScatterStatsArgs, MsScatterError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ScatterStatsArgs {
                args_file: _,
                input_args,
                rescale_tolerance,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(ScatterStatsArgs {
                args_file: None,
                input_args: cli_args.input_args.merge(input_args),
                rescale_tolerance: cli_args.rescale_tolerance.or(rescale_tolerance),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse_rescale_tolerance(&self) -> Result<f64, ScatterStatsArgsError> {
        match self.rescale_tolerance {
            None => Ok(DEFAULT_RESCALE_TOLERANCE),
            Some(t) if t.is_finite() && t >= 0.0 => Ok(t),
            Some(t) => Err(ScatterStatsArgsError::InvalidRescaleTolerance(t)),
        }
    }

    fn parse(self) -> Result<ScatterStatsParams, MsScatterError> {
        debug!("{:#?}", self);

        let rescale_tolerance = self.parse_rescale_tolerance()?;
        let Self {
            input_args, output, ..
        } = self;
        let input_ms_params = input_args.parse("Summarising")?;

        display_warnings();

        Ok(ScatterStatsParams {
            input_ms_params,
            rescale_tolerance,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), MsScatterError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let mut params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum ScatterStatsArgsError {
    #[error("The rescale tolerance must be non-negative and finite, but got {0}")]
    InvalidRescaleTolerance(f64),
}
