// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{borrow::Cow, path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use vec1::Vec1;

use super::{InfoPrinter, Warn, NON_POSITIVE_WEIGHTS_HELP};
use crate::{
    io::read::{shapes_are_uniform, MsColumn, MsReadError, MsReader, VisReadError, VisStore, WindowShape},
    params::InputMsParams,
    scatter::{NonPositiveWeights, ScatterOptions, NON_POSITIVE_WEIGHT_POLICIES},
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct InputMsArgs {
    /// Path to the input measurement set.
    #[clap(short, long, help_heading = "INPUT DATA")]
    pub(crate) ms: Option<PathBuf>,

    /// The windows (DATA_DESC_IDs) to use. They are processed in the order
    /// given. The default is to use all windows.
    #[clap(long, multiple_values(true), help_heading = "INPUT DATA")]
    pub(crate) data_desc_ids: Option<Vec<usize>>,

    /// Multiply the sigma derived from the weights by this factor. Use this to
    /// correct weights that are known to be mis-scaled. Default: 1
    #[clap(long, help_heading = "SCATTER")]
    pub(crate) sigma_rescale: Option<f64>,

    /// Keep flagged visibilities.
    #[clap(long, help_heading = "SCATTER")]
    #[serde(default)]
    pub(crate) ignore_flags: bool,

    #[clap(long, help = NON_POSITIVE_WEIGHTS_HELP.as_str(), help_heading = "SCATTER")]
    pub(crate) non_positive_weights: Option<String>,
}

impl InputMsArgs {
    pub(crate) fn merge(self, other: Self) -> Self {
        InputMsArgs {
            ms: self.ms.or(other.ms),
            data_desc_ids: self.data_desc_ids.or(other.data_desc_ids),
            sigma_rescale: self.sigma_rescale.or(other.sigma_rescale),
            ignore_flags: self.ignore_flags || other.ignore_flags,
            non_positive_weights: self.non_positive_weights.or(other.non_positive_weights),
        }
    }

    /// Get the scatter options without touching the measurement set.
    pub(crate) fn parse_scatter_options(&self) -> Result<ScatterOptions, InputMsArgsError> {
        let sigma_rescale = self.sigma_rescale.unwrap_or(1.0);
        if !(sigma_rescale.is_finite() && sigma_rescale > 0.0) {
            return Err(InputMsArgsError::InvalidSigmaRescale(sigma_rescale));
        }
        let non_positive_weights = match self.non_positive_weights.as_deref() {
            None => NonPositiveWeights::default(),
            Some(s) => NonPositiveWeights::from_str(s)
                .map_err(|_| InputMsArgsError::InvalidNonPositiveWeights(s.to_string()))?,
        };

        Ok(ScatterOptions {
            sigma_rescale,
            apply_flags: !self.ignore_flags,
            non_positive_weights,
        })
    }

    pub(crate) fn parse(self, operation_verb: &str) -> Result<InputMsParams, InputMsArgsError> {
        let scatter_options = self.parse_scatter_options()?;
        let InputMsArgs {
            ms, data_desc_ids, ..
        } = self;

        let ms = ms.ok_or(InputMsArgsError::NoMs)?;
        let mut reader = MsReader::new(&ms)?;
        let available = reader.data_desc_ids()?;
        let shapes = reader.window_shapes()?;

        let data_desc_ids = match data_desc_ids {
            // Windows described in DATA_DESCRIPTION but never used by the
            // main table have nothing to plot.
            None => {
                let (used, empty): (Vec<&WindowShape>, Vec<&WindowShape>) =
                    shapes.iter().partition(|s| s.num_rows > 0);
                if !empty.is_empty() {
                    format!(
                        "Skipping DATA_DESC_IDs without any rows: {:?}",
                        empty.iter().map(|s| s.data_desc_id).collect::<Vec<_>>()
                    )
                    .warn();
                }
                used.into_iter().map(|s| s.data_desc_id).collect()
            }
            Some(ids) => {
                if let Some(&bad) = ids.iter().find(|&&id| !available.contains(&id)) {
                    return Err(InputMsArgsError::BadDataDescId {
                        data_desc_id: bad,
                        available,
                    });
                }
                if !ids.iter().all_unique() {
                    return Err(InputMsArgsError::DuplicateDataDescIds(ids));
                }
                ids
            }
        };
        let data_desc_ids =
            Vec1::try_from_vec(data_desc_ids).map_err(|_| InputMsArgsError::NoDataDescIds)?;

        if !reader
            .column_names()
            .iter()
            .any(|c| c == MsColumn::ModelData.name())
        {
            format!(
                "{} has no MODEL_DATA column; the model needs to be generated before scatter can be computed",
                ms.display()
            )
            .warn();
        }
        let uniform = shapes_are_uniform(&shapes);
        debug!("Window shapes: {shapes:?}");

        let mut printer = InfoPrinter::new(format!("{operation_verb} measurement set").into());
        printer.push_line(format!("{}", ms.display()).into());
        printer.push_block(
            shapes
                .iter()
                .filter(|s| data_desc_ids.contains(&s.data_desc_id))
                .map(|s| {
                    Cow::from(format!(
                        "DATA_DESC_ID {}: {} channels, {} polarisations, {} rows",
                        s.data_desc_id, s.num_chans, s.num_pols, s.num_rows
                    ))
                })
                .collect(),
        );
        if !uniform {
            printer.push_line("Windows have different shapes; reading one window at a time".into());
        }
        printer.push_line(
            format!(
                "sigma rescale: {}, flags {}, non-positive weights: {}",
                scatter_options.sigma_rescale,
                if scatter_options.apply_flags {
                    "applied"
                } else {
                    "ignored"
                },
                scatter_options.non_positive_weights
            )
            .into(),
        );
        printer.display();

        let name = ms
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "ms".to_string());

        Ok(InputMsParams {
            store: Box::new(reader),
            name,
            data_desc_ids,
            scatter_options,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum InputMsArgsError {
    #[error("No measurement set was given!")]
    NoMs,

    #[error("DATA_DESC_ID {data_desc_id} is not in the measurement set; available: {available:?}")]
    BadDataDescId {
        data_desc_id: usize,
        available: Vec<usize>,
    },

    #[error("Duplicate DATA_DESC_IDs were specified ({0:?}); this is invalid")]
    DuplicateDataDescIds(Vec<usize>),

    #[error("No DATA_DESC_IDs are being used")]
    NoDataDescIds,

    #[error("The sigma rescale must be positive and finite, but got {0}")]
    InvalidSigmaRescale(f64),

    #[error("Unrecognised non-positive weight policy '{0}'. Valid policies are: {}", *NON_POSITIVE_WEIGHT_POLICIES)]
    InvalidNonPositiveWeights(String),

    #[error(transparent)]
    MsRead(#[from] MsReadError),

    #[error(transparent)]
    VisRead(#[from] VisReadError),
}
