// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Visibility residuals normalised by the noise implied by their weights.
//!
//! If the weights of a measurement set are correct, then the "scatter"
//! `(data - model) * sqrt(weight)` of each polarisation should be distributed
//! like a standard normal.

mod error;

pub use error::ScatterError;

use itertools::Itertools;
use log::{debug, trace, warn};
use marlu::c64;
use ndarray::{prelude::*, Zip};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::io::read::{MsColumn, VisStore, WindowData};

lazy_static::lazy_static! {
    pub(crate) static ref NON_POSITIVE_WEIGHT_POLICIES: String = NonPositiveWeights::iter().join(", ");
}

/// The columns read for each window. UVWs and antennas aren't needed for the
/// arithmetic, but come along with the visibilities.
pub const SCATTER_COLUMNS: [MsColumn; 7] = [
    MsColumn::Data,
    MsColumn::ModelData,
    MsColumn::Weight,
    MsColumn::Uvw,
    MsColumn::Antenna1,
    MsColumn::Antenna2,
    MsColumn::Flag,
];

/// What to do with weights that are zero or negative. These give a
/// non-finite sigma.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum NonPositiveWeights {
    /// Let the non-finite scatter through to the histograms.
    #[default]
    #[strum(serialize = "propagate")]
    Propagate,

    /// Fail on the first non-positive weight.
    #[strum(serialize = "error")]
    Error,

    /// Treat the affected visibilities as flagged.
    #[strum(serialize = "flag")]
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterOptions {
    /// The factor multiplying the sigma derived from the weights.
    pub sigma_rescale: f64,

    /// Discard flagged visibilities? If so, the scatter of each polarisation
    /// is flattened.
    pub apply_flags: bool,

    pub non_positive_weights: NonPositiveWeights,
}

impl Default for ScatterOptions {
    fn default() -> ScatterOptions {
        ScatterOptions {
            sigma_rescale: 1.0,
            apply_flags: true,
            non_positive_weights: NonPositiveWeights::default(),
        }
    }
}

/// The scatter of a single polarisation.
#[derive(Debug, Clone, PartialEq)]
pub enum PolScatter {
    /// Flags were applied; only unflagged values remain.
    Flagged(Array1<c64>),

    /// Flags were ignored. The dimensions are `[chan, row]`.
    Unflagged(Array2<c64>),
}

impl PolScatter {
    /// A one-dimensional copy of the scatter values.
    pub fn flatten(&self) -> Array1<c64> {
        match self {
            PolScatter::Flagged(a) => a.clone(),
            PolScatter::Unflagged(a) => a.iter().copied().collect(),
        }
    }

    pub fn view(&self) -> ArrayViewD<c64> {
        match self {
            PolScatter::Flagged(a) => a.view().into_dyn(),
            PolScatter::Unflagged(a) => a.view().into_dyn(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PolScatter::Flagged(a) => a.len(),
            PolScatter::Unflagged(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The scatter of the XX and YY polarisations of a window.
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub data_desc_id: usize,
    pub xx: PolScatter,
    pub yy: PolScatter,
}

/// Get the indices of the XX and YY polarisations.
pub fn pol_indices(num_pols: usize) -> Result<(usize, usize), ScatterError> {
    match num_pols {
        2 => Ok((0, 1)),
        4 => Ok((0, 3)),
        n => Err(ScatterError::UnsupportedPolCount(n)),
    }
}

/// Convert `[pol, row]` weights into sigmas. Non-positive weights are not
/// treated specially; they give infinite or NaN sigmas.
pub fn sigma_from_weights(weight: ArrayView2<f64>, sigma_rescale: f64) -> Array2<f64> {
    weight.mapv(|w| (1.0 / w).sqrt() * sigma_rescale)
}

/// Read a window from the store and compute its scatter.
pub fn compute_scatter<S: VisStore + ?Sized>(
    store: &mut S,
    data_desc_id: usize,
    options: &ScatterOptions,
) -> Result<Scatter, ScatterError> {
    debug!("Computing the scatter of DATA_DESC_ID {data_desc_id}");
    let window = store.read_window(data_desc_id, &SCATTER_COLUMNS)?;
    scatter_from_window(&window, options)
}

/// Compute the scatter of a window that has already been read.
pub fn scatter_from_window(
    window: &WindowData,
    options: &ScatterOptions,
) -> Result<Scatter, ScatterError> {
    if !(options.sigma_rescale.is_finite() && options.sigma_rescale > 0.0) {
        return Err(ScatterError::InvalidSigmaRescale(options.sigma_rescale));
    }

    let data = window
        .data
        .as_ref()
        .ok_or(ScatterError::MissingColumn(MsColumn::Data.name()))?;
    let model = window
        .model_data
        .as_ref()
        .ok_or(ScatterError::MissingColumn(MsColumn::ModelData.name()))?;
    // A window without rows has nothing to compare, whatever its model holds.
    if data.is_empty() {
        return Err(ScatterError::EmptyWindow(window.data_desc_id));
    }
    if model.is_empty() {
        return Err(ScatterError::MissingModelData);
    }
    let weight = window
        .weight
        .as_ref()
        .ok_or(ScatterError::MissingColumn(MsColumn::Weight.name()))?;
    let flag = window
        .flag
        .as_ref()
        .ok_or(ScatterError::MissingColumn(MsColumn::Flag.name()))?;

    let (num_pols, num_chans, num_rows) = data.dim();
    for (column, shape) in [
        (MsColumn::ModelData, model.shape()),
        (MsColumn::Flag, flag.shape()),
    ] {
        if shape != data.shape() {
            return Err(ScatterError::ShapeMismatch {
                column: column.name(),
                expected: data.shape().to_vec(),
                got: shape.to_vec(),
            });
        }
    }
    if weight.dim() != (num_pols, num_rows) {
        return Err(ScatterError::ShapeMismatch {
            column: MsColumn::Weight.name(),
            expected: vec![num_pols, num_rows],
            got: weight.shape().to_vec(),
        });
    }
    let (xx_index, yy_index) = pol_indices(num_pols)?;
    trace!("{num_pols} pols, {num_chans} chans, {num_rows} rows; using pols {xx_index} and {yy_index}");

    let mut flag = flag.clone();
    let num_non_positive = weight.iter().filter(|&&w| w <= 0.0).count();
    if num_non_positive > 0 {
        match options.non_positive_weights {
            NonPositiveWeights::Propagate => warn!(
                "DATA_DESC_ID {}: {num_non_positive} weights are not positive; their scatter will not be finite",
                window.data_desc_id
            ),

            NonPositiveWeights::Error => {
                if let Some(((pol, row), &w)) = weight.indexed_iter().find(|(_, &w)| w <= 0.0) {
                    return Err(ScatterError::NonPositiveWeight {
                        pol,
                        row,
                        weight: w,
                    });
                }
            }

            NonPositiveWeights::Flag => {
                debug!(
                    "DATA_DESC_ID {}: flagging visibilities with {num_non_positive} non-positive weights",
                    window.data_desc_id
                );
                Zip::from(&mut flag)
                    .and_broadcast(weight.view().insert_axis(Axis(1)))
                    .for_each(|f, &w| *f |= w <= 0.0);
            }
        }
    }

    let sigma = sigma_from_weights(weight.view(), options.sigma_rescale);
    let pol_scatter = |pol: usize| {
        let mut scatter = &data.index_axis(Axis(0), pol) - &model.index_axis(Axis(0), pol);
        Zip::from(&mut scatter)
            .and_broadcast(sigma.row(pol))
            .for_each(|s, &sigma| *s /= sigma);

        if options.apply_flags {
            let flag = flag.index_axis(Axis(0), pol);
            let unflagged: Array1<c64> = scatter
                .iter()
                .zip(flag.iter())
                .filter(|(_, &f)| !f)
                .map(|(&s, _)| s)
                .collect();
            trace!(
                "pol {pol}: kept {} of {} visibilities",
                unflagged.len(),
                scatter.len()
            );
            PolScatter::Flagged(unflagged)
        } else {
            PolScatter::Unflagged(scatter)
        }
    };

    Ok(Scatter {
        data_desc_id: window.data_desc_id,
        xx: pol_scatter(xx_index),
        yy: pol_scatter(yy_index),
    })
}
