// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics: the reference Gaussian, histogram binning and
//! scatter statistics.

#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use marlu::c64;
use ndarray::Array1;
use serde::Serialize;

use crate::constants::{GAUSSIAN_OVERLAY_DOMAIN, GAUSSIAN_OVERLAY_NUM_POINTS, TAU};

/// The standard normal probability density function, evaluated at `x`.
///
/// # Examples
///
/// `assert_abs_diff_eq!(gaussian(0.0), 0.3989423, epsilon = 1e-7);`
#[inline]
pub fn gaussian(x: f64) -> f64 {
    (-0.5 * x * x).exp() / TAU.sqrt()
}

/// The points of the reference Gaussian drawn over every scatter histogram.
/// The x values are evenly spaced over [`GAUSSIAN_OVERLAY_DOMAIN`], endpoints
/// included.
pub fn gaussian_overlay() -> Vec<(f64, f64)> {
    let (start, end) = GAUSSIAN_OVERLAY_DOMAIN;
    Array1::linspace(start, end, GAUSSIAN_OVERLAY_NUM_POINTS)
        .into_iter()
        .map(|x| (x, gaussian(x)))
        .collect()
}

/// A histogram with equal-width bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges; there is one more edge than there are bins.
    pub edges: Vec<f64>,

    /// The number of values that fell in each bin.
    pub counts: Vec<usize>,

    /// The counts normalised such that the histogram integrates to 1.
    pub densities: Vec<f64>,

    /// The number of values that couldn't be binned because they were NaN or
    /// infinite.
    pub num_non_finite: usize,
}

impl Histogram {
    /// Bin the finite `values` into `num_bins` bins spanning the smallest and
    /// largest finite values. If every value is the same, the range is widened
    /// by 0.5 either side. The last bin includes its right edge.
    ///
    /// `None` is returned if there are no finite values.
    pub fn new<I>(values: I, num_bins: NonZeroUsize) -> Option<Histogram>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut num_non_finite = 0;
        let finite: Vec<f64> = values
            .into_iter()
            .filter(|v| {
                if v.is_finite() {
                    true
                } else {
                    num_non_finite += 1;
                    false
                }
            })
            .collect();
        if finite.is_empty() {
            return None;
        }

        let (min, max) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });
        let (min, max) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let num_bins = num_bins.get();
        let width = (max - min) / num_bins as f64;
        let edges: Vec<f64> = (0..=num_bins)
            .map(|i| {
                if i == num_bins {
                    max
                } else {
                    min + i as f64 * width
                }
            })
            .collect();

        let mut counts = vec![0; num_bins];
        for v in &finite {
            let i_bin = (((v - min) / width) as usize).min(num_bins - 1);
            counts[i_bin] += 1;
        }

        let total = finite.len() as f64;
        let densities = counts
            .iter()
            .zip(edges.windows(2))
            .map(|(&count, edge)| count as f64 / (total * (edge[1] - edge[0])))
            .collect();

        Some(Histogram {
            edges,
            counts,
            densities,
            num_non_finite,
        })
    }

    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Iterate over `(left edge, right edge, density)` for each bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(self.densities.iter())
            .map(|(edge, &density)| (edge[0], edge[1], density))
    }

    /// The largest density of any bin.
    pub fn max_density(&self) -> f64 {
        self.densities.iter().copied().fold(0.0, f64::max)
    }

    /// The smallest non-zero density of any bin, if there is one. Useful for
    /// the lower limit of a log-scaled axis.
    pub fn min_nonzero_density(&self) -> Option<f64> {
        self.densities
            .iter()
            .copied()
            .filter(|&d| d > 0.0)
            .reduce(f64::min)
    }
}

/// Summary statistics of a set of (complex) scatter values. Only finite
/// values contribute to the means and standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterStats {
    /// The total number of values, including non-finite ones.
    pub num_values: usize,

    /// The number of values with a NaN or infinite component.
    pub num_non_finite: usize,

    pub mean_re: f64,
    pub std_re: f64,
    pub mean_im: f64,
    pub std_im: f64,

    /// If the weights describe the scatter correctly, the real and imaginary
    /// parts of the scatter are standard normal. This is the factor sigma
    /// would need to be multiplied by for that to be true, i.e. the RMS of
    /// the real and imaginary standard deviations. It is relative to whatever
    /// sigma rescale the scatter was computed with.
    pub suggested_sigma_rescale: f64,
}

impl ScatterStats {
    pub fn new<'a, I>(values: I) -> ScatterStats
    where
        I: IntoIterator<Item = &'a c64>,
    {
        let mut num_values = 0;
        let mut num_finite = 0;
        let mut sum = c64::new(0.0, 0.0);
        let mut finite = vec![];
        for v in values {
            num_values += 1;
            if v.is_finite() {
                num_finite += 1;
                sum += v;
                finite.push(*v);
            }
        }

        if num_finite == 0 {
            return ScatterStats {
                num_values,
                num_non_finite: num_values,
                mean_re: f64::NAN,
                std_re: f64::NAN,
                mean_im: f64::NAN,
                std_im: f64::NAN,
                suggested_sigma_rescale: f64::NAN,
            };
        }

        let n = num_finite as f64;
        let mean = sum / n;
        let (var_re, var_im) = finite.iter().fold((0.0, 0.0), |(acc_re, acc_im), v| {
            let d = v - mean;
            (acc_re + d.re * d.re, acc_im + d.im * d.im)
        });
        let var_re = var_re / n;
        let var_im = var_im / n;

        ScatterStats {
            num_values,
            num_non_finite: num_values - num_finite,
            mean_re: mean.re,
            std_re: var_re.sqrt(),
            mean_im: mean.im,
            std_im: var_im.sqrt(),
            suggested_sigma_rescale: ((var_re + var_im) / 2.0).sqrt(),
        }
    }

    /// Does the scatter suggest that sigma is mis-scaled by more than
    /// `tolerance`? Statistics without any finite values never do.
    pub fn is_mis_scaled(&self, tolerance: f64) -> bool {
        (self.suggested_sigma_rescale - 1.0).abs() > tolerance
    }
}
