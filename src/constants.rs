// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Visibilities and weights are read in
single precision, but everything derived from them is calculated in double
precision.
 */

pub use std::f64::consts::{PI, SQRT_2, TAU};

/// The default number of histogram bins per panel.
pub const DEFAULT_NUM_BINS: usize = 40;

/// The lower and upper bounds of the reference Gaussian drawn over each
/// histogram [sigma].
pub const GAUSSIAN_OVERLAY_DOMAIN: (f64, f64) = (-5.0, 5.0);

/// The number of points used to draw the reference Gaussian.
pub const GAUSSIAN_OVERLAY_NUM_POINTS: usize = 50;

/// The default figure width and height [inches].
pub const DEFAULT_FIGSIZE: (f64, f64) = (6.0, 6.0);

/// Pixels per inch of the rendered figures.
pub const FIGURE_DPI: f64 = 100.0;

/// If a window's suggested sigma rescale differs from 1 by more than this
/// amount, its weights are reported as mis-scaled.
pub const DEFAULT_RESCALE_TOLERANCE: f64 = 0.1;
