// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_gaussian() {
    assert_abs_diff_eq!(gaussian(0.0), 0.3989423, epsilon = 1e-7);
    assert_abs_diff_eq!(gaussian(0.0), 1.0 / (2.0 * std::f64::consts::PI).sqrt());
    assert_abs_diff_eq!(gaussian(1.0), 0.24197072, epsilon = 1e-8);
    assert_abs_diff_eq!(gaussian(-2.5), gaussian(2.5));
    assert!(gaussian(1.0) < gaussian(0.5));
}

#[test]
fn test_gaussian_overlay() {
    let overlay = gaussian_overlay();
    assert_eq!(overlay.len(), 50);
    assert_abs_diff_eq!(overlay[0].0, -5.0);
    assert_abs_diff_eq!(overlay[49].0, 5.0);
    for &(x, y) in &overlay {
        assert_abs_diff_eq!(y, gaussian(x));
    }
    // 50 points means 0 is not sampled, but the two points either side of it
    // are symmetric.
    assert_abs_diff_eq!(overlay[24].1, overlay[25].1, epsilon = 1e-12);
}

#[test]
fn test_histogram_counts_and_edges() {
    let values = [0.0, 1.0, 1.5, 2.0, 3.0, 4.0];
    let hist = Histogram::new(values, nz(4)).unwrap();
    assert_eq!(hist.num_bins(), 4);
    assert_eq!(hist.edges.len(), 5);
    assert_abs_diff_eq!(hist.edges[0], 0.0);
    assert_abs_diff_eq!(hist.edges[2], 2.0);
    assert_abs_diff_eq!(hist.edges[4], 4.0);
    // The last bin is closed on its right, so 4.0 lands in it.
    assert_eq!(hist.counts, vec![1, 2, 1, 2]);
    assert_eq!(hist.num_non_finite, 0);
}

#[test]
fn test_histogram_density_integrates_to_one() {
    let values: Vec<f64> = (0..1000).map(|i| ((i * 37) % 101) as f64 / 7.0).collect();
    let hist = Histogram::new(values, nz(40)).unwrap();
    let integral: f64 = hist.bins().map(|(l, r, d)| (r - l) * d).sum();
    assert_abs_diff_eq!(integral, 1.0, epsilon = 1e-10);
    assert_eq!(hist.counts.iter().sum::<usize>(), 1000);
}

#[test]
fn test_histogram_of_constant_values() {
    let hist = Histogram::new([2.0; 5], nz(2)).unwrap();
    assert_abs_diff_eq!(hist.edges[0], 1.5);
    assert_abs_diff_eq!(hist.edges[2], 2.5);
    // 2.0 is exactly the middle edge, so it belongs to the second bin.
    assert_eq!(hist.counts, vec![0, 5]);
    assert_abs_diff_eq!(hist.densities[1], 2.0);
}

#[test]
fn test_histogram_ignores_non_finite_values() {
    let values = [f64::NAN, -1.0, f64::INFINITY, 1.0, f64::NEG_INFINITY];
    let hist = Histogram::new(values, nz(2)).unwrap();
    assert_eq!(hist.num_non_finite, 3);
    assert_eq!(hist.counts, vec![1, 1]);
    assert_abs_diff_eq!(hist.max_density(), 0.5);
}

#[test]
fn test_histogram_of_nothing() {
    assert!(Histogram::new(std::iter::empty(), nz(10)).is_none());
    assert!(Histogram::new([f64::NAN], nz(10)).is_none());
}

#[test]
fn test_min_nonzero_density() {
    let hist = Histogram::new([0.0, 0.1, 0.2, 10.0], nz(10)).unwrap();
    let min = hist.min_nonzero_density().unwrap();
    assert_abs_diff_eq!(min, 1.0 / (4.0 * 1.0));
    assert!(hist.densities.contains(&0.0));
}

#[test]
fn test_scatter_stats() {
    let values = [
        c64::new(1.0, 2.0),
        c64::new(-1.0, -2.0),
        c64::new(1.0, 2.0),
        c64::new(-1.0, -2.0),
    ];
    let stats = ScatterStats::new(&values);
    assert_eq!(stats.num_values, 4);
    assert_eq!(stats.num_non_finite, 0);
    assert_abs_diff_eq!(stats.mean_re, 0.0);
    assert_abs_diff_eq!(stats.mean_im, 0.0);
    assert_abs_diff_eq!(stats.std_re, 1.0);
    assert_abs_diff_eq!(stats.std_im, 2.0);
    assert_abs_diff_eq!(stats.suggested_sigma_rescale, 2.5_f64.sqrt());
    assert!(stats.is_mis_scaled(0.1));
}

#[test]
fn test_scatter_stats_unit_variance() {
    let values = [c64::new(1.0, -1.0), c64::new(-1.0, 1.0)];
    let stats = ScatterStats::new(&values);
    assert_abs_diff_eq!(stats.suggested_sigma_rescale, 1.0);
    assert!(!stats.is_mis_scaled(0.1));
}

#[test]
fn test_scatter_stats_skips_non_finite() {
    let values = [
        c64::new(f64::INFINITY, 0.0),
        c64::new(3.0, 1.0),
        c64::new(f64::NAN, f64::NAN),
        c64::new(1.0, -1.0),
    ];
    let stats = ScatterStats::new(&values);
    assert_eq!(stats.num_values, 4);
    assert_eq!(stats.num_non_finite, 2);
    assert_abs_diff_eq!(stats.mean_re, 2.0);
    assert_abs_diff_eq!(stats.std_re, 1.0);
    assert_abs_diff_eq!(stats.std_im, 1.0);
}

#[test]
fn test_scatter_stats_all_non_finite() {
    let values = [c64::new(f64::NAN, 0.0)];
    let stats = ScatterStats::new(&values);
    assert_eq!(stats.num_non_finite, 1);
    assert!(stats.suggested_sigma_rescale.is_nan());
    assert!(!stats.is_mis_scaled(0.1));
}
