// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::num::NonZeroUsize;

use criterion::*;
use marlu::c64;
use ndarray::prelude::*;

use ms_scatter::{
    compute_scatter, scatter_from_window, Histogram, MemoryStore, NonPositiveWeights,
    ScatterOptions, WindowData,
};

/// A window the size of a single MWA coarse channel of cross-correlations for
/// one timestep.
fn window(num_pols: usize) -> WindowData {
    let (num_chans, num_rows) = (32, 8128);
    let shape = (num_pols, num_chans, num_rows);
    WindowData {
        data: Some(Array3::from_shape_fn(shape, |(p, c, r)| {
            c64::new((p + c) as f64, r as f64)
        })),
        model_data: Some(Array3::from_shape_fn(shape, |(p, c, r)| {
            c64::new((p + c) as f64 - 0.5, r as f64 + 0.5)
        })),
        weight: Some(Array2::from_shape_fn((num_pols, num_rows), |(p, r)| {
            (p + r % 7) as f64
        })),
        flag: Some(Array3::from_shape_fn(shape, |(_, c, _)| c == 0)),
        ..WindowData::new(0)
    }
}

fn scatter(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter");
    for num_pols in [2, 4] {
        let w = window(num_pols);
        group.bench_function(BenchmarkId::new("flagged", num_pols), |b| {
            b.iter(|| scatter_from_window(&w, &ScatterOptions::default()))
        });
        let options = ScatterOptions {
            apply_flags: false,
            non_positive_weights: NonPositiveWeights::Flag,
            ..Default::default()
        };
        group.bench_function(BenchmarkId::new("unflagged", num_pols), |b| {
            b.iter(|| scatter_from_window(&w, &options))
        });
    }
    group.finish();

    let mut store: MemoryStore = [window(4)].into_iter().collect();
    c.bench_function("compute_scatter from memory", |b| {
        b.iter(|| compute_scatter(&mut store, 0, &ScatterOptions::default()))
    });
}

fn histogram(c: &mut Criterion) {
    let scatter = scatter_from_window(&window(4), &ScatterOptions::default()).unwrap();
    let values = scatter.xx.flatten();
    let num_bins = NonZeroUsize::new(40).unwrap();
    c.bench_function("histogram of real parts", |b| {
        b.iter(|| Histogram::new(values.iter().map(|v| v.re), num_bins))
    });
}

criterion_group!(benches, scatter, histogram);
criterion_main!(benches);
