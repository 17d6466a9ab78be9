// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to plot histograms of visibility scatter.
//!
//! Each figure is a 2x2 grid; the rows are the XX and YY polarisations and
//! the columns are the real and imaginary parts of the scatter. Every panel
//! is a density histogram overlaid with the standard normal distribution,
//! which is what the scatter should look like if the weights are right.

mod error;

pub use error::ScatterPlotError;

use std::{num::NonZeroUsize, path::Path};

use log::{debug, warn};
use marlu::c64;
use ndarray::{ArrayBase, Data, Dimension};

use crate::{
    constants::{DEFAULT_FIGSIZE, DEFAULT_NUM_BINS, FIGURE_DPI, GAUSSIAN_OVERLAY_DOMAIN},
    io::read::VisStore,
    math::{gaussian, Histogram},
    scatter::{compute_scatter, Scatter, ScatterOptions},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramPlotOptions {
    /// The number of bins in each histogram.
    pub num_bins: NonZeroUsize,

    /// The width and height of the figure [inches].
    pub figsize: (f64, f64),

    /// Use a logarithmic density axis?
    pub log: bool,
}

impl Default for HistogramPlotOptions {
    fn default() -> HistogramPlotOptions {
        HistogramPlotOptions {
            num_bins: NonZeroUsize::new(DEFAULT_NUM_BINS).unwrap_or(NonZeroUsize::MIN),
            figsize: DEFAULT_FIGSIZE,
            log: false,
        }
    }
}

impl HistogramPlotOptions {
    /// The size of the figure in pixels.
    pub fn pixels(&self) -> (u32, u32) {
        let to_pixels = |inches: f64| (inches * FIGURE_DPI).round().max(1.0) as u32;
        (to_pixels(self.figsize.0), to_pixels(self.figsize.1))
    }
}

/// The title of the figure for a window.
pub fn window_title(data_desc_id: usize) -> String {
    format!("DATA_DESC_ID: {data_desc_id}")
}

/// One of the four histograms of a figure.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Panel {
    pub(crate) pol: &'static str,
    pub(crate) part: &'static str,

    /// `None` if there were no finite values to bin.
    pub(crate) histogram: Option<Histogram>,
}

impl Panel {
    pub(crate) fn caption(&self) -> String {
        format!("{} {}", self.pol, self.part)
    }
}

/// Bin the real and imaginary parts of both polarisations, in the order the
/// panels are drawn (XX real, XX imag, YY real, YY imag). The inputs may have
/// any shape.
pub(crate) fn panels<S1, D1, S2, D2>(
    xx: &ArrayBase<S1, D1>,
    yy: &ArrayBase<S2, D2>,
    num_bins: NonZeroUsize,
) -> Vec<Panel>
where
    S1: Data<Elem = c64>,
    D1: Dimension,
    S2: Data<Elem = c64>,
    D2: Dimension,
{
    let mut panels = Vec::with_capacity(4);
    let xx: Vec<&c64> = xx.iter().collect();
    let yy: Vec<&c64> = yy.iter().collect();
    for (pol, values) in [("XX", xx), ("YY", yy)] {
        for (part, histogram) in [
            ("real", Histogram::new(values.iter().map(|v| v.re), num_bins)),
            ("imag", Histogram::new(values.iter().map(|v| v.im), num_bins)),
        ] {
            match &histogram {
                Some(h) if h.num_non_finite > 0 => warn!(
                    "{pol} {part}: {} of {} values are not finite and won't be shown",
                    h.num_non_finite,
                    values.len()
                ),
                Some(_) => (),
                None => warn!("{pol} {part}: no finite values to plot"),
            }
            panels.push(Panel {
                pol,
                part,
                histogram,
            });
        }
    }
    panels
}

/// The horizontal extent of a panel. This always covers the reference
/// Gaussian.
pub(crate) fn x_range(histogram: &Histogram) -> (f64, f64) {
    let (start, end) = GAUSSIAN_OVERLAY_DOMAIN;
    let first = histogram.edges.first().copied().unwrap_or(start);
    let last = histogram.edges.last().copied().unwrap_or(end);
    (first.min(start), last.max(end))
}

/// The vertical extent of a panel. This always covers the peak of the
/// reference Gaussian and, on a log axis, the Gaussian at the edge of its
/// domain.
pub(crate) fn y_range(histogram: &Histogram, log: bool) -> (f64, f64) {
    let peak = histogram.max_density().max(gaussian(0.0));
    if log {
        let lowest = histogram
            .min_nonzero_density()
            .unwrap_or(peak)
            .min(gaussian(GAUSSIAN_OVERLAY_DOMAIN.1));
        (lowest / 2.0, peak * 2.0)
    } else {
        (0.0, peak * 1.1)
    }
}

/// Render the scatter of two polarisations as a PNG at `output`. Neither
/// input is modified.
#[cfg(feature = "plotting")]
pub fn scatter_hist<S1, D1, S2, D2>(
    xx: &ArrayBase<S1, D1>,
    yy: &ArrayBase<S2, D2>,
    title: &str,
    options: &HistogramPlotOptions,
    output: &Path,
) -> Result<(), ScatterPlotError>
where
    S1: Data<Elem = c64>,
    D1: Dimension,
    S2: Data<Elem = c64>,
    D2: Dimension,
{
    debug!(
        "Plotting {} XX and {} YY values to {}",
        xx.len(),
        yy.len(),
        output.display()
    );
    let panels = panels(xx, yy, options.num_bins);
    draw::draw_panels(&panels, title, options, output)?;
    Ok(())
}

#[cfg(not(feature = "plotting"))]
pub fn scatter_hist<S1, D1, S2, D2>(
    _xx: &ArrayBase<S1, D1>,
    _yy: &ArrayBase<S2, D2>,
    _title: &str,
    _options: &HistogramPlotOptions,
    output: &Path,
) -> Result<(), ScatterPlotError>
where
    S1: Data<Elem = c64>,
    D1: Dimension,
    S2: Data<Elem = c64>,
    D2: Dimension,
{
    debug!("Can't plot to {}", output.display());
    Err(ScatterPlotError::NoPlottingFeature)
}

/// Compute the scatter of a window and plot it. Both polarisations are
/// flattened before plotting, whether or not flags were applied. The scatter
/// is returned.
pub fn plot_histogram_data_desc_id<S: VisStore + ?Sized>(
    store: &mut S,
    data_desc_id: usize,
    scatter_options: &ScatterOptions,
    plot_options: &HistogramPlotOptions,
    output: &Path,
) -> Result<Scatter, ScatterPlotError> {
    let scatter = compute_scatter(store, data_desc_id, scatter_options)?;
    let xx = scatter.xx.flatten();
    let yy = scatter.yy.flatten();
    scatter_hist(
        &xx,
        &yy,
        &window_title(data_desc_id),
        plot_options,
        output,
    )?;
    Ok(scatter)
}

#[cfg(feature = "plotting")]
pub use draw::DrawError;

#[cfg(feature = "plotting")]
mod draw {
    use plotters::{prelude::*, style::Color};
    use thiserror::Error;

    use super::*;
    use crate::math::gaussian_overlay;

    const TITLE_FONT_SIZE: i32 = 24;
    const CAPTION_FONT_SIZE: i32 = 16;

    lazy_static::lazy_static! {
        static ref BAR_STYLE: ShapeStyle = BLUE.mix(0.5).filled();
        static ref GAUSSIAN_STYLE: ShapeStyle = RED.stroke_width(2);
        static ref EMPTY_STYLE: RGBColor = RGBColor(220, 220, 220);
    }

    /// Draw a single panel. The y coordinates may be linear or logarithmic,
    /// which plotters represents with different types.
    macro_rules! draw_panel {
        ($area:expr, $caption:expr, $x_range:expr, $y_range:expr, $histogram:expr, $bottom:expr) => {{
            let mut chart = ChartBuilder::on($area)
                .caption($caption, ("sans-serif", CAPTION_FONT_SIZE))
                .margin(5)
                .x_label_area_size(25)
                .y_label_area_size(45)
                .build_cartesian_2d($x_range, $y_range)
                .map_err(|e| DrawError::Plotters(Box::new(e)))?;

            chart
                .configure_mesh()
                .light_line_style(WHITE)
                .x_desc("scatter")
                .y_desc("density")
                .draw()
                .map_err(|e| DrawError::Plotters(Box::new(e)))?;

            let bottom = $bottom;
            chart
                .draw_series(
                    $histogram
                        .bins()
                        .filter(|&(_, _, density)| density > 0.0)
                        .map(|(left, right, density)| {
                            Rectangle::new([(left, bottom), (right, density)], *BAR_STYLE)
                        }),
                )
                .map_err(|e| DrawError::Plotters(Box::new(e)))?;
            chart
                .draw_series(LineSeries::new(gaussian_overlay(), *GAUSSIAN_STYLE))
                .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        }};
    }

    pub(super) fn draw_panels(
        panels: &[Panel],
        title: &str,
        options: &HistogramPlotOptions,
        output: &Path,
    ) -> Result<(), DrawError> {
        let root_area = BitMapBackend::new(output, options.pixels()).into_drawing_area();
        root_area
            .fill(&WHITE)
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        let root_area = root_area
            .titled(title, ("sans-serif", TITLE_FONT_SIZE))
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;

        for (panel, area) in panels.iter().zip(root_area.split_evenly((2, 2))) {
            let caption = panel.caption();
            let histogram = match panel.histogram.as_ref() {
                Some(h) => h,
                None => {
                    area.titled(&caption, ("sans-serif", CAPTION_FONT_SIZE))
                        .and_then(|a| a.fill(&*EMPTY_STYLE))
                        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
                    continue;
                }
            };

            let (x_min, x_max) = x_range(histogram);
            let (y_min, y_max) = y_range(histogram, options.log);
            if options.log {
                draw_panel!(
                    &area,
                    &caption,
                    x_min..x_max,
                    (y_min..y_max).log_scale(),
                    histogram,
                    y_min
                );
            } else {
                draw_panel!(
                    &area,
                    &caption,
                    x_min..x_max,
                    y_min..y_max,
                    histogram,
                    0.0
                );
            }
        }

        root_area
            .present()
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        Ok(())
    }

    #[derive(Error, Debug)]
    pub enum DrawError {
        #[error("Error from the plotters library: {0}")]
        Plotters(Box<dyn std::error::Error>),
    }
}
