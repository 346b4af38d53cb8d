//! The public driver: validates a plot request, compiles its formula,
//! floods the image grid with roots, colors it, and reports timing.

use crate::color::complex2rgb_hl;
use crate::core::error::DrawError;
use crate::flood::{flood, nearest_pixel, Grid, Viewport};
use crate::kernel::Kernel;
use crate::parser::parse;
use num_complex::Complex64;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// The full input to one draw: formula, viewport, image size, root-finder
/// seed, and coloring slope.
#[derive(Debug, Clone)]
pub struct PlotData {
    /// The formula text, in the grammar of [`crate::parser`].
    pub formula: String,
    /// Minimum real coordinate of the viewport. Must be less than `re_max`.
    pub re_min: f64,
    /// Maximum real coordinate of the viewport.
    pub re_max: f64,
    /// Minimum imaginary coordinate of the viewport. Must be less than `im_max`.
    pub im_min: f64,
    /// Maximum imaginary coordinate of the viewport.
    pub im_max: f64,
    /// Image width in pixels. Must be positive.
    pub image_width: usize,
    /// Image height in pixels. Must be positive.
    pub image_height: usize,
    /// Real coordinate of the flood's starting pixel. Must lie in `[re_min, re_max]`.
    pub re_seed: f64,
    /// Imaginary coordinate of the flood's starting pixel. Must lie in `[im_min, im_max]`.
    pub im_seed: f64,
    /// Real part of the initial root guess at the seed pixel.
    pub re_seed_value: f64,
    /// Imaginary part of the initial root guess at the seed pixel.
    pub im_seed_value: f64,
    /// Lightness falloff slope for the HL colorizer. Must be positive.
    pub color_slope: f64,
}

impl PlotData {
    fn validate(&self) -> Result<(), DrawError> {
        if self.re_min >= self.re_max {
            return Err(DrawError::range(format!(
                "invalid real range: reMin ({}) must be less than reMax ({})",
                self.re_min, self.re_max
            )));
        }
        if self.im_min >= self.im_max {
            return Err(DrawError::range(format!(
                "invalid imaginary range: imMin ({}) must be less than imMax ({})",
                self.im_min, self.im_max
            )));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(DrawError::range("image dimensions must be positive"));
        }
        if self.color_slope <= 0.0 {
            return Err(DrawError::range("colorSlope must be positive"));
        }
        if !(self.re_min..=self.re_max).contains(&self.re_seed) || !(self.im_min..=self.im_max).contains(&self.im_seed) {
            return Err(DrawError::range("seed point lies outside the viewport"));
        }
        Ok(())
    }
}

/// The terminal state of a draw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The draw ran to completion; every pixel was colored.
    Finished,
    /// The cancellation flag was observed before the draw completed.
    Cancelled,
    /// Validation, parsing, or compilation failed; no pixels were colored.
    Error,
}

/// Timing and outcome of one `redraw` call.
#[derive(Debug, Clone)]
pub struct RedrawInfo {
    /// The terminal state of the draw.
    pub status: Status,
    /// Human-readable failure description, present when `status == Error`.
    pub message: Option<String>,
    /// Time spent parsing and compiling the formula.
    pub parsing_duration: Duration,
    /// Time spent flooding the image grid with roots.
    pub computing_duration: Duration,
    /// Time spent colorizing the grid.
    pub coloring_duration: Duration,
}

impl RedrawInfo {
    fn error(msg: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(msg.into()),
            parsing_duration: Duration::ZERO,
            computing_duration: Duration::ZERO,
            coloring_duration: Duration::ZERO,
        }
    }
}

/// Validate, compile, flood, and color one plot request.
///
/// `update(x, y, r, g, b)` is invoked once per pixel in row-major order
/// during the coloring stage. `notify_exit` is invoked exactly once, after
/// the status has been decided. `cancel` is polled cooperatively at each BFS
/// pop and at each coloring row.
pub fn redraw(
    plot_data: &PlotData,
    mut update: impl FnMut(usize, usize, f64, f64, f64),
    notify_exit: impl FnOnce(),
    cancel: &AtomicBool,
) -> RedrawInfo {
    if let Err(e) = plot_data.validate() {
        let info = RedrawInfo::error(e.user_message());
        notify_exit();
        return info;
    }

    let parse_start = Instant::now();
    let poly = match parse(&plot_data.formula) {
        Ok(poly) => poly,
        Err(e) => {
            let info = RedrawInfo::error(e.user_message());
            notify_exit();
            return info;
        }
    };
    let kernel = Kernel::compile(&poly);
    let parsing_duration = parse_start.elapsed();

    let viewport = Viewport {
        width: plot_data.image_width,
        height: plot_data.image_height,
        re_min: plot_data.re_min,
        re_max: plot_data.re_max,
        im_min: plot_data.im_min,
        im_max: plot_data.im_max,
    };
    let (x0, y0) = nearest_pixel(plot_data.re_seed, plot_data.im_seed, viewport);
    let w0 = Complex64::new(plot_data.re_seed_value, plot_data.im_seed_value);

    let compute_start = Instant::now();
    let grid = flood(&kernel, viewport, x0, y0, w0, cancel);
    let computing_duration = compute_start.elapsed();

    let color_start = Instant::now();
    'rows: for y in 0..plot_data.image_height {
        if cancel.load(Ordering::Relaxed) {
            break 'rows;
        }
        let row = color_row(&grid, y, plot_data.image_width, plot_data.color_slope);
        for (x, (r, g, b)) in row.into_iter().enumerate() {
            update(x, y, r, g, b);
        }
    }
    let coloring_duration = color_start.elapsed();

    let status = if cancel.load(Ordering::Relaxed) { Status::Cancelled } else { Status::Finished };
    notify_exit();

    RedrawInfo { status, message: None, parsing_duration, computing_duration, coloring_duration }
}

/// Color one image row. Pixels within a row are independent, so with the
/// `parallel` feature enabled this fans the row out across a rayon thread
/// pool; the BFS compute stage (§5) is never parallelized this way since its
/// pixels depend on their enqueuing neighbor's root.
#[cfg(feature = "parallel")]
fn color_row(grid: &Grid, y: usize, width: usize, color_slope: f64) -> Vec<(f64, f64, f64)> {
    use rayon::prelude::*;
    (0..width)
        .into_par_iter()
        .map(|x| complex2rgb_hl(grid.get(x, y).unwrap_or(Complex64::new(0.0, 0.0)), color_slope))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn color_row(grid: &Grid, y: usize, width: usize, color_slope: f64) -> Vec<(f64, f64, f64)> {
    (0..width).map(|x| complex2rgb_hl(grid.get(x, y).unwrap_or(Complex64::new(0.0, 0.0)), color_slope)).collect()
}
