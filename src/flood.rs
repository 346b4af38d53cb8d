//! Seeded breadth-first evaluation of the image grid.
//!
//! Laguerre's method converges reliably from a good starting guess but can
//! jump to an unrelated root from a bad one, which would fracture the image
//! into patches of different roots. Flooding outward from one seed pixel and
//! handing each newly-visited pixel its enqueuing neighbor's root as the next
//! starting guess keeps adjacent pixels on the same root branch.

use crate::kernel::Kernel;
use crate::solver::laguerre;
use num_complex::Complex64;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// A row-major grid of per-pixel roots. `None` means the pixel has not been
/// reached by the flood yet.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Complex64>>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![None; width * height] }
    }

    /// The grid's width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// The grid's height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The root at `(x, y)`, or `None` if the flood hasn't reached it.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Complex64> {
        self.cells[y * self.width + x]
    }

    fn set(&mut self, x: usize, y: usize, value: Complex64) {
        self.cells[y * self.width + x] = Some(value);
    }

    fn is_claimed(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x].is_some()
    }
}

/// The viewport and image-size parameters shared by pixel/plane mapping.
///
/// Grouped to keep the mapping functions under clippy's argument-count limit.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Minimum real coordinate of the rendered rectangle.
    pub re_min: f64,
    /// Maximum real coordinate of the rendered rectangle.
    pub re_max: f64,
    /// Minimum imaginary coordinate of the rendered rectangle.
    pub im_min: f64,
    /// Maximum imaginary coordinate of the rendered rectangle.
    pub im_max: f64,
}

/// Maps a pixel center `(x, y)` to its complex coordinate, with the origin
/// at the top-left and the imaginary axis running upward.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "image dimensions fit comfortably in f64's mantissa")]
pub fn pixel_to_complex(x: usize, y: usize, viewport: Viewport) -> Complex64 {
    let Viewport { width, height, re_min, re_max, im_min, im_max } = viewport;
    let w = width as f64;
    let h = height as f64;
    let re = re_min.mul_add(w - x as f64 - 0.5, re_max * (x as f64 + 0.5)) / w;
    let im = im_min.mul_add(y as f64 + 0.5, im_max * (h - y as f64 - 0.5)) / h;
    Complex64::new(re, im)
}

/// Clamp a seed point in plane coordinates to the nearest in-bounds pixel
/// index.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "image dimensions fit comfortably in f64's mantissa")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped into [0, dimension - 1] above")]
pub fn nearest_pixel(re_seed: f64, im_seed: f64, viewport: Viewport) -> (usize, usize) {
    let Viewport { width, height, re_min, re_max, im_min, im_max } = viewport;
    let w = width as f64;
    let h = height as f64;
    let x = (w * (re_seed - re_min) / (re_max - re_min) - 0.5).round();
    let y = (h * (im_max - im_seed) / (im_max - im_min) - 0.5).round();
    let x = x.clamp(0.0, w - 1.0) as usize;
    let y = y.clamp(0.0, h - 1.0) as usize;
    (x, y)
}

/// Flood the image grid outward from `(x0, y0)` seeded with `w0`, writing
/// each pixel's converged root. Stops early (with a partially-filled grid)
/// if `cancel` is observed set at a queue pop.
pub fn flood(kernel: &Kernel, viewport: Viewport, x0: usize, y0: usize, w0: Complex64, cancel: &AtomicBool) -> Grid {
    let mut grid = Grid::new(viewport.width, viewport.height);
    let mut queue = VecDeque::new();

    grid.set(x0, y0, Complex64::new(0.0, 0.0));
    queue.push_back((x0, y0, w0));

    while let Some((x, y, w_guess)) = queue.pop_front() {
        if cancel.load(Ordering::Relaxed) {
            break;
        }

        let z = pixel_to_complex(x, y, viewport);
        let root = laguerre(kernel, z, w_guess);
        grid.set(x, y, root);

        for (nx, ny) in neighbors(x, y, viewport.width, viewport.height) {
            if !grid.is_claimed(nx, ny) {
                grid.set(nx, ny, Complex64::new(0.0, 0.0));
                queue.push_back((nx, ny, root));
            }
        }
    }

    grid
}

fn neighbors(x: usize, y: usize, width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
    let mut out = Vec::with_capacity(4);
    if x > 0 {
        out.push((x - 1, y));
    }
    if x + 1 < width {
        out.push((x + 1, y));
    }
    if y > 0 {
        out.push((x, y - 1));
    }
    if y + 1 < height {
        out.push((x, y + 1));
    }
    out.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn square_viewport(width: usize, height: usize) -> Viewport {
        Viewport { width, height, re_min: -1.0, re_max: 1.0, im_min: -1.0, im_max: 1.0 }
    }

    #[test]
    fn full_flood_visits_every_pixel() {
        let poly = parse("z - w").expect("should parse");
        let kernel = Kernel::compile(&poly);
        let cancel = AtomicBool::new(false);
        let grid = flood(&kernel, square_viewport(10, 10), 5, 5, Complex64::new(0.0, 0.0), &cancel);
        for y in 0..10 {
            for x in 0..10 {
                assert!(grid.get(x, y).is_some(), "pixel ({x},{y}) was never visited");
            }
        }
    }

    #[test]
    fn identity_formula_roots_equal_pixel_coordinates() {
        let poly = parse("z - w").expect("should parse");
        let kernel = Kernel::compile(&poly);
        let cancel = AtomicBool::new(false);
        let viewport = square_viewport(8, 8);
        let grid = flood(&kernel, viewport, 0, 0, Complex64::new(-1.0, 1.0), &cancel);
        for y in 0..8 {
            for x in 0..8 {
                let expected = pixel_to_complex(x, y, viewport);
                let got = grid.get(x, y).expect("visited");
                assert!((got - expected).norm() < 1e-6, "mismatch at ({x},{y})");
            }
        }
    }

    #[test]
    fn cancellation_leaves_grid_partially_filled() {
        let poly = parse("z - w").expect("should parse");
        let kernel = Kernel::compile(&poly);
        let cancel = AtomicBool::new(true);
        let grid = flood(&kernel, square_viewport(10, 10), 5, 5, Complex64::new(0.0, 0.0), &cancel);
        let visited = (0..10).flat_map(|y| (0..10).map(move |x| (x, y))).filter(|&(x, y)| grid.get(x, y).is_some()).count();
        assert!(visited <= 1, "expected at most the seed pixel claimed, got {visited}");
    }

    #[test]
    fn nearest_pixel_clamps_to_bounds() {
        let (x, y) = nearest_pixel(100.0, 100.0, square_viewport(10, 10));
        assert_eq!((x, y), (9, 0));
    }
}
