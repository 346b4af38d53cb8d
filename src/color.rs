//! HL (hue/lightness) domain coloring: maps a complex value to an RGB
//! triple, encoding argument as hue and magnitude as lightness.

use num_complex::Complex64;

const M_3_PI: f64 = 0.954_929_658_551_372;

/// Hue in `[-3, 3]`, derived from `arg(z)` scaled by `3/pi`.
fn hue(z: Complex64) -> f64 {
    M_3_PI * z.arg()
}

fn hpq2c(h: f64, p: f64, q: f64) -> f64 {
    let h = h.rem_euclid(6.0);
    if h < 1.0 {
        (q - p).mul_add(h, p)
    } else if h < 3.0 {
        q
    } else if h < 4.0 {
        (q - p).mul_add(4.0 - h, p)
    } else {
        p
    }
}

/// Converts hue `h` in `[-3, 3]` and lightness `l` in `[0, 2]` into an RGB
/// triple with each channel in `[0, 1]`.
fn hl2rgb(h: f64, l: f64) -> (f64, f64, f64) {
    let q = l.min(1.0);
    let p = l - q;
    (hpq2c(h + 8.0, p, q), hpq2c(h + 6.0, p, q), hpq2c(h + 10.0, p, q))
}

/// Lightness from magnitude: `2 / (|z|^a + 1)`, so `|z| = 0` is white
/// (`l = 2`) and `|z| = infinity` is black (`l = 0`), with `a` controlling
/// how quickly lightness falls off.
fn lightness_hl(z: Complex64, a: f64) -> f64 {
    2.0 / (z.norm().powf(a) + 1.0)
}

/// Map a complex value to an RGB triple via HL domain coloring.
///
/// `a` is the lightness falloff slope (`PlotData::color_slope`). `NaN`
/// components map to neutral gray, so a blown-up or undefined evaluation
/// still renders.
#[must_use]
pub fn complex2rgb_hl(z: Complex64, a: f64) -> (f64, f64, f64) {
    if z.re.is_nan() || z.im.is_nan() {
        return (0.5, 0.5, 0.5);
    }
    hl2rgb(hue(z), lightness_hl(z, a))
}
