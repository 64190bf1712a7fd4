//! CIE L*a*b* color type
//!
//! Used by the deltaE metric. Conversion goes sRGB -> linear RGB (scaled to
//! 0..100) -> CIE XYZ -> L*a*b* against a D65 reference white.

use super::rgb::Rgb;

/// sRGB gamma knee: channel values at or below this are linear.
const GAMMA_THRESHOLD: f64 = 0.04045;

/// Reference white (D65, 2° observer), XYZ scaled to Y = 100.
const REF_X: f64 = 95.047;
const REF_Y: f64 = 100.0;
const REF_Z: f64 = 108.883;

/// Below this the L*a*b* transfer function switches from cube root to linear.
const LAB_EPSILON: f64 = 0.008856;

/// A color in CIE L*a*b* space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness (0..=100)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Euclidean distance in Lab space (CIE76 delta E).
    #[inline]
    pub fn delta_e(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

#[inline]
fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    let linear = if c > GAMMA_THRESHOLD {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    };
    linear * 100.0
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

impl From<Rgb> for Lab {
    fn from(color: Rgb) -> Self {
        let r = linearize(color.red);
        let g = linearize(color.green);
        let b = linearize(color.blue);

        let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
        let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
        let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

        let fx = lab_f(x / REF_X);
        let fy = lab_f(y / REF_Y);
        let fz = lab_f(z / REF_Z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}
