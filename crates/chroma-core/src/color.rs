//! HSL → RGB conversion and the small wrap/remap helpers used by the
//! layer renderer. Everything here is a pure function of its arguments.

/// Fraction of the distance to the nearest edge that `push_to_edges` keeps.
pub const PUSH_RATIO: f64 = 0.85;

/// Normalize a hue in degrees into `[0, 360)`.
///
/// For inputs in `(-360, 720)` this is the usual single-period correction;
/// Euclidean remainder keeps it correct for larger drifts too.
#[inline]
pub fn wrap_hue(h: f64) -> f64 {
    let w = h.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if w >= 360.0 { 0.0 } else { w }
}

/// Wrap `v` into `[0, 1]` by whole periods.
///
/// In-range values, including exactly `1.0`, come back unchanged; a lightness
/// of 1.0 must stay white rather than wrap to black. Whole numbers above 1
/// likewise land on 1.0, not 0.0.
#[inline]
pub fn constrain_unit(v: f64) -> f64 {
    if (0.0..=1.0).contains(&v) {
        v
    } else if v > 1.0 && v.fract() == 0.0 {
        1.0
    } else {
        v.rem_euclid(1.0)
    }
}

/// Remap a lightness value so the halves below and above 0.5 are each
/// squeezed toward their own extreme by [`PUSH_RATIO`], then offset by `pad`.
pub fn push_to_edges(value: f64, pad: f64) -> f64 {
    if value < 0.5 {
        constrain_unit(value * PUSH_RATIO + pad)
    } else {
        let distance_to_one = 1.0 - value;
        constrain_unit(1.0 - distance_to_one * PUSH_RATIO - pad)
    }
}

/// Convert hue (degrees), saturation and lightness to 8-bit RGB.
///
/// `h` is expected in `[0, 360]`, `s` and `l` in `[0, 1]`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    if s == 0.0 {
        let gray = to_u8(l);
        return [gray, gray, gray];
    }

    let temp1 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let temp2 = 2.0 * l - temp1;
    let hue_percent = h / 360.0;

    let channel = |t: f64| {
        let t = constrain_unit(t);
        if t * 6.0 < 1.0 {
            temp2 + (temp1 - temp2) * 6.0 * t
        } else if t * 2.0 < 1.0 {
            temp1
        } else if t * 3.0 < 2.0 {
            temp2 + (temp1 - temp2) * (2.0 / 3.0 - t) * 6.0
        } else {
            temp2
        }
    };

    [
        to_u8(channel(hue_percent + 1.0 / 3.0)),
        to_u8(channel(hue_percent)),
        to_u8(channel(hue_percent - 1.0 / 3.0)),
    ]
}

/// Scale a unit fraction to 0..=255, rounding half away from zero.
#[inline]
fn to_u8(v: f64) -> u8 {
    (v * 255.0).round() as u8
}
