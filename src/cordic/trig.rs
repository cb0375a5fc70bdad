use super::{deg_factor, k_seed, pow, trig_entry};
use crate::bcd::{add, compare, compare_lit, div, mul, ror, sub, Bcd};
use crate::calc::Settings;
use std::cmp::Ordering;
use std::str::FromStr;

/// One CORDIC sweep over the trig table. `x`/`y` are the vector
/// accumulators, `angle` the running angle in degrees.
///
/// In rotation mode the target angle drives the rotation direction and the
/// vector converges on (cos, sin); in vectoring mode the `y` component is
/// driven to zero and the angle accumulates atan(arg).
fn sweep(x: &mut Bcd, y: &mut Bcd, angle: &mut Bcd, arg: &Bcd, vectoring: bool, s: &Settings) {
    for i in 0..s.trig_table_size {
        let positive = if vectoring {
            y.sign == 0
        } else {
            sub(arg, angle).sign == 0
        };
        let entry = trig_entry(i, s.dec_places);
        let shift = i as u32;
        if positive {
            let ys = ror(y, shift, s.dec_places);
            let nx = add(x, &ys);
            let xs = ror(x, shift, s.dec_places);
            *x = nx;
            *y = sub(y, &xs);
            *angle = add(angle, &entry);
        } else {
            let ys = ror(y, shift, s.dec_places);
            let nx = sub(x, &ys);
            let xs = ror(x, shift, s.dec_places);
            *x = nx;
            *y = add(y, &xs);
            *angle = sub(angle, &entry);
        }
    }
}

/// Sine and cosine of an angle in [0, 90] degrees. The cosine accumulator
/// is seeded with K so the rotation gains cancel.
pub fn sin_cos(arg: &Bcd, s: &Settings) -> (Bcd, Bcd) {
    let mut sine = Bcd::zero();
    let mut cosine = k_seed(s.dec_places);
    let mut angle = Bcd::zero();
    sweep(&mut sine, &mut cosine, &mut angle, arg, false, s);
    sine.len = s.dec_places;
    cosine.len = s.dec_places;
    (sine, cosine)
}

/// Arctangent in degrees, by vectoring (1, arg) down to the x axis.
pub fn atan(arg: &Bcd, s: &Settings) -> Bcd {
    let mut x = Bcd::one();
    let mut y = arg.clone();
    let mut angle = Bcd::zero();
    sweep(&mut x, &mut y, &mut angle, arg, true, s);
    if angle.dec <= s.dec_places && angle.len > s.dec_places {
        angle.len = s.dec_places;
    }
    angle
}

/// Arcsine as atan(y / sqrt(1 - y^2)). Exact endpoints are the
/// dispatcher's business; here 0 < |arg| < 1.
pub fn asin(arg: &Bcd, s: &Settings) -> Option<Bcd> {
    let root = unit_complement_root(arg, s)?;
    Some(atan(&div(arg, &root, s.dec_places), s))
}

/// Arccosine as atan(sqrt(1 - y^2) / y).
pub fn acos(arg: &Bcd, s: &Settings) -> Option<Bcd> {
    let root = unit_complement_root(arg, s)?;
    Some(atan(&div(&root, arg, s.dec_places), s))
}

/// sqrt(1 - arg^2) via the pow kernel.
fn unit_complement_root(arg: &Bcd, s: &Settings) -> Option<Bcd> {
    let sq = mul(arg, arg, s.dec_places);
    let rest = sub(&Bcd::one(), &sq);
    let half = Bcd::from_str("0.5").expect("bad built-in constant");
    pow(&rest, &half, s)
}

/// Reduce an arbitrary non-negative angle into [0, 90] degrees. Radians
/// are converted first when configured. Returns the reduced angle plus the
/// quadrant-derived sign flips for sine and cosine.
pub fn trig_prep(arg: &Bcd, s: &Settings) -> (Bcd, bool, bool) {
    let mut theta = if s.deg_rad {
        arg.clone()
    } else {
        mul(arg, &deg_factor(), s.dec_places)
    };

    let full_turn = Bcd::from_str("360").expect("bad built-in constant");
    while compare(&theta, &full_turn) == Ordering::Greater {
        theta = sub(&theta, &full_turn);
    }

    let sin_flip;
    let mut reduced = if compare_lit("180", &theta) == Ordering::Less {
        sin_flip = true;
        sub(&full_turn, &theta)
    } else {
        sin_flip = false;
        theta
    };

    let cos_flip = if compare_lit("90", &reduced) == Ordering::Less {
        let half_turn = Bcd::from_str("180").expect("bad built-in constant");
        reduced = sub(&half_turn, &reduced);
        true
    } else {
        false
    };
    (reduced, sin_flip, cos_flip)
}
