use super::log_entry;
use crate::bcd::{add, div, rol, ror, sub, Bcd};
use crate::calc::Settings;

/// Natural logarithm by hyperbolic vectoring over the log table.
///
/// Arguments below one are inverted up front and the sign flipped at the
/// end. Range reduction halves the argument through eight doubling shift
/// amounts (1, 1, 2, 4, ... 64); an argument that survives all eight is
/// reported as out of range, so anything at or beyond 2^128 is rejected
/// regardless of the working precision.
///
/// The caller guarantees `arg > 0`.
pub fn ln(arg: &Bcd, s: &Settings) -> Option<Bcd> {
    let one = Bcd::one();

    let diff = sub(arg, &one);
    if diff.is_zero() {
        return Some(Bcd::zero());
    }

    let mut flip_sign = false;
    let mut x = if diff.sign == 1 {
        flip_sign = true;
        div(&one, arg, s.dec_places)
    } else {
        arg.clone()
    };

    // find the shift pairing: divide by 2, 2, 4, 8 ... until x drops
    // below one
    let mut j: u32 = 1;
    let mut i = 0usize;
    loop {
        x = ror(&x, j, s.dec_places);
        if sub(&x, &one).sign == 1 {
            break;
        }
        j = 1 << i;
        i += 1;
        if i == 8 {
            return None;
        }
    }
    if x.is_zero() {
        return None;
    }

    let mut j = 1u32 << i;
    let mut result = log_entry(7 - i, s.dec_places);

    for t in (7 - i)..s.log_table_size {
        let candidate;
        if j != 0 {
            candidate = rol(&x, j);
            j >>= 1;
        } else {
            let shifted = ror(&x, (t - 7) as u32, s.dec_places);
            candidate = add(&x, &shifted);
        }
        if sub(&candidate, &one).sign == 1 {
            // multiplying kept x on the unit side: take the step
            x = candidate;
            result = sub(&result, &log_entry(t, s.dec_places));
        }
    }

    // residual correction: the leftover gap to one
    let rest = sub(&one, &x);
    let mut out = sub(&result, &rest);
    if flip_sign {
        out.sign = 1;
    }
    Some(out)
}
