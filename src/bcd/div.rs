use super::{add, Bcd};

/// Long division producing `max(frac(n1), frac(n2), dec_places) + 1`
/// fraction digits before rounding. Each quotient digit is found by adding
/// the negated divisor to a working remainder until it would go negative;
/// a digit reaching 10 ripples an increment into the digits already placed.
///
/// The divisor must be non-zero; the dispatcher checks that.
pub fn div(n1: &Bcd, n2: &Bcd, dec_places: usize) -> Bcd {
    let mut result = Bcd::zero();

    let f1 = n1.len as i32 - n1.dec as i32;
    let f2 = n2.len as i32 - n2.dec as i32;
    let max_offset = f1.max(f2).max(dec_places as i32);

    result.len = 0;
    let mut result_ptr: i32 = 0;

    let d1 = n1.dec as i32;
    let d2 = n2.dec as i32;
    let mut post_offset: i32 = n1.len as i32 - n2.len as i32;

    if (d1 - d2 + 1) < post_offset {
        let pre_offset = -(d1 - d2 + 1);
        post_offset = 0;
        if pre_offset < 0 {
            result.dec = (-pre_offset) as usize;
        } else {
            // quotient opens with zeros before its first significant digit
            result.dec = 0;
            for i in 0..pre_offset as usize {
                result.digits[i] = 0;
            }
            result_ptr += pre_offset;
        }
    } else if post_offset > 0 {
        post_offset = 0;
        result.dec = (d1 - d2 + 1) as usize;
    } else {
        post_offset = -post_offset;
        result.dec = (post_offset + d1 - d2 + 1) as usize;
    }

    // negated divisor, treated as an integer
    let mut subtrahend = Bcd::zero();
    subtrahend.sign = 1;
    subtrahend.len = n2.len;
    subtrahend.dec = n2.len;

    // working remainder seeded with the dividend's leading digits
    let mut rem = Bcd::zero();
    rem.len = n2.len + 1;
    rem.dec = rem.len;
    rem.digits[0] = 0;

    for i in 0..n2.len {
        let di = i as i32;
        rem.digits[i + 1] = if di < post_offset {
            0
        } else if (di - post_offset) > (n1.len as i32 - 1) {
            0
        } else {
            n1.digits[(di - post_offset) as usize]
        };
        subtrahend.digits[i] = n2.digits[i];
    }

    let mut n1_ptr: i32 = n2.len as i32 + post_offset;
    loop {
        result.digits[result_ptr as usize] = 0;
        result.len += 1;

        loop {
            let diff = add(&rem, &subtrahend);
            let fits = diff.sign == 0 || diff.is_zero();
            if fits {
                result.digits[result_ptr as usize] += 1;
                if result.digits[result_ptr as usize] == 10 {
                    result.digits[result_ptr as usize] = 0;
                    let mut i = result_ptr - 1;
                    while i >= 0 {
                        result.digits[i as usize] += 1;
                        if result.digits[i as usize] < 10 {
                            break;
                        }
                        result.digits[i as usize] = 0;
                        i -= 1;
                    }
                    if i < 0 {
                        // every earlier digit was 9: cascade a new leading 1
                        result.digits[0] = 1;
                        for k in 1..result_ptr as usize {
                            result.digits[k] = 0;
                        }
                        result_ptr += 1;
                        result.len += 1;
                        result.dec += 1;
                        result.digits[result_ptr as usize] = 0;
                    }
                }
                for k in 0..rem.len {
                    rem.digits[k] = diff.digits[k];
                }
            }
            if !(diff.sign == 0 && !diff.is_zero()) {
                break;
            }
        }

        // shift the remainder left and bring down the next dividend digit
        for k in 0..n2.len {
            rem.digits[k] = rem.digits[k + 1];
        }
        if n1_ptr >= n1.len as i32 {
            rem.digits[n2.len] = 0;
        } else {
            rem.digits[n2.len] = n1.digits[n1_ptr as usize];
            n1_ptr += 1;
        }
        result_ptr += 1;

        let more = if (result_ptr as usize) < result.dec {
            true
        } else {
            (result.len as i32 - result.dec as i32) < max_offset + 1
        };
        if !more {
            break;
        }
    }

    if (result.len as i32 - result.dec as i32) > max_offset {
        if result.digits[result.len - 1] > 4 {
            // round half-up: re-add 1 to the digit string sans its guard digit
            let save_len = result.len;
            let save_dec = result.dec;
            let mut trimmed = Bcd::zero();
            for k in 0..result.len - 1 {
                trimmed.digits[k] = result.digits[k];
            }
            trimmed.len = result.len - 1;
            trimmed.dec = trimmed.len;
            result = add(&trimmed, &Bcd::one());
            result.dec = save_dec;
            if result.len == save_len {
                result.dec += 1;
            }
        } else {
            result.len -= 1;
        }
    }

    result.sign = n1.sign ^ n2.sign;
    result.full_shrink();
    if result.len as i32 - result.dec as i32 > dec_places as i32 {
        result.len = result.dec + dec_places;
    }
    result
}
