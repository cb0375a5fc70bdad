use super::{add, Bcd};

/// Classical long multiplication. Each single-digit product lands in a
/// two-digit cell whose decimal point encodes the column shift, and the
/// partial sums bounce between two accumulators because `add` wants distinct
/// source and destination.
pub fn mul(n1: &Bcd, n2: &Bcd, dec_places: usize) -> Bcd {
    let mut acc_a = Bcd::zero();
    let mut acc_b = Bcd::zero();
    let mut flip = false;

    let mut temp = Bcd::zero();
    temp.len = 2;

    let i_end = n1.len;
    let j_end = n2.len;
    for i in 0..i_end {
        for j in 0..j_end {
            let p = n1.digits[i] * n2.digits[j];
            temp.digits[0] = p / 10;
            temp.digits[1] = p % 10;
            // decimal point right of the stored pair by the column shift
            temp.dec = (i_end - i) + (j_end - j);
            if !flip {
                acc_a = add(&temp, &acc_b);
            } else {
                acc_b = add(&temp, &acc_a);
            }
            flip = !flip;
        }
    }
    let mut result = if flip { acc_a } else { acc_b };

    let mut frac = (i_end - n1.dec) + (j_end - n2.dec);
    if frac > dec_places {
        // keep one guard digit, round half-up on it, then drop it
        result.len -= frac - dec_places - 1;
        result.dec = result.len;
        if result.digits[result.len - 1] > 4 {
            let mut ten = Bcd::zero();
            ten.len = 2;
            ten.dec = 2;
            ten.digits[0] = 1;
            result = add(&result, &ten);
        }
        result.len -= 1;
        frac = dec_places + 1;
    }
    result.dec -= frac;
    result.sign = n1.sign ^ n2.sign;
    result.full_shrink();
    result
}
