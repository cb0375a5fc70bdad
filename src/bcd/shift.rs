use super::Bcd;

/// Digit expansions of n/16, used by the fast path of `ror` to divide by
/// sixteen (four halvings) in one sweep.
#[rustfmt::skip]
const SIXTEENTHS: [[u8; 4]; 10] = [
    [0, 0, 0, 0], // 0/16
    [0, 6, 2, 5], // 1/16
    [1, 2, 5, 0], // 2/16
    [1, 8, 7, 5], // 3/16
    [2, 5, 0, 0], // 4/16
    [3, 1, 2, 5], // 5/16
    [3, 7, 5, 0], // 6/16
    [4, 3, 7, 5], // 7/16
    [5, 0, 0, 0], // 8/16
    [5, 6, 2, 5], // 9/16
];

/// Multiply by 2^amount: conventional BCD doubling with the add-6 digit
/// correction, padding a leading 1 on carry-out.
pub fn rol(arg: &Bcd, amount: u32) -> Bcd {
    let mut r = arg.clone();
    for _ in 0..amount {
        let mut carry = 0u8;
        for i in (0..r.len).rev() {
            let mut b = (r.digits[i] << 1) + carry;
            if b > 9 {
                b += 6;
            }
            carry = b >> 4;
            r.digits[i] = b & 0xF;
        }
        if carry != 0 {
            r.pad(1);
            r.digits[0] = 1;
        }
    }
    r
}

/// Divide by 2^amount. Four halvings at a time go through the sixteenths
/// table with a sliding six-digit accumulator; a leftover halving walks the
/// digits with a carry of 0 or 8, appending a trailing 5 when the dropped
/// bit was set and the working precision has room for it.
pub fn ror(arg: &Bcd, amount: u32, dec_places: usize) -> Bcd {
    let mut r = arg.clone();
    let mut amount = amount;
    while amount > 0 {
        if amount > 3 {
            amount -= 4;
            let mut accum = [0u8; 6];
            let dec0 = r.dec;
            let len0 = r.len;
            let mut b0 = 0usize;
            for i in 0..len0 {
                let row = &SIXTEENTHS[r.digits[i] as usize];
                let mut carry = 0u8;
                for j in (0..4).rev() {
                    let idx = b0 + j;
                    accum[idx] += row[j] + carry;
                    if accum[idx] > 9 {
                        accum[idx] -= 10;
                        carry = 1;
                    } else {
                        carry = 0;
                    }
                }
                if carry != 0 && b0 > 0 {
                    let idx = b0 - 1;
                    accum[idx] += carry;
                    if accum[idx] > 9 {
                        accum[idx] -= 10;
                    }
                }
                if b0 != 2 {
                    b0 += 1;
                } else {
                    // window full: emit the settled digit and slide
                    if dec0 != 0 {
                        r.digits[i - 2] = accum[0];
                    } else {
                        r.digits[i - 1] = accum[0];
                    }
                    for j in 0..5 {
                        accum[j] = accum[j + 1];
                    }
                    accum[5] = 0;
                }
            }

            let tail_base;
            if dec0 != 0 {
                r.dec = dec0 - 1;
                r.len = len0 + 3;
                tail_base = len0 - b0;
            } else {
                r.digits[0] = 0;
                r.len = len0 + 4;
                tail_base = len0 - b0 + 1;
            }
            for (j, &d) in accum.iter().take(5).enumerate() {
                r.digits[tail_base + j] = d;
            }
            if r.len as i32 - r.dec as i32 > dec_places as i32 {
                r.len = r.dec + dec_places;
            }
        } else {
            amount -= 1;
            let mut carry = 0u8;
            for i in 0..r.len {
                let odd = r.digits[i] & 1 != 0;
                let mut b = (r.digits[i] >> 1) + carry;
                carry = if odd { 8 } else { 0 };
                if b > 7 {
                    b -= 3;
                }
                r.digits[i] = b;
            }
            if carry != 0 && (r.len as i32 - r.dec as i32) < dec_places as i32 {
                r.len += 1;
                r.digits[r.len - 1] = 5;
            }
        }
    }
    r
}
