use super::{ln, log_entry};
use crate::bcd::{add, div, mul, rol, ror, sub, Bcd};
use crate::calc::Settings;

/// e to the power of `arg`, by a single greedy pass over the log table:
/// whenever the remaining exponent still covers an entry, subtract it and
/// multiply the accumulator by the matching (1 + 2^-k). The first eight
/// entries are whole powers of two, so their multiply is a rol. What
/// remains of the exponent after the sweep is below the smallest table
/// entry, and `r * (1 + rest)` closes the gap.
///
/// Negative arguments go through exp(|x|) and a final reciprocal.
pub fn exp(arg: &Bcd, s: &Settings) -> Bcd {
    let mut x = arg.clone();
    let invert = x.sign == 1;
    if invert {
        x.sign = 0;
    }
    if x.is_zero() {
        return Bcd::one();
    }

    let one = Bcd::one();
    let mut result = one.clone();
    let mut j: u32 = 128;
    for i in 0..s.log_table_size {
        let d = sub(&x, &log_entry(i, s.dec_places));
        if d.sign == 0 {
            x = d;
            result = if i < 8 {
                rol(&result, j)
            } else {
                let shifted = ror(&result, (i - 7) as u32, s.dec_places);
                add(&result, &shifted)
            };
        }
        j >>= 1;
    }

    let rest = add(&x, &one);
    let product = mul(&rest, &result, s.dec_places);
    if invert {
        div(&one, &product, s.dec_places)
    } else {
        product
    }
}

/// `base` to the power `exponent` as exp(ln(base) * exponent). Defined for
/// positive bases; a base too large for `ln` propagates as `None`.
pub fn pow(base: &Bcd, exponent: &Bcd, s: &Settings) -> Option<Bcd> {
    let l = ln(base, s)?;
    let m = mul(&l, exponent, s.dec_places);
    Some(exp(&m, s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::Settings;
    use crate::test_util::{assert_close, bcd};

    #[test]
    fn test_exp_zero_is_one() {
        let s = Settings::default();
        assert_eq!(exp(&bcd("0"), &s).to_string(), "1");
    }

    #[test]
    fn test_exp_known_values() {
        let s = Settings::default();
        assert_close(
            &exp(&bcd("1"), &s),
            &bcd("2.71828182845904523536028747135266"),
            29,
        );
        assert_close(
            &exp(&bcd("2"), &s),
            &bcd("7.38905609893065022723042746057501"),
            29,
        );
        assert_close(
            &exp(&bcd("0.5"), &s),
            &bcd("1.64872127070012814684865078781416"),
            29,
        );
    }

    #[test]
    fn test_exp_negative_inverts() {
        let s = Settings::default();
        assert_close(
            &exp(&bcd("-1"), &s),
            &bcd("0.36787944117144232159552377016146"),
            29,
        );
    }

    #[test]
    fn test_exp_ln_round_trip() {
        let s = Settings::default();
        for v in ["2", "10", "0.5", "123.456", "7"] {
            let x = bcd(v);
            let back = exp(&ln(&x, &s).unwrap(), &s);
            assert_close(&back, &x, 28);
        }
    }

    #[test]
    fn test_pow() {
        let s = Settings::default();
        assert_close(&pow(&bcd("2"), &bcd("10"), &s).unwrap(), &bcd("1024"), 26);
        assert_close(
            &pow(&bcd("2"), &bcd("0.5"), &s).unwrap(),
            &bcd("1.41421356237309504880168872420970"),
            29,
        );
        assert_close(&pow(&bcd("9"), &bcd("0.5"), &s).unwrap(), &bcd("3"), 28);
        // ln range failure propagates
        let huge = format!("4{}", "0".repeat(38));
        assert!(pow(&bcd(&huge), &bcd("2"), &s).is_none());
    }
}
