use crate::bcd::Bcd;

/// Render a value right-justified into a field of `width` columns, either
/// fixed-point or scientific, the way a fixed-width LCD row would show it.
pub fn format_value(value: &Bcd, width: usize, sci: bool) -> String {
    let mut v = value.clone();
    // a pure fraction gets its display zero back
    if v.dec == 0 {
        v.pad(1);
    }
    let row = if sci {
        format_sci(v, width)
    } else {
        format_fixed(v, width)
    };
    debug_assert!(row.chars().count() <= width);
    row
}

fn format_sci(mut v: Bcd, width: usize) -> String {
    if v.is_zero() {
        let mut row = String::from("0.e0");
        while row.len() < width {
            row.push(' ');
        }
        return row;
    }

    // cut after the last non-zero digit anywhere in the number
    let mut last = 0;
    for i in 0..v.len {
        if v.digits[i] != 0 {
            last = i;
        }
    }
    v.len = last + 1;

    // first significant digit fixes the exponent
    let mut first = 0;
    while first < v.len && v.digits[first] == 0 {
        first += 1;
    }
    let exponent = v.dec as i32 - first as i32 - 1;
    let magnitude = exponent.unsigned_abs();

    // columns spoken for besides mantissa digits, point and 'e'
    let mut reserved = 0usize;
    if v.is_negative() {
        reserved += 1;
    }
    if magnitude > 9 {
        reserved += 1;
    }
    if magnitude > 99 {
        reserved += 1;
    }
    if exponent < 0 {
        reserved += 1;
    }

    let significant = v.len - first;
    let (digits_shown, pad) = if width - 2 - reserved > significant {
        (significant, width - 3 - reserved - significant)
    } else {
        (width - 3 - reserved, 0)
    };

    let mut row = String::new();
    for _ in 0..pad {
        row.push(' ');
    }
    if v.is_negative() {
        row.push('-');
    }
    for k in 0..digits_shown {
        row.push((b'0' + v.digits[first + k]) as char);
        if k == 0 {
            row.push('.');
        }
    }
    row.push('e');
    if exponent < 0 {
        row.push('-');
    }
    let mut started = false;
    if magnitude / 100 != 0 {
        row.push((b'0' + (magnitude / 100) as u8) as char);
        started = true;
    }
    if (magnitude % 100) / 10 != 0 || started {
        row.push((b'0' + ((magnitude % 100) / 10) as u8) as char);
    }
    row.push((b'0' + (magnitude % 10) as u8) as char);
    row
}

fn format_fixed(mut v: Bcd, width: usize) -> String {
    // strip trailing fraction zeros
    let mut k = v.len;
    while k > v.dec && v.digits[k - 1] == 0 {
        k -= 1;
    }
    v.len = k;

    let mut digits_shown = v.len;
    let has_point = v.dec < v.len;
    let mut pad;
    if digits_shown >= width {
        pad = 0;
        digits_shown = width;
        if v.is_negative() {
            digits_shown -= 1;
        }
        if v.dec < digits_shown {
            digits_shown -= 1;
        }
    } else if digits_shown == width - 1 {
        pad = 1;
        if v.is_negative() {
            pad = 0;
        }
        if v.dec < digits_shown {
            if pad == 0 {
                digits_shown -= 1;
            } else {
                pad = 0;
            }
        }
    } else {
        pad = width - digits_shown;
        if v.is_negative() {
            pad -= 1;
        }
        if has_point {
            pad -= 1;
        }
    }

    let mut row = String::new();
    for _ in 0..pad {
        row.push(' ');
    }
    if v.is_negative() {
        row.push('-');
    }
    for i in 0..digits_shown {
        row.push((b'0' + v.digits[i]) as char);
        if i + 1 == v.dec && i + 1 < digits_shown && row.chars().count() < width {
            row.push('.');
        }
    }
    if v.dec > digits_shown {
        // the integer part alone does not fit
        while row.chars().count() < width {
            row.push(' ');
        }
        row.replace_range(row.len() - 1.., ">");
    }
    while row.chars().count() < width {
        row.push(' ');
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::bcd;
    use pretty_assertions::assert_eq;

    const W: usize = 18;

    #[test]
    fn test_fixed_right_justifies() {
        assert_eq!(format_value(&bcd("46"), W, false), " ".repeat(16) + "46");
        assert_eq!(
            format_value(&bcd("-46"), W, false),
            " ".repeat(15) + "-46"
        );
        assert_eq!(
            format_value(&bcd("1.5"), W, false),
            " ".repeat(15) + "1.5"
        );
    }

    #[test]
    fn test_fixed_strips_trailing_zeros() {
        assert_eq!(
            format_value(&bcd("2.500"), W, false),
            " ".repeat(15) + "2.5"
        );
        assert_eq!(
            format_value(&bcd("34.000"), W, false),
            " ".repeat(16) + "34"
        );
    }

    #[test]
    fn test_fixed_pads_pure_fraction() {
        let half = bcd(".5");
        assert_eq!(format_value(&half, W, false), " ".repeat(15) + "0.5");
    }

    #[test]
    fn test_fixed_truncates_wide_values() {
        // seventeen fraction digits of 1/3 fill the row exactly
        let third = bcd("0.33333333333333333");
        assert_eq!(format_value(&third, W, false), "0.3333333333333333");
        // a wider integer part flags truncation in the last column
        let wide = bcd(&"9".repeat(25));
        let row = format_value(&wide, W, false);
        assert_eq!(row.len(), W);
        assert!(row.ends_with('>'));
        assert!(row.starts_with("99999"));
    }

    #[test]
    fn test_sci_zero() {
        assert_eq!(format_value(&bcd("0"), W, true), format!("0.e0{}", " ".repeat(14)));
    }

    #[test]
    fn test_sci_simple() {
        assert_eq!(format_value(&bcd("46"), W, true), " ".repeat(13) + "4.6e1");
        assert_eq!(
            format_value(&bcd("-46"), W, true),
            " ".repeat(12) + "-4.6e1"
        );
        assert_eq!(
            format_value(&bcd("0.05"), W, true),
            " ".repeat(13) + "5.e-2"
        );
        assert_eq!(
            format_value(&bcd("100"), W, true),
            " ".repeat(14) + "1.e2"
        );
    }

    #[test]
    fn test_sci_pi_at_twelve_places() {
        assert_eq!(
            format_value(&bcd("3.141592653589"), W, true),
            "  3.141592653589e0"
        );
    }

    #[test]
    fn test_sci_large_exponent() {
        let big = bcd(&format!("1{}", "0".repeat(254)));
        assert_eq!(format_value(&big, W, true), " ".repeat(12) + "1.e254");
    }

    #[test]
    fn test_fixed_round_trips_through_parse() {
        use crate::bcd::{compare, Bcd};
        use std::cmp::Ordering;
        for text in ["46", "-46", "1.5", "0.25", "-0.125", "123.456", "0"] {
            let v = bcd(text);
            let row = format_value(&v, W, false);
            let back: Bcd = row.trim().parse().unwrap();
            assert_eq!(compare(&v, &back), Ordering::Equal, "{}", text);
        }
    }

    #[test]
    fn test_sci_caps_mantissa_to_field() {
        let long = bcd("1.2345678901234567890123456789");
        let row = format_value(&long, W, true);
        assert_eq!(row.len(), W);
        assert_eq!(row, "1.23456789012345e0");
    }
}
