use crate::bcd::{compare, sub, Bcd};
use std::cmp::Ordering;
use std::str::FromStr;

pub fn bcd(text: &str) -> Bcd {
    Bcd::from_str(text).expect("bad test literal")
}

/// Assert |a - b| <= 10^-digits, using the kernel's own subtract and
/// compare so no binary floating point sneaks into the checks.
pub fn assert_close(a: &Bcd, b: &Bcd, digits: usize) {
    let mut diff = sub(a, b);
    diff.sign = 0;
    let threshold = bcd(&format!("0.{}1", "0".repeat(digits - 1)));
    assert_ne!(
        compare(&diff, &threshold),
        Ordering::Greater,
        "|{} - {}| = {} exceeds 1e-{}",
        a,
        b,
        diff,
        digits
    );
}
