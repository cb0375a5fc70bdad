mod format;
mod ops;

pub use format::format_value;
pub use ops::Op;

use crate::bcd::{add, compare, compare_lit, div, mul, rol, ror, sub, Bcd};
use crate::cordic;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::trace;

/// Depth of the value stack.
pub const STACK_SIZE: usize = 10;

/// Everything an operator can refuse to do.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("Stack full")]
    StackFull,
    /// Arity unmet; front-ends render nothing for this one.
    #[error("stack underflow")]
    Underflow,
    #[error("Divide by zero")]
    DivideByZero,
    #[error("Invalid input")]
    Domain,
    #[error("Argument too large")]
    TooLarge,
    #[error("Invalid input")]
    Parse,
}

/// Working configuration. The table sizes are derived state: the number of
/// CORDIC iterations that still contribute anything at `dec_places`.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Fraction digits carried by multiply, divide, shifts and the
    /// transcendental kernels, 6..=32.
    pub dec_places: usize,
    /// True for degrees, false for radians.
    pub deg_rad: bool,
    /// Scientific notation in the formatter.
    pub sci_not: bool,
    pub log_table_size: usize,
    pub trig_table_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dec_places: 32,
            deg_rad: true,
            sci_not: false,
            log_table_size: cordic::LOG_TABLE_LEN,
            trig_table_size: cordic::TRIG_TABLE_LEN,
        }
    }
}

/// The RPN evaluator: a bounded value stack, the settings record and the
/// 2nd-function latch.
pub struct Calc {
    stack: Vec<Bcd>,
    settings: Settings,
    shift: bool,
}

impl Default for Calc {
    fn default() -> Self {
        Calc::new()
    }
}

impl Calc {
    pub fn new() -> Self {
        Calc {
            stack: Vec::with_capacity(STACK_SIZE),
            settings: Settings::default(),
            shift: false,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn top(&self) -> Option<&Bcd> {
        self.stack.last()
    }

    /// Read-only view of the whole stack, bottom first.
    pub fn stack(&self) -> &[Bcd] {
        &self.stack
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn shift_latched(&self) -> bool {
        self.shift
    }

    /// Update settings; a precision change re-derives the usable CORDIC
    /// iteration counts.
    pub fn configure(
        &mut self,
        dec_places: Option<usize>,
        deg_rad: Option<bool>,
        sci_not: Option<bool>,
    ) {
        if let Some(p) = dec_places {
            let p = p.clamp(6, 32);
            self.settings.dec_places = p;
            let (logs, trig) = cordic::table_sizes(p);
            self.settings.log_table_size = logs;
            self.settings.trig_table_size = trig;
        }
        if let Some(d) = deg_rad {
            self.settings.deg_rad = d;
        }
        if let Some(n) = sci_not {
            self.settings.sci_not = n;
        }
    }

    /// Push a parsed value, canonicalizing it first.
    pub fn push(&mut self, mut v: Bcd) -> Result<(), CalcError> {
        if self.stack.len() == STACK_SIZE {
            return Err(CalcError::StackFull);
        }
        if v.is_zero() {
            v.sign = 0;
        }
        v.full_shrink();
        self.stack.push(v);
        Ok(())
    }

    /// Parse a decimal literal and push it.
    pub fn push_literal(&mut self, text: &str) -> Result<(), CalcError> {
        let v: Bcd = text.parse().map_err(|_| CalcError::Parse)?;
        self.push(v)
    }

    /// Execute one operator. Errors leave the stack exactly as it was.
    pub fn apply(&mut self, op: Op) -> Result<(), CalcError> {
        if op == Op::Shift {
            self.shift = !self.shift;
            return Ok(());
        }
        let op = if self.shift {
            op.entry().second.unwrap_or(op)
        } else {
            op
        };
        self.shift = false;

        let entry = op.entry();
        trace!(%op, depth = self.stack.len(), "dispatch");
        if self.stack.len() < entry.arity {
            return Err(CalcError::Underflow);
        }

        let s = self.settings.clone();
        let p = s.dec_places;
        let one = Bcd::one();
        let zero = Bcd::zero();
        let t = self.stack.len();

        let out: Option<Bcd> = match op {
            Op::Add => Some(add(&self.stack[t - 2], &self.stack[t - 1])),
            Op::Sub => Some(sub(&self.stack[t - 2], &self.stack[t - 1])),
            Op::Mul => Some(mul(&self.stack[t - 2], &self.stack[t - 1], p)),
            Op::Div => {
                if self.stack[t - 1].is_zero() {
                    return Err(CalcError::DivideByZero);
                }
                Some(div(&self.stack[t - 2], &self.stack[t - 1], p))
            }
            Op::Mod => {
                if self.stack[t - 1].is_zero() {
                    return Err(CalcError::Domain);
                }
                let mut rem = self.stack[t - 2].clone();
                let sign = rem.sign;
                rem.sign = 0;
                let mut divisor = self.stack[t - 1].clone();
                divisor.sign = 0;
                loop {
                    let next = sub(&rem, &divisor);
                    if next.is_negative() {
                        break;
                    }
                    rem = next;
                }
                rem.sign = sign;
                Some(rem)
            }
            Op::Recip => {
                if self.stack[t - 1].is_zero() {
                    return Err(CalcError::DivideByZero);
                }
                Some(div(&one, &self.stack[t - 1], p))
            }
            Op::Sqrt => {
                let x = &self.stack[t - 1];
                if x.is_zero() {
                    Some(zero.clone())
                } else if x.is_negative() {
                    return Err(CalcError::Domain);
                } else {
                    let half: Bcd = "0.5".parse().expect("bad built-in constant");
                    let mut r = cordic::pow(x, &half, &s).ok_or(CalcError::TooLarge)?;
                    truncate_power(&mut r, p);
                    Some(r)
                }
            }
            Op::Square => {
                let x = &self.stack[t - 1];
                Some(mul(x, x, p))
            }
            Op::Pow | Op::Root => {
                let base_cell = &self.stack[t - 2];
                let exp_cell = &self.stack[t - 1];
                let eff_exp = if op == Op::Root {
                    if exp_cell.is_zero() {
                        return Err(CalcError::Domain);
                    }
                    div(&one, exp_cell, p)
                } else {
                    exp_cell.clone()
                };

                let exp_sign = compare(&zero, &eff_exp);
                let base_sign = compare(&zero, base_cell);
                if base_sign == Ordering::Equal {
                    Some(zero.clone())
                } else if exp_sign == Ordering::Equal {
                    Some(one.clone())
                } else {
                    let mut base = base_cell.clone();
                    base.sign = 0;
                    let mut e = eff_exp;
                    e.sign = 0;
                    let base_neg = base_sign == Ordering::Greater;
                    let exp_neg = exp_sign == Ordering::Greater;
                    if base_neg && !e.is_integer() {
                        return Err(CalcError::Domain);
                    }
                    let mut r = cordic::pow(&base, &e, &s).ok_or(CalcError::TooLarge)?;
                    truncate_power(&mut r, p);
                    if exp_neg {
                        r = div(&one, &r, p);
                    }
                    if base_neg && e.digits[e.dec - 1] % 2 == 1 {
                        r.sign = 1;
                    }
                    Some(r)
                }
            }
            Op::Negate => {
                let x = &mut self.stack[t - 1];
                if !x.is_zero() {
                    x.sign ^= 1;
                }
                None
            }
            Op::Round => {
                let x = &self.stack[t - 1];
                if x.frac_digits() > 0 {
                    let mut trimmed = x.clone();
                    trimmed.len = trimmed.dec;
                    if x.digits[x.dec] > 4 {
                        // half-up on the magnitude
                        let sign = trimmed.sign;
                        trimmed.sign = 0;
                        let mut r = add(&trimmed, &one);
                        r.sign = sign;
                        Some(r)
                    } else {
                        Some(trimmed)
                    }
                } else {
                    None
                }
            }
            Op::Dup => {
                if t == STACK_SIZE {
                    return Err(CalcError::StackFull);
                }
                let copy = self.stack[t - 1].clone();
                self.stack.push(copy);
                None
            }
            Op::Swap => {
                self.stack.swap(t - 1, t - 2);
                None
            }
            Op::Drop => {
                self.stack.pop();
                None
            }
            Op::Clear => {
                self.stack.clear();
                None
            }
            Op::RollUp => {
                let bottom = self.stack.remove(0);
                self.stack.push(bottom);
                None
            }
            Op::RollDown => {
                let top = self.stack.pop().expect("arity checked");
                self.stack.insert(0, top);
                None
            }
            Op::ShiftLeft => Some(rol(&self.stack[t - 1], 1)),
            Op::ShiftRight => Some(ror(&self.stack[t - 1], 1, p)),
            Op::Ln => {
                let x = &self.stack[t - 1];
                if compare(&zero, x) != Ordering::Less {
                    return Err(CalcError::Domain);
                }
                Some(cordic::ln(x, &s).ok_or(CalcError::TooLarge)?)
            }
            Op::Log => {
                let x = &self.stack[t - 1];
                if compare(&zero, x) != Ordering::Less {
                    return Err(CalcError::Domain);
                }
                match pure_power_of_ten(x) {
                    Some(exp10) => {
                        let mut r = Bcd::zero();
                        r.len = 3;
                        r.dec = 3;
                        r.digits[0] = (exp10 / 100) as u8;
                        r.digits[1] = ((exp10 % 100) / 10) as u8;
                        r.digits[2] = (exp10 % 10) as u8;
                        Some(r)
                    }
                    None => {
                        let l = cordic::ln(x, &s).ok_or(CalcError::TooLarge)?;
                        Some(div(&l, &cordic::ln10(p), p))
                    }
                }
            }
            Op::Exp => {
                let x = &self.stack[t - 1];
                if compare_lit("177", x) == Ordering::Less {
                    return Err(CalcError::TooLarge);
                }
                Some(cordic::exp(x, &s))
            }
            Op::TenPow => {
                let x = &self.stack[t - 1];
                match compare(&zero, x) {
                    Ordering::Equal => Some(one.clone()),
                    order => {
                        let negative = order == Ordering::Greater;
                        let mut mag = x.clone();
                        mag.sign = 0;
                        let r = if mag.is_integer() {
                            let n = if compare_lit("254", &mag) == Ordering::Less {
                                255
                            } else {
                                small_integer(&mag)
                            };
                            if n > 254 {
                                return Err(CalcError::TooLarge);
                            }
                            let mut r = Bcd::zero();
                            r.len = n + 1;
                            r.dec = n + 1;
                            r.digits[0] = 1;
                            r
                        } else {
                            let ten: Bcd = "10".parse().expect("bad built-in constant");
                            let mut r = cordic::pow(&ten, &mag, &s).ok_or(CalcError::TooLarge)?;
                            truncate_power(&mut r, p);
                            r
                        };
                        Some(if negative { div(&one, &r, p) } else { r })
                    }
                }
            }
            Op::Sin | Op::Tan => {
                let mut x = self.stack[t - 1].clone();
                let negated = x.is_negative();
                x.sign = 0;
                let (reduced, sin_flip, cos_flip) = cordic::trig_prep(&x, &s);
                let at_ninety = compare_lit("90", &reduced) == Ordering::Equal;
                if op == Op::Tan && at_ninety {
                    return Err(CalcError::Domain);
                }
                let (mut sine, mut cosine) = cordic::sin_cos(&reduced, &s);
                if at_ninety {
                    sine = one.clone();
                }
                if usize::from(negated) + usize::from(sin_flip) == 1 {
                    sine.sign = 1;
                }
                if cos_flip {
                    cosine.sign = 1;
                }
                if op == Op::Tan {
                    Some(div(&sine, &cosine, p))
                } else {
                    Some(sine)
                }
            }
            Op::Cos => {
                let mut x = self.stack[t - 1].clone();
                x.sign = 0;
                let (reduced, _, cos_flip) = cordic::trig_prep(&x, &s);
                let mut cosine = if reduced.is_zero() {
                    one.clone()
                } else {
                    cordic::sin_cos(&reduced, &s).1
                };
                if cos_flip {
                    cosine.sign = 1;
                }
                Some(cosine)
            }
            Op::Asin | Op::Acos => {
                let x = &self.stack[t - 1];
                let at_zero = compare(&zero, x) == Ordering::Equal;
                let at_one = compare(&one, x);
                let at_neg_one = compare_lit("-1", x);
                let exact = |lit: &str| lit.parse::<Bcd>().expect("bad built-in constant");
                if at_zero {
                    Some(exact(if op == Op::Acos { "90" } else { "0" }))
                } else if at_one == Ordering::Equal {
                    Some(exact(if op == Op::Acos { "0" } else { "90" }))
                } else if at_neg_one == Ordering::Equal {
                    Some(exact(if op == Op::Acos { "180" } else { "-90" }))
                } else if at_one == Ordering::Less || at_neg_one == Ordering::Greater {
                    return Err(CalcError::Domain);
                } else if op == Op::Acos {
                    Some(cordic::acos(x, &s).ok_or(CalcError::TooLarge)?)
                } else {
                    Some(cordic::asin(x, &s).ok_or(CalcError::TooLarge)?)
                }
            }
            Op::Atan => Some(cordic::atan(&self.stack[t - 1], &s)),
            Op::Pi => {
                if t == STACK_SIZE {
                    return Err(CalcError::StackFull);
                }
                self.stack.push(cordic::pi(p));
                None
            }
            Op::Shift => unreachable!("handled above"),
        };

        let mut out = out;
        if !s.deg_rad && matches!(op, Op::Atan | Op::Acos | Op::Asin) {
            if let Some(v) = out.take() {
                out = Some(div(&v, &cordic::deg_factor(), p));
            }
        }

        if let Some(mut v) = out {
            if entry.placement == 2 {
                self.stack.pop();
            }
            v.full_shrink();
            if v.is_zero() && v.is_negative() {
                v.sign = 0;
            }
            let slot = self.stack.last_mut().expect("arity checked");
            *slot = v;
        }
        Ok(())
    }
}

/// Post-kernel truncation shared by the power-style operators: an integer
/// part wider than the working precision wins outright, otherwise the total
/// digit count is capped.
fn truncate_power(v: &mut Bcd, dec_places: usize) {
    if v.dec > dec_places {
        v.len = v.dec;
    } else if v.len > dec_places {
        v.len = dec_places;
    }
}

/// Recognizes `1` followed only by zeros (an integer power of ten after
/// trailing-zero stripping) and returns the exponent.
fn pure_power_of_ten(v: &Bcd) -> Option<usize> {
    if v.digits[0] != 1 {
        return None;
    }
    let mut probe = v.clone();
    let mut k = probe.len;
    while k > probe.dec && probe.digits[k - 1] == 0 {
        k -= 1;
    }
    probe.len = k;
    if probe.len != probe.dec {
        return None;
    }
    probe.digits[0] = 0;
    if probe.is_zero() {
        Some(probe.len - 1)
    } else {
        None
    }
}

/// Reads an integer already known to be at most three digits wide.
fn small_integer(v: &Bcd) -> usize {
    let i = v.digit_or_zero(0) as usize * 100
        + v.digit_or_zero(1) as usize * 10
        + v.digit_or_zero(2) as usize;
    match v.dec {
        2 => i / 10,
        1 => i / 100,
        _ => i,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_close, bcd};
    use pretty_assertions::assert_eq;

    fn push(calc: &mut Calc, text: &str) {
        calc.push_literal(text).expect(text);
    }

    fn top_str(calc: &Calc) -> String {
        let s = calc.top().expect("empty stack").to_string();
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s
        }
    }

    #[test]
    fn test_scenario_addition() {
        let mut calc = Calc::new();
        push(&mut calc, "12");
        push(&mut calc, "34");
        calc.apply(Op::Add).unwrap();
        assert_eq!(top_str(&calc), "46");
        assert_eq!(calc.depth(), 1);
    }

    #[test]
    fn test_scenario_power() {
        let mut calc = Calc::new();
        push(&mut calc, "2");
        push(&mut calc, "10");
        calc.apply(Op::Pow).unwrap();
        assert_close(calc.top().unwrap(), &bcd("1024"), 26);
        assert_eq!(calc.depth(), 1);
    }

    #[test]
    fn test_scenario_sqrt_squares_back() {
        let mut calc = Calc::new();
        push(&mut calc, "2");
        calc.apply(Op::Sqrt).unwrap();
        assert_close(
            calc.top().unwrap(),
            &bcd("1.41421356237309504880168872420970"),
            28,
        );
        calc.apply(Op::Square).unwrap();
        assert_close(calc.top().unwrap(), &bcd("2"), 27);
    }

    #[test]
    fn test_scenario_one_third() {
        let mut calc = Calc::new();
        push(&mut calc, "1");
        push(&mut calc, "3");
        calc.apply(Op::Div).unwrap();
        assert_eq!(
            calc.top().unwrap().to_string(),
            format!("0.{}", "3".repeat(32))
        );
    }

    #[test]
    fn test_scenario_pi_at_twelve_places() {
        let mut calc = Calc::new();
        calc.configure(Some(12), None, None);
        calc.apply(Op::Pi).unwrap();
        assert_eq!(calc.top().unwrap().to_string(), "3.141592653589");
    }

    #[test]
    fn test_scenario_sin_thirty() {
        let mut calc = Calc::new();
        push(&mut calc, "30");
        calc.apply(Op::Sin).unwrap();
        assert_close(calc.top().unwrap(), &bcd("0.5"), 29);
    }

    #[test]
    fn test_div_mod_identity() {
        let mut calc = Calc::new();
        push(&mut calc, "47");
        push(&mut calc, "7");
        calc.apply(Op::Mod).unwrap();
        assert_eq!(top_str(&calc), "5");

        let mut calc = Calc::new();
        push(&mut calc, "-47");
        push(&mut calc, "7");
        calc.apply(Op::Mod).unwrap();
        // the remainder keeps the dividend's sign
        assert_eq!(top_str(&calc), "-5");
    }

    #[test]
    fn test_underflow_is_silent_noop() {
        let mut calc = Calc::new();
        push(&mut calc, "5");
        assert_eq!(calc.apply(Op::Add), Err(CalcError::Underflow));
        assert_eq!(calc.depth(), 1);
        assert_eq!(top_str(&calc), "5");
    }

    #[test]
    fn test_divide_by_zero_preserves_operands() {
        let mut calc = Calc::new();
        push(&mut calc, "9");
        push(&mut calc, "0");
        assert_eq!(calc.apply(Op::Div), Err(CalcError::DivideByZero));
        assert_eq!(calc.depth(), 2);
        assert_eq!(top_str(&calc), "0");
        assert_eq!(calc.apply(Op::Mod), Err(CalcError::Domain));
        assert_eq!(calc.depth(), 2);
    }

    #[test]
    fn test_stack_full_boundary() {
        let mut calc = Calc::new();
        for i in 0..STACK_SIZE {
            push(&mut calc, &i.to_string());
        }
        assert_eq!(calc.push_literal("11"), Err(CalcError::StackFull));
        assert_eq!(calc.apply(Op::Dup), Err(CalcError::StackFull));
        assert_eq!(calc.apply(Op::Pi), Err(CalcError::StackFull));
        assert_eq!(calc.depth(), STACK_SIZE);
    }

    #[test]
    fn test_exp_overflow_boundary() {
        let mut calc = Calc::new();
        push(&mut calc, "177");
        assert!(calc.apply(Op::Exp).is_ok());
        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "178");
        assert_eq!(calc.apply(Op::Exp), Err(CalcError::TooLarge));
        assert_eq!(top_str(&calc), "178");
    }

    #[test]
    fn test_ten_pow_boundaries() {
        let mut calc = Calc::new();
        push(&mut calc, "254");
        calc.apply(Op::TenPow).unwrap();
        let top = calc.top().unwrap();
        assert_eq!(top.int_digits(), 255);
        assert_eq!(top.to_string(), format!("1{}", "0".repeat(254)));

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "255");
        assert_eq!(calc.apply(Op::TenPow), Err(CalcError::TooLarge));

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "-3");
        calc.apply(Op::TenPow).unwrap();
        assert_eq!(top_str(&calc), "0.001");
    }

    #[test]
    fn test_log_pure_powers_short_circuit() {
        let mut calc = Calc::new();
        push(&mut calc, "1000");
        calc.apply(Op::Log).unwrap();
        assert_eq!(top_str(&calc), "3");

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "1");
        calc.apply(Op::Log).unwrap();
        assert_eq!(top_str(&calc), "0");

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "2");
        calc.apply(Op::Log).unwrap();
        assert_close(
            calc.top().unwrap(),
            &bcd("0.30102999566398119521373889472449"),
            28,
        );
    }

    #[test]
    fn test_trig_exact_points() {
        let mut calc = Calc::new();
        push(&mut calc, "90");
        calc.apply(Op::Sin).unwrap();
        assert_eq!(top_str(&calc), "1");

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "90");
        calc.apply(Op::Cos).unwrap();
        assert!(calc.top().unwrap().is_zero());
        assert!(!calc.top().unwrap().is_negative());

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "90");
        assert_eq!(calc.apply(Op::Tan), Err(CalcError::Domain));
        assert_eq!(top_str(&calc), "90");
    }

    #[test]
    fn test_inverse_trig_exact_points() {
        let mut calc = Calc::new();
        for (input, op, expect) in [
            ("0", Op::Acos, "90"),
            ("1", Op::Acos, "0"),
            ("-1", Op::Acos, "180"),
            ("0", Op::Asin, "0"),
            ("1", Op::Asin, "90"),
            ("-1", Op::Asin, "-90"),
        ] {
            calc.apply(Op::Clear).ok();
            push(&mut calc, input);
            calc.apply(op).unwrap();
            assert_eq!(top_str(&calc), expect, "{op} {input}");
        }

        push(&mut calc, "1.5");
        assert_eq!(calc.apply(Op::Asin), Err(CalcError::Domain));
        assert_eq!(calc.apply(Op::Acos), Err(CalcError::Domain));
    }

    #[test]
    fn test_negative_base_powers() {
        let mut calc = Calc::new();
        push(&mut calc, "-2");
        push(&mut calc, "3");
        calc.apply(Op::Pow).unwrap();
        assert_close(calc.top().unwrap(), &bcd("-8"), 27);

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "-2");
        push(&mut calc, "2");
        calc.apply(Op::Pow).unwrap();
        assert_close(calc.top().unwrap(), &bcd("4"), 27);
        assert!(!calc.top().unwrap().is_negative());

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "-2");
        push(&mut calc, "0.5");
        assert_eq!(calc.apply(Op::Pow), Err(CalcError::Domain));
        assert_eq!(calc.depth(), 2);
    }

    #[test]
    fn test_root() {
        let mut calc = Calc::new();
        push(&mut calc, "27");
        push(&mut calc, "3");
        calc.apply(Op::Root).unwrap();
        assert_close(calc.top().unwrap(), &bcd("3"), 27);

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "16");
        push(&mut calc, "0");
        assert_eq!(calc.apply(Op::Root), Err(CalcError::Domain));
    }

    #[test]
    fn test_stack_management_ops() {
        let mut calc = Calc::new();
        push(&mut calc, "1");
        push(&mut calc, "2");
        push(&mut calc, "3");
        calc.apply(Op::Swap).unwrap();
        assert_eq!(top_str(&calc), "2");
        calc.apply(Op::Drop).unwrap();
        assert_eq!(top_str(&calc), "3");
        calc.apply(Op::Dup).unwrap();
        assert_eq!(calc.depth(), 3);
        calc.apply(Op::RollUp).unwrap();
        assert_eq!(top_str(&calc), "1");
        calc.apply(Op::RollDown).unwrap();
        assert_eq!(top_str(&calc), "3");
        calc.apply(Op::Clear).unwrap();
        assert_eq!(calc.depth(), 0);
    }

    #[test]
    fn test_negate_and_round() {
        let mut calc = Calc::new();
        push(&mut calc, "2.5");
        calc.apply(Op::Negate).unwrap();
        assert_eq!(top_str(&calc), "-2.5");
        calc.apply(Op::Round).unwrap();
        // half-up on the magnitude
        assert_eq!(top_str(&calc), "-3");

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "2.4");
        calc.apply(Op::Round).unwrap();
        assert_eq!(top_str(&calc), "2");

        calc.apply(Op::Clear).unwrap();
        push(&mut calc, "0");
        calc.apply(Op::Negate).unwrap();
        assert!(!calc.top().unwrap().is_negative());
    }

    #[test]
    fn test_decimal_shift_ops() {
        let mut calc = Calc::new();
        push(&mut calc, "5");
        calc.apply(Op::ShiftLeft).unwrap();
        assert_eq!(top_str(&calc), "10");
        calc.apply(Op::ShiftRight).unwrap();
        assert_eq!(top_str(&calc), "5");
    }

    #[test]
    fn test_shift_latch_selects_second_function() {
        let mut calc = Calc::new();
        push(&mut calc, "10");
        push(&mut calc, "3");
        calc.apply(Op::Shift).unwrap();
        assert!(calc.shift_latched());
        calc.apply(Op::Div).unwrap(); // resolves to mod
        assert_eq!(top_str(&calc), "1");
        assert!(!calc.shift_latched());
        // latch is single-use
        push(&mut calc, "4");
        calc.apply(Op::Div).unwrap();
        assert_eq!(top_str(&calc), "0.25");
    }

    #[test]
    fn test_radian_mode_inverse_trig() {
        let mut calc = Calc::new();
        calc.configure(None, Some(false), None);
        push(&mut calc, "1");
        calc.apply(Op::Atan).unwrap();
        // pi/4 radians
        assert_close(
            calc.top().unwrap(),
            &bcd("0.78539816339744830961566084581988"),
            27,
        );
    }

    #[test]
    fn test_radian_mode_sin() {
        let mut calc = Calc::new();
        calc.configure(None, Some(false), None);
        push(&mut calc, cordic::PI_2);
        calc.apply(Op::Sin).unwrap();
        assert_close(calc.top().unwrap(), &bcd("1"), 28);
    }

    #[test]
    fn test_published_results_are_canonical() {
        let mut calc = Calc::new();
        push(&mut calc, "0001");
        assert_eq!(calc.top().unwrap().int_digits(), 1);
        push(&mut calc, "3");
        calc.apply(Op::Sub).unwrap();
        assert_eq!(top_str(&calc), "-2");
        push(&mut calc, "-2");
        calc.apply(Op::Sub).unwrap();
        // zero comes out positive
        assert!(calc.top().unwrap().is_zero());
        assert!(!calc.top().unwrap().is_negative());
    }

    #[test]
    fn test_mod_matches_truncated_remainder() {
        use rand::Rng;
        let mut rng = rand::rng();
        let mut calc = Calc::new();
        for _ in 0..25 {
            let a: i32 = rng.random_range(-9999..=9999);
            let b: i32 = rng.random_range(1..=99);
            calc.apply(Op::Clear).ok();
            push(&mut calc, &a.to_string());
            push(&mut calc, &b.to_string());
            calc.apply(Op::Mod).unwrap();
            let m: i32 = top_str(&calc).parse().unwrap();
            assert_eq!(m, a % b, "{} mod {}", a, b);
        }
    }
}
