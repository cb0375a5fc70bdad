use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

/// RPN operator tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// Reciprocal
    Recip,
    Sqrt,
    Square,
    /// y^x
    Pow,
    /// x-th root of y
    Root,
    /// Sign toggle
    Negate,
    /// Truncate to integer, half-up
    Round,
    /// Stack management
    Dup,
    Swap,
    Drop,
    Clear,
    RollUp,
    RollDown,
    /// Decimal shifts: double / halve the top
    ShiftLeft,
    ShiftRight,
    /// Transcendentals
    Ln,
    Log,
    Exp,
    TenPow,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Push pi at the working precision
    Pi,
    /// The 2nd-function latch
    Shift,
}

/// Metadata the dispatcher consults before running an operator.
pub struct OpEntry {
    pub op: Op,
    pub mnemonic: &'static str,
    /// Stack depth the operator needs; unmet arity is a silent no-op.
    pub arity: usize,
    /// Result placement: 0 = handler manages the stack itself,
    /// 1 = replace the top, 2 = replace the top two with one.
    pub placement: u8,
    /// The operator reached through the 2nd-function latch.
    pub second: Option<Op>,
}

impl OpEntry {
    const fn new(
        op: Op,
        mnemonic: &'static str,
        arity: usize,
        placement: u8,
        second: Option<Op>,
    ) -> Self {
        OpEntry {
            op,
            mnemonic,
            arity,
            placement,
            second,
        }
    }
}

use Op::*;

/// The operator table: what each key needs from the stack, where its
/// result goes, and which operator the 2nd-function latch turns it into.
pub static OPS: &[OpEntry] = &[
    OpEntry::new(Add, "+", 2, 2, None),
    OpEntry::new(Sub, "-", 2, 2, None),
    OpEntry::new(Mul, "*", 2, 2, None),
    OpEntry::new(Div, "/", 2, 2, Some(Mod)),
    OpEntry::new(Mod, "mod", 2, 2, None),
    OpEntry::new(Recip, "inv", 1, 1, None),
    OpEntry::new(Sqrt, "sqrt", 1, 1, Some(Square)),
    OpEntry::new(Square, "sq", 1, 1, None),
    OpEntry::new(Pow, "pow", 2, 2, Some(Root)),
    OpEntry::new(Root, "root", 2, 2, None),
    OpEntry::new(Negate, "neg", 1, 0, None),
    OpEntry::new(Round, "round", 1, 1, None),
    OpEntry::new(Dup, "dup", 1, 0, None),
    OpEntry::new(Swap, "swap", 2, 0, None),
    OpEntry::new(Drop, "drop", 1, 0, None),
    OpEntry::new(Clear, "clear", 1, 0, None),
    OpEntry::new(RollUp, "rollup", 2, 0, None),
    OpEntry::new(RollDown, "rolldown", 2, 0, None),
    OpEntry::new(ShiftLeft, "shl", 1, 1, None),
    OpEntry::new(ShiftRight, "shr", 1, 1, None),
    OpEntry::new(Ln, "ln", 1, 1, Some(Exp)),
    OpEntry::new(Log, "log", 1, 1, Some(TenPow)),
    OpEntry::new(Exp, "exp", 1, 1, None),
    OpEntry::new(TenPow, "10x", 1, 1, None),
    OpEntry::new(Sin, "sin", 1, 1, Some(Asin)),
    OpEntry::new(Cos, "cos", 1, 1, Some(Acos)),
    OpEntry::new(Tan, "tan", 1, 1, Some(Atan)),
    OpEntry::new(Asin, "asin", 1, 1, None),
    OpEntry::new(Acos, "acos", 1, 1, None),
    OpEntry::new(Atan, "atan", 1, 1, None),
    OpEntry::new(Pi, "pi", 0, 0, None),
    OpEntry::new(Shift, "shift", 0, 0, None),
];

lazy_static! {
    pub static ref MNEMONIC_MAP: HashMap<&'static str, &'static OpEntry> =
        OPS.iter().map(|e| (e.mnemonic, e)).collect();
    static ref ENTRY_MAP: HashMap<Op, &'static OpEntry> = OPS.iter().map(|e| (e.op, e)).collect();
}

impl Op {
    pub fn from_mnemonic(text: &str) -> Option<Op> {
        MNEMONIC_MAP.get(text).map(|e| e.op)
    }

    pub fn entry(self) -> &'static OpEntry {
        ENTRY_MAP[&self]
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry().mnemonic)
    }
}
