pub mod term;

/// Columns of the emulated LCD row: a slot label, a colon and the number
/// field.
pub const SCREEN_WIDTH: usize = 20;

/// Columns left for the number itself.
pub const FIELD_WIDTH: usize = SCREEN_WIDTH - 2;
