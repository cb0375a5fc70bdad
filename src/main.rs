mod bcd;
mod calc;
mod cordic;
mod parse;
#[cfg(test)]
mod test_util;
mod ui;

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::Parser;
use crossterm::tty::IsTty;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calc::{format_value, Calc, CalcError};
use parse::Line;

/// RPN scientific calculator on an unpacked-BCD arbitrary-precision kernel.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Working precision in fraction digits (6-32)
    #[arg(long, default_value_t = 32)]
    dec_places: usize,

    /// Trig input and output in radians instead of degrees
    #[arg(long)]
    radians: bool,

    /// Scientific notation in the display
    #[arg(long)]
    sci: bool,

    /// Line-oriented batch mode: one literal or operator per line,
    /// one answer line per input line (forced when stdin is not a tty)
    #[arg(long)]
    batch: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut calc = Calc::new();
    calc.configure(Some(args.dec_places), Some(!args.radians), Some(args.sci));
    debug!(
        dec_places = calc.settings().dec_places,
        deg = calc.settings().deg_rad,
        "configured"
    );

    if args.batch || !io::stdin().is_tty() {
        repl(&mut calc)
    } else {
        ui::term::run(&mut calc)
    }
}

/// Line protocol: every input line answers with the formatted top of
/// stack or an error tag.
fn repl(calc: &mut Calc) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let result = match parse::parse_line(&line) {
            Ok(Line::Empty) => continue,
            Ok(Line::Push(v)) => calc.push(v),
            Ok(Line::Apply(op)) => calc.apply(op),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => match calc.top() {
                Some(v) => {
                    let row = format_value(v, ui::SCREEN_WIDTH, calc.settings().sci_not);
                    writeln!(out, "{}", row.trim())?;
                }
                None => writeln!(out, "empty")?,
            },
            Err(e) => writeln!(out, "{}", tag(e))?,
        }
        out.flush()?;
    }
    Ok(())
}

fn tag(e: CalcError) -> &'static str {
    match e {
        CalcError::StackFull => "STACK_FULL",
        CalcError::Underflow => "UNDERFLOW",
        CalcError::DivideByZero | CalcError::Domain => "DOMAIN",
        CalcError::TooLarge => "OVERFLOW",
        CalcError::Parse => "PARSE",
    }
}
