use std::io::{self, Stdout};

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tui::backend::CrosstermBackend;
use tui::layout::{Constraint, Direction, Layout};
use tui::text::{Span, Spans, Text};
use tui::widgets::{Block, Borders, Paragraph};
use tui::{Frame, Terminal};

use super::{FIELD_WIDTH, SCREEN_WIDTH};
use crate::calc::{format_value, Calc, CalcError, Op};

/// Interactive front-end: a four-row LCD-style stack window, an input
/// line, and a modal error row dismissed with Enter.
pub fn run(calc: &mut Calc) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    terminal.hide_cursor()?;

    let mut input = String::new();
    let mut editing = false;
    let mut message: Option<String> = None;

    loop {
        terminal.draw(|f| draw(f, calc, &input, editing, message.as_deref()))?;

        let key = match event::read()? {
            Event::Key(KeyEvent { code, .. }) => code,
            _ => continue,
        };

        // an error message blocks everything until Enter
        if message.is_some() {
            if key == KeyCode::Enter {
                message = None;
            }
            continue;
        }

        match key {
            KeyCode::Char(c @ ('0'..='9' | '.')) => {
                if !editing && calc.depth() == crate::calc::STACK_SIZE {
                    message = Some(CalcError::StackFull.to_string());
                } else {
                    if !editing {
                        editing = true;
                        input.clear();
                    }
                    if input.len() < 255 {
                        input.push(c);
                    }
                }
            }
            KeyCode::Backspace => {
                if editing {
                    input.pop();
                    if input.is_empty() {
                        editing = false;
                    }
                } else {
                    report(calc.apply(Op::Drop), &mut message);
                }
            }
            KeyCode::Enter => {
                if editing {
                    flush(calc, &mut input, &mut message);
                    editing = false;
                } else {
                    report(calc.apply(Op::Dup), &mut message);
                }
            }
            KeyCode::Esc => {
                if editing {
                    editing = false;
                    input.clear();
                } else {
                    break;
                }
            }
            KeyCode::Up => report(calc.apply(Op::RollUp), &mut message),
            KeyCode::Down => report(calc.apply(Op::RollDown), &mut message),
            KeyCode::Left => op_key(calc, Op::ShiftLeft, &mut input, &mut editing, &mut message),
            KeyCode::Right => op_key(calc, Op::ShiftRight, &mut input, &mut editing, &mut message),
            KeyCode::Char(c) => {
                if let Some(op) = key_op(c) {
                    op_key(calc, op, &mut input, &mut editing, &mut message);
                }
            }
            _ => {}
        }
    }

    terminal.clear()?;
    terminal.show_cursor()?;
    disable_raw_mode()?;
    Ok(())
}

/// One letter per operator, calculator-keypad style.
fn key_op(c: char) -> Option<Op> {
    Some(match c {
        '+' => Op::Add,
        '-' => Op::Sub,
        '*' => Op::Mul,
        '/' => Op::Div,
        ' ' => Op::Shift,
        'a' => Op::Atan,
        'c' => Op::Cos,
        'd' => Op::Dup,
        'e' => Op::Exp,
        'g' => Op::Acos,
        'h' => Op::Asin,
        'i' => Op::Pi,
        'j' => Op::TenPow,
        'k' => Op::Log,
        'l' => Op::Ln,
        'm' => Op::Negate,
        'n' => Op::Recip,
        'o' => Op::Round,
        'p' => Op::Pow,
        'q' => Op::Sqrt,
        'r' => Op::Root,
        's' => Op::Sin,
        't' => Op::Tan,
        'v' => Op::Mod,
        'w' => Op::Swap,
        'x' => Op::Square,
        'z' => Op::Clear,
        _ => return None,
    })
}

/// Finish any pending input, then dispatch the operator.
fn op_key(
    calc: &mut Calc,
    op: Op,
    input: &mut String,
    editing: &mut bool,
    message: &mut Option<String>,
) {
    if *editing {
        *editing = false;
        if !flush(calc, input, message) {
            return;
        }
    }
    report(calc.apply(op), message);
}

/// Push the input buffer; the buffer is consumed either way.
fn flush(calc: &mut Calc, input: &mut String, message: &mut Option<String>) -> bool {
    let result = calc.push_literal(input);
    input.clear();
    match result {
        Ok(()) => true,
        Err(e) => {
            *message = Some(e.to_string());
            false
        }
    }
}

fn report(result: Result<(), CalcError>, message: &mut Option<String>) {
    match result {
        Ok(()) | Err(CalcError::Underflow) => {}
        Err(e) => *message = Some(e.to_string()),
    }
}

fn draw(
    f: &mut Frame<CrosstermBackend<Stdout>>,
    calc: &Calc,
    input: &str,
    editing: bool,
    message: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Length(1)].as_ref())
        .split(f.size());

    let rows = if editing { 3 } else { 4 };
    let mut lines: Vec<Spans> = Vec::new();
    let settings = calc.settings();
    for i in 0..rows {
        let label = rows - i;
        let idx = calc.depth() as i32 - label as i32;
        let body = if idx >= 0 {
            format_value(&calc.stack()[idx as usize], FIELD_WIDTH, settings.sci_not)
        } else {
            " ".repeat(FIELD_WIDTH)
        };
        lines.push(Spans::from(format!("{}:{}", label, body)));
    }
    if editing {
        let shown: String = if input.len() > SCREEN_WIDTH {
            format!("<{}", &input[input.len() - (SCREEN_WIDTH - 1)..])
        } else {
            input.to_string()
        };
        lines.push(Spans::from(shown));
    }
    if let Some(msg) = message {
        // center the message in the last row
        let pad = SCREEN_WIDTH.saturating_sub(msg.len()) / 2;
        lines.push(Spans::from(Span::raw(format!(
            "{}{}",
            " ".repeat(pad),
            msg
        ))));
    }

    let lcd = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("rpn"));
    f.render_widget(lcd, chunks[0]);

    let status = format!(
        "{} {} {} places{}",
        if settings.deg_rad { "deg" } else { "rad" },
        if settings.sci_not { "sci" } else { "fix" },
        settings.dec_places,
        if calc.shift_latched() { "  [2nd]" } else { "" },
    );
    f.render_widget(Paragraph::new(status), chunks[1]);
}
