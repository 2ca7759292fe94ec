//! Line-based replay scripts for driving the engine without a window.
//!
//! Each non-empty line is one command; `#` starts a comment.
//!
//! ```text
//! width 5
//! color #ff0000
//! alpha 128
//! down 10 10
//! move 20 15
//! up 30 20
//! undo
//! ```

use crate::engine::DoodleEngine;
use crate::input::{PointerEvent, PointerId};
use crate::util;
use thiserror::Error;

/// Errors raised while parsing a replay script.
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("line {line}: invalid {what} '{value}'")]
    InvalidArgument {
        line: usize,
        what: &'static str,
        value: String,
    },

    #[error("line {line}: unexpected trailing input '{rest}'")]
    TrailingInput { line: usize, rest: String },
}

/// One parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Pointer(PointerEvent),
    Width(f64),
    Alpha(i32),
    Color(u32),
    Undo,
    Redo,
    Clear,
}

impl ScriptCommand {
    /// Applies the command to the engine.
    pub fn apply(&self, engine: &mut DoodleEngine) {
        match self {
            ScriptCommand::Pointer(event) => engine.handle_pointer(*event),
            ScriptCommand::Width(width) => engine.set_stroke_width(*width),
            ScriptCommand::Alpha(alpha) => engine.set_stroke_alpha(*alpha),
            ScriptCommand::Color(argb) => engine.set_stroke_color(*argb),
            ScriptCommand::Undo => {
                engine.undo();
            }
            ScriptCommand::Redo => {
                engine.redo();
            }
            ScriptCommand::Clear => {
                engine.clear_canvas();
            }
        }
    }
}

/// Parses a whole script, stopping at the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let content = raw.split('#').next().unwrap_or_default().trim();
            (!content.is_empty()).then(|| parse_line(index + 1, content))
        })
        .collect()
}

/// Runs every command against the engine in order.
pub fn run_script(engine: &mut DoodleEngine, commands: &[ScriptCommand]) {
    for command in commands {
        command.apply(engine);
    }
}

fn parse_line(line: usize, content: &str) -> Result<ScriptCommand, ScriptError> {
    let mut words = content.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let mut args = Args {
        line,
        command: &command,
        words,
    };

    let parsed = match command.as_str() {
        "down" | "move" | "up" => {
            let x = args.number("x y [id]", "coordinate")?;
            let y = args.number("x y [id]", "coordinate")?;
            let id = args.optional_pointer_id()?;
            let event = match command.as_str() {
                "down" => PointerEvent::Down { id, x, y },
                "move" => PointerEvent::Move { id, x, y },
                _ => PointerEvent::Up { id, x, y },
            };
            ScriptCommand::Pointer(event)
        }
        "cancel" => ScriptCommand::Pointer(PointerEvent::Cancel),
        "width" => ScriptCommand::Width(args.number("a width", "width")?),
        "alpha" => {
            let value = args.word("an alpha value")?;
            let alpha = value.parse::<i32>().map_err(|_| args.invalid("alpha", value))?;
            ScriptCommand::Alpha(alpha)
        }
        "color" => {
            let value = args.word("a color")?;
            let argb = util::name_to_color(value)
                .map(|color| color.to_argb())
                .or_else(|| util::parse_hex_argb(value))
                .ok_or_else(|| args.invalid("color", value))?;
            ScriptCommand::Color(argb)
        }
        "undo" => ScriptCommand::Undo,
        "redo" => ScriptCommand::Redo,
        "clear" => ScriptCommand::Clear,
        _ => {
            return Err(ScriptError::UnknownCommand { line, command });
        }
    };

    args.finish()?;
    Ok(parsed)
}

struct Args<'a> {
    line: usize,
    command: &'a str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, expected: &'static str) -> Result<&'a str, ScriptError> {
        self.words.next().ok_or_else(|| ScriptError::MissingArgument {
            line: self.line,
            command: self.command.to_string(),
            expected,
        })
    }

    fn number(&mut self, expected: &'static str, what: &'static str) -> Result<f64, ScriptError> {
        let value = self.word(expected)?;
        value
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| self.invalid(what, value))
    }

    fn optional_pointer_id(&mut self) -> Result<PointerId, ScriptError> {
        match self.words.next() {
            None => Ok(0),
            Some(value) => value
                .parse::<PointerId>()
                .map_err(|_| self.invalid("pointer id", value)),
        }
    }

    fn invalid(&self, what: &'static str, value: &str) -> ScriptError {
        ScriptError::InvalidArgument {
            line: self.line,
            what,
            value: value.to_string(),
        }
    }

    fn finish(mut self) -> Result<(), ScriptError> {
        let rest: Vec<&str> = self.words.by_ref().collect();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(ScriptError::TrailingInput {
                line: self.line,
                rest: rest.join(" "),
            })
        }
    }
}
