//! Path data tokenizer and bounding-box reducer.
//!
//! Interprets the compact SVG path grammar just far enough to recover the
//! axis-aligned bounding box of the coordinates a path visits. Cubic
//! control points never enter the coordinate set — only the segment's
//! terminal point moves the cursor — so the box for curved paths is an
//! under-approximation of the true visual extent.

/// Movement command kind, one per path command letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandKind {
    MoveAbs,
    MoveRel,
    LineAbs,
    LineRel,
    HLineAbs,
    HLineRel,
    VLineAbs,
    VLineRel,
    CubicAbs,
    CubicRel,
    Close,
    /// Recognized but bounding-box-neutral (S/s, Q/q, T/t, A/a).
    Other(char),
}

impl CommandKind {
    fn from_letter(letter: char) -> Self {
        match letter {
            'M' => Self::MoveAbs,
            'm' => Self::MoveRel,
            'L' => Self::LineAbs,
            'l' => Self::LineRel,
            'H' => Self::HLineAbs,
            'h' => Self::HLineRel,
            'V' => Self::VLineAbs,
            'v' => Self::VLineRel,
            'C' => Self::CubicAbs,
            'c' => Self::CubicRel,
            'Z' | 'z' => Self::Close,
            other => Self::Other(other),
        }
    }
}

/// One tokenized command with its numeric operands.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub operands: Vec<f64>,
}

/// Axis-aligned bounding box over the coordinates a path visits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

const COMMAND_LETTERS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// Split a path data string into commands with their operands.
///
/// The string is segmented into maximal runs starting at a command letter.
/// Within a run, operand text is split into maximal runs of `[0-9.-]`
/// characters, each parsed as its longest valid float prefix; runs with no
/// valid prefix are discarded. Operand counts are not validated here — the
/// reducer skips commands that come up short.
#[must_use]
pub fn tokenize(data: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    let mut current: Option<(char, String)> = None;

    for ch in data.chars() {
        if COMMAND_LETTERS.contains(ch) {
            if let Some((letter, body)) = current.take() {
                commands.push(PathCommand {
                    kind: CommandKind::from_letter(letter),
                    operands: parse_operands(&body),
                });
            }
            current = Some((ch, String::new()));
        } else if let Some((_, body)) = current.as_mut() {
            // Text before the first command letter is dropped.
            body.push(ch);
        }
    }
    if let Some((letter, body)) = current.take() {
        commands.push(PathCommand {
            kind: CommandKind::from_letter(letter),
            operands: parse_operands(&body),
        });
    }

    commands
}

fn parse_operands(body: &str) -> Vec<f64> {
    let mut operands = Vec::new();
    let mut run = String::new();

    for ch in body.chars() {
        if ch.is_ascii_digit() || ch == '.' || ch == '-' {
            run.push(ch);
        } else if !run.is_empty() {
            operands.extend(super::parse_float_prefix(&run));
            run.clear();
        }
    }
    if !run.is_empty() {
        operands.extend(super::parse_float_prefix(&run));
    }

    operands
}

/// Replay `data` against a cursor starting at the origin and reduce the
/// visited coordinates to their bounding box.
///
/// Returns `None` when no coordinate was recorded at all. A recorded
/// single point or axis-aligned segment yields a zero-width or zero-height
/// box; dropping those is the caller's decision.
#[must_use]
pub fn bounding_box(data: &str) -> Option<BoundingBox> {
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    let mut cursor_x = 0.0_f64;
    let mut cursor_y = 0.0_f64;

    for command in tokenize(data) {
        let ops = &command.operands;
        match command.kind {
            CommandKind::MoveAbs | CommandKind::LineAbs if ops.len() >= 2 => {
                cursor_x = ops[0];
                cursor_y = ops[1];
                xs.push(cursor_x);
                ys.push(cursor_y);
            }
            CommandKind::MoveRel | CommandKind::LineRel if ops.len() >= 2 => {
                cursor_x += ops[0];
                cursor_y += ops[1];
                xs.push(cursor_x);
                ys.push(cursor_y);
            }
            CommandKind::HLineAbs if !ops.is_empty() => {
                cursor_x = ops[0];
                xs.push(cursor_x);
                ys.push(cursor_y);
            }
            CommandKind::HLineRel if !ops.is_empty() => {
                cursor_x += ops[0];
                xs.push(cursor_x);
                ys.push(cursor_y);
            }
            CommandKind::VLineAbs if !ops.is_empty() => {
                cursor_y = ops[0];
                xs.push(cursor_x);
                ys.push(cursor_y);
            }
            CommandKind::VLineRel if !ops.is_empty() => {
                cursor_y += ops[0];
                xs.push(cursor_x);
                ys.push(cursor_y);
            }
            CommandKind::CubicAbs if ops.len() >= 6 => {
                cursor_x = ops[4];
                cursor_y = ops[5];
                xs.push(cursor_x);
                ys.push(cursor_y);
            }
            CommandKind::CubicRel if ops.len() >= 6 => {
                cursor_x += ops[4];
                cursor_y += ops[5];
                xs.push(cursor_x);
                ys.push(cursor_y);
            }
            // Close revisits the start point, which is already recorded.
            // Everything else (including short commands) records nothing.
            _ => {}
        }
    }

    if xs.is_empty() || ys.is_empty() {
        return None;
    }

    let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

#[cfg(test)]
#[path = "path_test.rs"]
mod tests;
