//! Line-oriented command scripts
//!
//! The binary has no window; it replays a script of layout commands against
//! the model. One command per line, `#` starts a comment:
//!
//! ```text
//! split horizontal 3
//! drag 270 100 320 100
//! load Notes Notes title=Scratch
//! merge
//! ```

use crate::geometry::Axis;
use crate::messages::{AppMsg, LayoutMsg, Msg, PanelMsg};
use crate::model::CellId;
use crate::panel::PanelArgs;

/// A script line that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Parse a whole script. Stops at the first bad line.
pub fn parse_script(source: &str) -> Result<Vec<Msg>, ScriptError> {
    let mut msgs = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let parsed = parse_line(line).map_err(|message| ScriptError {
            line: index + 1,
            message,
        })?;
        msgs.extend(parsed);
    }
    Ok(msgs)
}

/// Parse one line into zero or more messages (`drag` expands to three)
pub fn parse_line(line: &str) -> Result<Vec<Msg>, String> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Vec::new());
    };
    let command = command.to_ascii_lowercase();
    let command = command.as_str();
    let rest: Vec<&str> = words.collect();

    let msg = match command {
        "split" => {
            let [axis, count] = expect_args::<2>(command, &rest)?;
            let axis = Axis::parse(axis).ok_or_else(|| format!("unknown axis '{}'", axis))?;
            let count = count
                .parse::<usize>()
                .map_err(|_| format!("invalid count '{}'", count))?;
            Msg::split(axis, count)
        }
        "merge" => no_args(command, &rest, Msg::Layout(LayoutMsg::MergeActive))?,
        "close" => no_args(command, &rest, Msg::Layout(LayoutMsg::CloseActive))?,
        "fullscreen" => no_args(command, &rest, Msg::Layout(LayoutMsg::ToggleFullscreen))?,
        "undock" => no_args(command, &rest, Msg::Layout(LayoutMsg::UndockActive))?,
        "append" => no_args(command, &rest, Msg::Layout(LayoutMsg::AppendCell))?,
        "tick" => no_args(command, &rest, Msg::App(AppMsg::Tick))?,
        "dock" => {
            let [cell] = expect_args::<1>(command, &rest)?;
            Msg::Layout(LayoutMsg::Dock(parse_cell(cell)?))
        }
        "activate" => {
            let [cell] = expect_args::<1>(command, &rest)?;
            Msg::Layout(LayoutMsg::Activate(parse_cell(cell)?))
        }
        "press" | "move" | "release" => {
            let [x, y] = expect_args::<2>(command, &rest)?;
            let (x, y) = (parse_coord(x)?, parse_coord(y)?);
            match command {
                "press" => Msg::press(x, y),
                "move" => Msg::pointer_move(x, y),
                _ => Msg::release(x, y),
            }
        }
        "drag" => {
            let [x1, y1, x2, y2] = expect_args::<4>(command, &rest)?;
            let (x1, y1) = (parse_coord(x1)?, parse_coord(y1)?);
            let (x2, y2) = (parse_coord(x2)?, parse_coord(y2)?);
            return Ok(vec![
                Msg::press(x1, y1),
                Msg::pointer_move(x2, y2),
                Msg::release(x2, y2),
            ]);
        }
        "resize" => {
            let [w, h] = expect_args::<2>(command, &rest)?;
            Msg::App(AppMsg::Resize(parse_coord(w)?, parse_coord(h)?))
        }
        "load" | "replace" => {
            let Some((id, tail)) = rest.split_first() else {
                return Err(format!("{} needs a panel id", command));
            };
            let (class, pairs) = match tail.split_first() {
                Some((first, pairs)) if !first.contains('=') => (first.to_string(), pairs),
                _ => (String::new(), tail),
            };
            let mut args = PanelArgs::new();
            for pair in pairs {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("expected key=value, got '{}'", pair))?;
                args = args.with(key, value);
            }
            Msg::Panel(PanelMsg::Load {
                id: id.to_string(),
                class,
                args,
                replace_active: command == "replace",
            })
        }
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(vec![msg])
}

fn expect_args<'a, const N: usize>(
    command: &str,
    rest: &[&'a str],
) -> Result<[&'a str; N], String> {
    <[&str; N]>::try_from(rest)
        .map_err(|_| format!("{} takes {} argument(s), got {}", command, N, rest.len()))
}

fn no_args(command: &str, rest: &[&str], msg: Msg) -> Result<Msg, String> {
    if rest.is_empty() {
        Ok(msg)
    } else {
        Err(format!("{} takes no arguments", command))
    }
}

/// Accepts `3`, `c3` or `cell3`
fn parse_cell(input: &str) -> Result<CellId, String> {
    let digits = input
        .trim_start_matches("cell")
        .trim_start_matches('c')
        .trim_start_matches('#');
    digits
        .parse::<u64>()
        .map(CellId)
        .map_err(|_| format!("invalid cell '{}'", input))
}

fn parse_coord(input: &str) -> Result<f32, String> {
    input
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid number '{}'", input))
}
