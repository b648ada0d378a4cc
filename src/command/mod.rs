//! Script commands for casement
//!
//! A line-oriented command language that drives a [`WindowManager`]. Each
//! line is an uppercase command followed by `key=value` arguments, e.g.
//!
//! ```text
//! REGISTER owner=editor at=100,80 size=800x600 title=Notes
//! DRAG_BEGIN id=1 at=120,90
//! DRAG_UPDATE id=1 at=400,300
//! DRAG_END id=1
//! RENDER
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use serde::Serialize;
use tracing::debug;

use crate::backend::AsciiRenderer;
use crate::config::parser::{parse_position, parse_size};
use crate::error::{CasementError, CasementResult};
use crate::geometry::{Geometry, Position, Size};
use crate::gesture::{Pointer, ResizeAnchor};
use crate::window::{WindowId, WindowManager, WindowOptions, WindowRecord};

/// Size used when `REGISTER` has no `size=`
pub const DEFAULT_WINDOW_SIZE: Size = Size {
    width: 800,
    height: 600,
};

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Register {
        owner: String,
        at: Position,
        size: Size,
        title: Option<String>,
        focus: bool,
    },
    Unregister {
        id: WindowId,
    },
    Focus {
        id: WindowId,
    },
    Minimize {
        id: WindowId,
    },
    Restore {
        id: WindowId,
        focus: bool,
    },
    Maximize {
        id: WindowId,
    },
    Unmaximize {
        id: WindowId,
    },
    DragBegin {
        id: WindowId,
        at: Pointer,
    },
    DragUpdate {
        id: WindowId,
        at: Pointer,
    },
    DragEnd {
        id: WindowId,
    },
    ResizeBegin {
        id: WindowId,
        anchor: ResizeAnchor,
        at: Pointer,
    },
    ResizeUpdate {
        id: WindowId,
        at: Pointer,
    },
    ResizeEnd {
        id: WindowId,
    },
    Container {
        size: Size,
    },
    Render,
    State,
}

/// What running a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Nothing to report
    None,
    /// A window was registered
    Registered(WindowId),
    /// Whether a gesture call had an effect
    Gesture(bool),
    /// ASCII drawing of the current state
    Render(String),
    /// JSON dump of the current state
    State(String),
}

/// Serialized form of the manager state
#[derive(Debug, Serialize)]
pub struct StateDump<'a> {
    pub container: Size,
    pub focused: Option<WindowId>,
    pub any_maximized: bool,
    pub windows: Vec<&'a WindowRecord>,
}

impl ScriptCommand {
    /// Parse a command string
    pub fn parse(input: &str) -> CasementResult<Self> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let (name, rest) = parts
            .split_first()
            .ok_or_else(|| CasementError::InvalidArgument("empty command".into()))?;
        let args = Args::parse(rest);

        let command = match *name {
            "REGISTER" => ScriptCommand::Register {
                owner: args.required("owner")?.to_string(),
                at: args
                    .get("at")
                    .map(parse_position)
                    .transpose()?
                    .unwrap_or(Position::ORIGIN),
                size: args
                    .get("size")
                    .map(parse_size)
                    .transpose()?
                    .unwrap_or(DEFAULT_WINDOW_SIZE),
                title: args.get("title").map(str::to_string),
                focus: !args.flag("nofocus"),
            },
            "UNREGISTER" => ScriptCommand::Unregister { id: args.id()? },
            "FOCUS" => ScriptCommand::Focus { id: args.id()? },
            "MINIMIZE" => ScriptCommand::Minimize { id: args.id()? },
            "RESTORE" => ScriptCommand::Restore {
                id: args.id()?,
                focus: args.flag("focus"),
            },
            "MAXIMIZE" => ScriptCommand::Maximize { id: args.id()? },
            "UNMAXIMIZE" => ScriptCommand::Unmaximize { id: args.id()? },
            "DRAG_BEGIN" => ScriptCommand::DragBegin {
                id: args.id()?,
                at: args.pointer()?,
            },
            "DRAG_UPDATE" => ScriptCommand::DragUpdate {
                id: args.id()?,
                at: args.pointer()?,
            },
            "DRAG_END" => ScriptCommand::DragEnd { id: args.id()? },
            "RESIZE_BEGIN" => ScriptCommand::ResizeBegin {
                id: args.id()?,
                anchor: args.required("anchor")?.parse()?,
                at: args.pointer()?,
            },
            "RESIZE_UPDATE" => ScriptCommand::ResizeUpdate {
                id: args.id()?,
                at: args.pointer()?,
            },
            "RESIZE_END" => ScriptCommand::ResizeEnd { id: args.id()? },
            "CONTAINER" => ScriptCommand::Container {
                size: parse_size(args.required("size")?)?,
            },
            "RENDER" => ScriptCommand::Render,
            "STATE" => ScriptCommand::State,
            other => {
                return Err(CasementError::InvalidArgument(format!(
                    "unknown command '{other}'"
                )))
            }
        };
        Ok(command)
    }

    /// Run the command against `wm`
    pub fn apply(&self, wm: &mut WindowManager<AsciiRenderer>) -> CasementResult<CommandOutput> {
        debug!("Applying {self:?}");
        let output = match self {
            ScriptCommand::Register {
                owner,
                at,
                size,
                title,
                focus,
            } => {
                let opts = WindowOptions {
                    title: title.clone(),
                    min_size: None,
                    focus: *focus,
                };
                let record = wm.register(owner, Geometry::from_parts(*at, *size), opts)?;
                CommandOutput::Registered(record.id())
            }
            ScriptCommand::Unregister { id } => {
                wm.unregister(*id);
                CommandOutput::None
            }
            ScriptCommand::Focus { id } => {
                wm.focus(*id)?;
                CommandOutput::None
            }
            ScriptCommand::Minimize { id } => {
                wm.minimize(*id)?;
                CommandOutput::None
            }
            ScriptCommand::Restore { id, focus } => {
                wm.restore(*id, *focus)?;
                CommandOutput::None
            }
            ScriptCommand::Maximize { id } => {
                wm.maximize(*id)?;
                CommandOutput::None
            }
            ScriptCommand::Unmaximize { id } => {
                wm.restore_maximize(*id)?;
                CommandOutput::None
            }
            ScriptCommand::DragBegin { id, at } => CommandOutput::Gesture(wm.begin_drag(*id, *at)?),
            ScriptCommand::DragUpdate { id, at } => {
                CommandOutput::Gesture(wm.update_drag(*id, *at)?)
            }
            ScriptCommand::DragEnd { id } => CommandOutput::Gesture(wm.end_drag(*id)?),
            ScriptCommand::ResizeBegin { id, anchor, at } => {
                CommandOutput::Gesture(wm.begin_resize(*id, *anchor, *at)?)
            }
            ScriptCommand::ResizeUpdate { id, at } => {
                CommandOutput::Gesture(wm.update_resize(*id, *at)?)
            }
            ScriptCommand::ResizeEnd { id } => CommandOutput::Gesture(wm.end_resize(*id)?),
            ScriptCommand::Container { size } => {
                wm.set_container(Box::new(*size));
                CommandOutput::None
            }
            ScriptCommand::Render => CommandOutput::Render(wm.renderer().render(wm.container())),
            ScriptCommand::State => {
                let dump = StateDump {
                    container: wm.container(),
                    focused: wm.focused(),
                    any_maximized: wm.any_maximized(),
                    windows: wm.registry().all(),
                };
                let json = serde_json::to_string_pretty(&dump)
                    .map_err(|e| CasementError::InvariantViolation(e.to_string()))?;
                CommandOutput::State(json)
            }
        };
        Ok(output)
    }
}

/// Parse a whole script, skipping blanks and `#` comments.
///
/// Errors carry the 1-based line number.
pub fn parse_script(content: &str) -> CasementResult<Vec<(usize, ScriptCommand)>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_num, line)| {
            ScriptCommand::parse(line)
                .map(|command| (line_num, command))
                .map_err(|e| CasementError::InvalidArgument(format!("line {line_num}: {e}")))
        })
        .collect()
}

/// `key=value` arguments plus bare flags
struct Args<'a> {
    pairs: Vec<(&'a str, &'a str)>,
    flags: Vec<&'a str>,
}

impl<'a> Args<'a> {
    fn parse(parts: &[&'a str]) -> Self {
        let mut pairs = Vec::new();
        let mut flags = Vec::new();
        for part in parts {
            match part.split_once('=') {
                Some((key, value)) => pairs.push((key, value)),
                None => flags.push(*part),
            }
        }
        Self { pairs, flags }
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn required(&self, key: &str) -> CasementResult<&'a str> {
        self.get(key)
            .ok_or_else(|| CasementError::InvalidArgument(format!("missing {key}=")))
    }

    fn flag(&self, name: &str) -> bool {
        self.flags.contains(&name)
    }

    fn id(&self) -> CasementResult<WindowId> {
        let raw = self.required("id")?;
        raw.parse()
            .ok()
            .and_then(WindowId::from_raw)
            .ok_or_else(|| CasementError::InvalidArgument(format!("bad window id '{raw}'")))
    }

    fn pointer(&self) -> CasementResult<Pointer> {
        let position = parse_position(self.required("at")?)?;
        Ok(Pointer::new(position.left, position.top))
    }
}
