use tracing::{debug, warn};

use super::*;
use crate::geometry::Position;

/// Parse a sway-style config file.
///
/// Lines that fail to parse are logged and skipped; the rest of the file
/// still applies.
pub fn parse_config(content: &str) -> CasementResult<Config> {
    let mut config = Config::default();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Err(e) = parse_line(&mut config, line) {
            warn!("Failed to parse config line {} '{}': {}", line_num + 1, line, e);
        }
    }

    Ok(config)
}

fn parse_line(config: &mut Config, line: &str) -> CasementResult<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let first_part = parts
        .first()
        .ok_or_else(|| CasementError::Config("Empty command line".into()))?;

    if *first_part == "set" {
        return parse_set(config, &parts[1..]);
    }

    if !KNOWN_COMMANDS.contains(first_part) {
        debug!("Ignoring unknown config command '{first_part}'");
        return Ok(());
    }

    let expanded: Vec<String> = parts[1..]
        .iter()
        .map(|p| config.expand_variables(p))
        .collect();
    let value = single_value(first_part, &expanded)?;

    match *first_part {
        "z_base" => config.z_base = parse_number(first_part, value)?,
        "z_max" => config.z_max = parse_number(first_part, value)?,
        "overlay_z" => config.overlay_z = parse_number(first_part, value)?,
        "min_size" => config.min_size = parse_size(value)?,
        "container" => config.container = Some(parse_size(value)?),
        "focus_new_windows" => {
            config.focus_new_windows = parse_bool(value)
                .ok_or_else(|| CasementError::Config(format!("Expected yes/no, got '{value}'")))?
        }
        _ => {}
    }

    Ok(())
}

const KNOWN_COMMANDS: [&str; 6] = [
    "z_base",
    "z_max",
    "overlay_z",
    "min_size",
    "container",
    "focus_new_windows",
];

fn parse_set(config: &mut Config, parts: &[&str]) -> CasementResult<()> {
    if parts.len() < 2 {
        return Err(CasementError::Config(
            "set requires variable name and value".into(),
        ));
    }

    let var_name = parts[0];
    let value = parts[1..].join(" ");

    // Remove leading $ from variable name if present
    let var_name = var_name.strip_prefix('$').unwrap_or(var_name);

    // Expand any variables in the value
    let expanded_value = config.expand_variables(&value);
    config
        .variables
        .insert(var_name.to_string(), expanded_value);

    Ok(())
}

fn single_value<'a>(command: &str, args: &'a [String]) -> CasementResult<&'a str> {
    match args {
        [value] => Ok(value.as_str()),
        [] => Err(CasementError::Config(format!("{command} requires a value"))),
        _ => Err(CasementError::Config(format!(
            "{command} takes exactly one value"
        ))),
    }
}

fn parse_number(command: &str, value: &str) -> CasementResult<u32> {
    value
        .parse()
        .map_err(|_| CasementError::Config(format!("Invalid {command} value: {value}")))
}

/// Parse a bool the way i3/sway do: yes/no, true/false, on/off, 1/0
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Some(true),
        "no" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Parse `WIDTHxHEIGHT`
pub fn parse_size(value: &str) -> CasementResult<Size> {
    let (width_str, height_str) = value
        .split_once('x')
        .ok_or_else(|| CasementError::Config(format!("Invalid size format: {value}")))?;
    let width: i32 = width_str
        .parse()
        .map_err(|_| CasementError::Config(format!("Invalid width: {width_str}")))?;
    let height: i32 = height_str
        .parse()
        .map_err(|_| CasementError::Config(format!("Invalid height: {height_str}")))?;
    Ok(Size::new(width, height))
}

/// Parse `X,Y`
pub fn parse_position(value: &str) -> CasementResult<Position> {
    let (x_str, y_str) = value
        .split_once(',')
        .ok_or_else(|| CasementError::Config(format!("Invalid position format: {value}")))?;
    let x: i32 = x_str
        .trim()
        .parse()
        .map_err(|_| CasementError::Config(format!("Invalid x position: {x_str}")))?;
    let y: i32 = y_str
        .trim()
        .parse()
        .map_err(|_| CasementError::Config(format!("Invalid y position: {y_str}")))?;
    Ok(Position::new(x, y))
}
