//! Startup scripts.
//!
//! A script is a plain text file, optionally starting with a `#!` shebang
//! line (skipped when present). The remaining lines form a small
//! line-oriented command set the launcher executes once the event loop and
//! window are up:
//!
//! ```text
//! # connect a device profile and open a tool
//! device adalm2000 oscilloscope voltmeter power-supply
//! select oscilloscope
//! detach voltmeter
//! disconnect
//! ```
//!
//! Blank lines and `#` comments are ignored; unknown lines are logged and
//! skipped. An unreadable script file is the only fatal bootstrap path.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::warn;

use crate::filter::DeviceProfile;
use crate::tools::Tool;

/// A loaded script: its runnable source and originating path.
#[derive(Debug, Clone)]
pub struct Script {
    pub source: String,
    pub path: PathBuf,
}

impl Script {
    /// Read a script file, skipping a leading shebang line.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Script> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("unable to open script file {}", path.display()))?;
        Ok(Script {
            source: strip_shebang(&raw).to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// Drop the first line when it is a shebang.
pub(crate) fn strip_shebang(raw: &str) -> &str {
    if raw.starts_with("#!") {
        match raw.split_once('\n') {
            Some((_, rest)) => rest,
            None => "",
        }
    } else {
        raw
    }
}

/// One command of the launcher script language.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Select(Tool),
    Detach(Tool),
    /// Connect a device profile described inline: hardware name plus its
    /// supported tools.
    Device(DeviceProfile),
    Disconnect,
}

/// Parse a single line. `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    match verb {
        "select" | "detach" => {
            let id = words.next().ok_or_else(|| format!("{verb}: missing tool"))?;
            let tool = Tool::from_id(id).ok_or_else(|| format!("{verb}: unknown tool {id:?}"))?;
            Ok(Some(match verb {
                "select" => ScriptCommand::Select(tool),
                _ => ScriptCommand::Detach(tool),
            }))
        }
        "device" => {
            let name = words
                .next()
                .ok_or_else(|| "device: missing hardware name".to_string())?;
            let mut tools = Vec::new();
            for id in words {
                let tool =
                    Tool::from_id(id).ok_or_else(|| format!("device: unknown tool {id:?}"))?;
                tools.push(tool);
            }
            Ok(Some(ScriptCommand::Device(DeviceProfile::new(name, tools))))
        }
        "disconnect" => Ok(Some(ScriptCommand::Disconnect)),
        other => Err(format!("unknown command {other:?}")),
    }
}

/// Parse a whole program, logging and skipping invalid lines.
pub fn parse_program(source: &str) -> Vec<ScriptCommand> {
    let mut commands = Vec::new();
    for (lineno, line) in source.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(cmd)) => commands.push(cmd),
            Ok(None) => {}
            Err(e) => warn!("script line {}: {e}", lineno + 1),
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shebang_line_is_skipped() {
        assert_eq!(strip_shebang("#!/usr/bin/env bench\nselect voltmeter\n"),
                   "select voltmeter\n");
        assert_eq!(strip_shebang("select voltmeter\n"), "select voltmeter\n");
        assert_eq!(strip_shebang("#!/bin/sh"), "");
    }

    #[test]
    fn blank_lines_and_comments_parse_to_nothing() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# hello"), Ok(None));
    }

    #[test]
    fn select_and_detach_resolve_tool_ids() {
        assert_eq!(
            parse_line("select oscilloscope"),
            Ok(Some(ScriptCommand::Select(Tool::Oscilloscope)))
        );
        assert_eq!(
            parse_line("detach voltmeter"),
            Ok(Some(ScriptCommand::Detach(Tool::Voltmeter)))
        );
        assert!(parse_line("select warp-core").is_err());
    }

    #[test]
    fn device_command_builds_a_profile() {
        let cmd = parse_line("device m2k oscilloscope voltmeter").unwrap().unwrap();
        match cmd {
            ScriptCommand::Device(profile) => {
                assert_eq!(profile.name(), "m2k");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn program_skips_invalid_lines() {
        let src = "select oscilloscope\nwarp 9\ndisconnect\n";
        let cmds = parse_program(src);
        assert_eq!(
            cmds,
            vec![
                ScriptCommand::Select(Tool::Oscilloscope),
                ScriptCommand::Disconnect
            ]
        );
    }
}
