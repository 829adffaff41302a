//! Command channel driving the launcher.
//!
//! External code (the bootstrap, scripts, embedding applications) talks to
//! the running launcher through [`LauncherCommand`]s sent over an `mpsc`
//! channel; the UI drains the channel once per frame. The startup script is
//! queued on this channel *before* the event loop starts, so it only runs
//! after the window is up.

use std::sync::mpsc::{Receiver, SendError, Sender};

use crate::filter::DeviceProfile;
use crate::script::Script;
use crate::tools::Tool;

/// Messages sent over the channel to drive the launcher.
#[derive(Debug, Clone)]
pub enum LauncherCommand {
    /// Run a loaded script program.
    RunScript(Script),
    /// Select a tool as if its menu button was clicked.
    SelectTool(Tool),
    /// Detach a tool into a floating window.
    Detach(Tool),
    /// Connect a hardware profile and apply its compatibility filter.
    ApplyProfile(DeviceProfile),
    /// Drop the current hardware profile and clear the menu.
    Disconnect,
}

/// Cloneable sender for feeding commands into the launcher.
#[derive(Clone)]
pub struct LauncherSink {
    tx: Sender<LauncherCommand>,
}

impl LauncherSink {
    pub fn send(&self, cmd: LauncherCommand) -> Result<(), SendError<LauncherCommand>> {
        self.tx.send(cmd)
    }

    /// Queue a script for deferred execution.
    pub fn run_script(&self, script: Script) -> Result<(), SendError<LauncherCommand>> {
        self.send(LauncherCommand::RunScript(script))
    }

    pub fn select_tool(&self, tool: Tool) -> Result<(), SendError<LauncherCommand>> {
        self.send(LauncherCommand::SelectTool(tool))
    }

    pub fn apply_profile(
        &self,
        profile: DeviceProfile,
    ) -> Result<(), SendError<LauncherCommand>> {
        self.send(LauncherCommand::ApplyProfile(profile))
    }
}

/// Create a new channel pair: `(LauncherSink, Receiver<LauncherCommand>)`.
pub fn channel_launcher() -> (LauncherSink, Receiver<LauncherCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (LauncherSink { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_arrive_in_order() {
        let (sink, rx) = channel_launcher();
        sink.select_tool(Tool::Oscilloscope).unwrap();
        sink.send(LauncherCommand::Disconnect).unwrap();
        assert!(matches!(
            rx.try_recv(),
            Ok(LauncherCommand::SelectTool(Tool::Oscilloscope))
        ));
        assert!(matches!(rx.try_recv(), Ok(LauncherCommand::Disconnect)));
        assert!(rx.try_recv().is_err());
    }
}
