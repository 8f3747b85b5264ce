use crate::menu::{Action, Dispatch};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::process::{Command, Stdio};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ShellCommand(String);

crate::impl_string_newtype!(ShellCommand);

impl ShellCommand {
    pub fn spawn(&self) -> std::io::Result<()> {
        Command::new("sh")
            .arg("-c")
            .arg(&self.0)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// Logs every fired action and runs its configured command, if any.
#[derive(Debug, Clone, Default)]
pub struct CommandDispatch {
    commands: HashMap<Action, ShellCommand>,
}

impl CommandDispatch {
    pub fn new(commands: HashMap<Action, ShellCommand>) -> Self {
        Self { commands }
    }

    pub fn command_for(&self, action: Action) -> Option<&ShellCommand> {
        self.commands.get(&action)
    }
}

impl Dispatch for CommandDispatch {
    fn dispatch(&mut self, index: usize, action: Action) {
        log::info!("Done {} {}", index, action);

        if let Some(cmd) = self.command_for(action)
            && let Err(e) = cmd.spawn()
        {
            log::error!("Failed to run '{}' for {}: {}", cmd, action, e);
        }
    }
}
