//! Shell commands run once a prune has finished.

use crate::config::PostPruneCommand;
use crate::error::{PruneError, Result};
use crate::platform::Platform;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::{Command, Stdio};

/// The `post_prune` command lines that apply to one platform, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandList {
    commands: Vec<String>,
}

impl CommandList {
    /// Check every entry's platform names and keep the lines active on `platform`.
    /// Entries for other platforms are validated too.
    pub fn new(entries: &[PostPruneCommand], platform: Platform) -> Result<Self> {
        let mut commands = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let active = match entry.platform() {
                None => true,
                Some(spec) => {
                    let mut active = false;
                    for name in spec.names() {
                        let parsed = name.parse::<Platform>().map_err(|_| {
                            PruneError::InvalidCommandPlatform {
                                index: index + 1,
                                value: name.to_string(),
                            }
                        })?;
                        active |= parsed == platform;
                    }
                    active
                }
            };

            if active {
                commands.push(entry.command().to_string());
            }
        }

        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run each command through the platform shell in `cwd` with `variables`
    /// added to its environment. Stops at the first command that fails.
    pub fn execute(&self, cwd: &Path, variables: &BTreeMap<String, String>) -> Result<()> {
        for command_line in &self.commands {
            log::info!("Running '{}'", command_line);

            let output = shell(command_line)
                .current_dir(cwd)
                .envs(variables)
                .stdin(Stdio::null())
                .output()
                .map_err(|e| PruneError::Command {
                    command: command_line.clone(),
                    message: format!("failed to start: {}", e),
                })?;

            let text = format!(
                "{}{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );

            if !output.status.success() {
                for line in text.lines() {
                    log::error!("{}", line);
                }
                let message = match output.status.code() {
                    Some(code) => format!("exit status {}", code),
                    None => "terminated by a signal".to_string(),
                };
                return Err(PruneError::Command {
                    command: command_line.clone(),
                    message,
                });
            }

            for line in text.lines() {
                log::info!("{}", line);
            }
        }

        Ok(())
    }
}

#[cfg(windows)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

#[cfg(not(windows))]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}
