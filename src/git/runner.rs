use crate::error::{Result, TagBumpError};
use crate::git::{command_line, CommandRunner};
use std::process::Command;

/// Real command runner spawning processes in the current working directory.
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run_cmd(&self, name: &str, args: &[&str]) -> Result<()> {
        let output = Command::new(name)
            .args(args)
            .output()
            .map_err(|e| TagBumpError::git(command_line(name, args), e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(TagBumpError::git(
                command_line(name, args),
                stderr.trim().to_string(),
            ))
        }
    }

    fn run_cmd_output(&self, name: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(name)
            .args(args)
            .output()
            .map_err(|e| TagBumpError::git(command_line(name, args), e.to_string()))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(TagBumpError::git(
                command_line(name, args),
                stderr.trim().to_string(),
            ))
        }
    }
}
