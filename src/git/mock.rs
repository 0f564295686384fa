use crate::error::{Result, TagBumpError};
use crate::git::{command_line, CommandRunner};
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted command runner for testing without a real git repository.
///
/// Outputs and failures are keyed by the full command line
/// (e.g. `"git status --porcelain"`). Unscripted commands succeed with
/// empty output, matching a quiet git invocation. Every invocation is
/// recorded for order and presence assertions.
pub struct MockRunner {
    outputs: Mutex<HashMap<String, String>>,
    errors: Mutex<HashMap<String, String>>,
    commands: Mutex<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner {
            outputs: Mutex::new(HashMap::new()),
            errors: Mutex::new(HashMap::new()),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Script the stdout for a command line
    pub fn set_output(&self, command: impl Into<String>, output: impl Into<String>) {
        self.outputs
            .lock()
            .expect("mock outputs poisoned")
            .insert(command.into(), output.into());
    }

    /// Script a failure for a command line
    pub fn set_error(&self, command: impl Into<String>, message: impl Into<String>) {
        self.errors
            .lock()
            .expect("mock errors poisoned")
            .insert(command.into(), message.into());
    }

    /// All command lines invoked so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .expect("mock commands poisoned")
            .clone()
    }

    /// Whether a command line was invoked
    pub fn has_command(&self, command: &str) -> bool {
        self.commands().iter().any(|c| c == command)
    }

    fn record(&self, line: &str) {
        self.commands
            .lock()
            .expect("mock commands poisoned")
            .push(line.to_string());
    }

    fn lookup(&self, line: &str) -> Result<String> {
        if let Some(message) = self.errors.lock().expect("mock errors poisoned").get(line) {
            return Err(TagBumpError::git(line, message.clone()));
        }
        Ok(self
            .outputs
            .lock()
            .expect("mock outputs poisoned")
            .get(line)
            .cloned()
            .unwrap_or_default())
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run_cmd(&self, name: &str, args: &[&str]) -> Result<()> {
        let line = command_line(name, args);
        self.record(&line);
        self.lookup(&line).map(|_| ())
    }

    fn run_cmd_output(&self, name: &str, args: &[&str]) -> Result<String> {
        let line = command_line(name, args);
        self.record(&line);
        self.lookup(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_output() {
        let mock = MockRunner::new();
        mock.set_output("git describe --tags --abbrev=0", "v1.2.3");

        let out = mock
            .run_cmd_output("git", &["describe", "--tags", "--abbrev=0"])
            .unwrap();
        assert_eq!(out, "v1.2.3");
    }

    #[test]
    fn test_unscripted_command_succeeds_empty() {
        let mock = MockRunner::new();
        let out = mock.run_cmd_output("git", &["tag", "--points-at", "HEAD"]).unwrap();
        assert_eq!(out, "");
        assert!(mock.run_cmd("git", &["fetch", "--tags", "origin"]).is_ok());
    }

    #[test]
    fn test_scripted_error() {
        let mock = MockRunner::new();
        mock.set_error("git fetch --tags origin", "network error");

        let err = mock
            .run_cmd("git", &["fetch", "--tags", "origin"])
            .unwrap_err();
        assert!(err.to_string().contains("network error"));
    }

    #[test]
    fn test_records_commands_in_order() {
        let mock = MockRunner::new();
        let _ = mock.run_cmd_output("git", &["status", "--porcelain"]);
        let _ = mock.run_cmd("git", &["push", "origin", "v1.0.1"]);

        assert_eq!(
            mock.commands(),
            vec!["git status --porcelain", "git push origin v1.0.1"]
        );
        assert!(mock.has_command("git push origin v1.0.1"));
        assert!(!mock.has_command("git push origin v2.0.0"));
    }
}
