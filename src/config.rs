use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::domain::BumpKind;
use crate::error::{Result, TagBumpError};

/// File-based configuration for git-tagbump.
///
/// Covers the settings that rarely change per invocation; everything
/// per-run comes in as command tokens instead.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote used for fetch, pull and push
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Annotated tag message template; `{version}` is substituted
    #[serde(default = "default_tag_message")]
    pub tag_message: String,

    /// Bump type used when no `bump=` token is given
    #[serde(default = "default_bump")]
    pub default_bump: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_message() -> String {
    "Release {version}".to_string()
}

fn default_bump() -> String {
    "patch".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            tag_message: default_tag_message(),
            default_bump: default_bump(),
        }
    }
}

impl Config {
    /// Render the tag message for a version
    pub fn format_tag_message(&self, version: &str) -> String {
        self.tag_message.replace("{version}", version)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `tagbump.toml` in the current directory
/// 3. `.tagbump.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./tagbump.toml").exists() {
        fs::read_to_string("./tagbump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".tagbump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| TagBumpError::config(e.to_string()))
}

/// Parse free-form command tokens.
///
/// `key=value` splits at the first `=` with the value whitespace-trimmed;
/// a bare token becomes a boolean flag (`"true"`). Keys are case-sensitive.
pub fn parse_params(args: &[String]) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => {
                params.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                params.insert(arg.trim().to_string(), "true".to_string());
            }
        }
    }
    params
}

fn param_is_true(params: &HashMap<String, String>, key: &str) -> bool {
    matches!(
        params.get(key).map(|v| v.to_ascii_lowercase()).as_deref(),
        Some("true") | Some("1") | Some("yes")
    )
}

fn param_value(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Options controlling a single bump invocation, fully resolved from
/// command tokens and file config. The workflow never reads the
/// environment or re-parses arguments mid-flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOptions {
    pub kind: BumpKind,
    pub push: bool,
    pub dry_run: bool,
    pub branch: Option<String>,
    pub major_confirm: bool,
    pub force: bool,
}

impl BumpOptions {
    /// Resolve bump options from tokens like `bump=minor push dry-run
    /// branch=main major-confirm force`.
    pub fn from_args(args: &[String], config: &Config) -> Result<Self> {
        let params = parse_params(args);

        let raw_kind = params
            .get("bump")
            .cloned()
            .unwrap_or_else(|| config.default_bump.clone());
        let kind = BumpKind::from_str(raw_kind.trim().to_lowercase().as_str())?;

        Ok(BumpOptions {
            kind,
            push: param_is_true(&params, "push"),
            dry_run: param_is_true(&params, "dry-run"),
            branch: param_value(&params, "branch"),
            major_confirm: param_is_true(&params, "major-confirm"),
            force: param_is_true(&params, "force"),
        })
    }
}

/// Options for changelog generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogOptions {
    /// Range start tag; defaults to the previous tag when absent
    pub from: Option<String>,
    /// Range end ref
    pub to: String,
}

impl ChangelogOptions {
    pub fn from_args(args: &[String]) -> Self {
        let params = parse_params(args);
        ChangelogOptions {
            from: param_value(&params, "from"),
            to: param_value(&params, "to").unwrap_or_else(|| "HEAD".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.default_bump, "patch");
        assert_eq!(config.format_tag_message("v1.0.7"), "Release v1.0.7");
    }

    #[test]
    fn test_parse_params_key_value_and_flags() {
        let args: Vec<String> = vec!["bump=minor".into(), "push".into(), "dry-run".into()];
        let params = parse_params(&args);

        assert_eq!(params.get("bump").map(String::as_str), Some("minor"));
        assert!(param_is_true(&params, "push"));
        assert!(param_is_true(&params, "dry-run"));
    }

    #[test]
    fn test_parse_params_trims_whitespace() {
        let args: Vec<String> = vec!["bump= patch ".into()];
        let params = parse_params(&args);
        assert_eq!(params.get("bump").map(String::as_str), Some("patch"));
    }

    #[test]
    fn test_parse_params_keys_are_case_sensitive() {
        let args: Vec<String> = vec!["BUMP=major".into(), "bump=minor".into()];
        let params = parse_params(&args);
        assert_eq!(params.get("bump").map(String::as_str), Some("minor"));
        assert_eq!(params.get("BUMP").map(String::as_str), Some("major"));
    }

    #[test]
    fn test_parse_params_empty_values_preserved() {
        let args: Vec<String> = vec!["bump=".into(), "push".into(), "dry-run=".into()];
        let params = parse_params(&args);

        assert_eq!(params.get("bump").map(String::as_str), Some(""));
        assert!(params.contains_key("dry-run"));
        assert!(param_is_true(&params, "push"));
        assert!(!param_is_true(&params, "dry-run"));
    }

    #[test]
    fn test_bump_options_defaults() {
        let options = BumpOptions::from_args(&[], &Config::default()).unwrap();
        assert_eq!(options.kind, BumpKind::Patch);
        assert!(!options.push);
        assert!(!options.dry_run);
        assert_eq!(options.branch, None);
        assert!(!options.major_confirm);
        assert!(!options.force);
    }

    #[test]
    fn test_bump_options_full_token_set() {
        let args: Vec<String> = vec![
            "bump=major".into(),
            "push".into(),
            "dry-run".into(),
            "branch=master".into(),
            "major-confirm".into(),
            "force".into(),
        ];
        let options = BumpOptions::from_args(&args, &Config::default()).unwrap();

        assert_eq!(options.kind, BumpKind::Major);
        assert!(options.push);
        assert!(options.dry_run);
        assert_eq!(options.branch.as_deref(), Some("master"));
        assert!(options.major_confirm);
        assert!(options.force);
    }

    #[test]
    fn test_bump_options_normalizes_bump_value() {
        let args: Vec<String> = vec!["bump= MINOR ".into()];
        let options = BumpOptions::from_args(&args, &Config::default()).unwrap();
        assert_eq!(options.kind, BumpKind::Minor);
    }

    #[test]
    fn test_bump_options_rejects_unknown_bump() {
        let args: Vec<String> = vec!["bump=hotfix".into()];
        let err = BumpOptions::from_args(&args, &Config::default()).unwrap_err();
        assert!(matches!(err, TagBumpError::InvalidBumpType(_)));
    }

    #[test]
    fn test_changelog_options() {
        let args: Vec<String> = vec!["from=v1.0.0".into(), "to=v1.1.0".into()];
        let options = ChangelogOptions::from_args(&args);
        assert_eq!(options.from.as_deref(), Some("v1.0.0"));
        assert_eq!(options.to, "v1.1.0");

        let options = ChangelogOptions::from_args(&[]);
        assert_eq!(options.from, None);
        assert_eq!(options.to, "HEAD");
    }
}
