use anyhow::Result;
use clap::{Parser, Subcommand};

use git_tagbump::config::{self, BumpOptions, ChangelogOptions};
use git_tagbump::git::SystemRunner;
use git_tagbump::{discovery, ui, workflow};

#[derive(Parser)]
#[command(
    name = "git-tagbump",
    about = "Bump semantic versions and reconcile git tags safely"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bump the version and create an annotated tag
    ///
    /// Accepts free-form parameters: bump=major|minor|patch, push, dry-run,
    /// branch=<name>, major-confirm, force
    Bump {
        #[arg(value_name = "PARAM")]
        params: Vec<String>,
    },

    /// Print the commit log between two tags
    ///
    /// Accepts from=<tag> and to=<ref> (defaults: previous tag, HEAD)
    Changelog {
        #[arg(value_name = "PARAM")]
        params: Vec<String>,
    },

    /// Show the current version, commit and working-tree state
    Show,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let runner = SystemRunner::new();

    if !discovery::is_git_repo(&runner) {
        ui::display_error("Not in a git repository");
        std::process::exit(1);
    }

    let result = match &args.command {
        Command::Bump { params } => BumpOptions::from_args(params, &config)
            .and_then(|options| workflow::run_bump_workflow(&runner, &config, &options))
            .map(|outcome| {
                if !outcome.dry_run {
                    ui::display_success(&format!(
                        "Version bumped: {} -> {}",
                        outcome.previous, outcome.version
                    ));
                }
            }),
        Command::Changelog { params } => {
            let options = ChangelogOptions::from_args(params);
            workflow::run_changelog(&runner, &options)
        }
        Command::Show => workflow::run_show(&runner),
    };

    if let Err(e) = result {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
