//! Terminal output module.
//!
//! `formatter` holds the pure display functions; re-exported here for
//! convenient `ui::display_*` call sites.

pub mod formatter;

pub use formatter::{
    display_dry_run_plan, display_error, display_header, display_manual_push_instruction,
    display_proposed_bump, display_status, display_success, display_warning,
};
