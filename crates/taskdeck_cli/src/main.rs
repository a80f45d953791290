//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` linkage.
//! - Report the configured store location and its board summary.

use std::process::ExitCode;
use taskdeck_core::{open_sqlite_presenter, StoreConfig};

fn main() -> ExitCode {
    println!("taskdeck_core ping={}", taskdeck_core::ping());
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    let config = StoreConfig::from_env();
    println!("taskdeck store={}", config.db_path.display());

    let view = match open_sqlite_presenter(&config).and_then(|presenter| presenter.render()) {
        Ok(view) => view,
        Err(err) => {
            eprintln!("taskdeck store unavailable: {err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = view.summary;
    println!(
        "taskdeck total={} completed={} remaining={} all_time_completed={}",
        summary.total, summary.completed, summary.remaining, summary.all_time_completed
    );
    ExitCode::SUCCESS
}
