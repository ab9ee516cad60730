//! Draftpad - a distraction-free terminal writing pad with auto-save.
//!
//! # Usage
//!
//! ```bash
//! draftpad notes.draft.json
//! draftpad --read-only notes.draft.json
//! draftpad --autosave-debounce-ms 500 notes.draft.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use draftpad::app::App;
use draftpad::autosave::AutosaveTiming;
use draftpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A distraction-free terminal writing pad with auto-save
#[derive(Parser, Debug)]
#[command(name = "draftpad", version, about, long_about = None)]
struct Cli {
    /// Draft file to open (created on first save if missing)
    #[arg(value_name = "DRAFT")]
    file: PathBuf,

    /// Quiet period after the last keystroke before an auto-save
    #[arg(long, value_name = "MS")]
    autosave_debounce_ms: Option<u64>,

    /// Backstop save period during sustained typing
    #[arg(long, value_name = "MS")]
    autosave_interval_ms: Option<u64>,

    /// Open the draft without ever writing it back
    #[arg(long)]
    read_only: bool,

    /// Save current command-line flags as defaults in .draftpadrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .draftpadrc
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let defaults = AutosaveTiming::default();
    let timing = AutosaveTiming {
        debounce_ms: effective.autosave_debounce_ms.unwrap_or(defaults.debounce_ms),
        interval_ms: effective.autosave_interval_ms.unwrap_or(defaults.interval_ms),
    };

    // A missing draft file is fine: the draft is created on first save.
    let mut app = App::new(cli.file)
        .with_autosave_timing(timing)
        .with_read_only(effective.read_only);

    app.run().context("Application error")
}
