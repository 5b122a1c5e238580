// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sound settings CLI
//!
//! Hosts the sound and volume-dialog settings screen on a terminal: renders the
//! controls, applies one change per invocation, and answers confirmation dialogs
//! from a flag or an interactive prompt.

mod host;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use host::{TerminalDialogs, TerminalWidgets};
use sound_settings_core::{
    ChangeOutcome, DialogResponse, FieldId, ScreenController, SoundPrefs, WidgetValue,
};
use sound_settings_fs::FsSettingsStore;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "sound-settings",
    version,
    about = "Sound and volume-dialog settings",
    disable_help_subcommand = true
)]
struct Cli {
    /// Directory holding the settings tables (defaults to the platform config dir).
    #[arg(long, env = "SOUND_SETTINGS_DIR", global = true)]
    config_dir: Option<PathBuf>,

    /// User whose per-user settings are addressed.
    #[arg(long, default_value_t = 0, global = true)]
    user: u32,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every control with its value, summary and enabled state.
    Show,
    /// Change one control, as if the user edited it on screen.
    Set(SetArgs),
    /// Print every setting as JSON.
    Export,
}

#[derive(Args, Debug)]
struct SetArgs {
    /// Control key (e.g. `volume_dialog_stroke`, `less_notification_sounds`).
    field: FieldId,

    /// New value: `on`/`off` for switches, an integer for lists and sliders,
    /// `#aarrggbb` or a packed integer for the color.
    #[arg(allow_hyphen_values = true)]
    value: String,

    /// How to answer a confirmation dialog.
    #[arg(long, value_enum, default_value_t = Answer::Prompt)]
    answer: Answer,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Answer {
    /// Press OK.
    Accept,
    /// Press Cancel.
    Cancel,
    /// Ask on stdin.
    Prompt,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let store = match &cli.config_dir {
        Some(dir) => FsSettingsStore::at(dir.clone()),
        None => FsSettingsStore::new(),
    }
    .context("opening settings store")?
    .with_current_user(cli.user);
    info!(base = %store.base().display(), user = cli.user, "settings store opened");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Show => {
            let (mut screen, widgets, _) = open_screen(&store)?;
            screen.dispose()?;
            writeln!(out, "{}", widgets.table())?;
        }
        Commands::Set(args) => set(&store, args, &mut out)?,
        Commands::Export => {
            let prefs = SoundPrefs::read(&store, &store).context("reading settings")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&prefs)?)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn open_screen(
    store: &FsSettingsStore,
) -> Result<(ScreenController, TerminalWidgets, TerminalDialogs)> {
    let widgets = TerminalWidgets::default();
    let dialogs = TerminalDialogs::default();
    let mut screen = ScreenController::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(widgets.clone()),
        Box::new(dialogs.clone()),
    );
    screen
        .initialize()
        .context("initializing sound settings screen")?;
    Ok((screen, widgets, dialogs))
}

fn set(store: &FsSettingsStore, args: SetArgs, out: &mut impl Write) -> Result<()> {
    let (mut screen, widgets, dialogs) = open_screen(store)?;
    let outcome = screen
        .on_change(args.field, WidgetValue::Text(args.value))
        .with_context(|| format!("changing {}", args.field))?;

    if let ChangeOutcome::AwaitingConfirmation(kind) = outcome {
        let request = dialogs
            .take()
            .with_context(|| format!("no dialog presented for {kind:?}"))?;
        let response = match args.answer {
            Answer::Accept => DialogResponse::Accept,
            Answer::Cancel => DialogResponse::Cancel,
            Answer::Prompt => host::prompt(&request, &mut io::stdin().lock(), out)?,
        };
        let resolved = screen.on_dialog_response(response);
        info!(?kind, ?response, "confirmation answered");
        resolved.with_context(|| format!("applying {} confirmation", kind.field()))?;
    }

    screen.dispose()?;
    writeln!(out, "{}", widgets.table())?;
    Ok(())
}
