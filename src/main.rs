//! Native launcher binary.
//!
//! Bootstraps the launcher: logging, settings, preferences, translations,
//! then the event loop. An unreadable `--script` file is the only fatal
//! startup error; everything else degrades with a warning.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use benchdeck::settings::{default_settings_path, shared};
use benchdeck::{
    channel_launcher, run_launcher, JsonSettings, LaunchOptions, MemSettings, Preferences, Script,
    Translator,
};

#[derive(Parser, Debug)]
#[command(name = "benchdeck", version, about = "Measurement bench launcher")]
struct Args {
    /// Run the given script once the window is up.
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: Option<PathBuf>,

    /// Keep the window hidden (for scripted runs).
    #[arg(short = 'n', long = "nogui")]
    nogui: bool,

    /// Disable the digital decoders for this session.
    #[arg(short = 'd', long = "nodecoders")]
    nodecoders: bool,

    /// Use the built-in file dialogs instead of the platform-native ones.
    #[arg(long = "nonativedialog")]
    nonativedialog: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "starting benchdeck");

    let settings_path = default_settings_path();
    let settings = match JsonSettings::load(settings_path.clone()) {
        Ok(store) => shared(store),
        Err(e) => {
            warn!("settings unreadable, running with a fresh in-memory store: {e}");
            shared(MemSettings::default())
        }
    };

    let mut prefs = Preferences::load(settings.clone());
    if args.nodecoders {
        prefs.override_use_decoders(false);
    }
    if args.nonativedialog {
        prefs.override_native_dialogs(false);
    }

    let translator = Translator::from_pref(prefs.language());

    let (sink, rx) = channel_launcher();
    if let Some(path) = &args.script {
        // Queued before the event loop starts, executed after the window is
        // up. Loading it, however, must fail fast.
        let script = Script::load(path)?;
        sink.run_script(script)
            .context("queueing startup script")?;
    }

    let options = LaunchOptions {
        title: "Benchdeck".to_string(),
        show_window: !args.nogui,
    };
    run_launcher(rx, settings, prefs, translator, options)
        .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))
}
