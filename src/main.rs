use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use padbind::config::{default_profile_path, LaunchProfile};
use padbind::controller::discovery::GilrsProvider;
use padbind::controller::{CapabilityProvider, StaticControllers};
use padbind::mapping::MappingCompiler;
use padbind::persistence::ConfigFile;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Compile Dolphin controller settings from a launch profile.
#[derive(Parser, Debug)]
#[command(name = "padbind", version, about)]
struct Args {
    /// Launch profile (TOML). Defaults to the user config directory.
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Enumerate connected gamepads instead of using the profile's controller list.
    #[arg(short, long)]
    detect: bool,

    /// Only print this file (GCPadNew.ini, WiimoteNew.ini, Dolphin.ini, Hotkeys.ini).
    #[arg(short, long)]
    file: Option<String>,
}

fn main() -> Result<()> {
    setup()?;
    let args = Args::parse();

    let only = match args.file.as_deref() {
        Some(name) => Some(
            ConfigFile::from_name(name).ok_or_else(|| eyre!("Unknown settings file: {}", name))?,
        ),
        None => None,
    };

    // Profil laden
    let path = args.profile.clone().unwrap_or_else(default_profile_path);
    let profile = match LaunchProfile::load(&path) {
        Ok(profile) => profile,
        Err(e) if args.detect && args.profile.is_none() => {
            warn!("{}, continuing with a default GameCube profile", e);
            LaunchProfile {
                system: "gamecube".to_string(),
                ..LaunchProfile::default()
            }
        }
        Err(e) => return Err(eyre!("Failed to load launch profile: {}", e)),
    };

    // Controller ermitteln
    let mut provider: Box<dyn CapabilityProvider> = if args.detect {
        Box::new(GilrsProvider::new().map_err(|e| eyre!("Failed to initialize gilrs: {}", e))?)
    } else {
        Box::new(
            StaticControllers::new(profile.controllers.clone())
                .map_err(|e| eyre!("Invalid controller list: {}", e))?,
        )
    };
    let controllers = provider
        .controllers()
        .map_err(|e| eyre!("Failed to collect controllers: {}", e))?;
    info!("{} controllers for system {:?}", controllers.len(), profile.system);

    let compiler = MappingCompiler::from_profile(&profile);
    let outcome = compiler.compile(&controllers);
    if !outcome.compiled {
        info!("Automatic controller configuration is disabled, nothing to write");
        return Ok(());
    }

    for file in ConfigFile::ALL {
        if only.is_some_and(|only| only != file) {
            continue;
        }
        let rendered = outcome.batch.render(file);
        if rendered.is_empty() {
            continue;
        }
        println!("# {}", file);
        println!("{}", rendered);
    }

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }

    setup_logging_env();

    Ok(())
}

fn setup_logging_env() {
    // Ausgabe auf stdout gehoert den INI-Daten
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .pretty()
        .init();
}
