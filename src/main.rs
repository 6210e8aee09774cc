//! wavo - Minimal Wayland-Style Compositor
//!
//! Entry point for the wavo compositor core. The only backend compiled in
//! here is the headless one; session backends (DRM/KMS, nested) supply
//! their own entry points and drive the core through its event dispatch.
//!
//! Run with `--help` to see available options.

use std::path::PathBuf;

use wavo::config::Config;

static POSSIBLE_BACKENDS: &[&str] = &[
    "--headless : Run a short scripted session with no hardware behind it.",
    "            --config PATH : Load settings from PATH instead of the default location.",
];

fn default_config_path() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_default()
        .join("wavo/config")
}

fn load_config() -> Result<Config, wavo::error::WavoError> {
    let args: Vec<String> = std::env::args().collect();
    let path = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    let config = Config::load(&path)?;
    config.validate()?;
    Ok(config)
}

fn main() {
    if let Ok(env_filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().compact().init();
    }

    let arg = ::std::env::args().nth(1);
    match arg.as_ref().map(|s| &s[..]) {
        Some("--headless") => {
            let config = match load_config() {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Invalid configuration: {e}");
                    std::process::exit(1);
                }
            };
            tracing::info!("Starting wavo with headless backend");
            if let Err(e) = wavo::backend::headless::run_headless(config) {
                tracing::error!("Fatal error: {e}");
                std::process::exit(1);
            }
        }
        Some(other) => {
            tracing::error!("Unknown backend: {other}");
        }
        None => {
            #[allow(clippy::disallowed_macros)]
            {
                println!("USAGE: wavo --backend");
                println!();
                println!("Possible backends are:");
                for b in POSSIBLE_BACKENDS {
                    println!("\t{b}");
                }
            }
        }
    }
}
