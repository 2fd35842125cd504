use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{ArgAction, Parser};

use inkpad::config::Config;
use inkpad::export::{FileSaveConfig, HttpSink, RemoteSink, SubmitManager, SubmitOptions};
use inkpad::ui::{self, DemoOptions};

#[derive(Parser, Debug)]
#[command(name = "inkpad")]
#[command(
    version,
    about = "Freehand sketch-capture widget with PNG export and best-effort upload"
)]
struct Cli {
    /// Open the interactive demo window
    #[arg(long, short = 'i', action = ArgAction::SetTrue)]
    interactive: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Identifier sent with remote submissions (e.g. an email address)
    #[arg(long, value_name = "ID")]
    identifier: Option<String>,

    /// Override the remote collection endpoint
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Override the directory sketches are saved to
    #[arg(long, short = 'o', value_name = "DIR")]
    output: Option<PathBuf>,

    /// Print the config file path and exit
    #[arg(long, action = ArgAction::SetTrue)]
    config_path: bool,

    /// Write the current configuration (defaults if none exists) to the
    /// config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.config_path {
        println!("{}", Config::get_config_path()?.display());
        return Ok(());
    }

    if cli.write_config {
        let config = Config::load()?;
        config.save()?;
        println!("Wrote config to {}", Config::get_config_path()?.display());
        return Ok(());
    }

    if cli.interactive {
        let mut config = Config::load()?;
        if let Some(endpoint) = cli.endpoint {
            url::Url::parse(&endpoint)
                .with_context(|| format!("Invalid endpoint URL '{endpoint}'"))?;
            config.remote.endpoint = Some(endpoint);
        }
        if let Some(output) = cli.output {
            config.export.save_directory = output;
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let remote = build_remote_sink(&config);
        let manager = SubmitManager::new(
            runtime.handle(),
            SubmitOptions {
                save: FileSaveConfig {
                    save_directory: config.export.save_directory.clone(),
                    filename_prefix: config.export.filename_prefix.clone(),
                },
                // An identifier only gates the flow when there is somewhere
                // to submit it to.
                require_identifier: config.remote.require_identifier && remote.is_some(),
                remote,
            },
        );

        log::info!("Starting sketch capture window...");
        ui::run_demo(
            &config,
            &manager,
            DemoOptions {
                width: cli.width,
                height: cli.height,
                identifier: cli.identifier.unwrap_or_default(),
            },
        )?;
        log::info!("Sketch capture window closed.");
    } else {
        // No flags: show usage
        println!("inkpad: freehand sketch capture");
        println!();
        println!("Usage:");
        println!("  inkpad --interactive          Open the sketch window");
        println!("  inkpad --interactive \\");
        println!("      --identifier you@example.com \\");
        println!("      --endpoint https://collect.example.com/sketches");
        println!("  inkpad --config-path          Print the config file location");
        println!("  inkpad --write-config         Write the config file with current values");
        println!("  inkpad --help                 Show all options");
        println!();
        println!("Sketches are saved as PNG files named with a timestamp;");
        println!("configure the destination in the config file or with --output.");
    }

    Ok(())
}

/// Builds the HTTP sink when an endpoint is configured.
///
/// A bad endpoint here is a config problem, not a reason to lose local
/// capture: log it and run local-only.
fn build_remote_sink(config: &Config) -> Option<Arc<dyn RemoteSink>> {
    let endpoint = config.remote.endpoint.as_deref()?;

    let url = match url::Url::parse(endpoint) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("Ignoring invalid remote endpoint '{endpoint}': {err}");
            return None;
        }
    };

    match HttpSink::new(url, Duration::from_secs(config.remote.timeout_secs)) {
        Ok(sink) => Some(Arc::new(sink)),
        Err(err) => {
            log::warn!("Failed to build remote sink, running local-only: {err}");
            None
        }
    }
}
