//! VoiceExport CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voice_export::cli::{
    app::{load_merged_config, print_formats, resolve_mime, run_convert, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    ConvertOptions,
};
use voice_export::domain::{AppConfig, DecoderKind, Duration};
use voice_export::infrastructure::XdgConfigStore;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "voice_export=debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Formats) => {
            print_formats(&presenter);
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let Some(input) = cli.input else {
        presenter.error("Missing input recording. Run 'voice-export --help' for usage");
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    let mime_type = match resolve_mime(&input, cli.mime.as_deref()) {
        Ok(mime) => mime,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        format: cli.format.clone(),
        output_dir: None,
        decoder: cli
            .decoder
            .map(|d| DecoderKind::from(d).as_str().to_string()),
        ffmpeg_path: None,
        timeout: cli.timeout.clone(),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let timeout = match config.timeout.as_ref() {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => d,
            Err(e) => {
                presenter.error(&format!("Invalid timeout: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Duration::default_timeout(),
    };

    let options = ConvertOptions {
        input,
        output: cli.output,
        output_dir: config.output_dir(),
        format: config
            .format
            .clone()
            .unwrap_or_else(|| config.format_or_default().to_string()),
        mime_type,
        decoder: config.decoder_or_default(),
        ffmpeg_path: config.ffmpeg_path_or_default(),
        timeout,
    };

    run_convert(options).await
}
