mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use planview_domain::DataSource;
use planview_tui::App;
use std::path::PathBuf;
use std::sync::Arc;

/// Where tracing output goes for one invocation.
#[derive(Debug, PartialEq, Eq)]
enum LogSink {
    File(PathBuf),
    Stderr,
    /// The TUI owns the terminal; nothing may be written to it.
    Off,
}

fn log_sink(debug_log: Option<PathBuf>, interactive: bool) -> LogSink {
    match debug_log {
        Some(path) => LogSink::File(path),
        None if interactive => LogSink::Off,
        None => LogSink::Stderr,
    }
}

fn init_tracing(sink: LogSink) -> anyhow::Result<()> {
    match sink {
        LogSink::File(path) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;

            tracing_subscriber::fmt()
                .with_writer(log_file)
                .with_max_level(tracing::Level::DEBUG)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .init();
        }
        LogSink::Stderr => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(tracing::Level::WARN)
                .init();
        }
        LogSink::Off => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(log_sink(
        std::env::var_os("PLANVIEW_DEBUG_LOG").map(PathBuf::from),
        cli.command.is_none(),
    ))?;

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "planview", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = match CliContext::load(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&e.to_string()),
    };

    match cli.command {
        None => {
            let source: Arc<dyn DataSource> = ctx.source;
            let mut app = App::new(source, ctx.config, cli.plan, cli.select);
            app.run().await?;
        }
        Some(Commands::Plans) => handlers::plan::handle_list(&ctx).await?,
        Some(Commands::Objectives { plan, query }) => {
            handlers::objective::handle_list(&ctx, plan, query).await?;
        }
        Some(Commands::Objective { plan, id }) => {
            handlers::objective::handle_get(&ctx, plan, id).await?;
        }
        Some(Commands::Live { plan }) => handlers::objective::handle_live(&ctx, plan).await?,
        Some(Commands::Steps {
            objective,
            page,
            page_size,
        }) => {
            handlers::steps::handle(&ctx, objective, page, page_size).await?;
        }
        Some(Commands::Window {
            count,
            offset,
            height,
            row_size,
            overscan,
        }) => {
            handlers::window::handle(&ctx, count, offset, height, row_size, overscan)?;
        }
        Some(Commands::Config) => output::output_success(&ctx.config)?,
        Some(Commands::Completions { .. }) => {}
    }

    Ok(())
}
