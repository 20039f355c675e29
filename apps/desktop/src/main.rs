mod config;
mod render;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ApiGateway, ReqwestTransport};
use controller::{BirthField, ChartApp, ListPhase, SubmitDecision, SubmitPhase, ViewEffect};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{load_settings, prepare_base_url, ClientSettings};

#[derive(Parser, Debug)]
#[command(about = "Console front-end for the birth chart service")]
struct Args {
    /// Chart service base url; overrides chart_client.toml and the environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[arg(long, global = true)]
    log_filter: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and print the saved charts.
    List {
        /// Automatic retries after a failed load.
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Calculate a chart from birth data.
    Calculate {
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long, default_value = "")]
        location: String,
    },
}

fn apply_overrides(mut settings: ClientSettings, args: &Args) -> ClientSettings {
    if let Some(v) = &args.api_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = args.timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = &args.log_filter {
        settings.log_filter = v.clone();
    }
    settings
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = apply_overrides(load_settings(), &args);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let base_url = prepare_base_url(&settings.api_base_url)?;
    info!(%base_url, timeout_secs = settings.request_timeout_secs, "chart service configured");
    let transport = ReqwestTransport::new(base_url, settings.request_timeout())
        .context("failed to build chart service transport")?;
    let mut app = ChartApp::new(ApiGateway::new(Arc::new(transport)));

    match args.command {
        Command::List { retries } => run_list(&mut app, retries).await,
        Command::Calculate {
            date,
            time,
            location,
        } => run_calculate(&mut app, date, time, location).await,
    }
}

async fn run_list(app: &mut ChartApp, retries: u32) -> Result<()> {
    app.activate_list();
    settle(app).await;

    let mut attempts_left = retries;
    while app.list().phase() == ListPhase::Error && attempts_left > 0 {
        attempts_left -= 1;
        warn!(attempts_left, "retrying chart list");
        app.retry_list();
        println!("{}", render::render_list(app.list().view()));
        settle(app).await;
    }

    println!("{}", render::render_list(app.list().view()));
    if app.list().phase() == ListPhase::Error {
        bail!("could not load charts");
    }
    Ok(())
}

async fn run_calculate(
    app: &mut ChartApp,
    date: String,
    time: String,
    location: String,
) -> Result<()> {
    app.edit(BirthField::Date, date);
    app.edit(BirthField::Time, time);
    app.edit(BirthField::Location, location);

    match app.submit() {
        SubmitDecision::Rejected(errors) => {
            print!("{}", render::render_form_errors(&errors));
            bail!("birth data is incomplete");
        }
        SubmitDecision::Ignored => bail!("a calculation is already running"),
        SubmitDecision::Issued(_) => {
            println!("{}", render::render_result(app.calculator().result_view()));
        }
    }

    settle(app).await;

    println!("{}", render::render_result(app.calculator().result_view()));
    if app.calculator().phase() == SubmitPhase::Failed {
        bail!("chart calculation failed");
    }
    Ok(())
}

/// Applies completions until nothing is pending, honouring view effects.
async fn settle(app: &mut ChartApp) {
    while let Some(applied) = app.process_next().await {
        if let Some(ViewEffect::ScrollToResult { delay }) = applied.effect {
            tokio::time::sleep(delay).await;
            info!(request = %applied.request, "result ready");
        }
    }
}
