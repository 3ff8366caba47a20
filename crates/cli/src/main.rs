use crate::{commands::Commands, error::CliError};
use clap::Parser;
use engine_config::settings::RewriterSettings;
use engine_core::{event::ReportEvent, rewriter::ExtendedFieldRewriter};
use model::field::catalog::InMemoryCatalog;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "xfield",
    version = "0.0.1",
    about = "Extended field report query rewriter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rewrite {
            catalog,
            event,
            settings,
            dialect,
            json,
        } => {
            let settings = load_settings(settings.as_deref())?;
            let catalog = InMemoryCatalog::from_path(&catalog)?;
            info!(
                "Rewriting {} with {} extended fields",
                event,
                catalog.len()
            );

            let source = std::fs::read_to_string(&event)?;
            let mut event: ReportEvent = serde_json::from_str(&source)?;

            let rewriter = ExtendedFieldRewriter::new(Arc::new(catalog), settings);
            let outcome = rewriter.dispatch(&mut event)?;

            if json {
                println!("{}", output::render_json(&event, &outcome)?);
            } else {
                let dialect = output::dialect_for(dialect);
                info!("Rendering rewritten query as {}", dialect.name());
                println!("{}", output::render_sql(&event, dialect.as_ref()));
            }
        }
        Commands::Tables { catalog, settings } => {
            let settings = load_settings(settings.as_deref())?;
            let catalog = InMemoryCatalog::from_path(&catalog)?;
            println!("{}", output::render_tables(&catalog, &settings)?);
        }
    }

    Ok(())
}

/// File settings (or defaults), then environment overrides, then validation.
fn load_settings(path: Option<&str>) -> Result<RewriterSettings, CliError> {
    let settings = match path {
        Some(path) => RewriterSettings::from_path(path)?,
        None => RewriterSettings::default(),
    }
    .with_env_overrides();
    settings.validate()?;
    Ok(settings)
}
