use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dprsim_domain::TemplateRegistry;

mod commands;
mod config;

use commands::Command;
use config::Config;

fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    let config = Config::from_env();

    // Logs go to stderr; stdout carries only JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = Command::parse(std::env::args().skip(1))?;
    tracing::debug!(?command, "parsed command");

    let registry = TemplateRegistry::new();
    let output = commands::run(command, &registry)?;

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}
