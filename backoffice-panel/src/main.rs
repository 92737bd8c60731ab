use std::io::{BufRead, Write};

use anyhow::Context;
use backoffice_panel::cli::{self, Cli};
use backoffice_panel::{AppContext, PanelConfig, init_logger};
use clap::Parser;

fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{} [t/N] ", prompt);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "t" | "tak" | "y" | "yes")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging)
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = PanelConfig::from_env();
    if let Some(url) = &cli.url {
        config = config.with_api_url(url.clone());
    }
    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())
        .context("failed to initialize logging")?;
    tracing::debug!(api = %config.client.base_url, "Panel starting");

    // 2. Context and persisted session
    let ctx = AppContext::from_config(&config.client).context("failed to build HTTP client")?;
    ctx.session()
        .restore()
        .await
        .context("failed to read the stored session")?;

    // 3. Command
    let today = chrono::Local::now().date_naive();
    match cli::run(&ctx, cli.command, today, &mut confirm_on_stdin).await {
        Ok(output) => {
            println!("{}", output.trim_end());
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
