/// Spendwise - command-line expense tracker
use clap::Parser;
use spendwise_cli::{
    commands::{is_user_error, App, Credentials},
    config::AppConfig,
    Cli,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spendwise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    tracing::debug!(
        base_url = %config.api.base_url,
        page_size = config.expenses.page_size,
        "Configuration loaded"
    );

    let credentials = Credentials::resolve(cli.email, cli.password, &config);
    let app = App::new(&config)?;

    match app.run(cli.command, &credentials).await {
        Err(e) if is_user_error(&e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
        result => result,
    }
}
