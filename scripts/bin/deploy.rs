use clap::Parser;
use scripts::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // logs go to stderr so stdout carries only the deployment report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = cli.context().await?;

    let mut out = std::io::stdout();
    scripts::run(&ctx, &cli.tags, &mut out).await?;

    Ok(())
}
