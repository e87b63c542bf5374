use clap::Parser;
use flashdeck::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    flashdeck::run(cli).await
}
