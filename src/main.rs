use clap::Parser;

use catalog_rs::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    catalog_rs::cli::run(cli).await
}
