use anyhow::Result;
use pardon_me::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
