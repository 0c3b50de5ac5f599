use clap::Parser;
use rem_processor::cli::{run, Cli};
use rem_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
