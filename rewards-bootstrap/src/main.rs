use anyhow::Result;
use clap::Parser;

use rewards_infrastructure::CONFIG_ENV;

#[derive(Parser, Debug)]
#[command(name = "rewards-backend")]
#[command(about = "Rewards History Server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    rewards_bootstrap::run().await
}
