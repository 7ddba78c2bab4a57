use clap::Parser;
use onboard_client::cli::{self, Cli};
use onboard_client::{ClientConfig, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.apply(ClientConfig::from_env());
    logger::init_logger_with_level(Some(&config.log_level), cli.log_json);

    cli::run(cli, config).await
}
