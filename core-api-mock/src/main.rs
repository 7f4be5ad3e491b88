/// Core API Mock Server
///
/// Serves the explorer balance, core wallet and backup endpoints from an
/// in-memory ledger. Intended for local development against a regtest setup.

use anyhow::{Context, Result};
use std::env;

use core_api_mock::{run_server, MockLedger};

#[derive(Debug)]
struct Config {
    api_password: String,
    wallet_address: String,
    wallet_balance_sats: u64,

    // Server
    server_host: String,
    server_port: u16,
}

impl Config {
    fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let api_password = env::var("CORE_API_PASSWORD")
            .context("CORE_API_PASSWORD environment variable not set")?;

        let wallet_address = env::var("MOCK_WALLET_ADDRESS")
            .unwrap_or_else(|_| "mfWxJ45yp2SFn7UciZyNpvDKrzbhyfKrY8".to_string());

        let wallet_balance_sats = env::var("MOCK_WALLET_BALANCE_SATS")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .context("Invalid MOCK_WALLET_BALANCE_SATS")?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "6270".to_string())
            .parse()
            .context("Invalid SERVER_PORT")?;

        Ok(Self {
            api_password,
            wallet_address,
            wallet_balance_sats,
            server_host,
            server_port,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Core API mock...");

    let config = Config::from_env().context("Failed to load configuration")?;

    log::info!("Wallet address: {}", config.wallet_address);
    log::info!("Wallet balance: {} sats", config.wallet_balance_sats);

    let ledger = MockLedger::new(
        &config.api_password,
        &config.wallet_address,
        config.wallet_balance_sats,
    );

    run_server(ledger, config.server_host, config.server_port)
        .await
        .context("Server error")?;

    Ok(())
}
