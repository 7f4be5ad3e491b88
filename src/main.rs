use anyhow::Context;
use portal_account::account::Dispatch;
use portal_account::{account, AccountActions, AccountConfig, AccountStore, ReqwestFetch};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger (set RUST_LOG=debug for verbose output, RUST_LOG=info for normal)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AccountConfig::from_env().context("Failed to load configuration")?;

    let password = env::var("PORTAL_PASSWORD").context("PORTAL_PASSWORD must be set")?;
    let backup_phrase = env::var("PORTAL_BACKUP_PHRASE").ok();

    // Extra bitcoin addresses to derive beyond the first (default 0)
    let extra_addresses: u32 = env::var("PORTAL_EXTRA_ADDRESSES")
        .ok()
        .map(|s| s.parse())
        .transpose()
        .context("Invalid PORTAL_EXTRA_ADDRESSES")?
        .unwrap_or(0);

    let fetch = ReqwestFetch::from_config(&config).context("Failed to build HTTP client")?;
    let actions = AccountActions::from_config(fetch, &config);
    let store = AccountStore::new();

    log::info!("Initializing account on {}", config.network);
    actions
        .initialize_wallet(&store, &password, backup_phrase.as_deref(), None)
        .await
        .context("Failed to initialize wallet")?;

    for _ in 0..extra_addresses {
        store.dispatch(account::action::new_bitcoin_address());
    }

    let addresses = store.state().bitcoin_account.addresses.clone();
    actions
        .refresh_balances(&store, &config.address_balance_url, &addresses)
        .await;

    if let Some(core_api_password) = config.core_api_password.as_deref() {
        actions
            .get_core_wallet_address(&store, &config.core_wallet_address_url(), core_api_password)
            .await;
        actions
            .refresh_core_wallet_balance(&store, &config.core_wallet_balance_url(), core_api_password)
            .await;
    } else {
        log::info!("CORE_API_PASSWORD not set, skipping core wallet");
    }

    let state = store.state();
    println!("{}", serde_json::to_string_pretty(&*state)?);
    Ok(())
}
