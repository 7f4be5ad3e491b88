/// Account configuration from environment variables
///
/// Controls the Bitcoin network used for key derivation and the HTTP
/// endpoints the account actions talk to.
/// Defaults to mainnet and a local core node.

use std::env;
use std::time::Duration;

use crate::error::AccountError;

pub const DEFAULT_ADDRESS_BALANCE_URL: &str =
    "https://explorer.blockstack.org/insight-api/addr/{address}/?noTxList=1";
pub const DEFAULT_CORE_API_URL: &str = "http://localhost:6270";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_BACKUP_EMAIL_URL: &str = "http://localhost:2888/backup";

#[derive(Clone, Debug)]
pub struct AccountConfig {
    /// Bitcoin network for master keychain creation
    pub network: bitcoin::Network,
    /// Balance endpoint template, `{address}` is substituted per request
    pub address_balance_url: String,
    /// Base URL of the core node API
    pub core_api_url: String,
    /// Password for the core node wallet API (optional)
    pub core_api_password: Option<String>,
    /// Endpoint receiving keychain backup emails
    pub backup_email_url: String,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl AccountConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `BITCOIN_NETWORK`: "bitcoin" (default), "testnet", "signet" or "regtest"
    /// - `ADDRESS_BALANCE_URL`: balance endpoint template containing `{address}`
    /// - `CORE_API_URL`: core node API base URL
    /// - `CORE_API_PASSWORD`: core node API password (optional)
    /// - `BACKUP_EMAIL_URL`: backup email endpoint
    /// - `HTTP_TIMEOUT_SECS`: request timeout in seconds (default 30)
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Mainnet against the public explorer
    /// PORTAL_PASSWORD=secret cargo run
    ///
    /// # Regtest against the local core API mock
    /// BITCOIN_NETWORK=regtest \
    ///   ADDRESS_BALANCE_URL='http://localhost:6270/insight-api/addr/{address}' \
    ///   CORE_API_PASSWORD=hunter2 PORTAL_PASSWORD=secret cargo run
    /// ```
    pub fn from_env() -> Result<Self, AccountError> {
        let network_str = env::var("BITCOIN_NETWORK")
            .unwrap_or_else(|_| "bitcoin".to_string())
            .to_lowercase();

        let network = parse_network(&network_str).unwrap_or_else(|| {
            log::warn!("Unknown network '{}', defaulting to mainnet", network_str);
            bitcoin::Network::Bitcoin
        });
        log::info!("Using {} network", network);

        let address_balance_url = env::var("ADDRESS_BALANCE_URL")
            .unwrap_or_else(|_| DEFAULT_ADDRESS_BALANCE_URL.to_string());
        if !address_balance_url.contains("{address}") {
            log::warn!(
                "ADDRESS_BALANCE_URL has no {{address}} placeholder: {}",
                address_balance_url
            );
        }
        log::info!("Balance URL: {}", address_balance_url);

        let core_api_url = env::var("CORE_API_URL")
            .unwrap_or_else(|_| DEFAULT_CORE_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        log::info!("Core API URL: {}", core_api_url);

        let core_api_password = env::var("CORE_API_PASSWORD").ok().filter(|p| !p.is_empty());

        let backup_email_url =
            env::var("BACKUP_EMAIL_URL").unwrap_or_else(|_| DEFAULT_BACKUP_EMAIL_URL.to_string());

        let http_timeout = parse_timeout(env::var("HTTP_TIMEOUT_SECS").ok().as_deref())?;
        log::info!("HTTP timeout: {:?}", http_timeout);

        Ok(Self {
            network,
            address_balance_url,
            core_api_url,
            core_api_password,
            backup_email_url,
            http_timeout,
        })
    }

    pub fn core_wallet_address_url(&self) -> String {
        format!("{}/v1/wallet/payment_address", self.core_api_url)
    }

    pub fn core_wallet_balance_url(&self) -> String {
        format!("{}/v1/wallet/balance", self.core_api_url)
    }

    pub fn core_wallet_withdraw_url(&self) -> String {
        format!("{}/v1/wallet/tx", self.core_api_url)
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            network: bitcoin::Network::Bitcoin,
            address_balance_url: DEFAULT_ADDRESS_BALANCE_URL.to_string(),
            core_api_url: DEFAULT_CORE_API_URL.to_string(),
            core_api_password: None,
            backup_email_url: DEFAULT_BACKUP_EMAIL_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

/// Parse `HTTP_TIMEOUT_SECS`; unset means the 30 second default
pub fn parse_timeout(value: Option<&str>) -> Result<Duration, AccountError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_HTTP_TIMEOUT);
    };

    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AccountError::Config(format!(
            "HTTP_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
            value
        ))),
    }
}

/// Map a network name to a `bitcoin::Network`
pub fn parse_network(name: &str) -> Option<bitcoin::Network> {
    match name {
        "bitcoin" | "mainnet" | "" => Some(bitcoin::Network::Bitcoin),
        "testnet" => Some(bitcoin::Network::Testnet),
        "signet" => Some(bitcoin::Network::Signet),
        "regtest" => Some(bitcoin::Network::Regtest),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mainnet() {
        let config = AccountConfig::default();
        assert!(matches!(config.network, bitcoin::Network::Bitcoin));
        assert_eq!(config.backup_email_url, "http://localhost:2888/backup");
        assert!(config.core_api_password.is_none());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(None).unwrap(), DEFAULT_HTTP_TIMEOUT);
        assert_eq!(parse_timeout(Some("")).unwrap(), DEFAULT_HTTP_TIMEOUT);
        assert_eq!(parse_timeout(Some(" 5 ")).unwrap(), Duration::from_secs(5));

        for bad in ["0", "-3", "ten"] {
            let err = parse_timeout(Some(bad)).unwrap_err();
            assert!(matches!(err, AccountError::Config(_)));
            assert!(err.to_string().contains(bad));
        }
    }

    #[test]
    fn test_core_wallet_urls() {
        let config = AccountConfig {
            core_api_url: "http://node:6270".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.core_wallet_address_url(),
            "http://node:6270/v1/wallet/payment_address"
        );
        assert_eq!(config.core_wallet_balance_url(), "http://node:6270/v1/wallet/balance");
        assert_eq!(config.core_wallet_withdraw_url(), "http://node:6270/v1/wallet/tx");
    }

    #[test]
    fn test_parse_network() {
        assert_eq!(parse_network("regtest"), Some(bitcoin::Network::Regtest));
        assert_eq!(parse_network("mainnet"), Some(bitcoin::Network::Bitcoin));
        assert_eq!(parse_network("dogecoin"), None);
    }
}
