use futures::stream::{FuturesUnordered, StreamExt};
use serde::Deserialize;

use super::fetch::Fetch;
use crate::account::BalanceMap;
use crate::error::AccountError;

/// Balance endpoint response; extra explorer fields are ignored
#[derive(Debug, Deserialize)]
struct AddressBalanceResponse {
    balance: f64,
}

/// Substitute an address into a balance URL template
pub fn balance_url(url_template: &str, address: &str) -> String {
    url_template.replacen("{address}", address, 1)
}

/// Per-address balance queries against an explorer endpoint
pub struct BalanceChecker<'a, F: Fetch + ?Sized> {
    fetch: &'a F,
    url_template: &'a str,
}

impl<'a, F: Fetch + ?Sized> BalanceChecker<'a, F> {
    pub fn new(fetch: &'a F, url_template: &'a str) -> Self {
        Self {
            fetch,
            url_template,
        }
    }

    pub async fn address_balance(&self, address: &str) -> Result<f64, AccountError> {
        let url = balance_url(self.url_template, address);
        let response = self.fetch.get(&url, None).await?.error_for_status()?;
        let body: AddressBalanceResponse = response.json()?;
        Ok(body.balance)
    }

    /// Query every address concurrently and aggregate once all have answered
    ///
    /// Returns `None` for an empty address list or when any request fails;
    /// failures are logged and the remaining requests still run to completion.
    pub async fn calculate_balances(&self, addresses: &[String]) -> Option<BalanceMap> {
        if addresses.is_empty() {
            log::debug!("No addresses to refresh");
            return None;
        }

        let mut barrier = BalanceBarrier::new(addresses.len());
        let mut pending: FuturesUnordered<_> = addresses
            .iter()
            .map(|address| async move { (address, self.address_balance(address).await) })
            .collect();

        let mut aggregated = None;
        while let Some((address, result)) = pending.next().await {
            match result {
                Ok(balance) => {
                    log::debug!("Balance for {}: {}", address, balance);
                    if let Some(balances) = barrier.record(address.clone(), balance) {
                        aggregated = Some(balances);
                    }
                }
                Err(e) => {
                    log::error!("refresh_balances: error fetching balance for {}: {}", address, e);
                }
            }
        }

        if aggregated.is_none() {
            log::warn!(
                "refresh_balances: {} of {} requests completed, balances not updated",
                barrier.completed(),
                addresses.len()
            );
        }

        aggregated
    }
}

/// Count-based fan-in over per-address balance results
///
/// Results may arrive in any order. The map is built exactly once, when the
/// number of recorded results reaches the number of requested addresses.
#[derive(Debug)]
pub struct BalanceBarrier {
    expected: usize,
    results: Vec<(String, f64)>,
}

impl BalanceBarrier {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            results: Vec::with_capacity(expected),
        }
    }

    pub fn completed(&self) -> usize {
        self.results.len()
    }

    pub fn is_complete(&self) -> bool {
        self.expected > 0 && self.results.len() >= self.expected
    }

    /// Record one result; returns the aggregated map when this was the last one
    pub fn record(&mut self, address: String, balance: f64) -> Option<BalanceMap> {
        if self.is_complete() {
            log::warn!("Balance for {} arrived after aggregation, ignored", address);
            return None;
        }

        self.results.push((address, balance));

        if self.is_complete() {
            Some(BalanceMap::from_results(self.results.iter().cloned()))
        } else {
            None
        }
    }
}
