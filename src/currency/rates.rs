use crate::config::RatesConfig;
use crate::error::AppError;
use arc_swap::ArcSwapOption;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Time source, injectable so cache expiry is testable without real delays
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// EUR-based rate table with its fetch timestamp
#[derive(Debug, Clone)]
pub struct RateTable {
    pub rates: HashMap<String, f64>,
    pub fetched_at: DateTime<Utc>,
}

/// Rate provider response: `GET <url>` → `{"rates": {"USD": 1.07, ...}}`
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// Cached exchange-rate lookup against the external rate provider
///
/// The table is replaced whole (atomic swap) on a successful fetch, and a
/// fetch failure falls back to a fixed table without touching the cache, so
/// the next call retries instead of serving a cached fallback. At most one
/// fetch is in flight; concurrent callers on a cold cache await the winner.
pub struct RateService {
    client: reqwest::Client,
    url: String,
    ttl: Duration,
    cache: ArcSwapOption<RateTable>,
    fetch_lock: tokio::sync::Mutex<()>,
    clock: Arc<dyn Clock>,
}

impl RateService {
    pub fn new(cfg: &RatesConfig) -> Result<Self, AppError> {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    pub fn with_clock(cfg: &RatesConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: cfg.url.clone(),
            ttl: Duration::seconds(cfg.cache_ttl_seconds as i64),
            cache: ArcSwapOption::const_empty(),
            fetch_lock: tokio::sync::Mutex::new(()),
            clock,
        })
    }

    /// Current rate table: cached, freshly fetched, or the fixed fallback
    ///
    /// Never fails; a rate-fetch failure yields usable (possibly stale)
    /// numbers for a display-only estimate.
    pub async fn get_rates(&self) -> HashMap<String, f64> {
        if let Some(table) = self.fresh_table() {
            return table.rates.clone();
        }

        let _guard = self.fetch_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(table) = self.fresh_table() {
            return table.rates.clone();
        }

        match self.fetch_latest().await {
            Ok(rates) => {
                debug!("Fetched {} exchange rates", rates.len());
                let table = RateTable {
                    rates: rates.clone(),
                    fetched_at: self.clock.now(),
                };
                self.cache.store(Some(Arc::new(table)));
                rates
            }
            Err(e) => {
                warn!("Rate fetch failed, using fallback table: {}", e);
                fallback_rates()
            }
        }
    }

    fn fresh_table(&self) -> Option<Arc<RateTable>> {
        self.cache
            .load_full()
            .filter(|table| self.clock.now() - table.fetched_at < self.ttl)
    }

    async fn fetch_latest(&self) -> Result<HashMap<String, f64>, AppError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Backend {
                status: response.status(),
                message: "rate provider returned an error".to_string(),
            });
        }

        let body: LatestRatesResponse = response.json().await?;
        Ok(body.rates)
    }
}

/// Fixed rates used when the provider is unreachable
pub fn fallback_rates() -> HashMap<String, f64> {
    HashMap::from([
        ("USD".to_string(), 1.07),
        ("PLN".to_string(), 4.35),
        ("EUR".to_string(), 1.0),
    ])
}

/// Convert a EUR amount to the target currency, rounded to 2 decimals
///
/// EUR and currencies absent from the table pass through unchanged; the
/// passthrough is a documented fallback, not an error.
pub fn convert(amount_eur: f64, currency: &str, rates: &HashMap<String, f64>) -> f64 {
    if currency == "EUR" {
        return amount_eur;
    }
    match rates.get(currency) {
        Some(rate) => (amount_eur * rate * 100.0).round() / 100.0,
        None => amount_eur,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_eur_is_identity() {
        let rates = fallback_rates();
        for amount in [0.0, 1.0, 99.99, 1234.5678] {
            assert_eq!(convert(amount, "EUR", &rates), amount);
        }
    }

    #[test]
    fn test_convert_unknown_currency_passes_through() {
        let rates = fallback_rates();
        assert_eq!(convert(123.45, "SEK", &rates), 123.45);
        assert_eq!(convert(123.45, "JPY", &HashMap::new()), 123.45);
    }

    #[test]
    fn test_convert_applies_rate_with_rounding() {
        let rates = HashMap::from([("PLN".to_string(), 4.35)]);
        assert_eq!(convert(100.0, "PLN", &rates), 435.0);

        let rates = HashMap::from([("USD".to_string(), 1.07)]);
        assert_eq!(convert(250.0, "USD", &rates), 267.5);
        // 33.33 * 1.07 = 35.6631 → 35.66
        assert_eq!(convert(33.33, "USD", &rates), 35.66);
    }

    #[test]
    fn test_fallback_table_contents() {
        let rates = fallback_rates();
        assert_eq!(rates.get("USD"), Some(&1.07));
        assert_eq!(rates.get("PLN"), Some(&4.35));
        assert_eq!(rates.get("EUR"), Some(&1.0));
        assert_eq!(rates.len(), 3);
    }
}
