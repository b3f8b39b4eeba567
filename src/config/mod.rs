use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";
const DEFAULT_DATA_API_URL: &str = "https://data-api.polymarket.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Venue endpoints
    pub gamma_api_url: String,
    pub data_api_url: String,

    // HTTP
    pub http_timeout_secs: u64,

    // Discovery run shape
    pub discovery: DiscoveryConfig,
}

/// Tunables for a single discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Markets requested from the listing endpoint.
    pub market_fetch_limit: u32,
    /// Markets actually scanned for trades (prefix of the listing).
    pub market_scan_limit: usize,
    pub trades_per_market: u32,
    pub max_concurrent_fetches: usize,
    pub fetch_timeout: Duration,
    pub market_cache_ttl: Duration,
    pub max_results: usize,
    pub heuristics: PnlHeuristics,
}

/// Constants used when a wallet's entry into a position was not observed.
#[derive(Debug, Clone, Copy)]
pub struct PnlHeuristics {
    /// Average sell price above which a sell-only wallet counts as profitable.
    pub sell_only_profit_threshold: Decimal,
    /// Entry cost assumed for positions opened before the lookback window.
    pub assumed_entry_price: Decimal,
}

impl Default for PnlHeuristics {
    fn default() -> Self {
        Self {
            sell_only_profit_threshold: Decimal::new(55, 2), // 0.55
            assumed_entry_price: Decimal::new(5, 1),         // 0.5
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            market_fetch_limit: 100,
            market_scan_limit: 30,
            trades_per_market: 500,
            max_concurrent_fetches: 30,
            fetch_timeout: Duration::from_secs(8),
            market_cache_ttl: Duration::from_secs(300),
            max_results: 50,
            heuristics: PnlHeuristics::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = DiscoveryConfig::default();
        let fetch_timeout_secs = env_or("FETCH_TIMEOUT_SECS", 8u64);

        let heuristics = PnlHeuristics {
            sell_only_profit_threshold: env_or(
                "SELL_ONLY_PROFIT_THRESHOLD",
                defaults.heuristics.sell_only_profit_threshold,
            ),
            assumed_entry_price: env_or(
                "ASSUMED_ENTRY_PRICE",
                defaults.heuristics.assumed_entry_price,
            ),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            gamma_api_url: env::var("GAMMA_API_URL")
                .unwrap_or_else(|_| DEFAULT_GAMMA_API_URL.into()),
            data_api_url: env::var("DATA_API_URL")
                .unwrap_or_else(|_| DEFAULT_DATA_API_URL.into()),

            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", 10u64),

            discovery: DiscoveryConfig {
                market_fetch_limit: env_or("MARKET_FETCH_LIMIT", defaults.market_fetch_limit),
                market_scan_limit: env_or("MARKET_SCAN_LIMIT", defaults.market_scan_limit),
                trades_per_market: env_or("TRADES_PER_MARKET", defaults.trades_per_market),
                max_concurrent_fetches: env_or(
                    "MAX_CONCURRENT_FETCHES",
                    defaults.max_concurrent_fetches,
                )
                .max(1),
                fetch_timeout: Duration::from_secs(fetch_timeout_secs),
                market_cache_ttl: Duration::from_secs(env_or("MARKET_CACHE_TTL_SECS", 300u64)),
                max_results: env_or("MAX_RESULTS", defaults.max_results),
                heuristics,
            },
        })
    }

    /// Build the shared HTTP client used by every venue client.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.http_timeout_secs))
            .pool_max_idle_per_host(self.discovery.max_concurrent_fetches)
            .build()
    }
}

/// Read an env var, falling back to `default` when unset or unparseable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Unparseable config value, using default");
            default
        }),
        Err(_) => default,
    }
}
