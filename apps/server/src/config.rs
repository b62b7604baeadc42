use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use masjid_api_client::DEFAULT_API_URL;
use masjid_core::settings::{LedgerSettings, LedgerSettingsUpdate};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub api_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub ledger: LedgerSettings,
    pub code_ttl: Duration,
    pub code_webhook_url: Option<String>,
    pub json_logs: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("MASJID_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid MASJID_LISTEN_ADDR")?;
        let api_url = env_or("MASJID_API_URL", DEFAULT_API_URL);
        let cors_allow = env_or("MASJID_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("MASJID_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let code_ttl_secs: u64 = env_or("MASJID_CODE_TTL_SECS", "300")
            .parse()
            .unwrap_or(300);
        let code_webhook_url = std::env::var("MASJID_CODE_WEBHOOK_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        let json_logs = std::env::var("MASJID_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let overrides = LedgerSettingsUpdate {
            imam_salary_cutoff: std::env::var("MASJID_IMAM_SALARY_CUTOFF").ok(),
            default_join_month: std::env::var("MASJID_DEFAULT_JOIN_MONTH").ok(),
            legacy_identity_matching: std::env::var("MASJID_LEGACY_IDENTITY_MATCHING").ok(),
            trailing_months: std::env::var("MASJID_TRAILING_MONTHS").ok(),
            timezone: std::env::var("MASJID_TIMEZONE").ok(),
        };
        let ledger = LedgerSettings::default().apply(&overrides)?;

        Ok(Self {
            listen_addr,
            api_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            ledger,
            code_ttl: Duration::from_secs(code_ttl_secs),
            code_webhook_url,
            json_logs,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
