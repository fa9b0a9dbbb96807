//! Server configuration
//!
//! Read once from environment variables at start-up. Unset variables take
//! defaults; a value that is set but cannot be parsed is a start-up error.

use std::fmt;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REPORT_CACHE_TTL_SECS: u64 = 300;
pub const RESEND_API_URL: &str = "https://api.resend.com";

/// Site the server is running as. Only copy and email branding differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Topleads,
    #[serde(rename = "leakagefinder")]
    LeakageFinder,
    #[default]
    Effluentic,
}

impl Brand {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "topleads" => Some(Brand::Topleads),
            "leakagefinder" => Some(Brand::LeakageFinder),
            "effluentic" => Some(Brand::Effluentic),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Brand::Topleads => "Topleads",
            Brand::LeakageFinder => "LeakageFinder",
            Brand::Effluentic => "Effluentic",
        }
    }

    pub fn default_sender(&self) -> &'static str {
        match self {
            Brand::Topleads => "Topleads Funnel <leads@topleads.co.za>",
            Brand::LeakageFinder => "LeakageFinder Funnel <leads@leakagefinder.co.za>",
            Brand::Effluentic => "Effluentic Funnel <leads@effluentic.co.za>",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub brand: Brand,
    /// Hosted datastore; in-memory store when absent
    pub supabase: Option<SupabaseConfig>,
    /// Transactional email; log-only when absent
    pub resend: Option<ResendConfig>,
    pub notify_from: String,
    pub notify_to: Vec<String>,
    /// Fixed seed for the demo leak simulation
    pub simulation_seed: Option<u64>,
    pub report_cache_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let brand = Brand::default();
        Self {
            port: DEFAULT_PORT,
            brand,
            supabase: None,
            resend: None,
            notify_from: brand.default_sender().to_string(),
            notify_to: Vec::new(),
            simulation_seed: None,
            report_cache_ttl_secs: DEFAULT_REPORT_CACHE_TTL_SECS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let brand = match get("BRAND") {
            Some(raw) => match Brand::from_code(&raw) {
                Some(brand) => brand,
                None => bail!("BRAND must be one of topleads, leakagefinder, effluentic; got '{}'", raw),
            },
            None => Brand::default(),
        };

        let supabase = match (get("SUPABASE_URL"), get("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(SupabaseConfig { url, anon_key }),
            (None, None) => None,
            _ => bail!("SUPABASE_URL and SUPABASE_ANON_KEY must be set together"),
        };

        let notify_to: Vec<String> = get("LEAD_NOTIFY_TO")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let resend = match get("RESEND_API_KEY") {
            Some(api_key) => {
                if notify_to.is_empty() {
                    bail!("RESEND_API_KEY is set but LEAD_NOTIFY_TO is empty");
                }
                Some(ResendConfig {
                    api_key,
                    base_url: get("RESEND_API_URL").unwrap_or_else(|| RESEND_API_URL.to_string()),
                })
            }
            None => None,
        };

        let notify_from = get("LEAD_NOTIFY_FROM").unwrap_or_else(|| brand.default_sender().to_string());

        let simulation_seed = match get("SIMULATION_SEED") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .with_context(|| format!("SIMULATION_SEED must be an unsigned integer, got '{}'", raw))?,
            ),
            None => None,
        };

        let report_cache_ttl_secs = match get("REPORT_CACHE_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("REPORT_CACHE_TTL_SECS must be a number of seconds, got '{}'", raw))?,
            None => DEFAULT_REPORT_CACHE_TTL_SECS,
        };

        Ok(Self {
            port,
            brand,
            supabase,
            resend,
            notify_from,
            notify_to,
            simulation_seed,
            report_cache_ttl_secs,
        })
    }
}
