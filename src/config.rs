use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_TABLE: &str = "environment_data";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const PLACEHOLDER_URL: &str = "YOUR_PROJECT";
pub const PLACEHOLDER_KEY: &str = "YOUR_ANON_KEY";
pub const CREDENTIALS_HINT: &str =
    "find your credentials at https://app.supabase.com/project/_/settings/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub interval: Duration,
    pub timeout: Duration,
    pub max_readings: Option<u64>,
    pub seed: Option<u64>,
    pub skip_probe: bool,
}

impl Config {
    pub fn from_env() -> Result<Config, anyhow::Error> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = required(&lookup, "SUPABASE_URL")?;
        let api_key = required(&lookup, "SUPABASE_KEY")?;

        if base_url.contains(PLACEHOLDER_URL) || api_key == PLACEHOLDER_KEY {
            return Err(anyhow::anyhow!(
                "SUPABASE_URL and SUPABASE_KEY still hold placeholder values; {CREDENTIALS_HINT}"
            ));
        }
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(anyhow::anyhow!(
                "SUPABASE_URL must start with http:// or https://, got {base_url:?}"
            ));
        }

        let table = lookup("SIM_TABLE")
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let interval = match parse::<u64, _>(&lookup, "SIM_INTERVAL_SECS")? {
            Some(0) => return Err(anyhow::anyhow!("SIM_INTERVAL_SECS must be greater than 0")),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_INTERVAL,
        };
        let timeout = match parse::<u64, _>(&lookup, "SIM_TIMEOUT_SECS")? {
            Some(0) => return Err(anyhow::anyhow!("SIM_TIMEOUT_SECS must be greater than 0")),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        let max_readings = match parse::<u64, _>(&lookup, "SIM_MAX_READINGS")? {
            Some(0) => return Err(anyhow::anyhow!("SIM_MAX_READINGS must be greater than 0")),
            max => max,
        };

        Ok(Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
            interval,
            timeout,
            max_readings,
            seed: parse(&lookup, "SIM_SEED")?,
            skip_probe: parse(&lookup, "SIM_SKIP_PROBE")?.unwrap_or(false),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{key} is not set; {CREDENTIALS_HINT}"))
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>, anyhow::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Failed to parse {key}={v:?}")),
        _ => Ok(None),
    }
}
