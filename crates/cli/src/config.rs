//! Environment configuration for the `dprsim` binary.

/// Default filter when neither `RUST_LOG` nor `DPRSIM_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "dprsim=info,dprsim_domain=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pretty-print JSON output (`DPRSIM_PRETTY`, default true)
    pub pretty: bool,
    /// Fallback log filter (`DPRSIM_LOG`)
    pub log_filter: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pretty = lookup("DPRSIM_PRETTY")
            .map(|value| parse_flag(&value))
            .unwrap_or(true);
        let log_filter = lookup("DPRSIM_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self { pretty, log_filter }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Load `.env.local` then `.env` from the working directory, if present.
pub fn load_dotenv() {
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
