//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level typequiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypequizConfig {
    /// Catalog file or directory; the built-in catalog when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Pause between an answer and the next question, in milliseconds.
    #[serde(default = "default_advance_delay")]
    pub advance_delay_ms: u64,
    /// Print asset and font identifiers on question screens.
    #[serde(default)]
    pub show_assets: bool,
}

fn default_advance_delay() -> u64 {
    1500
}

impl Default for TypequizConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            advance_delay_ms: default_advance_delay(),
            show_assets: false,
        }
    }
}

impl TypequizConfig {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted literally and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `typequiz.toml` in the current directory
/// 2. `~/.config/typequiz/config.toml`
///
/// Environment variable overrides: `TYPEQUIZ_CATALOG`, `TYPEQUIZ_ADVANCE_DELAY_MS`.
pub fn load_config_from(path: Option<&Path>) -> Result<TypequizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("typequiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            toml::from_str::<TypequizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TypequizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(catalog) = std::env::var("TYPEQUIZ_CATALOG") {
        config.catalog = Some(PathBuf::from(catalog));
    }
    if let Ok(delay) = std::env::var("TYPEQUIZ_ADVANCE_DELAY_MS") {
        config.advance_delay_ms = delay
            .parse()
            .with_context(|| format!("TYPEQUIZ_ADVANCE_DELAY_MS is not a number: {delay}"))?;
    }

    config.catalog = config
        .catalog
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("typequiz"))
}
