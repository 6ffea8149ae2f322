//! Application configuration.
//!
//! A small TOML file carries the catalog location and the business footer.
//! Every field has a compiled-in default, so running without a config file
//! works out of the box.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use quickbill_documents::BusinessProfile;

/// Default config location, resolved relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "quickbill.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub business: BusinessProfile,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Price list location; a `--catalog` argument overrides it.
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load an explicit config (must exist), or fall back to
    /// [`DEFAULT_CONFIG_PATH`] if present, or the compiled-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.business, BusinessProfile::default());
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load_or_default(Some(Path::new("/nonexistent/quickbill.toml")));
        assert!(err.is_err());
    }

    #[test]
    fn partial_config_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickbill.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "[catalog]\npath = \"prices.csv\"\n\n[business]\ncarrier = \"FedEx\"\n"
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("prices.csv")));
        assert_eq!(config.business.carrier, "FedEx");
        // Untouched sections keep their defaults.
        assert_eq!(
            config.business.payment_lines,
            BusinessProfile::default().payment_lines
        );
    }
}
