use crate::error::ConfigError;
use crate::ranges::{PrivateRangeSet, parse_ranges};
use crate::resolver::{Resolver, ScanPolicy};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::debug;

/// Path of a TOML file holding a [`ResolverConfig`].
pub const CONFIG_PATH_VAR: &str = "SOURCE_IP_CONFIG";
/// Overrides the scan policy, `backward` or `forward`.
pub const POLICY_VAR: &str = "SOURCE_IP_POLICY";
/// Comma separated CIDR blocks appended to the configured ranges.
pub const EXTRA_RANGES_VAR: &str = "SOURCE_IP_EXTRA_RANGES";

/// Serializable description of a [`Resolver`].
///
/// ```toml
/// policy = "backward"
/// replace_default_ranges = false
/// ranges = ["203.0.113.0/24"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub policy: ScanPolicy,
    /// Use only `ranges` instead of appending them to the built-in table.
    pub replace_default_ranges: bool,
    pub ranges: Vec<String>,
}

impl ResolverConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Reads the config file named by `SOURCE_IP_CONFIG`, if any, then applies
    /// the `SOURCE_IP_POLICY` and `SOURCE_IP_EXTRA_RANGES` overrides. A `.env`
    /// file in the working directory is honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        _ = dotenvy::dotenv();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match var(CONFIG_PATH_VAR) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(policy) = var(POLICY_VAR) {
            config.policy = policy.parse()?;
        }

        if let Some(extra) = var(EXTRA_RANGES_VAR) {
            config.ranges.extend(
                extra
                    .split(',')
                    .map(str::trim)
                    .filter(|cidr| !cidr.is_empty())
                    .map(String::from),
            );
        }

        Ok(config)
    }

    pub fn build(&self) -> Result<Resolver, ConfigError> {
        let extra = parse_ranges(&self.ranges)?;
        let ranges = if self.replace_default_ranges {
            PrivateRangeSet::new(extra)?
        } else {
            PrivateRangeSet::default().with_ranges(extra)
        };

        debug!(
            policy = %self.policy,
            ranges = ranges.len(),
            "built forwarded chain resolver"
        );
        Ok(Resolver::new(ranges, self.policy))
    }
}
