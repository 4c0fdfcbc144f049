use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a [`crate::Resolver`].
///
/// Resolving a header never fails; only the configuration that feeds a
/// resolver can be rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid network range {cidr:?}")]
    InvalidRange {
        cidr: String,
        #[source]
        source: ipnetwork::IpNetworkError,
    },
    #[error("the private range table must contain at least one range")]
    EmptyRangeSet,
    #[error("unknown scan policy {0:?}, expected \"backward\" or \"forward\"")]
    UnknownPolicy(String),
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}
