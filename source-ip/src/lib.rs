//! Finds the public address a request came from by walking its
//! `X-Forwarded-For` chain and skipping every entry that is malformed or
//! belongs to a non-routable network.
//!
//! ```
//! use source_ip::resolve_public_ip;
//!
//! assert_eq!(resolve_public_ip("10.1.2.3, 206.27.34.1, 192.168.2.200"), "206.27.34.1");
//! assert_eq!(resolve_public_ip("10.0.0.1, 192.168.1.1"), "");
//! ```
//!
//! The chain is scanned right to left by default, see [`ScanPolicy`].

pub mod chain;
pub mod config;
pub mod error;
pub mod http;
pub mod ranges;
pub mod resolver;

pub use chain::ForwardChain;
pub use config::ResolverConfig;
pub use error::ConfigError;
pub use ranges::{DEFAULT_RANGES, PrivateRangeSet};
pub use resolver::{Resolver, ScanPolicy, resolve_public_ip};

pub use ipnetwork::IpNetwork;
