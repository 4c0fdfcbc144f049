use anyhow::Context;
use source_ip::{Resolver, ResolverConfig, ScanPolicy};
use std::path::Path;
use tracing::info;

/// Builds the resolver for this invocation. An explicit `--config` file wins
/// over the environment; `--policy` wins over both.
pub fn load_resolver(path: Option<&Path>, policy: Option<ScanPolicy>) -> anyhow::Result<Resolver> {
    let mut config = match path {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ResolverConfig::from_env().context("Failed to load config from environment")?,
    };

    if let Some(policy) = policy {
        config.policy = policy;
    }

    let resolver = config.build().context("Invalid resolver configuration")?;
    info!(
        policy = %resolver.policy(),
        ranges = resolver.ranges().len(),
        "resolver ready"
    );
    Ok(resolver)
}
