use crate::chain::ForwardChain;
use crate::error::ConfigError;
use crate::ranges::PrivateRangeSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, trace};

static DEFAULT_RESOLVER: LazyLock<Resolver> = LazyLock::new(Resolver::default);

/// Direction in which a forwarded chain is walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanPolicy {
    /// Right to left. Every proxy appends the address it saw, so the entries
    /// closest to the server were written by our own infrastructure while the
    /// leftmost ones are whatever the client chose to send.
    #[default]
    Backward,
    /// Left to right, trusting the client-declared origin.
    Forward,
}

impl fmt::Display for ScanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanPolicy::Backward => f.write_str("backward"),
            ScanPolicy::Forward => f.write_str("forward"),
        }
    }
}

impl FromStr for ScanPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backward" => Ok(ScanPolicy::Backward),
            "forward" => Ok(ScanPolicy::Forward),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Picks the public client address out of an `X-Forwarded-For` value.
///
/// A resolver is immutable once built and can be shared freely between
/// threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolver {
    ranges: PrivateRangeSet,
    policy: ScanPolicy,
}

impl Resolver {
    pub fn new(ranges: PrivateRangeSet, policy: ScanPolicy) -> Self {
        Self { ranges, policy }
    }

    pub fn ranges(&self) -> &PrivateRangeSet {
        &self.ranges
    }

    pub fn policy(&self) -> ScanPolicy {
        self.policy
    }

    /// Returns the first entry, in policy order, that is a valid address
    /// outside every private range.
    pub fn resolve(&self, header: &str) -> Option<IpAddr> {
        let chain = ForwardChain::parse(header);
        let resolved = match self.policy {
            ScanPolicy::Backward => self.first_public(chain.tokens().rev()),
            ScanPolicy::Forward => self.first_public(chain.tokens()),
        };

        debug!(
            policy = %self.policy,
            hops = chain.len(),
            resolved = ?resolved,
            "resolved forwarded chain"
        );
        resolved
    }

    /// String form of [`Self::resolve`]: the canonical address, or an empty
    /// string when the chain holds no public entry.
    pub fn resolve_public_ip(&self, header: &str) -> String {
        self.resolve(header)
            .map(|ip| ip.to_string())
            .unwrap_or_default()
    }

    fn first_public<'a>(&self, mut tokens: impl Iterator<Item = &'a str>) -> Option<IpAddr> {
        tokens.find_map(|token| match IpAddr::from_str(token) {
            Ok(ip) if !self.ranges.is_private(ip) => Some(ip.to_canonical()),
            _ => {
                trace!(token, "skipping non-routable forwarded entry");
                None
            }
        })
    }
}

/// Resolves `header` with the built-in range table and backward scanning.
pub fn resolve_public_ip(header: &str) -> String {
    DEFAULT_RESOLVER.resolve_public_ip(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case("10.1.2.3, 206.27.34.1, 192.168.2.200", "206.27.34.1")]
    #[case("172.16.255.255, 10.4.0.0.1, 192.1.4.1, 202.0.0.4, 10.1.1.1", "202.0.0.4")]
    #[case("192.168.1.100,  172.16.1.4, 54.0.1.53, 10.1.4.3, 192.168.1.1", "54.0.1.53")]
    #[case("l27.0.0.2", "")]
    #[case(
        "169.123.23.3, 2001:0db8:85a3:0000:0000:8a2e:0370:7334, 192.168.1.1",
        "2001:db8:85a3::8a2e:370:7334"
    )]
    #[case("::", "")]
    #[case("", "")]
    #[case("fd00::, 2001:0db8:85a3:0000:0000:8a2e:0370:7334, 192.4.1.56", "192.4.1.56")]
    fn test_backward_scan(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(resolve_public_ip(header), expected);
    }

    #[rstest]
    #[case("10.1.2.3206.27.34.1 * * * 192.168.2.200", "")]
    #[case("172.16.255.999 10.4.0.0.1 192.1.4.1 202.0.0.4 10.1.1.1", "")]
    #[case("172.16.255.999 10.4.0.0.1 192.1.4.1, 202.0.0.4, 10.1.1.1", "202.0.0.4")]
    #[case("****", "")]
    #[case(",,,", "")]
    fn test_malformed_chains(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(resolve_public_ip(header), expected);
    }

    #[rstest]
    #[case("172.16.255.255, 10.4.0.0.1, 192.1.4.1, 202.0.0.4, 10.1.1.1", "192.1.4.1")]
    #[case("10.1.2.3, 206.27.34.1, 192.168.2.200", "206.27.34.1")]
    #[case(
        "fd00::, 2001:0db8:85a3:0000:0000:8a2e:0370:7334, 192.4.1.56",
        "2001:db8:85a3::8a2e:370:7334"
    )]
    #[case("", "")]
    fn test_forward_scan(#[case] header: &str, #[case] expected: &str) {
        let resolver = Resolver::new(PrivateRangeSet::default(), ScanPolicy::Forward);
        assert_eq!(resolver.resolve_public_ip(header), expected);
    }

    #[test]
    fn test_spoofed_leftmost_entry_is_ignored() {
        let header = "1.2.3.4, 203.0.113.9, 10.0.0.2";
        assert_eq!(resolve_public_ip(header), "203.0.113.9");

        let forward = Resolver::new(PrivateRangeSet::default(), ScanPolicy::Forward);
        assert_eq!(forward.resolve_public_ip(header), "1.2.3.4");
    }

    #[test]
    fn test_single_public_token() {
        assert_eq!(resolve_public_ip("8.8.8.8"), "8.8.8.8");
        assert_eq!(resolve_public_ip("2001:0DB8::0001"), "2001:db8::1");
    }

    #[test]
    fn test_ipv4_mapped_renders_as_ipv4() {
        assert_eq!(resolve_public_ip("::ffff:8.8.8.8"), "8.8.8.8");
        assert_eq!(resolve_public_ip("::ffff:192.168.0.1"), "");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let header = "169.123.23.3, 2001:0db8:85a3:0000:0000:8a2e:0370:7334, 192.168.1.1";
        assert_eq!(resolve_public_ip(header), resolve_public_ip(header));
    }

    #[test]
    fn test_typed_result_distinguishes_none_from_zero() {
        let resolver = Resolver::default();
        assert_eq!(resolver.resolve("0.0.0.0"), None);
        assert_eq!(resolver.resolve("0.0.0.1"), Some(IpAddr::from([0, 0, 0, 1])));
    }

    #[test]
    fn test_custom_ranges() {
        let ranges = PrivateRangeSet::parse(["203.0.113.0/24"]).unwrap();
        let resolver = Resolver::new(ranges, ScanPolicy::Backward);
        assert_eq!(resolver.resolve_public_ip("10.0.0.1, 203.0.113.5"), "10.0.0.1");
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("backward".parse::<ScanPolicy>().unwrap(), ScanPolicy::Backward);
        assert_eq!(" Forward ".parse::<ScanPolicy>().unwrap(), ScanPolicy::Forward);
        assert_matches!("sideways".parse::<ScanPolicy>(), Err(ConfigError::UnknownPolicy(_)));
        assert_eq!(ScanPolicy::default(), ScanPolicy::Backward);
        assert_eq!(ScanPolicy::Forward.to_string(), "forward");
    }
}
