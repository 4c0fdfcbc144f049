use crate::error::ConfigError;
use ipnetwork::IpNetwork;
use std::net::IpAddr;
use std::str::FromStr;

/// Networks that are never routed on the public internet. These change
/// occasionally, especially on the IPv6 side.
pub const DEFAULT_RANGES: &[&str] = &[
    "10.0.0.0/8",     // 24-bit block
    "192.168.0.0/16", // 16-bit block
    "172.16.0.0/12",  // 20-bit block
    "169.254.0.0/16", // link local
    "127.0.0.0/8",    // loopback
    "fc00::/7",       // unique local
    "fe80::/10",      // link local
    "::1/128",        // loopback
    "100.64.0.0/10",  // shared address space, RFC 6598
];

/// Ordered, non-empty table of non-routable networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateRangeSet {
    ranges: Vec<IpNetwork>,
}

impl Default for PrivateRangeSet {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_RANGES
                .iter()
                .filter_map(|&cidr| IpNetwork::from_str(cidr).ok())
                .collect(),
        }
    }
}

impl PrivateRangeSet {
    pub fn new(ranges: Vec<IpNetwork>) -> Result<Self, ConfigError> {
        if ranges.is_empty() {
            return Err(ConfigError::EmptyRangeSet);
        }
        Ok(Self { ranges })
    }

    /// Builds a table from CIDR strings such as `"10.0.0.0/8"`. A bare
    /// address is accepted as a single-host range.
    pub fn parse<I, S>(cidrs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(parse_ranges(cidrs)?)
    }

    /// Appends `extra` after the existing ranges.
    pub fn with_ranges(mut self, extra: impl IntoIterator<Item = IpNetwork>) -> Self {
        self.ranges.extend(extra);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpNetwork> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether `ip` should be treated as non-routable.
    ///
    /// The unspecified address of either family counts as private. IPv4-mapped
    /// IPv6 addresses are checked against the IPv4 ranges. A range of the
    /// other family never contains the address.
    pub fn is_private(&self, ip: IpAddr) -> bool {
        let ip = ip.to_canonical();
        if ip.is_unspecified() {
            return true;
        }
        self.ranges.iter().any(|range| range.contains(ip))
    }

    /// Same as [`Self::is_private`] for a raw token. Anything that is not a
    /// strictly formatted address is private.
    pub fn is_private_token(&self, token: &str) -> bool {
        match IpAddr::from_str(token) {
            Ok(ip) => self.is_private(ip),
            Err(_) => true,
        }
    }
}

pub(crate) fn parse_ranges<I, S>(cidrs: I) -> Result<Vec<IpNetwork>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cidrs
        .into_iter()
        .map(|cidr| {
            let cidr = cidr.as_ref().trim();
            IpNetwork::from_str(cidr).map_err(|source| ConfigError::InvalidRange {
                cidr: cidr.to_string(),
                source,
            })
        })
        .collect()
}
