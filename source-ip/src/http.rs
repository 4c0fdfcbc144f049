use crate::resolver::Resolver;
use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};
use tracing::debug;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

impl Resolver {
    /// Resolves every `X-Forwarded-For` line of `headers`, joined in the order
    /// they were received. Values that are not visible ASCII are ignored.
    pub fn resolve_headers(&self, headers: &HeaderMap) -> Option<IpAddr> {
        let chain = headers
            .get_all(X_FORWARDED_FOR)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");

        self.resolve(&chain)
    }

    /// The public client address, falling back to the transport peer when the
    /// forwarded chain has nothing usable.
    pub fn client_ip(&self, headers: &HeaderMap, peer: SocketAddr) -> IpAddr {
        match self.resolve_headers(headers) {
            Some(ip) => ip,
            None => {
                debug!(peer = %peer, "no public forwarded address, using peer");
                peer.ip()
            }
        }
    }
}
