use anyhow::{Context, bail};
use serde::Serialize;
use source_ip::Resolver;
use std::io::{self, BufRead, IsTerminal, Write};
use std::net::IpAddr;

#[derive(Serialize)]
struct Resolution<'a> {
    header: &'a str,
    ip: Option<IpAddr>,
}

pub fn handle(resolver: &Resolver, headers: Vec<String>, json: bool) -> anyhow::Result<()> {
    let headers = if headers.is_empty() {
        read_stdin()?
    } else {
        headers
    };

    let mut out = io::stdout().lock();
    for header in &headers {
        writeln!(out, "{}", render(resolver, header, json)?)?;
    }
    Ok(())
}

/// One output line. Plain output leaves the line empty when nothing public
/// was found so that results stay aligned with their input lines.
fn render(resolver: &Resolver, header: &str, json: bool) -> anyhow::Result<String> {
    let ip = resolver.resolve(header);
    if json {
        serde_json::to_string(&Resolution { header, ip }).context("Failed to encode result")
    } else {
        Ok(ip.map(|ip| ip.to_string()).unwrap_or_default())
    }
}

fn read_stdin() -> anyhow::Result<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No X-Forwarded-For value given, pass them as arguments or one per line on stdin");
    }

    stdin
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read header values from stdin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use source_ip::{PrivateRangeSet, ScanPolicy};

    #[test]
    fn test_plain_output() {
        let resolver = Resolver::default();
        assert_eq!(
            render(&resolver, "10.1.2.3, 206.27.34.1, 192.168.2.200", false).unwrap(),
            "206.27.34.1"
        );
        assert_eq!(render(&resolver, "10.0.0.1", false).unwrap(), "");
    }

    #[test]
    fn test_json_output() {
        let resolver = Resolver::new(PrivateRangeSet::default(), ScanPolicy::Forward);
        assert_eq!(
            render(&resolver, "8.8.8.8, 1.1.1.1", true).unwrap(),
            r#"{"header":"8.8.8.8, 1.1.1.1","ip":"8.8.8.8"}"#
        );
        assert_eq!(
            render(&resolver, "", true).unwrap(),
            r#"{"header":"","ip":null}"#
        );
    }
}
