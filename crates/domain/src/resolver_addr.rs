use crate::errors::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::{Ipv6Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Normalized `host:port` address of an upstream resolver.
///
/// Normalization runs once, at parse time:
/// - `8.8.8.8` becomes `8.8.8.8:53`
/// - `2001:db8::1` becomes `[2001:db8::1]:53`
/// - `[2001:db8::1]` becomes `[2001:db8::1]:53`
/// - `dns.google` becomes `dns.google:53`
///
/// Addresses that already carry a port are kept verbatim once the port has
/// been validated. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolverAddr(Arc<str>);

impl ResolverAddr {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        normalize(raw.trim()).map(|s| Self(Arc::from(s)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Socket address when the host part is an IP literal, `None` for hostnames.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.0.parse::<SocketAddr>().ok()
    }

    pub fn port(&self) -> u16 {
        self.0
            .rsplit_once(':')
            .and_then(|(_, p)| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_DNS_PORT)
    }
}

fn normalize(s: &str) -> Result<String, DomainError> {
    if s.is_empty() {
        return Err(DomainError::InvalidResolverAddress(
            "empty address".to_string(),
        ));
    }
    if s.contains(char::is_whitespace) || s.contains(',') {
        return Err(DomainError::InvalidResolverAddress(format!(
            "'{}' contains whitespace or a separator",
            s
        )));
    }

    if s.parse::<Ipv6Addr>().is_ok() {
        return Ok(format!("[{}]:{}", s, DEFAULT_DNS_PORT));
    }

    if let Some(rest) = s.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(|| {
            DomainError::InvalidResolverAddress(format!("unterminated '[' in '{}'", s))
        })?;
        host.parse::<Ipv6Addr>().map_err(|e| {
            DomainError::InvalidResolverAddress(format!("invalid IPv6 literal '{}': {}", host, e))
        })?;
        return match tail {
            "" => Ok(format!("[{}]:{}", host, DEFAULT_DNS_PORT)),
            _ => {
                let port = tail.strip_prefix(':').ok_or_else(|| {
                    DomainError::InvalidResolverAddress(format!(
                        "unexpected '{}' after ']' in '{}'",
                        tail, s
                    ))
                })?;
                validate_port(port, s)?;
                Ok(s.to_string())
            }
        };
    }

    match s.matches(':').count() {
        0 => Ok(format!("{}:{}", s, DEFAULT_DNS_PORT)),
        1 => {
            let (host, port) = s.split_once(':').unwrap_or((s, ""));
            if host.is_empty() {
                return Err(DomainError::InvalidResolverAddress(format!(
                    "missing host in '{}'",
                    s
                )));
            }
            validate_port(port, s)?;
            Ok(s.to_string())
        }
        _ => Err(DomainError::InvalidResolverAddress(format!(
            "'{}' is neither host:port nor an IPv6 literal",
            s
        ))),
    }
}

fn validate_port(port: &str, whole: &str) -> Result<u16, DomainError> {
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(DomainError::InvalidResolverAddress(format!(
            "invalid port '{}' in '{}'",
            port, whole
        ))),
        Ok(p) => Ok(p),
    }
}

impl fmt::Display for ResolverAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResolverAddr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ResolverAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResolverAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Upstream list after normalization, with the entries that failed to parse.
#[derive(Debug, Clone, Default)]
pub struct ParsedUpstreams {
    pub resolvers: Vec<ResolverAddr>,
    pub rejected: Vec<(String, DomainError)>,
    pub duplicates: Vec<ResolverAddr>,
}

/// Parses upstream entries, each of which may itself be a comma-separated list.
///
/// Blank items are skipped, duplicates keep their first position.
pub fn parse_upstream_list<S: AsRef<str>>(entries: &[S]) -> ParsedUpstreams {
    let mut parsed = ParsedUpstreams::default();

    for item in entries
        .iter()
        .flat_map(|entry| entry.as_ref().split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
    {
        match ResolverAddr::parse(item) {
            Ok(addr) if parsed.resolvers.contains(&addr) => parsed.duplicates.push(addr),
            Ok(addr) => parsed.resolvers.push(addr),
            Err(e) => parsed.rejected.push((item.to_string(), e)),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_of_ipv6() {
        let addr = ResolverAddr::parse("[::1]:5353").unwrap();
        assert_eq!(addr.port(), 5353);
    }

    #[test]
    fn test_hostname_has_no_socket_addr() {
        let addr = ResolverAddr::parse("dns.google").unwrap();
        assert!(addr.socket_addr().is_none());
        assert_eq!(addr.port(), 53);
    }
}
