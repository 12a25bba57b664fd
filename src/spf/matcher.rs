//! Per-mechanism match predicates.
//!
//! Each function answers "does `ip` satisfy this directive value?" and
//! surfaces resolver failures unchanged instead of treating them as a miss.

use std::net::IpAddr;

use ipnetwork::IpNetwork;

use super::{SpfError, SpfLookup};

/// Token replaced by the candidate address in `exists` templates.
pub const IP_MACRO: &str = "%{i}";

/// Containment test of `ip` in `cidr`.
///
/// A bare address without `/prefix` is the single-host network. Malformed
/// text is an error, not a miss.
pub fn match_cidr(ip: IpAddr, cidr: &str) -> Result<bool, SpfError> {
    let network: IpNetwork = with_prefix(cidr.trim())
        .parse()
        .map_err(|err| SpfError::invalid_network(cidr, err))?;
    Ok(network.contains(canonical(ip)))
}

fn with_prefix(cidr: &str) -> String {
    if cidr.contains('/') {
        cidr.to_string()
    } else if cidr.contains(':') {
        format!("{cidr}/128")
    } else {
        format!("{cidr}/32")
    }
}

/// True when any address record of `domain` equals `ip`.
pub fn match_a<R>(resolver: &R, ip: IpAddr, domain: &str) -> Result<bool, SpfError>
where
    R: SpfLookup + ?Sized,
{
    let ip = canonical(ip);
    let answers = resolver.lookup_ip(domain)?;
    log_trace!(domain, answers = answers.len(), "address lookup");
    Ok(answers.into_iter().any(|answer| canonical(answer) == ip))
}

/// Runs the address test against the first exchange host of `domain`.
pub fn match_mx<R>(resolver: &R, ip: IpAddr, domain: &str) -> Result<bool, SpfError>
where
    R: SpfLookup + ?Sized,
{
    let exchanges = resolver.lookup_mx(domain)?;
    // Only the first answer is consulted.
    match exchanges.first() {
        Some(mx) => match_a(resolver, ip, &mx.exchange),
        None => Ok(false),
    }
}

/// True when a reverse lookup of `ip` returns exactly `domain`.
pub fn match_ptr<R>(resolver: &R, ip: IpAddr, domain: &str) -> Result<bool, SpfError>
where
    R: SpfLookup + ?Sized,
{
    let names = resolver.lookup_ptr(ip)?;
    Ok(names.iter().any(|name| name == domain))
}

/// Expands `%{i}` in `template` and reports whether the name resolves.
pub fn match_exists<R>(resolver: &R, ip: IpAddr, template: &str) -> Result<bool, SpfError>
where
    R: SpfLookup + ?Sized,
{
    let query = expand_ip_macro(template, ip);
    Ok(!resolver.lookup_ip(&query)?.is_empty())
}

pub fn expand_ip_macro(template: &str, ip: IpAddr) -> String {
    template.replace(IP_MACRO, &ip.to_string())
}

fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        IpAddr::V4(_) => ip,
    }
}
