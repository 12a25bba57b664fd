use std::net::{IpAddr, SocketAddr};

use super::{
    Directive, DnsResolver, Mechanism, Qualifier, Record, SpfError, SpfLookup, ValidationOptions,
    lookup_spf,
    matcher::{match_a, match_cidr, match_exists, match_mx, match_ptr},
    normalize_domain, parse_spf,
};

/// Returns the qualifier `domain` publishes for `ip`, asking `nameserver`.
///
/// `max_depth` bounds nested `include`/`redirect` expansions; a negative
/// value removes the bound. [`Qualifier::None`] means no directive matched.
pub fn validate(
    ip: IpAddr,
    domain: &str,
    nameserver: SocketAddr,
    max_depth: i32,
) -> Result<Qualifier, SpfError> {
    let options = ValidationOptions::new()
        .with_nameserver(nameserver)
        .with_max_depth(max_depth);
    validate_ip(ip, domain, &options)
}

pub fn validate_ip(
    ip: IpAddr,
    domain: &str,
    options: &ValidationOptions,
) -> Result<Qualifier, SpfError> {
    let ascii = normalize_domain(domain)?;
    let resolver = DnsResolver::from_options(options)?;
    validate_with(&resolver, ip, &ascii, options.max_depth())
}

/// Fetches, parses and evaluates the SPF record of `domain` through
/// `resolver`.
pub fn validate_with<R>(
    resolver: &R,
    ip: IpAddr,
    domain: &str,
    max_depth: i32,
) -> Result<Qualifier, SpfError>
where
    R: SpfLookup + ?Sized,
{
    let text = lookup_spf(resolver, domain)?;
    log_debug!(domain, record = %text, "fetched SPF record");
    validate_record_with(resolver, ip, domain, &text, max_depth)
}

/// Evaluates an already fetched record text published by `domain`.
pub fn validate_record_with<R>(
    resolver: &R,
    ip: IpAddr,
    domain: &str,
    text: &str,
    max_depth: i32,
) -> Result<Qualifier, SpfError>
where
    R: SpfLookup + ?Sized,
{
    let record = parse_spf(text)?;
    evaluate(resolver, ip, domain, &record, max_depth)
}

/// Walks `record` left to right and stops at the first directive that
/// yields something other than [`Qualifier::None`].
///
/// `domain` is the name that published `record`; bare `a`, `mx` and `ptr`
/// directives match against it.
pub fn evaluate<R>(
    resolver: &R,
    ip: IpAddr,
    domain: &str,
    record: &Record,
    depth: i32,
) -> Result<Qualifier, SpfError>
where
    R: SpfLookup + ?Sized,
{
    for directive in record {
        let qualifier = execute_directive(resolver, ip, domain, directive, depth)?;
        log_debug!(%directive, %ip, result = %qualifier, "directive evaluated");
        if !qualifier.is_none() {
            return Ok(qualifier);
        }
    }
    Ok(Qualifier::None)
}

/// Evaluates a single directive: its qualifier when it matches `ip`,
/// [`Qualifier::None`] otherwise.
pub fn execute_directive<R>(
    resolver: &R,
    ip: IpAddr,
    domain: &str,
    directive: &Directive,
    depth: i32,
) -> Result<Qualifier, SpfError>
where
    R: SpfLookup + ?Sized,
{
    let value = directive.value.as_str();
    let target = if value.is_empty() { domain } else { value };
    let matched = match directive.mechanism {
        Mechanism::All => true,
        Mechanism::Ip4 | Mechanism::Ip6 => match_cidr(ip, value)?,
        Mechanism::A => match_a(resolver, ip, target)?,
        Mechanism::Mx => match_mx(resolver, ip, target)?,
        Mechanism::Ptr => match_ptr(resolver, ip, target)?,
        Mechanism::Exists => match_exists(resolver, ip, value)?,
        Mechanism::Include | Mechanism::Redirect => {
            return execute_nested(resolver, ip, directive, depth);
        }
    };

    if matched {
        Ok(directive.qualifier)
    } else {
        Ok(Qualifier::None)
    }
}

// include and redirect share this path; a redirect always carries Pass.
fn execute_nested<R>(
    resolver: &R,
    ip: IpAddr,
    directive: &Directive,
    depth: i32,
) -> Result<Qualifier, SpfError>
where
    R: SpfLookup + ?Sized,
{
    if depth == 0 {
        log_warn!(target_domain = %directive.value, "depth budget exhausted");
        return Err(SpfError::OutOfRecursions);
    }

    let text = lookup_spf(resolver, &directive.value)?;
    log_debug!(target_domain = %directive.value, record = %text, depth, "entering nested record");
    let nested = parse_spf(&text)?;
    let inner = evaluate(
        resolver,
        ip,
        &directive.value,
        &nested,
        depth.saturating_sub(1),
    )?;

    // A nested non-pass verdict stands; only a nested pass takes the
    // qualifier written on the include itself.
    let qualifier = match inner {
        Qualifier::Pass => directive.qualifier,
        inner => inner,
    };
    Ok(qualifier)
}
