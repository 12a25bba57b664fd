use std::net::{IpAddr, SocketAddr};

use trust_dns_resolver::{
    Resolver,
    config::{LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    lookup::TxtLookup,
};

use super::{MxRecord, SpfError, ValidationOptions, is_spf};

/// DNS capabilities the evaluation engine needs.
///
/// Empty answers are returned as empty vectors; only genuine transport or
/// resolution failures surface as errors.
pub trait SpfLookup {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, SpfError>;
    fn lookup_ip(&self, name: &str) -> Result<Vec<IpAddr>, SpfError>;
    fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, SpfError>;
    fn lookup_ptr(&self, ip: IpAddr) -> Result<Vec<String>, SpfError>;
}

impl<R: SpfLookup + ?Sized> SpfLookup for &R {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, SpfError> {
        (**self).lookup_txt(name)
    }

    fn lookup_ip(&self, name: &str) -> Result<Vec<IpAddr>, SpfError> {
        (**self).lookup_ip(name)
    }

    fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, SpfError> {
        (**self).lookup_mx(name)
    }

    fn lookup_ptr(&self, ip: IpAddr) -> Result<Vec<String>, SpfError> {
        (**self).lookup_ptr(ip)
    }
}

/// Synchronous resolver bound to a single nameserver.
///
/// Answers are never cached: every lookup goes to the wire.
pub struct DnsResolver {
    inner: Resolver,
    nameserver: SocketAddr,
}

impl DnsResolver {
    pub fn new(nameserver: SocketAddr) -> Result<Self, SpfError> {
        Self::from_options(&ValidationOptions::new().with_nameserver(nameserver))
    }

    pub fn from_options(options: &ValidationOptions) -> Result<Self, SpfError> {
        let nameserver = options.nameserver();
        let group =
            NameServerConfigGroup::from_ips_clear(&[nameserver.ip()], nameserver.port(), true);
        let config = ResolverConfig::from_parts(None, Vec::new(), group);

        let mut opts = ResolverOpts::default();
        opts.timeout = options.timeout();
        opts.attempts = options.attempts();
        opts.cache_size = 0;
        opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

        let inner = Resolver::new(config, opts).map_err(SpfError::resolver_init)?;
        Ok(Self { inner, nameserver })
    }

    pub fn nameserver(&self) -> SocketAddr {
        self.nameserver
    }
}

impl SpfLookup for DnsResolver {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, SpfError> {
        let query = absolute(name);
        match self.inner.txt_lookup(query.as_str()) {
            Ok(lookup) => collect_txt_records(name, &lookup),
            Err(err) if should_treat_as_empty(&err) => Ok(Vec::new()),
            Err(err) => Err(SpfError::lookup(name, err)),
        }
    }

    fn lookup_ip(&self, name: &str) -> Result<Vec<IpAddr>, SpfError> {
        let query = absolute(name);
        match self.inner.lookup_ip(query.as_str()) {
            Ok(lookup) => Ok(lookup.iter().collect()),
            Err(err) if should_treat_as_empty(&err) => Ok(Vec::new()),
            Err(err) => Err(SpfError::lookup(name, err)),
        }
    }

    fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, SpfError> {
        let query = absolute(name);
        match self.inner.mx_lookup(query.as_str()) {
            Ok(lookup) => Ok(lookup
                .iter()
                .map(|mx| MxRecord::new(mx.preference(), relative(mx.exchange().to_utf8())))
                .collect()),
            Err(err) if should_treat_as_empty(&err) => Ok(Vec::new()),
            Err(err) => Err(SpfError::lookup(name, err)),
        }
    }

    fn lookup_ptr(&self, ip: IpAddr) -> Result<Vec<String>, SpfError> {
        match self.inner.reverse_lookup(ip) {
            Ok(lookup) => Ok(lookup.iter().map(|ptr| relative(ptr.to_utf8())).collect()),
            Err(err) if should_treat_as_empty(&err) => Ok(Vec::new()),
            Err(err) => Err(SpfError::lookup(ip.to_string(), err)),
        }
    }
}

/// Fetches the first TXT string at `domain` that carries the SPF marker.
pub fn lookup_spf<R>(resolver: &R, domain: &str) -> Result<String, SpfError>
where
    R: SpfLookup + ?Sized,
{
    let records = resolver.lookup_txt(domain)?;
    log_trace!(domain, answers = records.len(), "TXT lookup");
    records
        .into_iter()
        .find(|record| is_spf(record))
        .ok_or_else(|| SpfError::not_found(domain))
}

/// First resolved address of `domain`, if any.
pub fn first_address<R>(resolver: &R, domain: &str) -> Result<Option<IpAddr>, SpfError>
where
    R: SpfLookup + ?Sized,
{
    Ok(resolver.lookup_ip(domain)?.into_iter().next())
}

/// Trims, drops the root dot and IDNA-encodes `domain`.
pub fn normalize_domain(domain: &str) -> Result<String, SpfError> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(SpfError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(SpfError::idna)
}

fn absolute(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

fn relative(name: String) -> String {
    match name.strip_suffix('.') {
        Some(trimmed) => trimmed.to_string(),
        None => name,
    }
}

fn collect_txt_records(name: &str, lookup: &TxtLookup) -> Result<Vec<String>, SpfError> {
    let mut records = Vec::new();
    for txt in lookup.iter() {
        let mut record = String::new();
        for piece in txt.txt_data().iter() {
            let segment = std::str::from_utf8(piece.as_ref())
                .map_err(|err| SpfError::txt_data_utf8(name, err))?;
            record.push_str(segment);
        }
        records.push(record);
    }
    Ok(records)
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
