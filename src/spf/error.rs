use thiserror::Error;

/// Errors raised while parsing or evaluating SPF records.
#[derive(Debug, Error)]
pub enum SpfError {
    #[error("text is not an SPF record (missing \"v=spf1\")")]
    NotSpf,
    #[error("SPF record syntax error")]
    Syntax,
    #[error("unsupported qualifier '{qualifier}'")]
    UnsupportedQualifier { qualifier: char },
    #[error("unknown mechanism '{name}'")]
    UnknownMechanism { name: String },
    #[error("unknown modifier '{name}'")]
    UnknownModifier { name: String },
    #[error("no SPF record found for {domain}")]
    NotFound { domain: String },
    #[error("include/redirect depth budget exhausted")]
    OutOfRecursions,
    #[error("invalid network '{value}': {source}")]
    InvalidNetwork {
        value: String,
        #[source]
        source: ipnetwork::IpNetworkError,
    },
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("DNS lookup failed for {name}: {source}")]
    Lookup {
        name: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("TXT record {name} contains invalid UTF-8 data: {source}")]
    TxtDataUtf8 {
        name: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl SpfError {
    pub(crate) fn unsupported_qualifier(qualifier: char) -> Self {
        Self::UnsupportedQualifier { qualifier }
    }

    pub(crate) fn unknown_mechanism(name: impl Into<String>) -> Self {
        Self::UnknownMechanism { name: name.into() }
    }

    pub(crate) fn unknown_modifier(name: impl Into<String>) -> Self {
        Self::UnknownModifier { name: name.into() }
    }

    pub(crate) fn not_found(domain: impl Into<String>) -> Self {
        Self::NotFound {
            domain: domain.into(),
        }
    }

    pub(crate) fn invalid_network(
        value: impl Into<String>,
        source: ipnetwork::IpNetworkError,
    ) -> Self {
        Self::InvalidNetwork {
            value: value.into(),
            source,
        }
    }

    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn lookup(
        name: impl Into<String>,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        Self::Lookup {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn txt_data_utf8(name: impl Into<String>, source: std::str::Utf8Error) -> Self {
        Self::TxtDataUtf8 {
            name: name.into(),
            source,
        }
    }

    /// True for failures that originate below the engine (network, DNS
    /// answer decoding, malformed network literals) rather than in the
    /// record grammar or the depth guard.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::InvalidNetwork { .. }
                | Self::ResolverInit { .. }
                | Self::Lookup { .. }
                | Self::TxtDataUtf8 { .. }
        )
    }
}
