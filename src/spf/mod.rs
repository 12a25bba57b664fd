//! SPF (RFC 7208) record parsing and sender authorization.
//!
//! [`parse_spf`] turns a `v=spf1` string into an ordered [`Record`];
//! [`validate_ip`] fetches a domain's record over DNS and evaluates it for a
//! candidate address, following `include`/`redirect` up to a depth budget.
//! Custom transports plug in through [`SpfLookup`] and [`validate_with`].

mod error;
mod eval;
mod matcher;
mod options;
mod parser;
mod resolver;
mod types;

pub use error::SpfError;
pub use eval::{
    evaluate, execute_directive, validate, validate_ip, validate_record_with, validate_with,
};
pub use matcher::{
    IP_MACRO, expand_ip_macro, match_a, match_cidr, match_exists, match_mx, match_ptr,
};
pub use options::{
    DEFAULT_ATTEMPTS, DEFAULT_MAX_DEPTH, DEFAULT_NAMESERVER, DEFAULT_TIMEOUT, ValidationOptions,
};
pub use parser::{is_spf, parse_spf};
pub use resolver::{DnsResolver, SpfLookup, first_address, lookup_spf, normalize_domain};
pub use types::{Directive, Mechanism, MxRecord, Qualifier, Record};
