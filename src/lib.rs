#![forbid(unsafe_code)]
//! spfcheck_lib — SPF record parsing and sender IP authorization

#[cfg(feature = "with-tracing")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}
#[cfg(not(feature = "with-tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "with-tracing")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}
#[cfg(not(feature = "with-tracing"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "with-tracing")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}
#[cfg(not(feature = "with-tracing"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod spf;
pub use spf::{
    Directive, DnsResolver, Mechanism, MxRecord, Qualifier, Record, SpfError, SpfLookup,
    ValidationOptions, is_spf, lookup_spf, parse_spf, validate, validate_ip, validate_record_with,
    validate_with,
};
