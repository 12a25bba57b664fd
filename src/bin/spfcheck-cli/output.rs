use std::net::IpAddr;

use spfcheck_lib::{Qualifier, Record, SpfError};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct CheckSummary {
    pub ip: String,
    pub domain: String,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub result: Option<Qualifier>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl CheckSummary {
    pub fn new(ip: IpAddr, domain: &str, outcome: Result<Qualifier, SpfError>) -> Self {
        let (result, error) = match outcome {
            Ok(qualifier) => (Some(qualifier), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            ip: ip.to_string(),
            domain: domain.to_string(),
            result,
            error,
        }
    }

    pub fn invalid_input(line: &str, reason: impl Into<String>) -> Self {
        Self {
            ip: String::new(),
            domain: line.to_string(),
            result: None,
            error: Some(reason.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_pass(&self) -> bool {
        self.result == Some(Qualifier::Pass)
    }

    pub fn human_line(&self) -> String {
        match (&self.result, &self.error) {
            (Some(qualifier), _) => format!("[{}] {} {}", qualifier, self.ip, self.domain),
            (None, Some(error)) => format!("[error] {} {} :: {}", self.ip, self.domain, error),
            (None, None) => format!("[unknown] {} {}", self.ip, self.domain),
        }
    }
}

pub fn human_record(record: &Record) -> Vec<String> {
    record
        .iter()
        .map(|directive| {
            let value = if directive.value.is_empty() {
                "-"
            } else {
                directive.value.as_str()
            };
            format!(
                "{:<8} {:<8} {}",
                directive.qualifier, directive.mechanism, value
            )
        })
        .collect()
}
