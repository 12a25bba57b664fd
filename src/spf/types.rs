use std::fmt;

/// Verdict asserted by a matching directive.
///
/// `None` is the "nothing matched" sentinel returned by the engine; the
/// parser never produces it.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Qualifier {
    #[default]
    Pass,
    Fail,
    SoftFail,
    Neutral,
    None,
}

impl Qualifier {
    /// Maps a qualifier prefix symbol (`+ - ~ ?`) to its verdict.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Pass),
            '-' => Some(Self::Fail),
            '~' => Some(Self::SoftFail),
            '?' => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn symbol(self) -> Option<char> {
        match self {
            Self::Pass => Some('+'),
            Self::Fail => Some('-'),
            Self::SoftFail => Some('~'),
            Self::Neutral => Some('?'),
            Self::None => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::SoftFail => "softfail",
            Self::Neutral => "neutral",
            Self::None => "none",
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directive kind. `Redirect` is the only modifier the parser accepts.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mechanism {
    All,
    Ip4,
    Ip6,
    A,
    Mx,
    Ptr,
    Exists,
    Include,
    Redirect,
}

impl Mechanism {
    /// Case-insensitive lookup of an ordinary directive name.
    pub fn from_name(name: &str) -> Option<Self> {
        let mechanism = match name.to_ascii_lowercase().as_str() {
            "all" => Self::All,
            "ip4" => Self::Ip4,
            "ip6" => Self::Ip6,
            "a" => Self::A,
            "mx" => Self::Mx,
            "ptr" => Self::Ptr,
            "exists" => Self::Exists,
            "include" => Self::Include,
            _ => return None,
        };
        Some(mechanism)
    }

    pub fn from_modifier_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("redirect") {
            Some(Self::Redirect)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Ip4 => "ip4",
            Self::Ip6 => "ip6",
            Self::A => "a",
            Self::Mx => "mx",
            Self::Ptr => "ptr",
            Self::Exists => "exists",
            Self::Include => "include",
            Self::Redirect => "redirect",
        }
    }

    pub fn is_modifier(self) -> bool {
        matches!(self, Self::Redirect)
    }

    /// Whether matching this kind needs at least one DNS exchange.
    pub fn requires_lookup(self) -> bool {
        !matches!(self, Self::All | Self::Ip4 | Self::Ip6)
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directive {
    pub qualifier: Qualifier,
    pub mechanism: Mechanism,
    pub value: String,
}

impl Directive {
    pub fn new(qualifier: Qualifier, mechanism: Mechanism, value: impl Into<String>) -> Self {
        Self {
            qualifier,
            mechanism,
            value: value.into(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mechanism.is_modifier() {
            return write!(f, "{}={}", self.mechanism, self.value);
        }
        if let Some(symbol) = self.qualifier.symbol().filter(|s| *s != '+') {
            write!(f, "{symbol}")?;
        }
        write!(f, "{}", self.mechanism)?;
        if !self.value.is_empty() {
            write!(f, ":{}", self.value)?;
        }
        Ok(())
    }
}

/// Parsed SPF record: ordinary directives in textual order, modifiers last.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record(Vec<Directive>);

impl Record {
    pub(crate) fn from_parts(mut directives: Vec<Directive>, modifiers: Vec<Directive>) -> Self {
        directives.extend(modifiers);
        Self(directives)
    }

    pub fn directives(&self) -> &[Directive] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn redirect(&self) -> Option<&Directive> {
        self.0
            .iter()
            .find(|directive| directive.mechanism == Mechanism::Redirect)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(super::parser::SPF_VERSION)?;
        for directive in &self.0 {
            write!(f, " {directive}")?;
        }
        Ok(())
    }
}

/// One mail-exchange answer; only `exchange` takes part in matching.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}
