use super::{Directive, Mechanism, Qualifier, Record, SpfError};

pub(crate) const SPF_VERSION: &str = "v=spf1";

/// Simple and fast check for the `v=spf1` marker.
pub fn is_spf(text: &str) -> bool {
    text.starts_with(SPF_VERSION)
}

/// Parses a raw SPF string into an ordered [`Record`].
///
/// Ordinary directives keep their textual order; `redirect=` modifiers are
/// moved behind them regardless of where they appeared. Kind names are
/// matched case-insensitively.
pub fn parse_spf(text: &str) -> Result<Record, SpfError> {
    if !is_spf(text) {
        return Err(SpfError::NotSpf);
    }

    let mut directives = Vec::new();
    let mut modifiers = Vec::new();
    let mut state = ParseState::new();

    for chr in text[SPF_VERSION.len()..].chars() {
        match chr {
            '+' | '-' | '~' | '?' => {
                if state.is_blank() {
                    state.qualifier = Qualifier::from_symbol(chr)
                        .ok_or_else(|| SpfError::unsupported_qualifier(chr))?;
                } else {
                    state.push(chr);
                }
            }
            ':' | '=' => {
                if state.name.is_empty() {
                    return Err(SpfError::Syntax);
                }
                match state.target {
                    WriteTarget::Name => {
                        state.target = WriteTarget::Value;
                        state.modifier = chr == '=';
                    }
                    WriteTarget::Value => state.push(chr),
                }
            }
            ' ' | '\r' | '\n' => {
                if !state.ends_token() {
                    continue;
                }
                state.emit(&mut directives, &mut modifiers)?;
            }
            _ => state.push(chr),
        }
    }

    if !state.name.is_empty() {
        state.emit(&mut directives, &mut modifiers)?;
    }

    Ok(Record::from_parts(directives, modifiers))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteTarget {
    Name,
    Value,
}

/// Per-token scratch space, reset after every emitted token.
#[derive(Debug)]
struct ParseState {
    qualifier: Qualifier,
    name: String,
    value: String,
    target: WriteTarget,
    modifier: bool,
}

impl ParseState {
    fn new() -> Self {
        Self {
            qualifier: Qualifier::Pass,
            name: String::new(),
            value: String::new(),
            target: WriteTarget::Name,
            modifier: false,
        }
    }

    fn is_blank(&self) -> bool {
        self.name.is_empty() && self.value.is_empty()
    }

    fn push(&mut self, chr: char) {
        match self.target {
            WriteTarget::Name => self.name.push(chr),
            WriteTarget::Value => self.value.push(chr),
        }
    }

    /// Whitespace closes a token once it carries a value, or when it is a
    /// bare name such as `all` or `mx`. Leading blanks and blanks right
    /// after the separator are noise.
    fn ends_token(&self) -> bool {
        match self.target {
            WriteTarget::Name => !self.name.is_empty(),
            WriteTarget::Value => !self.value.is_empty(),
        }
    }

    fn emit(
        &mut self,
        directives: &mut Vec<Directive>,
        modifiers: &mut Vec<Directive>,
    ) -> Result<(), SpfError> {
        let state = std::mem::replace(self, Self::new());
        if state.modifier {
            modifiers.push(state.into_modifier()?);
        } else {
            directives.push(state.into_directive()?);
        }
        Ok(())
    }

    fn into_directive(self) -> Result<Directive, SpfError> {
        let mechanism =
            Mechanism::from_name(&self.name).ok_or_else(|| SpfError::unknown_mechanism(&self.name))?;
        Ok(Directive::new(self.qualifier, mechanism, self.value))
    }

    fn into_modifier(self) -> Result<Directive, SpfError> {
        let mechanism = Mechanism::from_modifier_name(&self.name)
            .ok_or_else(|| SpfError::unknown_modifier(&self.name))?;
        Ok(Directive::new(Qualifier::Pass, mechanism, self.value))
    }
}
