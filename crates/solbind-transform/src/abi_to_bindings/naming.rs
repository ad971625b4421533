use heck::{ToSnakeCase, ToUpperCamelCase};
use solbind_core::is_keyword;
use std::collections::HashSet;

fn escape(mut name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if is_keyword(&name) {
        name.push('_');
    }
    name
}

/// Identifier for a method, field or argument: snake_case, never a keyword.
pub fn value_ident(raw: &str, fallback: impl FnOnce() -> String) -> String {
    let snake = raw.to_snake_case();
    if snake.is_empty() {
        return fallback();
    }
    escape(snake)
}

/// Identifier for a type. Names that are already valid UpperCamel identifiers are kept as declared.
pub fn type_ident(raw: &str, fallback: impl FnOnce() -> String) -> String {
    let name = if is_type_like(raw) {
        raw.to_string()
    } else {
        raw.to_upper_camel_case()
    };
    if name.is_empty() {
        return fallback();
    }
    escape(name)
}

fn is_type_like(raw: &str) -> bool {
    raw.starts_with(|c: char| c.is_ascii_uppercase())
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Set of identifiers already in use within one namespace.
#[derive(Debug, Clone, Default)]
pub struct NameScope {
    taken: HashSet<String>,
}

impl NameScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reserved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Takes `name` if free. Returns whether it was.
    pub fn try_claim(&mut self, name: &str) -> bool {
        self.taken.insert(name.to_string())
    }

    /// Claims `base`, or `{base}{separator}{k}` for the first free `k` starting at 2.
    pub fn claim_numbered(&mut self, base: &str, separator: &str) -> String {
        if self.try_claim(base) {
            return base.to_string();
        }
        let mut k = 2usize;
        loop {
            let candidate = format!("{}{}{}", base, separator, k);
            if self.try_claim(&candidate) {
                return candidate;
            }
            k += 1;
        }
    }

    /// Claims `base`, falling back to `{base}_{position}` and then to numbered variants of that.
    ///
    /// The flag is true when the returned name differs from `base`.
    pub fn claim_positional(&mut self, base: &str, position: usize) -> (String, bool) {
        if self.try_claim(base) {
            return (base.to_string(), false);
        }
        let positional = format!("{}_{}", base, position);
        (self.claim_numbered(&positional, "_"), true)
    }
}
