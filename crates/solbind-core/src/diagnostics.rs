use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    NameCollision,
    DuplicateField,
    DuplicateDeclaration,
}

/// A non-fatal event raised during generation. Generation always continues after one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    /// A tuple struct could not take its preferred name. `holder` says what already has it.
    pub fn name_collision(taken: &str, holder: &str, renamed: &str, origin: &str) -> Self {
        Self {
            kind: DiagnosticKind::NameCollision,
            message: format!(
                "Struct name collision: `{}` already names {}, tuple from {} generated as `{}`",
                taken, holder, origin, renamed
            ),
        }
    }

    pub fn contract_name_collision(contract: &str, taken: &str, renamed: &str) -> Self {
        Self {
            kind: DiagnosticKind::NameCollision,
            message: format!(
                "Contract name collision: `{}` is already used by the generated module, \
                 contract `{}` generated as `{}`",
                taken, contract, renamed
            ),
        }
    }

    pub fn duplicate_field(owner: &str, field: &str, renamed: &str) -> Self {
        Self {
            kind: DiagnosticKind::DuplicateField,
            message: format!(
                "Duplicate field(s) found in {}: `{}` renamed to `{}`",
                owner, field, renamed
            ),
        }
    }

    pub fn duplicate_declaration(description: &str, signature: &str) -> Self {
        Self {
            kind: DiagnosticKind::DuplicateDeclaration,
            message: format!(
                "Duplicate declaration {} with signature `{}` ignored",
                description, signature
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for non-fatal diagnostics.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<F: FnMut(Diagnostic)> Reporter for F {
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
