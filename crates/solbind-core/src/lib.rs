/*! Core model for contract binding generation.
 *
 * An interface description is a flat list of declarations whose types are plain strings. Generating
 * bindings needs more structure than that: resolved wire kinds, named structs for every tuple shape,
 * and per-overload bindings. This crate holds those types and the error taxonomy shared by the loader,
 * the resolver and the emitter.
 */

pub mod binding;
pub mod declaration;
pub mod diagnostics;
pub mod keywords;
pub mod structs;
pub mod types;
pub mod unit;

pub use binding::{
    BindingParam, DeployHelper, ErrorBinding, EventBinding, EventField, FieldSource,
    FunctionBinding,
};
pub use declaration::{Declaration, DeclarationKind, Parameter, StateMutability};
pub use diagnostics::{CollectingReporter, Diagnostic, DiagnosticKind, Reporter};
pub use keywords::is_keyword;
pub use structs::{StructDefinition, StructField};
pub use types::{Elementary, NativeInt, RepresentationMode, ResolvedType, RustType, StructId, WireKind};
pub use unit::{CompilationUnit, ModulePath};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindgenError {
    #[error("Malformed interface description: {0}")]
    MalformedInterface(String),

    #[error("Invalid type `{type_string}` in {context}: {reason}")]
    InvalidType {
        type_string: String,
        context: String,
        reason: String,
    },

    #[error(
        "Native representation cannot hold {} without precision loss; use precise mode",
        .affected.join(", ")
    )]
    UnsupportedPrecision { affected: Vec<String> },

    #[error("Invalid package `{package}`: {reason}")]
    InvalidPackage { package: String, reason: String },

    #[error("Failed to write bindings to {}: {source}", .path.display())]
    Emission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BindgenError {
    pub fn malformed(message: impl Into<String>) -> Self {
        BindgenError::MalformedInterface(message.into())
    }
}

pub type Result<T> = std::result::Result<T, BindgenError>;

#[cfg(test)]
mod tests;
