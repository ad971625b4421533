/*! Compile an interface description into a binding model.
 *
 * An interface description only says which types travel over the wire, as strings. Generating
 * bindings from it is a small compiler backend: parse the type grammar, map every type to a Rust
 * representation, collapse identical tuple shapes into one struct each, give overloads distinct
 * names, and settle every naming conflict deterministically. The output is a `CompilationUnit`
 * the emitter can render without making any further decisions.
 */

mod context;
mod declaration_codegen;
mod loader;
pub mod naming;
pub mod signature;
mod struct_synthesizer;
mod type_resolver;

use serde::{Deserialize, Serialize};
use solbind_core::{CompilationUnit, Declaration, ModulePath, RepresentationMode, Reporter, Result};

use context::GenerationContext;
pub use loader::{load_interface, normalize_bytecode, InterfaceDescription};

/// Options that change what gets generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub representation: RepresentationMode,
    /// Generate both a call and a transaction method for every function.
    pub call_and_send: bool,
    /// Make the per-function calldata encoders public.
    pub abi_funcs: bool,
}

/// One contract to compile: its name, interface text, and where its bindings go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSource {
    pub name: String,
    /// Interface description as JSON text, either a bare array or an artifact object.
    pub interface: String,
    /// Explicit bytecode. Takes precedence over bytecode embedded in an artifact.
    pub bytecode: Option<String>,
    pub package: String,
}

pub fn compile_interface(
    source: &ContractSource,
    options: &GenerationOptions,
    reporter: &mut dyn Reporter,
) -> Result<CompilationUnit> {
    let module = ModulePath::parse(&source.package)?;
    let interface = load_interface(&source.interface)?;
    let bytecode = source
        .bytecode
        .as_deref()
        .and_then(normalize_bytecode)
        .or(interface.bytecode);

    compile_declarations(
        &source.name,
        module,
        &interface.declarations,
        bytecode,
        options,
        reporter,
    )
}

/// Compiles already loaded declarations. `bytecode` must be normalized.
pub fn compile_declarations(
    contract_name: &str,
    module: ModulePath,
    declarations: &[Declaration],
    bytecode: Option<String>,
    options: &GenerationOptions,
    reporter: &mut dyn Reporter,
) -> Result<CompilationUnit> {
    let span = tracing::debug_span!("compile", contract = contract_name);
    let _guard = span.enter();

    let mut ctx = GenerationContext::new(*options, reporter);

    let resolved = declaration_codegen::resolve_declarations(&mut ctx, declarations)?;
    ctx.check_precision()?;
    tracing::debug!(
        declarations = resolved.len(),
        shapes = ctx.struct_count(),
        "resolved declarations"
    );

    declaration_codegen::build_unit(&mut ctx, contract_name, module, &resolved, bytecode)
}
