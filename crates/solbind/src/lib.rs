/*! Unified interface for contract binding generation.
 *
 * Single import for the whole pipeline: load an interface description, compile it into a binding
 * model, render Rust source and write it where the package says it belongs. `generate_bindings`
 * does all of it in one call; the member crates stay available for callers that need one stage.
 */

pub use solbind_core as core;
pub use solbind_emit as emit;
pub use solbind_parser as parser;
pub use solbind_transform as transform;

pub use solbind_core::{
    BindgenError, CollectingReporter, CompilationUnit, Diagnostic, DiagnosticKind,
    RepresentationMode, Reporter,
};
pub use solbind_emit::{write_unit, Emitter, EmitterConfig, RustEmitter};
pub use solbind_transform::{compile_interface, ContractSource, GenerationOptions};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Renders a compiled unit to Rust source without touching the filesystem.
pub fn render(unit: &CompilationUnit, config: &EmitterConfig) -> Result<String> {
    RustEmitter::new(config.clone())
        .emit_to_string(unit)
        .with_context(|| format!("Failed to render bindings for `{}`", unit.contract_name))
}

/// Compiles `source`, renders it and writes the file under `out_dir`.
///
/// Nothing is written unless every earlier stage succeeded. Returns the path of the written file.
pub fn generate_bindings(
    source: &ContractSource,
    options: &GenerationOptions,
    config: &EmitterConfig,
    out_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<PathBuf> {
    let unit = compile_interface(source, options, reporter)?;
    let text = render(&unit, config)?;
    let path = write_unit(&unit, &text, out_dir)?;
    tracing::info!(contract = %source.name, path = %path.display(), "generated bindings");
    Ok(path)
}
