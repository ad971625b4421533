/*! Render binding models as Rust source.
 *
 * A `CompilationUnit` already carries every name and resolved type, so emission is a straight walk:
 * header, tuple structs, event and error records, the contract handle, then the calldata encoders.
 * `write_unit` puts the result on disk in one step, so a failed run never leaves half a file behind.
 */

pub mod config;
pub mod emitter;
pub mod output;
pub mod rust_emitter;

pub use config::{EmitterConfig, IndentStyle, DEFAULT_RUNTIME_CRATE};
pub use emitter::{EmitContext, EmitHelper, EmitResult, Emitter};
pub use output::write_unit;
pub use rust_emitter::{RustEmitter, GENERATOR_VERSION};
