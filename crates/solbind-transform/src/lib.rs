/*! Compile contract interface descriptions into binding models.
 *
 * The loader reads the JSON interface, the resolver maps its type strings onto Rust representations,
 * and the declaration codegen names every struct, method and record. Nothing here renders source
 * text; `solbind-emit` does that from the resulting `CompilationUnit`.
 */

pub mod abi_to_bindings;

pub use abi_to_bindings::{
    compile_declarations, compile_interface, load_interface, normalize_bytecode, ContractSource,
    GenerationOptions, InterfaceDescription,
};
