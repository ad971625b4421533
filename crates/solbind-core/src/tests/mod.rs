/*! Unit coverage for the core model.
 *
 * The transform and emit crates lean on small invariants here: array wrapping keeps dynamism right,
 * module paths reject names that cannot be Rust modules, and event bindings count their topics the
 * way logs actually carry them.
 */

mod declaration_tests;
mod diagnostics_tests;
