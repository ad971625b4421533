/*! Turn resolved declarations into bindings.
 *
 * Runs in two phases. Resolution walks the declarations in order, parses every type, interns tuple
 * shapes and drops exact duplicates. Binding then names everything: structs first (their names are
 * fixed before anything else claims a type name), then function methods, event records and filters,
 * error records, calldata encoders and the deploy helper. Each group claims names from a shared
 * scope, so later groups yield to earlier ones and the outcome depends only on declaration order.
 */

use super::context::GenerationContext;
use super::naming::{type_ident, value_ident, NameScope};
use super::signature::{event_topic, selector, signature};
use super::type_resolver::parse_syntax;
use indexmap::IndexMap;
use solbind_core::{
    BindgenError, BindingParam, CompilationUnit, Declaration, DeclarationKind, DeployHelper,
    Diagnostic, ErrorBinding, EventBinding, EventField, FieldSource, FunctionBinding, ModulePath,
    Parameter, ResolvedType, Result,
};
use std::collections::HashSet;

/// Type names the generated module imports or uses as generic parameters.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "Box", "Option", "P", "ParamType", "Result", "String", "Token", "Tokenize", "Vec",
];

/// Methods every contract handle defines.
const RESERVED_METHOD_NAMES: &[&str] = &["address", "at", "deploy", "raw_transaction"];

/// Topic slots available to indexed parameters, including the signature topic.
const MAX_TOPICS: usize = 4;

pub struct ResolvedDeclaration<'d> {
    pub declaration: &'d Declaration,
    pub origin: String,
    pub signature: String,
    pub inputs: Vec<ResolvedType>,
    pub outputs: Vec<ResolvedType>,
}

/// Resolves every declaration in order, skipping exact duplicates.
pub fn resolve_declarations<'d>(
    ctx: &mut GenerationContext<'_>,
    declarations: &'d [Declaration],
) -> Result<Vec<ResolvedDeclaration<'d>>> {
    let mut seen: HashSet<(DeclarationKind, String)> = HashSet::new();
    let mut resolved = Vec::with_capacity(declarations.len());

    for declaration in declarations {
        let origin = declaration.describe();
        let signature = signature(declaration.name_or_kind(), &declaration.inputs, &origin)?;

        let identity = if declaration.kind.is_named() {
            signature.clone()
        } else {
            String::new()
        };
        if !seen.insert((declaration.kind, identity)) {
            ctx.report(Diagnostic::duplicate_declaration(&origin, &signature));
            continue;
        }

        if declaration.kind == DeclarationKind::Event {
            check_indexed_count(declaration, &origin)?;
        }

        let inputs = ctx.resolve_all(&declaration.inputs, &origin)?;
        let outputs = if declaration.kind == DeclarationKind::Function {
            ctx.resolve_all(&declaration.outputs, &origin)?
        } else {
            Vec::new()
        };

        resolved.push(ResolvedDeclaration {
            declaration,
            origin,
            signature,
            inputs,
            outputs,
        });
    }

    Ok(resolved)
}

fn check_indexed_count(event: &Declaration, origin: &str) -> Result<()> {
    let indexed = event.inputs.iter().filter(|p| p.indexed).count();
    let limit = if event.anonymous {
        MAX_TOPICS
    } else {
        MAX_TOPICS - 1
    };
    if indexed > limit {
        return Err(BindgenError::malformed(format!(
            "{} has {} indexed parameters, at most {} are allowed",
            origin, indexed, limit
        )));
    }
    Ok(())
}

/// Builds the compilation unit for one contract from its resolved declarations.
pub fn build_unit(
    ctx: &mut GenerationContext<'_>,
    contract_name: &str,
    module: ModulePath,
    resolved: &[ResolvedDeclaration<'_>],
    bytecode: Option<String>,
) -> Result<CompilationUnit> {
    let file_stem = value_ident(contract_name, || "contract".to_string());

    let mut types = NameScope::with_reserved(RESERVED_TYPE_NAMES.iter().copied());
    let wanted = type_ident(contract_name, || "Contract".to_string());
    let type_name = types.claim_numbered(&wanted, "");
    if type_name != wanted {
        ctx.report(Diagnostic::contract_name_collision(
            contract_name,
            &wanted,
            &type_name,
        ));
    }

    let structs = ctx.finish_structs(&mut types, &type_name);
    tracing::debug!(count = structs.len(), "named tuple structs");

    let mut methods = NameScope::with_reserved(RESERVED_METHOD_NAMES.iter().copied());

    let mut functions = bind_functions(ctx, resolved, &mut methods)?;
    // Encoders follow the method the mutability asks for, not the alternates.
    let primaries: Vec<String> = functions
        .iter()
        .map(|function| {
            function
                .call
                .clone()
                .or_else(|| function.transaction.clone())
                .unwrap_or_else(|| function.abi_name.clone())
        })
        .collect();
    if ctx.options.call_and_send {
        add_alternate_methods(&mut functions, &mut methods);
    }

    let events = resolved
        .iter()
        .filter(|item| item.declaration.kind == DeclarationKind::Event)
        .map(|item| bind_event(ctx, item, &mut types, &mut methods))
        .collect::<Vec<_>>();

    let errors = resolved
        .iter()
        .filter(|item| item.declaration.kind == DeclarationKind::Error)
        .map(|item| bind_error(ctx, item, &mut types))
        .collect::<Vec<_>>();

    for (function, primary) in functions.iter_mut().zip(&primaries) {
        function.encoder = methods.claim_numbered(&format!("encode_{}", primary), "_");
    }

    let deploy = bytecode.map(|bytecode| bind_deploy(ctx, resolved, bytecode));

    let has_kind = |kind: DeclarationKind| resolved.iter().any(|item| item.declaration.kind == kind);

    Ok(CompilationUnit {
        contract_name: contract_name.to_string(),
        type_name,
        file_stem,
        module,
        representation: ctx.options.representation,
        structs,
        functions,
        events,
        errors,
        deploy,
        has_fallback: has_kind(DeclarationKind::Fallback),
        has_receive: has_kind(DeclarationKind::Receive),
        public_encoders: ctx.options.abi_funcs,
    })
}

fn bind_functions(
    ctx: &mut GenerationContext<'_>,
    resolved: &[ResolvedDeclaration<'_>],
    methods: &mut NameScope,
) -> Result<Vec<FunctionBinding>> {
    let mut groups: IndexMap<&str, Vec<&ResolvedDeclaration<'_>>> = IndexMap::new();
    for item in resolved {
        if item.declaration.kind == DeclarationKind::Function {
            groups
                .entry(item.declaration.name_or_kind())
                .or_default()
                .push(item);
        }
    }

    let mut bindings = Vec::new();
    for (name, overloads) in groups {
        let base = value_ident(name, || "function".to_string());
        for (index, item) in overloads.into_iter().enumerate() {
            let candidate = if index == 0 {
                base.clone()
            } else {
                format!("{}_with_{}", base, overload_suffix(item)?)
            };
            let method = methods.claim_numbered(&candidate, "_");
            bindings.push(bind_function(ctx, item, method));
        }
    }

    tracing::debug!(count = bindings.len(), "bound functions");
    Ok(bindings)
}

/// Distinguishing suffix for a later overload, built from its parameter types.
fn overload_suffix(item: &ResolvedDeclaration<'_>) -> Result<String> {
    let params = &item.declaration.inputs;
    if params.is_empty() {
        return Ok("no_args".to_string());
    }

    let parts = params
        .iter()
        .map(|param| {
            let syntax = parse_syntax(param, &item.origin)?;
            let mut part = if syntax.is_tuple() {
                "tuple".to_string()
            } else {
                syntax.base.to_string()
            };
            for dimension in &syntax.dimensions {
                match dimension {
                    Some(len) => part.push_str(&format!("_array{}", len)),
                    None => part.push_str("_array"),
                }
            }
            Ok(part)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("_"))
}

fn bind_function(
    ctx: &mut GenerationContext<'_>,
    item: &ResolvedDeclaration<'_>,
    method: String,
) -> FunctionBinding {
    let declaration = item.declaration;
    let mut args = NameScope::new();
    let inputs = bind_params(ctx, &item.origin, &declaration.inputs, &item.inputs, &mut args);
    let outputs = output_params(&declaration.outputs, &item.outputs);
    let value_param = declaration
        .state_mutability
        .is_payable()
        .then(|| args.claim_numbered("wei_value", "_"));

    let (call, transaction) = if declaration.state_mutability.is_read_only() {
        (Some(method), None)
    } else {
        (None, Some(method))
    };

    FunctionBinding {
        abi_name: declaration.name_or_kind().to_string(),
        selector: selector(&item.signature),
        signature: item.signature.clone(),
        encoder: String::new(),
        inputs,
        outputs,
        value_param,
        call,
        transaction,
    }
}

/// Adds the binding style a function's mutability did not ask for.
fn add_alternate_methods(functions: &mut [FunctionBinding], methods: &mut NameScope) {
    for function in functions {
        match (&function.call, &function.transaction) {
            (Some(call), None) => {
                let name = methods.claim_numbered(&format!("send_{}", call), "_");
                function.transaction = Some(name);
            }
            (None, Some(transaction)) => {
                let name = methods.claim_numbered(&format!("call_{}", transaction), "_");
                function.call = Some(name);
            }
            _ => {}
        }
    }
}

/// Names the parameters of one declaration, reporting renamed duplicates.
fn bind_params(
    ctx: &mut GenerationContext<'_>,
    origin: &str,
    params: &[Parameter],
    types: &[ResolvedType],
    scope: &mut NameScope,
) -> Vec<BindingParam> {
    params
        .iter()
        .zip(types)
        .enumerate()
        .map(|(position, (param, ty))| {
            let name = claim_param(ctx, origin, &param.name, position, scope);
            BindingParam::new(name, ty.clone())
        })
        .collect()
}

fn claim_param(
    ctx: &mut GenerationContext<'_>,
    origin: &str,
    raw: &str,
    position: usize,
    scope: &mut NameScope,
) -> String {
    let base = value_ident(raw, || format!("param{}", position));
    let (name, renamed) = scope.claim_positional(&base, position);
    if renamed {
        ctx.report(Diagnostic::duplicate_field(origin, &base, &name));
    }
    name
}

fn output_params(params: &[Parameter], types: &[ResolvedType]) -> Vec<BindingParam> {
    let mut scope = NameScope::new();
    params
        .iter()
        .zip(types)
        .enumerate()
        .map(|(position, (param, ty))| {
            let base = value_ident(&param.name, || format!("value{}", position));
            let (name, _) = scope.claim_positional(&base, position);
            BindingParam::new(name, ty.clone())
        })
        .collect()
}

fn record_name(abi_name: &str, suffix: &str, types: &mut NameScope) -> String {
    let mut name = type_ident(abi_name, || suffix.to_string());
    if !name.ends_with(suffix) {
        name.push_str(suffix);
    }
    types.claim_numbered(&name, "")
}

fn bind_event(
    ctx: &mut GenerationContext<'_>,
    item: &ResolvedDeclaration<'_>,
    types: &mut NameScope,
    methods: &mut NameScope,
) -> EventBinding {
    let declaration = item.declaration;
    let abi_name = declaration.name_or_kind().to_string();
    let record_name = record_name(&abi_name, "Event", types);
    let filter_base = format!("{}_events", value_ident(&abi_name, || "log".to_string()));
    let filter_method = methods.claim_numbered(&filter_base, "_");

    let mut scope = NameScope::new();
    let mut next_topic = if declaration.anonymous { 0 } else { 1 };
    let mut next_data = 0;

    let fields = declaration
        .inputs
        .iter()
        .zip(&item.inputs)
        .enumerate()
        .map(|(position, (param, ty))| {
            let name = claim_param(ctx, &item.origin, &param.name, position, &mut scope);
            if param.indexed {
                let source = FieldSource::Topic(next_topic);
                next_topic += 1;
                let ty = if ty.wire.is_hashed_in_topic() {
                    ResolvedType::topic_hash()
                } else {
                    ty.clone()
                };
                EventField { name, ty, source }
            } else {
                let source = FieldSource::Data(next_data);
                next_data += 1;
                EventField {
                    name,
                    ty: ty.clone(),
                    source,
                }
            }
        })
        .collect();

    EventBinding {
        abi_name,
        topic: event_topic(&item.signature),
        signature: item.signature.clone(),
        anonymous: declaration.anonymous,
        record_name,
        filter_method,
        fields,
    }
}

fn bind_error(
    ctx: &mut GenerationContext<'_>,
    item: &ResolvedDeclaration<'_>,
    types: &mut NameScope,
) -> ErrorBinding {
    let declaration = item.declaration;
    let abi_name = declaration.name_or_kind().to_string();
    let mut scope = NameScope::new();

    ErrorBinding {
        record_name: record_name(&abi_name, "Error", types),
        selector: selector(&item.signature),
        signature: item.signature.clone(),
        fields: bind_params(ctx, &item.origin, &declaration.inputs, &item.inputs, &mut scope),
        abi_name,
    }
}

fn bind_deploy(
    ctx: &mut GenerationContext<'_>,
    resolved: &[ResolvedDeclaration<'_>],
    bytecode: String,
) -> DeployHelper {
    let constructor = resolved
        .iter()
        .find(|item| item.declaration.kind == DeclarationKind::Constructor);

    let mut args = NameScope::new();
    let (signature, inputs, payable) = match constructor {
        Some(item) => (
            Some(item.signature.clone()),
            bind_params(ctx, &item.origin, &item.declaration.inputs, &item.inputs, &mut args),
            item.declaration.state_mutability.is_payable(),
        ),
        None => (None, Vec::new(), false),
    };

    DeployHelper {
        bytecode,
        signature,
        inputs,
        provider_param: args.claim_numbered("provider", "_"),
        value_param: payable.then(|| args.claim_numbered("wei_value", "_")),
    }
}
