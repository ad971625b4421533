/*! Read interface descriptions from JSON.
 *
 * Two layouts are accepted: a bare array of declarations, and a compiler artifact object carrying the
 * array under `abi` next to optional bytecode (`bytecode` as a string or `{ "object": .. }`, or
 * `evm.bytecode.object`). The JSON is first read into loose raw records so that missing or unknown
 * fields produce messages naming the offending entry instead of serde's positional errors.
 */

use serde::Deserialize;
use serde_json::Value;
use solbind_core::{
    BindgenError, Declaration, DeclarationKind, Parameter, Result, StateMutability,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescription {
    pub declarations: Vec<Declaration>,
    /// Bytecode embedded in an artifact, normalized to `0x`-prefixed hex.
    pub bytecode: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeclaration {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<RawParameter>,
    #[serde(default)]
    outputs: Vec<RawParameter>,
    #[serde(default)]
    state_mutability: Option<String>,
    #[serde(default)]
    constant: Option<bool>,
    #[serde(default)]
    payable: Option<bool>,
    #[serde(default)]
    anonymous: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameter {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    internal_type: Option<String>,
    #[serde(default)]
    components: Vec<RawParameter>,
    #[serde(default)]
    indexed: bool,
}

pub fn load_interface(text: &str) -> Result<InterfaceDescription> {
    let root: Value = serde_json::from_str(text)
        .map_err(|e| BindgenError::malformed(format!("invalid JSON: {}", e)))?;

    let (entries, bytecode) = match root {
        Value::Array(entries) => (entries, None),
        Value::Object(mut artifact) => {
            let bytecode = artifact_bytecode(&artifact);
            match artifact.remove("abi") {
                Some(Value::Array(entries)) => (entries, bytecode),
                Some(_) => {
                    return Err(BindgenError::malformed("artifact field `abi` must be an array"))
                }
                None => {
                    return Err(BindgenError::malformed(
                        "expected an array of declarations or an artifact object with an `abi` field",
                    ))
                }
            }
        }
        _ => {
            return Err(BindgenError::malformed(
                "expected an array of declarations or an artifact object with an `abi` field",
            ))
        }
    };

    let declarations = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| convert_declaration(index, entry))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = declarations.len(), "loaded interface declarations");

    Ok(InterfaceDescription {
        declarations,
        bytecode,
    })
}

fn artifact_bytecode(artifact: &serde_json::Map<String, Value>) -> Option<String> {
    let raw = match artifact.get("bytecode") {
        Some(Value::String(hex)) => Some(hex.as_str()),
        Some(Value::Object(object)) => object.get("object").and_then(Value::as_str),
        _ => None,
    };
    let raw = raw.or_else(|| {
        artifact
            .get("evm")?
            .get("bytecode")?
            .get("object")?
            .as_str()
    });
    raw.and_then(normalize_bytecode)
}

/// Trims whitespace and ensures a `0x` prefix. Empty input means no bytecode.
pub fn normalize_bytecode(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if hex.is_empty() {
        None
    } else {
        Some(format!("0x{}", hex))
    }
}

fn convert_declaration(index: usize, entry: Value) -> Result<Declaration> {
    let raw: RawDeclaration = serde_json::from_value(entry)
        .map_err(|e| BindgenError::malformed(format!("entry {}: {}", index, e)))?;

    let kind_name = raw.kind.ok_or_else(|| {
        BindgenError::malformed(format!("entry {} is missing the `type` field", index))
    })?;
    let kind = DeclarationKind::from_abi(&kind_name).ok_or_else(|| {
        BindgenError::malformed(format!(
            "entry {} has unknown declaration type `{}`",
            index, kind_name
        ))
    })?;

    let name = raw.name.filter(|name| !name.is_empty());
    if kind.is_named() && name.is_none() {
        return Err(BindgenError::malformed(format!(
            "entry {}: {} declaration without a name",
            index, kind
        )));
    }

    let state_mutability = match raw.state_mutability.as_deref() {
        Some(value) => StateMutability::from_abi(value).ok_or_else(|| {
            BindgenError::malformed(format!(
                "entry {}: unknown stateMutability `{}`",
                index, value
            ))
        })?,
        None if raw.payable == Some(true) => StateMutability::Payable,
        None if raw.constant == Some(true) => StateMutability::View,
        None => StateMutability::NonPayable,
    };

    let mut declaration = Declaration::new(kind, name);
    declaration.state_mutability = state_mutability;
    declaration.anonymous = raw.anonymous;
    declaration.inputs = convert_parameters(index, raw.inputs)?;
    declaration.outputs = convert_parameters(index, raw.outputs)?;
    Ok(declaration)
}

fn convert_parameters(index: usize, raw: Vec<RawParameter>) -> Result<Vec<Parameter>> {
    raw.into_iter()
        .enumerate()
        .map(|(position, param)| convert_parameter(index, position, param))
        .collect()
}

fn convert_parameter(index: usize, position: usize, raw: RawParameter) -> Result<Parameter> {
    let type_string = raw.kind.ok_or_else(|| {
        BindgenError::malformed(format!(
            "entry {}: parameter {} is missing the `type` field",
            index, position
        ))
    })?;

    Ok(Parameter {
        name: raw.name.unwrap_or_default(),
        type_string,
        internal_type: raw.internal_type,
        components: convert_parameters(index, raw.components)?,
        indexed: raw.indexed,
    })
}
