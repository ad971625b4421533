use crate::types::{ResolvedType, StructId};
use serde::{Deserialize, Serialize};

/// A named struct generated for one distinct tuple shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDefinition {
    pub id: StructId,
    pub name: String,
    pub fields: Vec<StructField>,
    pub is_dynamic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    /// Identifier used in generated code.
    pub name: String,
    /// Component name as declared in the interface, possibly empty.
    pub abi_name: String,
    pub ty: ResolvedType,
}
