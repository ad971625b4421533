use crate::types::ResolvedType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingParam {
    pub name: String,
    pub ty: ResolvedType,
}

impl BindingParam {
    pub fn new(name: impl Into<String>, ty: ResolvedType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Bindings generated for one function overload.
///
/// `call` and `transaction` hold the generated method names; at least one of them is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionBinding {
    pub abi_name: String,
    pub signature: String,
    pub selector: [u8; 4],
    pub encoder: String,
    pub inputs: Vec<BindingParam>,
    pub outputs: Vec<BindingParam>,
    /// Name of the extra wei argument, present only for payable functions.
    pub value_param: Option<String>,
    pub call: Option<String>,
    pub transaction: Option<String>,
}

impl FunctionBinding {
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.call
            .as_deref()
            .into_iter()
            .chain(self.transaction.as_deref())
    }
}

/// Where a decoded event field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSource {
    /// Absolute index into the log's topic list.
    Topic(usize),
    /// Position among the non-indexed values ABI-decoded from the log data.
    Data(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventField {
    pub name: String,
    pub ty: ResolvedType,
    pub source: FieldSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBinding {
    pub abi_name: String,
    pub signature: String,
    pub topic: [u8; 32],
    pub anonymous: bool,
    pub record_name: String,
    pub filter_method: String,
    pub fields: Vec<EventField>,
}

impl EventBinding {
    /// Number of topics a matching log carries.
    pub fn topic_count(&self) -> usize {
        let indexed = self
            .fields
            .iter()
            .filter(|f| matches!(f.source, FieldSource::Topic(_)))
            .count();
        if self.anonymous {
            indexed
        } else {
            indexed + 1
        }
    }

    pub fn data_fields(&self) -> impl Iterator<Item = &EventField> {
        self.fields
            .iter()
            .filter(|f| matches!(f.source, FieldSource::Data(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBinding {
    pub abi_name: String,
    pub signature: String,
    pub selector: [u8; 4],
    pub record_name: String,
    pub fields: Vec<BindingParam>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployHelper {
    pub bytecode: String,
    pub signature: Option<String>,
    pub inputs: Vec<BindingParam>,
    pub provider_param: String,
    pub value_param: Option<String>,
}
