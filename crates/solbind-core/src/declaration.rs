use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Function,
    Constructor,
    Event,
    Fallback,
    Receive,
    Error,
}

impl DeclarationKind {
    pub fn from_abi(kind: &str) -> Option<Self> {
        match kind {
            "function" => Some(Self::Function),
            "constructor" => Some(Self::Constructor),
            "event" => Some(Self::Event),
            "fallback" => Some(Self::Fallback),
            "receive" => Some(Self::Receive),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Self::Function | Self::Event | Self::Error)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Function => "function",
            Self::Constructor => "constructor",
            Self::Event => "event",
            Self::Fallback => "fallback",
            Self::Receive => "receive",
            Self::Error => "error",
        };
        f.write_str(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    NonPayable,
    Payable,
}

impl StateMutability {
    pub fn from_abi(mutability: &str) -> Option<Self> {
        match mutability {
            "pure" => Some(Self::Pure),
            "view" => Some(Self::View),
            "nonpayable" => Some(Self::NonPayable),
            "payable" => Some(Self::Payable),
            _ => None,
        }
    }

    /// Read-only functions are bound as calls, everything else as transactions.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Pure | Self::View)
    }

    pub fn is_payable(&self) -> bool {
        matches!(self, Self::Payable)
    }
}

/// One input, output or tuple component of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub type_string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Parameter>,
    #[serde(default)]
    pub indexed: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_string: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_string: type_string.into(),
            internal_type: None,
            components: Vec::new(),
            indexed: false,
        }
    }

    pub fn tuple(
        name: impl Into<String>,
        type_string: impl Into<String>,
        components: Vec<Parameter>,
    ) -> Self {
        Self {
            components,
            ..Self::new(name, type_string)
        }
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub fn with_internal_type(mut self, internal_type: impl Into<String>) -> Self {
        self.internal_type = Some(internal_type.into());
        self
    }

    pub fn is_tuple(&self) -> bool {
        self.type_string.starts_with("tuple")
    }
}

/// One entry of the parsed interface description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub kind: DeclarationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    #[serde(default)]
    pub outputs: Vec<Parameter>,
    #[serde(default)]
    pub state_mutability: StateMutability,
    #[serde(default)]
    pub anonymous: bool,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability: StateMutability::default(),
            anonymous: false,
        }
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Function, Some(name.into()))
    }

    pub fn event(name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Event, Some(name.into()))
    }

    pub fn constructor() -> Self {
        Self::new(DeclarationKind::Constructor, None)
    }

    pub fn input(mut self, param: Parameter) -> Self {
        self.inputs.push(param);
        self
    }

    pub fn output(mut self, param: Parameter) -> Self {
        self.outputs.push(param);
        self
    }

    pub fn mutability(mut self, mutability: StateMutability) -> Self {
        self.state_mutability = mutability;
        self
    }

    pub fn name_or_kind(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => match self.kind {
                DeclarationKind::Constructor => "constructor",
                DeclarationKind::Fallback => "fallback",
                DeclarationKind::Receive => "receive",
                _ => "<unnamed>",
            },
        }
    }

    /// Human-readable label used in diagnostics and error messages.
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{} `{}`", self.kind, name),
            None => self.kind.to_string(),
        }
    }
}
