use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseType {
    Uint(u16),
    Int(u16),
    Address,
    Bool,
    FixedBytes(u8),
    Bytes,
    String,
    Tuple,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Uint(bits) => write!(f, "uint{}", bits),
            BaseType::Int(bits) => write!(f, "int{}", bits),
            BaseType::Address => write!(f, "address"),
            BaseType::Bool => write!(f, "bool"),
            BaseType::FixedBytes(n) => write!(f, "bytes{}", n),
            BaseType::Bytes => write!(f, "bytes"),
            BaseType::String => write!(f, "string"),
            BaseType::Tuple => write!(f, "tuple"),
        }
    }
}

/// A parsed type string: a base type followed by array dimensions, innermost first.
///
/// `uint8[2][]` is a dynamic array of `uint8[2]`, so its dimensions are `[Some(2), None]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSyntax {
    pub base: BaseType,
    pub dimensions: Vec<Option<usize>>,
}

impl TypeSyntax {
    pub fn is_tuple(&self) -> bool {
        self.base == BaseType::Tuple
    }

    pub fn is_array(&self) -> bool {
        !self.dimensions.is_empty()
    }

    /// The `[..]` suffix in canonical form, e.g. `[2][]`.
    pub fn array_suffix(&self) -> String {
        self.dimensions
            .iter()
            .map(|dim| match dim {
                Some(len) => format!("[{}]", len),
                None => "[]".to_string(),
            })
            .collect()
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.array_suffix())
    }
}
