use serde::{Deserialize, Serialize};
use std::fmt;

/// Global choice of how integers are represented in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentationMode {
    /// Language primitives (`u64`, `i128`, ...). Widths above 128 bits are rejected.
    Native,
    /// Wide 256-bit words for every integer width.
    #[default]
    Precise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructId(pub u32);

impl StructId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Elementary {
    Uint(u16),
    Int(u16),
    Address,
    Bool,
    FixedBytes(u8),
    Bytes,
    String,
}

impl Elementary {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Elementary::Bytes | Elementary::String)
    }
}

impl fmt::Display for Elementary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elementary::Uint(bits) => write!(f, "uint{}", bits),
            Elementary::Int(bits) => write!(f, "int{}", bits),
            Elementary::Address => write!(f, "address"),
            Elementary::Bool => write!(f, "bool"),
            Elementary::FixedBytes(n) => write!(f, "bytes{}", n),
            Elementary::Bytes => write!(f, "bytes"),
            Elementary::String => write!(f, "string"),
        }
    }
}

/// Encoding-level classification of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireKind {
    Elementary(Elementary),
    Array(Box<WireKind>, Option<usize>),
    Tuple(StructId),
}

impl WireKind {
    pub fn array(element: WireKind, len: Option<usize>) -> Self {
        WireKind::Array(Box::new(element), len)
    }

    /// Whether values of this kind are hashed when used as an indexed event parameter.
    pub fn is_hashed_in_topic(&self) -> bool {
        match self {
            WireKind::Elementary(elementary) => elementary.is_dynamic(),
            WireKind::Array(_, _) | WireKind::Tuple(_) => true,
        }
    }
}

/// Native integer widths available in `native` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeInt {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
}

impl NativeInt {
    /// Smallest primitive holding `bits` without loss, if any.
    pub fn for_width(bits: u16, signed: bool) -> Option<Self> {
        let native = match (bits, signed) {
            (0..=8, false) => NativeInt::U8,
            (9..=16, false) => NativeInt::U16,
            (17..=32, false) => NativeInt::U32,
            (33..=64, false) => NativeInt::U64,
            (65..=128, false) => NativeInt::U128,
            (0..=8, true) => NativeInt::I8,
            (9..=16, true) => NativeInt::I16,
            (17..=32, true) => NativeInt::I32,
            (33..=64, true) => NativeInt::I64,
            (65..=128, true) => NativeInt::I128,
            _ => return None,
        };
        Some(native)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NativeInt::U8 => "u8",
            NativeInt::U16 => "u16",
            NativeInt::U32 => "u32",
            NativeInt::U64 => "u64",
            NativeInt::U128 => "u128",
            NativeInt::I8 => "i8",
            NativeInt::I16 => "i16",
            NativeInt::I32 => "i32",
            NativeInt::I64 => "i64",
            NativeInt::I128 => "i128",
        }
    }
}

/// Target-language representation chosen for a wire kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RustType {
    Bool,
    Address,
    Native(NativeInt),
    WideUint,
    WideInt,
    FixedBytes(u8),
    Bytes,
    String,
    /// 32-byte topic hash of an indexed dynamic event parameter.
    Hash,
    Vec(Box<RustType>),
    Array(Box<RustType>, usize),
    Struct(StructId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedType {
    pub wire: WireKind,
    pub target: RustType,
    pub is_dynamic: bool,
}

impl ResolvedType {
    pub fn new(wire: WireKind, target: RustType, is_dynamic: bool) -> Self {
        Self {
            wire,
            target,
            is_dynamic,
        }
    }

    /// The representation of an indexed parameter whose value only survives as a hash.
    pub fn topic_hash() -> Self {
        Self::new(
            WireKind::Elementary(Elementary::FixedBytes(32)),
            RustType::Hash,
            false,
        )
    }

    /// Wraps `self` as the element of `T[]` or `T[N]`.
    pub fn into_array(self, len: Option<usize>) -> Self {
        let is_dynamic = len.is_none() || self.is_dynamic;
        let target = match len {
            Some(n) => RustType::Array(Box::new(self.target), n),
            None => RustType::Vec(Box::new(self.target)),
        };
        Self::new(WireKind::array(self.wire, len), target, is_dynamic)
    }
}
