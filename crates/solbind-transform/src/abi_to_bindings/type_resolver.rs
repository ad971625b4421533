use solbind_core::{
    BindgenError, Elementary, NativeInt, Parameter, RepresentationMode, ResolvedType, Result,
    RustType, WireKind,
};
use solbind_parser::{parse_type, BaseType, TypeSyntax};
use std::collections::HashMap;

/// Parses the type string of `param`, attributing failures to `origin`.
pub fn parse_syntax(param: &Parameter, origin: &str) -> Result<TypeSyntax> {
    let syntax = parse_type(&param.type_string).map_err(|e| BindgenError::InvalidType {
        type_string: param.type_string.clone(),
        context: origin.to_string(),
        reason: e.to_string(),
    })?;

    if syntax.is_tuple() && param.components.is_empty() {
        return Err(BindgenError::InvalidType {
            type_string: param.type_string.clone(),
            context: origin.to_string(),
            reason: "tuple type without components".to_string(),
        });
    }

    Ok(syntax)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// Native mode has no primitive wide enough for this integer type.
    PrecisionLoss(String),
    /// Tuples resolve through the struct synthesizer, never here.
    Tuple,
}

/// Maps non-tuple type syntax to resolved types under one representation mode.
///
/// Results are memoized by canonical type string, so `uint` and `uint256` share an entry and
/// every occurrence of a type resolves to the same value. Tuples are not handled here: their
/// identity depends on the component list, which the struct synthesizer keys on.
pub struct TypeResolver {
    mode: RepresentationMode,
    memo: HashMap<String, ResolvedType>,
}

impl TypeResolver {
    pub fn new(mode: RepresentationMode) -> Self {
        Self {
            mode,
            memo: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, syntax: &TypeSyntax) -> std::result::Result<ResolvedType, ResolveFailure> {
        if syntax.is_tuple() {
            return Err(ResolveFailure::Tuple);
        }
        let key = syntax.to_string();
        if let Some(resolved) = self.memo.get(&key) {
            return Ok(resolved.clone());
        }

        let resolved = self
            .elementary(syntax.base)
            .ok_or_else(|| ResolveFailure::PrecisionLoss(key.clone()))?;
        let resolved = wrap_dimensions(resolved, &syntax.dimensions);

        self.memo.insert(key, resolved.clone());
        Ok(resolved)
    }

    fn elementary(&self, base: BaseType) -> Option<ResolvedType> {
        let (elementary, target) = match base {
            BaseType::Uint(bits) => (Elementary::Uint(bits), self.integer(bits, false)?),
            BaseType::Int(bits) => (Elementary::Int(bits), self.integer(bits, true)?),
            BaseType::Address => (Elementary::Address, RustType::Address),
            BaseType::Bool => (Elementary::Bool, RustType::Bool),
            BaseType::FixedBytes(n) => (Elementary::FixedBytes(n), RustType::FixedBytes(n)),
            BaseType::Bytes => (Elementary::Bytes, RustType::Bytes),
            BaseType::String => (Elementary::String, RustType::String),
            BaseType::Tuple => return None,
        };
        let is_dynamic = elementary.is_dynamic();
        Some(ResolvedType::new(
            WireKind::Elementary(elementary),
            target,
            is_dynamic,
        ))
    }

    fn integer(&self, bits: u16, signed: bool) -> Option<RustType> {
        match self.mode {
            RepresentationMode::Precise if signed => Some(RustType::WideInt),
            RepresentationMode::Precise => Some(RustType::WideUint),
            RepresentationMode::Native => NativeInt::for_width(bits, signed).map(RustType::Native),
        }
    }

    #[cfg(test)]
    pub(crate) fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

/// Applies array dimensions, innermost first, to an element type.
pub fn wrap_dimensions(element: ResolvedType, dimensions: &[Option<usize>]) -> ResolvedType {
    dimensions
        .iter()
        .fold(element, |inner, dim| inner.into_array(*dim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve(mode: RepresentationMode, ty: &str) -> std::result::Result<ResolvedType, ResolveFailure> {
        let syntax = parse_type(ty).unwrap();
        TypeResolver::new(mode).resolve(&syntax)
    }

    #[test]
    fn test_precise_integers_are_wide() {
        for ty in ["uint8", "uint64", "uint256", "uint"] {
            let resolved = resolve(RepresentationMode::Precise, ty).unwrap();
            assert_eq!(resolved.target, RustType::WideUint);
        }
        let resolved = resolve(RepresentationMode::Precise, "int24").unwrap();
        assert_eq!(resolved.target, RustType::WideInt);
        assert_eq!(resolved.wire, WireKind::Elementary(Elementary::Int(24)));
    }

    #[test]
    fn test_native_integers_pick_smallest_primitive() {
        let cases = [
            ("uint8", NativeInt::U8),
            ("uint24", NativeInt::U32),
            ("uint64", NativeInt::U64),
            ("uint128", NativeInt::U128),
            ("int16", NativeInt::I16),
            ("int72", NativeInt::I128),
        ];
        for (ty, expected) in cases {
            let resolved = resolve(RepresentationMode::Native, ty).unwrap();
            assert_eq!(resolved.target, RustType::Native(expected), "{}", ty);
        }
    }

    #[test]
    fn test_native_rejects_wide_integers() {
        let err = resolve(RepresentationMode::Native, "uint256[]").unwrap_err();
        assert_eq!(err, ResolveFailure::PrecisionLoss("uint256[]".to_string()));
        assert!(resolve(RepresentationMode::Native, "int136").is_err());
        assert_eq!(
            resolve(RepresentationMode::Precise, "tuple[]").unwrap_err(),
            ResolveFailure::Tuple
        );
    }

    #[test]
    fn test_arrays_and_dynamism() {
        let resolved = resolve(RepresentationMode::Precise, "bytes32[2][]").unwrap();
        assert!(resolved.is_dynamic);
        assert_eq!(
            resolved.target,
            RustType::Vec(Box::new(RustType::Array(
                Box::new(RustType::FixedBytes(32)),
                2
            )))
        );

        let fixed = resolve(RepresentationMode::Precise, "address[3]").unwrap();
        assert!(!fixed.is_dynamic);

        let strings = resolve(RepresentationMode::Precise, "string[3]").unwrap();
        assert!(strings.is_dynamic);
    }

    #[test]
    fn test_memoized_by_canonical_form() {
        let mut resolver = TypeResolver::new(RepresentationMode::Precise);
        let a = resolver.resolve(&parse_type("uint").unwrap()).unwrap();
        let b = resolver.resolve(&parse_type("uint256").unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(resolver.memo_len(), 1);
    }

    #[test]
    fn test_parse_syntax_reports_context() {
        let param = Parameter::new("x", "uint7");
        let err = parse_syntax(&param, "function `f`").unwrap_err();
        assert!(err.to_string().contains("uint7"));
        assert!(err.to_string().contains("function `f`"));

        let empty_tuple = Parameter::new("t", "tuple");
        assert!(parse_syntax(&empty_tuple, "event `E`").is_err());
    }
}
