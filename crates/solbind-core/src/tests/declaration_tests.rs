use crate::declaration::{Declaration, DeclarationKind, Parameter, StateMutability};

#[test]
fn test_kind_from_abi() {
    assert_eq!(DeclarationKind::from_abi("function"), Some(DeclarationKind::Function));
    assert_eq!(DeclarationKind::from_abi("receive"), Some(DeclarationKind::Receive));
    assert_eq!(DeclarationKind::from_abi("error"), Some(DeclarationKind::Error));
    assert_eq!(DeclarationKind::from_abi("modifier"), None);
}

#[test]
fn test_mutability_classification() {
    assert!(StateMutability::View.is_read_only());
    assert!(StateMutability::Pure.is_read_only());
    assert!(!StateMutability::NonPayable.is_read_only());
    assert!(StateMutability::Payable.is_payable());
    assert_eq!(StateMutability::default(), StateMutability::NonPayable);
}

#[test]
fn test_describe_uses_kind_for_unnamed() {
    assert_eq!(Declaration::constructor().describe(), "constructor");
    assert_eq!(Declaration::function("transfer").describe(), "function `transfer`");
    assert_eq!(Declaration::constructor().name_or_kind(), "constructor");
}

#[test]
fn test_tuple_detection() {
    let point = Parameter::tuple(
        "p",
        "tuple[]",
        vec![Parameter::new("x", "uint256"), Parameter::new("y", "uint256")],
    );
    assert!(point.is_tuple());
    assert!(!Parameter::new("x", "uint256").is_tuple());
}

#[test]
fn test_declaration_serializes_camel_case() {
    let decl = Declaration::function("get")
        .output(Parameter::new("", "string"))
        .mutability(StateMutability::View);
    let json = serde_json::to_value(&decl).unwrap();
    assert_eq!(json["kind"], "function");
    assert_eq!(json["stateMutability"], "view");
    assert_eq!(json["outputs"][0]["typeString"], "string");
}
