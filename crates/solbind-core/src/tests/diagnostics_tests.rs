use crate::diagnostics::{CollectingReporter, Diagnostic, DiagnosticKind, Reporter};

#[test]
fn test_duplicate_field_message_prefix() {
    let diagnostic = Diagnostic::duplicate_field("struct `Pair`", "value", "value_1");
    assert!(diagnostic.to_string().contains("Duplicate field(s) found"));
    assert_eq!(diagnostic.kind, DiagnosticKind::DuplicateField);
}

#[test]
fn test_collecting_reporter_counts_by_kind() {
    let mut reporter = CollectingReporter::new();
    reporter.report(Diagnostic::name_collision("Point", "a different tuple shape", "Point2", "function `f`"));
    reporter.report(Diagnostic::duplicate_field("struct `A`", "a", "a_1"));
    reporter.report(Diagnostic::contract_name_collision("token", "Token", "Token2"));

    assert_eq!(reporter.count(DiagnosticKind::NameCollision), 2);
    assert_eq!(reporter.count(DiagnosticKind::DuplicateField), 1);
    assert_eq!(reporter.diagnostics().len(), 3);
}

#[test]
fn test_closure_reporter() {
    let mut seen = Vec::new();
    {
        let mut reporter = |d: Diagnostic| seen.push(d.message);
        reporter.report(Diagnostic::duplicate_declaration("function `f`", "f()"));
    }
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with("Duplicate declaration"));
}

#[test]
fn test_collision_messages_name_the_holder() {
    let shadowed = Diagnostic::name_collision("Vault", "the contract handle", "Vault2", "function `f`");
    assert!(shadowed.message.contains("already names the contract handle"));

    let contract = Diagnostic::contract_name_collision("Token", "Token", "Token2");
    assert_eq!(contract.kind, DiagnosticKind::NameCollision);
    assert!(contract.message.starts_with("Contract name collision"));
    assert!(contract.message.ends_with("generated as `Token2`"));
}
