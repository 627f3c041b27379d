use officebasic_core::{
    detect_signature_help, MacroModule, MacroWorkspace, ModuleKind, ParameterInfo, ProcedureInfo,
    ProcedureKind,
};

fn deposit() -> ProcedureInfo {
    ProcedureInfo {
        name: "Deposit".to_string(),
        kind: ProcedureKind::Function,
        parameters: vec![
            ParameterInfo::new("account", Some("String")),
            ParameterInfo::new("amount", Some("Currency")),
            ParameterInfo {
                name: "memo".to_string(),
                by_val: false,
                optional: true,
                param_type: None,
            },
        ],
        return_type: Some("Boolean".to_string()),
    }
}

#[test]
fn test_comma_inside_string_literal_is_not_an_argument() {
    let source = "MsgBox(\"Hello, World\", ";
    let hint = detect_signature_help(source, source.chars().count(), &[]).unwrap();
    assert_eq!(hint.function_name, "MsgBox");
    assert_eq!(hint.active_parameter, 1);
    assert_eq!(hint.parameters.len(), 3);
}

#[test]
fn test_builtin_signature_carries_return_type() {
    let hint = detect_signature_help("x = Len(", 8, &[]).unwrap();
    assert_eq!(hint.signature, "Len(Text As String) As Long");
    assert_eq!(hint.return_type.as_deref(), Some("Long"));
}

#[test]
fn test_user_procedure_signature_and_third_argument() {
    let source = "ok = Deposit(\"savings\", 250.0, ";
    let hint = detect_signature_help(source, source.chars().count(), &[deposit()]).unwrap();
    assert_eq!(
        hint.signature,
        "Function Deposit(account As String, amount As Currency, [memo]) As Boolean"
    );
    assert_eq!(hint.active_parameter, 2);
    assert_eq!(hint.parameters[2], "[memo]");
    assert_eq!(hint.return_type.as_deref(), Some("Boolean"));
}

#[test]
fn test_nested_calls_resolve_innermost_first() {
    let source = "Deposit(UCase(";
    let hint = detect_signature_help(source, source.chars().count(), &[deposit()]).unwrap();
    assert_eq!(hint.function_name, "UCase");

    let source = "Deposit(UCase(name), ";
    let hint = detect_signature_help(source, source.chars().count(), &[deposit()]).unwrap();
    assert_eq!(hint.function_name, "Deposit");
    assert_eq!(hint.active_parameter, 1);
}

#[test]
fn test_unresolved_or_absent_calls_are_none() {
    assert!(detect_signature_help("x = 1 + 2", 9, &[]).is_none());
    assert!(detect_signature_help("Unknown(", 8, &[]).is_none());
    assert!(detect_signature_help("x = (1 + 2", 10, &[]).is_none());
}

#[test]
fn test_workspace_signature_help_sees_other_modules() {
    let bank = MacroModule::with_source(
        "Bank",
        ModuleKind::Standard,
        "Function Deposit(account As String, amount As Currency, Optional memo) As Boolean\nEnd Function",
        vec![deposit()],
    );
    let caller_source = "Sub Pay\n  ok = deposit(\"fees\", ";
    let caller = MacroModule::with_source("Caller", ModuleKind::Standard, caller_source, Vec::new());
    let ws = MacroWorkspace::new(vec![caller, bank]);

    let hint = ws
        .signature_help("Caller", caller_source.chars().count())
        .unwrap();
    assert_eq!(hint.function_name, "deposit");
    assert_eq!(hint.active_parameter, 1);
}

#[test]
fn test_signature_help_follows_unsaved_edits() {
    let mut ws = MacroWorkspace::new(vec![MacroModule::with_source(
        "Module1",
        ModuleKind::Standard,
        "",
        Vec::new(),
    )]);
    let edited = "MsgBox(";
    ws.record_edit("Module1", edited, 7, std::time::Instant::now());

    let hint = ws.signature_help("Module1", 7).unwrap();
    assert_eq!(hint.function_name, "MsgBox");
    assert_eq!(hint.active_parameter, 0);
}
