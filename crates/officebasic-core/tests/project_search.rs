use officebasic_core::{MacroModule, MacroWorkspace, ModuleKind, SearchOptions};
use std::time::Instant;

fn workspace() -> MacroWorkspace {
    MacroWorkspace::new(vec![
        MacroModule::with_source(
            "Billing",
            ModuleKind::Standard,
            "Sub Charge\n  total = total + fee\nEnd Sub",
            Vec::new(),
        ),
        MacroModule::with_source(
            "Report",
            ModuleKind::Standard,
            "Sub Print\n  MsgBox total\nEnd Sub",
            Vec::new(),
        ),
        MacroModule::with_source("Empty", ModuleKind::Standard, "' nothing here", Vec::new()),
    ])
}

#[test]
fn test_matches_grouped_by_module_with_total() {
    let ws = workspace();
    let results = ws.search_project("total", SearchOptions::default());

    assert_eq!(results.total, 3);
    assert_eq!(results.groups.len(), 2);
    assert_eq!(results.groups[0].module_name, "Billing");
    assert_eq!(results.groups[0].matches.len(), 2);
    assert_eq!(results.groups[1].module_name, "Report");

    // Modules without matches contribute no group at all.
    assert!(results.groups.iter().all(|g| g.module_name != "Empty"));
}

#[test]
fn test_match_carries_module_name_and_line_text() {
    let ws = workspace();
    let results = ws.search_project("MsgBox", SearchOptions::default());

    let only = &results.groups[0].matches[0];
    assert_eq!(only.module_name, "Report");
    assert_eq!(only.line_text, "  MsgBox total");
    assert_eq!(only.matched.line, 2);
    assert_eq!(only.matched.start_column, 3);
}

#[test]
fn test_project_search_reflects_unsaved_edits() {
    let mut ws = workspace();

    // The overlay wins over the pristine source as soon as an edit lands.
    ws.record_edit("Empty", "total = 0", 9, Instant::now());
    let results = ws.search_project("total", SearchOptions::default());

    assert_eq!(results.total, 4);
    let names: Vec<&str> = results
        .groups
        .iter()
        .map(|g| g.module_name.as_str())
        .collect();
    assert_eq!(names, vec!["Billing", "Report", "Empty"]);

    // Reverting the edit brings the pristine view back.
    ws.undo();
    assert_eq!(ws.search_project("total", SearchOptions::default()).total, 3);
}

#[test]
fn test_search_options_apply_project_wide() {
    let ws = workspace();

    let sensitive = ws.search_project("sub", SearchOptions::default());
    assert_eq!(sensitive.total, 0);

    let insensitive = ws.search_project(
        "sub",
        SearchOptions {
            case_sensitive: false,
            ..SearchOptions::default()
        },
    );
    assert_eq!(insensitive.total, 4);

    let whole_word = ws.search_project(
        "Charge",
        SearchOptions {
            whole_word: true,
            ..SearchOptions::default()
        },
    );
    assert_eq!(whole_word.total, 1);
}

#[test]
fn test_empty_query_and_malformed_regex_yield_empty_results() {
    let ws = workspace();
    assert_eq!(ws.search_project("", SearchOptions::default()).total, 0);

    let regex = SearchOptions {
        use_regex: true,
        ..SearchOptions::default()
    };
    let results = ws.search_project("[boom", regex);
    assert_eq!(results.total, 0);
    assert!(results.groups.is_empty());
}
