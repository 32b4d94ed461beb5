//! End-to-end tests running the analysis engine over whole files.

use loupe_core::config::{Config, RulesConfig, SeverityValue};
use loupe_core::rules::Severity;
use loupe_core::{AnalysisEngine, ParsedFile};

fn analyze(code: &str) -> Vec<loupe_core::Diagnostic> {
    let engine = AnalysisEngine::new();
    let file = ParsedFile::from_source("fixture.js", code);
    engine.analyze(&file)
}

#[test]
fn flags_only_convertible_loops_in_mixed_file() {
    let code = r#"
function sumAll(arr) {
    var total = 0;
    for (var i = 0; i < arr.length; i++) {
        total += arr[i];
    }
    return total;
}

function printIndexes(arr) {
    for (var i = 0; i < arr.length; i++) {
        console.log(i);
    }
}

function firstTen(arr) {
    for (var i = 0; i < 10; i++) {
        use(arr[i]);
    }
}
"#;
    let diagnostics = analyze(code);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule_id, "M001");
    assert_eq!(diagnostics[0].line, 4);
    assert_eq!(diagnostics[0].file, "fixture.js");
}

#[test]
fn diagnostics_are_reported_in_document_order() {
    let code = r#"
for (var a = 0; a < xs.length; a++) { f(xs[a]); }
for (var b = 0; b < ys.length; b++) { g(ys[b]); }
"#;
    let diagnostics = analyze(code);

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].line < diagnostics[1].line);
}

#[test]
fn analysis_of_same_file_twice_is_identical() {
    let code = "for (var i = 0; i < arr.length; i++) { use(arr[i]); }";
    let engine = AnalysisEngine::new();
    let file = ParsedFile::from_source("fixture.js", code);

    assert_eq!(engine.analyze(&file), engine.analyze(&file));
}

#[test]
fn severity_override_applies_through_engine() {
    let mut severity = std::collections::HashMap::new();
    severity.insert("prefer-for-of".to_string(), SeverityValue::Error);
    let config = Config {
        rules: RulesConfig {
            severity,
            ..Default::default()
        },
        ..Default::default()
    };

    let engine = AnalysisEngine::with_config(&config);
    let file = ParsedFile::from_source(
        "fixture.js",
        "for (var i = 0; i < arr.length; i++) { use(arr[i]); }",
    );
    let diagnostics = engine.analyze(&file);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn empty_and_unparsable_files_produce_nothing() {
    assert!(analyze("").is_empty());
    assert!(analyze("for (((").is_empty());
}
