//! Human-readable output formatter.

use colored::Colorize;
use loupe_core::diagnostic::Diagnostic;
use loupe_core::rules::Severity;

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
        Severity::Info => "info".blue().bold(),
        Severity::Hint => "hint".green().bold(),
    }
}

pub fn print(diagnostics: &[Diagnostic], files_checked: usize) {
    for diagnostic in diagnostics {
        println!(
            "{}[{}] {}:{}:{} {}",
            severity_label(diagnostic.severity),
            diagnostic.rule_id,
            diagnostic.file,
            diagnostic.line,
            diagnostic.column,
            diagnostic.message
        );
        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "suggestion:".dimmed(), suggestion);
        }
    }

    if diagnostics.is_empty() {
        println!(
            "{} {} file(s) checked, no issues found",
            "ok:".green().bold(),
            files_checked
        );
    } else {
        println!(
            "\n{} issue(s) found in {} file(s) checked",
            diagnostics.len(),
            files_checked
        );
    }
}
