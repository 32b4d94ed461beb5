//! JSON output formatter.

use anyhow::Result;
use loupe_core::diagnostic::Diagnostic;

pub fn format(diagnostics: &[Diagnostic]) -> Result<String> {
    Ok(serde_json::to_string_pretty(diagnostics)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_core::rules::Severity;

    #[test]
    fn formats_diagnostics_as_json_array() {
        let diagnostics = vec![
            Diagnostic::new("M001", Severity::Warning, "msg", "a.js", 1, 1).with_offsets(0, 10),
        ];

        let json = format(&diagnostics).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["rule_id"], "M001");
        assert_eq!(parsed[0]["severity"], "warning");
        assert_eq!(parsed[0]["width"], 10);
    }

    #[test]
    fn empty_diagnostics_is_empty_array() {
        let json = format(&[]).unwrap();
        assert_eq!(json.trim(), "[]");
    }
}
