//! Check command - analyzes JavaScript/TypeScript files for issues.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use walkdir::WalkDir;

use loupe_core::config::load_config_or_default_with_warnings;
use loupe_core::diagnostic::Diagnostic;
use loupe_core::rules::Severity;
use loupe_core::{AnalysisEngine, ParsedFile};

use crate::output::{json, pretty};

const SUPPORTED_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to file or directory to analyze
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format for diagnostics (pretty, json)
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Fail with exit code 1 when any diagnostic is reported
    #[arg(long)]
    pub fail_on_warnings: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CheckArgs {
    pub fn run(&self) -> Result<()> {
        if self.no_color {
            colored::control::set_override(false);
        }

        let config_result = load_config_or_default_with_warnings(&self.path);
        for warning in &config_result.warnings {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }

        let files = discover_files(&self.path)?;
        let files = apply_path_filters(
            files,
            &config_result.config.include,
            &config_result.config.exclude,
        );
        if files.is_empty() {
            println!("No JavaScript/TypeScript files found.");
            return Ok(());
        }

        let engine = AnalysisEngine::with_config(&config_result.config);
        let mut diagnostics = Vec::new();
        let mut checked = 0usize;

        for path in &files {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file = ParsedFile::from_source(&path.to_string_lossy(), &source);
            tracing::debug!(file = %path.display(), "checking file");
            diagnostics.extend(engine.analyze(&file));
            checked += 1;
        }

        match self.format.as_str() {
            "json" => println!("{}", json::format(&diagnostics)?),
            _ => pretty::print(&diagnostics, checked),
        }

        if should_fail(&diagnostics, self.fail_on_warnings) {
            process::exit(1);
        }
        Ok(())
    }
}

fn should_fail(diagnostics: &[Diagnostic], fail_on_warnings: bool) -> bool {
    if fail_on_warnings {
        !diagnostics.is_empty()
    } else {
        diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn discover_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(if is_supported(path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_entry(|entry| {
            // The root itself is always walked, whatever it is named.
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            name != "node_modules" && !(name.starts_with('.') && name.len() > 1)
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_supported(path))
        .collect();

    files.sort();
    Ok(files)
}

/// Apply the config's include/exclude filters. Patterns match as substrings
/// of the slash-normalized path; an empty include list keeps everything.
fn apply_path_filters(
    files: Vec<PathBuf>,
    include: &[String],
    exclude: &[String],
) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|path| {
            let text = path.to_string_lossy().replace('\\', "/");
            let included = include.is_empty() || include.iter().any(|p| text.contains(p.as_str()));
            let excluded = exclude.iter().any(|p| text.contains(p.as_str()));
            included && !excluded
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_are_recognized() {
        assert!(is_supported(Path::new("a.js")));
        assert!(is_supported(Path::new("a.tsx")));
        assert!(is_supported(Path::new("a.mjs")));
        assert!(!is_supported(Path::new("a.rs")));
        assert!(!is_supported(Path::new("README.md")));
    }

    #[test]
    fn discover_skips_node_modules_and_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("src/app.js"), "var x = 1;").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "var y = 2;").unwrap();
        fs::write(root.join(".cache/tmp.js"), "var z = 3;").unwrap();
        fs::write(root.join("notes.txt"), "not code").unwrap();

        let files = discover_files(root).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/app.js"));
    }

    #[test]
    fn discover_accepts_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("one.ts");
        fs::write(&file, "const a = 1;").unwrap();

        let files = discover_files(&file).unwrap();

        assert_eq!(files, vec![file]);
    }

    #[test]
    fn path_filters_include_and_exclude() {
        let files = vec![
            PathBuf::from("src/app.js"),
            PathBuf::from("src/vendor/lib.js"),
            PathBuf::from("tools/gen.js"),
        ];

        let kept = apply_path_filters(
            files,
            &["src".to_string()],
            &["vendor".to_string()],
        );

        assert_eq!(kept, vec![PathBuf::from("src/app.js")]);
    }

    #[test]
    fn empty_filters_keep_everything() {
        let files = vec![PathBuf::from("a.js"), PathBuf::from("b.ts")];

        assert_eq!(apply_path_filters(files.clone(), &[], &[]), files);
    }

    #[test]
    fn failure_policy() {
        let warning = Diagnostic::new("M001", Severity::Warning, "m", "f.js", 1, 1);
        let error = Diagnostic::new("M001", Severity::Error, "m", "f.js", 1, 1);

        assert!(!should_fail(&[], false));
        assert!(!should_fail(&[warning.clone()], false));
        assert!(should_fail(&[warning], true));
        assert!(should_fail(&[error], false));
    }
}
