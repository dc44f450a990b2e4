// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiler diagnostic extraction from raw tool output.
//!
//! A fixed, ordered table of line grammars covers the common compiler
//! dialects (GCC/Clang, MSVC sequential and parallel, IBM XL, Sun,
//! Borland). The first matching grammar wins; its named captures
//! override the caller-supplied defaults.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use relay_core::{pathmap, Diagnostic, Severity};

const DIALECT_PATTERNS: [&str; 8] = [
    // GCC/Clang with trailing [option]
    r"^(?P<file>[a-zA-Z./0-9_+ ~-]+):(?P<line>[0-9]+):(?P<column>[0-9]+): (?P<type>error|warning|note): (?P<message>.*) \[(?P<option>.*)\]$",
    // GCC/Clang without option
    r"^(?P<file>[a-zA-Z./0-9_+ ~-]+):(?P<line>[0-9]+):(?P<column>[0-9]+): (?P<type>error|warning|note): (?P<message>.*)",
    // MSVC, drive letters allowed
    r"^(?P<file>[a-zA-Z.:/0-9_+ ~-]+)\((?P<line>[0-9]+)\)",
    // MSVC under a parallel build prefix
    r"^[0-9]+>(?P<file>[a-zA-Z.:/0-9_+ ~-]+)\((?P<line>[0-9]+)\)",
    // generic file(line)
    r"^(?P<file>[a-zA-Z./0-9_+ ~-]+)\((?P<line>[0-9]+)\)",
    // IBM XL
    r#""(?P<file>[a-zA-Z./0-9_+ ~-]+)", line (?P<line>[0-9]+)"#,
    // Sun Studio
    r"File = (?P<file>[a-zA-Z./0-9_+ ~-]+), Line = (?P<line>[0-9]+)",
    // Borland
    r"^Warning W[0-9]+ (?P<file>[a-zA-Z.:/0-9_+ ~-]+) (?P<line>[0-9]+):",
];

#[allow(clippy::expect_used)]
static DIALECTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DIALECT_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("constant regex pattern is valid"))
        .collect()
});

const SUPPRESSED_MARKER: &str = "[CTest: warning suppressed]";
const MATCHED_MARKER: &str = "[CTest: warning matched]";

/// Remove the CTest warning markers wherever they occur.
pub fn clean_output(output: &str) -> String {
    output
        .replace("[CTest: warning suppressed] ", "")
        .replace("[CTest: warning matched] ", "")
}

enum LineClass {
    Suppressed,
    Noteworthy,
    Regular,
}

fn classify(line: &str) -> LineClass {
    if line.starts_with(SUPPRESSED_MARKER) {
        LineClass::Suppressed
    } else if line.starts_with(MATCHED_MARKER) {
        LineClass::Noteworthy
    } else {
        LineClass::Regular
    }
}

fn find_dialect(line: &str) -> Option<Captures<'_>> {
    DIALECTS.iter().find_map(|re| re.captures(line))
}

/// Build a diagnostic from one line plus optional dialect captures.
/// Returns the diagnostic and the cleaned captured path before the
/// source-file collapse, which [`parse_output`] needs for prefix
/// detection.
fn build_diagnostic(
    source_file: &str,
    default_severity: Severity,
    line: &str,
    caps: Option<&Captures<'_>>,
) -> (Diagnostic, Option<String>) {
    let mut diag = Diagnostic {
        file_path: source_file.to_string(),
        line: -1,
        column: -1,
        severity: default_severity,
        message: line.to_string(),
        option: String::new(),
    };
    let mut captured_path = None;
    if let Some(caps) = caps {
        if let Some(m) = caps.name("file") {
            let cleaned = pathmap::clean(m.as_str());
            captured_path = Some(cleaned.clone());
            diag.file_path = cleaned;
        }
        if let Some(m) = caps.name("line") {
            diag.line = m.as_str().parse().unwrap_or(-1);
        }
        if let Some(m) = caps.name("column") {
            diag.column = m.as_str().parse().unwrap_or(-1);
        }
        if let Some(m) = caps.name("type") {
            diag.severity = match m.as_str() {
                "warning" => Severity::warning(),
                "note" => Severity::note(),
                _ => Severity::error(),
            };
        }
        if let Some(m) = caps.name("message") {
            diag.message = m.as_str().to_string();
        }
        if let Some(m) = caps.name("option") {
            diag.option = m.as_str().to_string();
        }
    }
    // Absolute tool paths collapse onto the submission's relative name.
    if !source_file.is_empty() && diag.file_path.ends_with(source_file) {
        diag.file_path = source_file.to_string();
    }
    (diag, captured_path)
}

/// Extract a diagnostic from a single output line. Always yields one;
/// fields a dialect does not capture keep their defaults.
pub fn extract_diagnostic(source_file: &str, default_severity: Severity, line: &str) -> Diagnostic {
    let caps = find_dialect(line);
    build_diagnostic(source_file, default_severity, line, caps.as_ref()).0
}

/// Extract diagnostics from multi-line tool output anchored at
/// `source_file`. An empty `source_file` (linker failures) yields
/// nothing. Suppressed lines are dropped; marked lines always yield a
/// diagnostic; plain lines yield one only when a dialect matches.
pub fn parse_output(source_file: &str, output: &str) -> Vec<Diagnostic> {
    if source_file.is_empty() {
        return Vec::new();
    }

    let mut diags = Vec::new();
    let mut prefix: Option<String> = None;
    for raw in output.split('\n') {
        let (line, default_severity) = match classify(raw) {
            LineClass::Suppressed => continue,
            LineClass::Noteworthy => (clean_output(raw), Severity::warning()),
            LineClass::Regular => (raw.to_string(), Severity::error()),
        };
        let caps = find_dialect(&line);
        if caps.is_none() && matches!(classify(raw), LineClass::Regular) {
            continue;
        }
        let (diag, captured_path) = build_diagnostic(source_file, default_severity, &line, caps.as_ref());
        if prefix.is_none() {
            if let Some(path) = captured_path {
                if path.len() > source_file.len() && path.ends_with(source_file) {
                    prefix = Some(path[..path.len() - source_file.len()].to_string());
                }
            }
        }
        diags.push(diag);
    }

    // Cross-file diagnostics share the source prefix of the anchored
    // file; strip it so every path is project-relative.
    if let Some(prefix) = prefix {
        for diag in &mut diags {
            if let Some(rest) = diag.file_path.strip_prefix(&prefix) {
                diag.file_path = rest.to_string();
            }
        }
    }

    diags
}

#[cfg(test)]
#[path = "dialect_tests.rs"]
mod tests;
