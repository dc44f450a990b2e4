// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line grammar of a single `.gcov` text report.

use relay_core::{Coverage, Diagnostic, Severity};

/// One parsed `.gcov` report: the per-line coverage record plus a
/// branch-coverage diagnostic for every executable line that had
/// meaningful branch data above it.
pub struct Parsed {
    pub file: Coverage,
    pub branches: Vec<Diagnostic>,
}

pub fn parse(input: &str) -> Parsed {
    let mut lines = input.lines();

    // The preamble names the source file in a `:Source:` field. Parsing
    // continues from the line after it, without rewind.
    let mut path = String::new();
    for line in lines.by_ref() {
        if let Some(pos) = line.find(":Source:") {
            path = line[pos + 8..].to_string();
            break;
        }
    }

    let mut record = Coverage { file_path: path.clone(), ..Coverage::default() };
    let mut branches = Vec::new();

    let mut lines_tested = 0;
    let mut lines_untested = 0;
    let mut branches_tested = 0;
    let mut branches_untested = 0;

    // Branch lines accumulate until the next executable line, which
    // anchors them one line back.
    let mut covered = 0i64;
    let mut uncovered = 0i64;
    let mut throws = 0i64;
    let mut fallthroughs = 0i64;
    let mut branch_text = String::new();

    for line in lines {
        // Ordinary entries are `<times hit>: <line number>: <source>`.
        // Anything else is block data (branch and function counts).
        let fields: Vec<&str> = line.splitn(3, ':').collect();
        if fields.len() > 2 {
            let lineno: i64 = fields[1].trim().parse().unwrap_or(0);
            if lineno == 0 {
                // Preamble fields (`Graph:`, `Runs:`, ...) report as
                // line 0 and are not source lines.
                continue;
            }

            // Lines whose branches were all `(throw)` or
            // `(fallthrough)` edges carry no actionable branch data.
            let total = covered + uncovered;
            if total > 0 && total > throws + fallthroughs {
                branches_tested += covered;
                branches_untested += uncovered;
                branches.push(Diagnostic {
                    file_path: path.clone(),
                    line: lineno - 1,
                    column: -1,
                    severity: Severity::warning(),
                    message: branch_text.clone(),
                    option: "Branch Coverage".to_string(),
                });
            }
            covered = 0;
            uncovered = 0;
            throws = 0;
            fallthroughs = 0;
            branch_text.clear();

            let hits = fields[0].trim();
            if hits == "-" {
                // Unexecutable line.
                record.lines.push(-1);
            } else if hits == "#####" {
                // Executable but never reached.
                record.lines.push(0);
                lines_untested += 1;
            } else {
                record.lines.push(hits.parse().unwrap_or(0));
                lines_tested += 1;
            }
        } else if line.starts_with("branch") {
            branch_text.push_str(line);
            branch_text.push('\n');
            if line.contains("taken 0%") {
                uncovered += 1;
            } else {
                covered += 1;
            }
            if line.contains("(throw)") {
                throws += 1;
            } else if line.contains("(fallthrough)") {
                fallthroughs += 1;
            }
        }
    }
    // Branch data after the last executable line anchors to nothing
    // and is dropped.

    record.lines_tested = Some(lines_tested);
    record.lines_untested = Some(lines_untested);
    record.branches_tested = Some(branches_tested);
    record.branches_untested = Some(branches_untested);

    Parsed { file: record, branches }
}

#[cfg(test)]
#[path = "gcov_tests.rs"]
mod tests;
