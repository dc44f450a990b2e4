// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage section normalization: summary counters and per-line logs.

use relay_core::Coverage;

use crate::site::TimedCoverage;
use crate::submission::{CoverageLogSection, CoverageSection};

pub fn parse_summary(section: &CoverageSection) -> TimedCoverage {
    let mut ret = TimedCoverage::new(section.start_time, section.end_time);
    ret.files = section
        .files
        .iter()
        .map(|f| Coverage {
            file_path: relative(&f.path),
            lines_tested: f.lines_tested,
            lines_untested: f.lines_untested,
            branches_tested: f.branches_tested,
            branches_untested: f.branches_untested,
            functions_tested: f.functions_tested,
            functions_untested: f.functions_untested,
            labels: f.labels.clone(),
            ..Coverage::default()
        })
        .collect();
    ret
}

pub fn parse_log(section: &CoverageLogSection) -> TimedCoverage {
    let mut ret = TimedCoverage::new(section.start_time, section.end_time);
    ret.files = section
        .files
        .iter()
        .map(|f| Coverage {
            file_path: relative(&f.path),
            lines: f.lines.clone(),
            ..Coverage::default()
        })
        .collect();
    ret
}

fn relative(path: &str) -> String {
    path.strip_prefix("./").unwrap_or(path).to_string()
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
