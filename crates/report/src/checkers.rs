// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Defect extraction from dynamic-analysis checker logs.
//!
//! Each supported checker gets one line grammar; the defect category
//! lands in the diagnostic's `option` field. Logs of an unknown
//! checker yield no diagnostics, the raw log stays available on the
//! command either way.

use std::sync::LazyLock;

use regex::Regex;
use relay_core::{Diagnostic, Severity};

#[allow(clippy::expect_used)]
fn checker_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("constant regex pattern is valid")
}

static VALGRIND: LazyLock<Regex> = LazyLock::new(|| checker_regex(r"^<b>([A-Z]{3})</b>"));
static ASAN: LazyLock<Regex> =
    LazyLock::new(|| checker_regex(r"^==[0-9]+==\s?ERROR: AddressSanitizer: ([A-Za-z0-9_-]+)"));
static LSAN: LazyLock<Regex> =
    LazyLock::new(|| checker_regex(r"^(Direct|Indirect) leak of [0-9]+ byte"));
static TSAN: LazyLock<Regex> =
    LazyLock::new(|| checker_regex(r"^WARNING: ThreadSanitizer: ([a-z][a-z0-9 -]*[a-z0-9])"));
static MSAN: LazyLock<Regex> =
    LazyLock::new(|| checker_regex(r"^==[0-9]+==\s?WARNING: MemorySanitizer: ([A-Za-z0-9_-]+)"));
static UBSAN: LazyLock<Regex> = LazyLock::new(|| {
    checker_regex(
        r"^(?P<file>[^:]+):(?P<line>[0-9]+):(?P<column>[0-9]+): runtime error: (?P<message>.*)",
    )
});
static DRMEMORY: LazyLock<Regex> =
    LazyLock::new(|| checker_regex(r"^Error #[0-9]+: ([A-Z][A-Z ]*[A-Z])"));
static PURIFY: LazyLock<Regex> = LazyLock::new(|| checker_regex(r"^\[([EWI])\] ([A-Z]{3})"));
static BOUNDSCHECKER: LazyLock<Regex> = LazyLock::new(|| {
    checker_regex(r"^(Memory|Pointer|Resource|Allocation) (leak|overrun|error|fault|conflict)")
});
static CUDA: LazyLock<Regex> =
    LazyLock::new(|| checker_regex(r"^=========\s+((?:Invalid|Leaked|Program hit).*)"));

/// Parse a checker log into defect diagnostics. Unknown checker names
/// yield an empty list.
pub fn parse(checker: &str, log: &str) -> Vec<Diagnostic> {
    match checker {
        "Valgrind" => by_line(log, |line| {
            VALGRIND.captures(line).map(|caps| defect(line, &caps[1], Severity::warning()))
        }),
        "AddressSanitizer" => by_line(log, |line| {
            ASAN.captures(line).map(|caps| defect(line, &caps[1], Severity::error()))
        }),
        "LeakSanitizer" => by_line(log, |line| {
            LSAN.captures(line).map(|caps| defect(line, &caps[1], Severity::warning()))
        }),
        "ThreadSanitizer" => by_line(log, |line| {
            TSAN.captures(line).map(|caps| defect(line, &caps[1], Severity::warning()))
        }),
        "MemorySanitizer" => by_line(log, |line| {
            MSAN.captures(line).map(|caps| defect(line, &caps[1], Severity::warning()))
        }),
        "UndefinedBehaviorSanitizer" => by_line(log, |line| {
            UBSAN.captures(line).map(|caps| Diagnostic {
                file_path: caps["file"].to_string(),
                line: caps["line"].parse().unwrap_or(0),
                column: caps["column"].parse().unwrap_or(0),
                severity: Severity::error(),
                message: caps["message"].to_string(),
                option: String::new(),
            })
        }),
        "DrMemory" => by_line(log, |line| {
            DRMEMORY.captures(line).map(|caps| defect(line, &caps[1], Severity::error()))
        }),
        "Purify" => by_line(log, |line| {
            PURIFY.captures(line).map(|caps| {
                let severity =
                    if &caps[1] == "E" { Severity::error() } else { Severity::warning() };
                defect(line, &caps[2], severity)
            })
        }),
        "BoundsChecker" => by_line(log, |line| {
            BOUNDSCHECKER.captures(line).map(|caps| {
                let tag = format!("{} {}", &caps[1], &caps[2]);
                defect(line, &tag, Severity::warning())
            })
        }),
        "CudaSanitizer" => by_line(log, |line| {
            CUDA.captures(line).map(|caps| defect(line, &caps[1], Severity::error()))
        }),
        _ => Vec::new(),
    }
}

fn by_line(log: &str, extract: impl Fn(&str) -> Option<Diagnostic>) -> Vec<Diagnostic> {
    log.split('\n').filter_map(extract).collect()
}

fn defect(line: &str, tag: &str, severity: Severity) -> Diagnostic {
    Diagnostic {
        file_path: ".".to_string(),
        line: 0,
        column: 0,
        severity,
        message: line.to_string(),
        option: tag.to_string(),
    }
}

#[cfg(test)]
#[path = "checkers_tests.rs"]
mod tests;
