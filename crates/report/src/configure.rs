// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configure-log splitting.
//!
//! CMake writes diagnostics as block structures into an otherwise
//! unstructured log: a header line, indented body lines, closed by the
//! first line that belongs to neither. The splitter walks the log once
//! and accumulates one diagnostic per block.

use std::sync::LazyLock;

use regex::Regex;
use relay_core::{Command, Diagnostic, Severity};

use crate::build::invocation_command;
use crate::site::TimedCommands;
use crate::submission::Configure;

#[allow(clippy::expect_used)]
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CMake (Deprecation Warning|Error|Warning \(dev\)|Warning)( at ([^:]+):([0-9]+) \((.*)\))?:")
        .expect("constant regex pattern is valid")
});

enum SplitState {
    Idle,
    Accumulating(Diagnostic),
}

/// Split a configure log into its diagnostic blocks. A failing exit
/// status with no recognizable block still yields one diagnostic, so
/// a broken configure is never silent.
pub fn split_log(log: &str, exit_status: i64) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let mut state = SplitState::Idle;

    for line in log.split('\n') {
        if line.is_empty() {
            if let SplitState::Accumulating(diag) = &mut state {
                diag.message.push('\n');
            }
            continue;
        }
        if let Some(body) = line.strip_prefix("  ") {
            if let SplitState::Accumulating(diag) = &mut state {
                diag.message.push_str(body);
                diag.message.push('\n');
            }
            continue;
        }

        // Any other line closes the open block.
        if let SplitState::Accumulating(diag) = std::mem::replace(&mut state, SplitState::Idle) {
            diags.push(close_block(diag));
        }

        if let Some(caps) = HEADER.captures(line) {
            let mut diag = Diagnostic {
                file_path: "CMakeLists.txt".to_string(),
                severity: header_severity(caps.get(1).map_or("", |m| m.as_str())),
                ..Diagnostic::default()
            };
            if caps.get(2).is_some() {
                diag.file_path = caps.get(3).map_or("", |m| m.as_str()).to_string();
                diag.line = caps.get(4).and_then(|m| m.as_str().parse().ok()).unwrap_or(-1);
                diag.option = caps.get(5).map_or("", |m| m.as_str()).to_string();
            }
            state = SplitState::Accumulating(diag);
        }
    }
    if let SplitState::Accumulating(diag) = state {
        diags.push(close_block(diag));
    }

    if diags.is_empty() && exit_status != 0 {
        diags.push(Diagnostic {
            file_path: "CMakeLists.txt".to_string(),
            severity: Severity::error(),
            message: format!("Command finished with exit code {exit_status}"),
            ..Diagnostic::default()
        });
    }

    diags
}

fn close_block(mut diag: Diagnostic) -> Diagnostic {
    while diag.message.ends_with('\n') {
        diag.message.pop();
    }
    diag
}

fn header_severity(word: &str) -> Severity {
    if word == "Error" {
        Severity::error()
    } else {
        Severity::warning()
    }
}

/// Map the configure section to commands: one root command for the
/// configure run itself, then any launcher-reported invocations.
pub fn parse_section(cfg: &Configure, generator: &str) -> TimedCommands {
    let mut ret = TimedCommands::new(cfg.start_time, cfg.end_time);
    let duration_secs = (cfg.end_time - cfg.start_time) as f64;

    let mut root = Command::new("configure");
    root.command_line = cfg.command.clone();
    root.result = cfg.status;
    root.duration = (cfg.end_time - cfg.start_time) * 1000;
    root.stdout = cfg.log.clone();
    root.diagnostics = split_log(&cfg.log, cfg.status);
    root.attributes.insert("Generator".to_string(), generator.to_string());
    root.measurements.insert("Execution Time".to_string(), duration_secs);
    ret.commands.push(root);

    for inv in &cfg.commands {
        ret.commands.push(invocation_command(inv));
    }

    ret
}

#[cfg(test)]
#[path = "configure_tests.rs"]
mod tests;
