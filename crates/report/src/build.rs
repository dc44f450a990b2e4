// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-section normalization and failure reconciliation.
//!
//! A build section carries up to three views of the same build: the
//! launcher's structured per-invocation records, loose global
//! diagnostics, and detailed failure records. They are folded into one
//! ordered command list; a failure whose canonical command line matches
//! an existing invocation merges into it instead of duplicating it.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::{Captures, Regex};
use relay_core::{pathmap, Command, Diagnostic, Severity};

use crate::dialect;
use crate::measurement;
use crate::site::TimedCommands;
use crate::submission::{Build, Failure, Invocation};

#[allow(clippy::expect_used)]
static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("constant regex pattern is valid")
});

/// Canonical form of a whole-string command line: quoted atoms that
/// contain no whitespace lose their quotes. Launcher records and
/// failure argv lists must canonicalize to the same string for
/// reconciliation to work.
pub fn canonicalize_command_line(input: &str) -> String {
    QUOTED
        .replace_all(input, |caps: &Captures<'_>| {
            let inner = &caps[1];
            if inner.contains(' ') {
                caps[0].to_string()
            } else {
                inner.to_string()
            }
        })
        .into_owned()
}

/// Canonical command line from an argv list: arguments with whitespace
/// are re-quoted, everything else is joined verbatim.
pub fn command_line_from_argv(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| if arg.contains(' ') { format!("{arg:?}") } else { arg.clone() })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn invocation_command(inv: &Invocation) -> Command {
    let mut cmd = Command::new(inv.role());
    cmd.command_line = canonicalize_command_line(&inv.command_line);
    cmd.result = inv.result;
    cmd.target = inv.target.clone();
    cmd.target_type = inv.target_type.clone();
    if inv.time_start > 0 {
        cmd.start_time = DateTime::from_timestamp(inv.time_start, 0);
    }
    cmd.duration = inv.duration;
    cmd.source = inv.source.clone();
    cmd.language = inv.language.clone();
    cmd.config = inv.config.clone();
    measurement::apply_measurements(&inv.measurements, &mut cmd);
    cmd
}

/// Normalize one build section. Order invariant: the root view first,
/// then target commands in target order, then unmatched failures in
/// submission order.
pub fn parse_section(build: &Build) -> TimedCommands {
    let mut ret = TimedCommands::new(build.start_time, build.end_time);

    if build.commands.is_empty() {
        ret.commands.push(aggregate_command(build));
    } else {
        for inv in &build.commands {
            ret.commands.push(invocation_command(inv));
        }
    }

    for target in &build.targets {
        for inv in &target.commands {
            let mut cmd = invocation_command(inv);
            cmd.target = target.name.clone();
            cmd.target_type = target.kind.clone();
            cmd.target_labels = target.labels.clone();
            ret.commands.push(cmd);
        }
    }

    for failure in &build.failures {
        reconcile_failure(failure, &mut ret.commands);
    }

    ret
}

/// Without launcher records the whole build collapses into a single
/// synthetic command carrying the concatenated global diagnostics.
fn aggregate_command(build: &Build) -> Command {
    let mut cmd = Command::new("build");
    cmd.command_line = build.command.clone();
    cmd.duration = (build.end_time - build.start_time) * 1000;
    cmd.measurements
        .insert("Execution Time".to_string(), (build.end_time - build.start_time) as f64);

    let mut stdout = String::new();
    for diag in &build.diagnostics {
        let combined = format!("{}{}\n{}", diag.pre_context, diag.text, diag.post_context);
        stdout.push_str(&combined);
        cmd.diagnostics.extend(dialect::parse_output(&diag.source_file, &combined));
    }
    cmd.stdout = stdout;
    cmd
}

fn reconcile_failure(failure: &Failure, commands: &mut Vec<Command>) {
    let command_line = command_line_from_argv(&failure.argv);
    let diags = failure_diagnostics(failure);
    let stdout = dialect::clean_output(&failure.stdout);
    let stderr = dialect::clean_output(&failure.stderr);

    if let Some(cmd) = commands.iter_mut().find(|c| c.command_line == command_line) {
        merge_output(&mut cmd.stdout, &stdout);
        merge_output(&mut cmd.stderr, &stderr);
        cmd.diagnostics.extend(diags);
        return;
    }

    let mut cmd = Command::new("compile");
    cmd.command_line = command_line;
    cmd.working_directory = failure.working_directory.clone();
    cmd.result = failure.exit_condition;
    cmd.target = failure.target.clone();
    cmd.source = failure.source_file.clone();
    cmd.language = failure.language.clone();
    cmd.target_labels = failure.labels.clone();
    cmd.stdout = stdout;
    cmd.stderr = stderr;
    cmd.diagnostics = diags;
    commands.push(cmd);
}

fn merge_output(existing: &mut String, addition: &str) {
    if addition.is_empty() {
        return;
    }
    if !existing.is_empty() {
        existing.push('\n');
    }
    existing.push_str(addition);
}

fn failure_diagnostics(failure: &Failure) -> Vec<Diagnostic> {
    let stderr = dialect::clean_output(&failure.stderr);
    let mut diags = dialect::parse_output(&failure.source_file, &stderr);

    if diags.is_empty() && failure.exit_condition != 0 {
        diags.push(Diagnostic {
            severity: Severity::error(),
            message: format!("Command finished with exit code {}", failure.exit_condition),
            ..Diagnostic::default()
        });
    }

    // Paths under the machine-local build tree get the placeholder.
    for diag in &mut diags {
        diag.file_path = pathmap::rewrite(&diag.file_path, &failure.working_directory, "");
    }

    diags
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
