// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test and dynamic-analysis section normalization.

use relay_core::Command;

use crate::checkers;
use crate::measurement;
use crate::site::TimedCommands;
use crate::submission::{DynamicAnalysis, Subproject, Test, Testing};

pub fn parse_section(testing: &Testing, subprojects: &[Subproject]) -> TimedCommands {
    let mut ret = TimedCommands::new(testing.start_time, testing.end_time);
    ret.commands = testing.tests.iter().map(|t| test_command(t, subprojects)).collect();
    ret
}

fn test_command(test: &Test, subprojects: &[Subproject]) -> Command {
    let mut cmd = Command::new("test");
    cmd.test_name = test.name.clone();
    cmd.test_status = test.status.clone();
    cmd.command_line = test.command_line.clone();
    cmd.working_directory = test.path.clone();
    cmd.stdout = test.output.clone();
    cmd.target_labels = test.labels.clone();
    measurement::apply_measurements(&test.measurements, &mut cmd);
    if let Some(name) = subproject_for(subprojects, &test.labels) {
        cmd.attributes.insert("Subproject".to_string(), name.to_string());
    }
    cmd
}

fn subproject_for<'a>(subprojects: &'a [Subproject], labels: &[String]) -> Option<&'a str> {
    labels.iter().find_map(|label| {
        subprojects.iter().find(|sub| &sub.label == label).map(|sub| sub.name.as_str())
    })
}

/// Dynamic-analysis runs look like tests, with the checker's defect
/// extraction providing the diagnostics and the defect counts becoming
/// measurements.
pub fn parse_dynamic_analysis(da: &DynamicAnalysis) -> TimedCommands {
    let mut ret = TimedCommands::new(da.start_time, da.end_time);
    ret.commands = da
        .tests
        .iter()
        .map(|t| {
            let mut cmd = Command::new("test");
            cmd.test_name = t.name.clone();
            cmd.test_status = t.status.clone();
            cmd.command_line = t.command_line.clone();
            cmd.stdout = t.log.clone();
            cmd.diagnostics = checkers::parse(&da.checker, &t.log);
            cmd.attributes.insert("DA Checker".to_string(), da.checker.clone());
            for (kind, count) in &t.defects {
                cmd.measurements.insert(kind.clone(), *count as f64);
            }
            cmd
        })
        .collect();
    ret
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod tests;
