// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw submission tree, read element by element.
//!
//! These types mirror the wire format only. Normalization into the job
//! model happens in the section modules (`configure`, `build`,
//! `testing`, `coverage`, `site`). Embedded payloads are decoded here
//! so a corrupt submission fails before any job state exists.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::decode::decode_text;
use crate::xml::{Cursor, Node};
use crate::ParseError;

#[derive(Debug, Default)]
pub struct Done {
    pub build_id: String,
}

#[derive(Debug, Default)]
pub struct Update {
    pub site: String,
    pub build_name: String,
    pub build_stamp: String,
    pub start_time: i64,
    pub end_time: i64,
    pub command: String,
    pub update_type: String,
    pub revision: String,
    pub status: String,
}

#[derive(Debug, Default)]
pub struct Site {
    pub change_id: String,
    pub build_name: String,
    pub build_stamp: String,
    pub name: String,
    pub generator: String,
    pub hostname: String,
    pub os_name: String,
    pub os_release: String,
    pub os_version: String,
    pub os_platform: String,
    pub vendor_string: String,
    pub vendor_id: String,
    pub family_id: i64,
    pub model_id: i64,
    pub model_name: String,
    pub processor_cache_size: i64,
    pub logical_cpus: i64,
    pub physical_cpus: i64,
    pub virtual_memory: i64,
    pub physical_memory: i64,
    pub subprojects: Vec<Subproject>,
    pub configure: Option<Configure>,
    pub build: Option<Build>,
    pub testing: Option<Testing>,
    pub coverage: Option<CoverageSection>,
    pub coverage_log: Option<CoverageLogSection>,
    pub dynamic_analysis: Option<DynamicAnalysis>,
    pub notes: Vec<Note>,
    pub uploads: Vec<Upload>,
}

#[derive(Debug, Default)]
pub struct Subproject {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct Configure {
    pub start_time: i64,
    pub end_time: i64,
    pub command: String,
    pub log: String,
    pub status: i64,
    pub commands: Vec<Invocation>,
}

#[derive(Debug, Default)]
pub struct Build {
    pub start_time: i64,
    pub end_time: i64,
    pub command: String,
    pub diagnostics: Vec<BuildDiagnostic>,
    pub failures: Vec<Failure>,
    pub targets: Vec<Target>,
    pub commands: Vec<Invocation>,
}

/// Global build diagnostic: any element under `<Build>` that is not
/// part of the fixed vocabulary, keyed by its tag name (`Error`,
/// `Warning`, ...).
#[derive(Debug, Default)]
pub struct BuildDiagnostic {
    pub element: String,
    pub log_line: i64,
    pub text: String,
    pub source_file: String,
    pub source_line: i64,
    pub pre_context: String,
    pub post_context: String,
}

#[derive(Debug, Default)]
pub struct Failure {
    pub kind: String,
    pub target: String,
    pub language: String,
    pub source_file: String,
    pub output_file: String,
    pub output_type: String,
    pub working_directory: String,
    pub argv: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    pub exit_condition: i64,
    pub labels: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Target {
    pub name: String,
    pub kind: String,
    pub labels: Vec<String>,
    pub commands: Vec<Invocation>,
}

/// One launcher-reported tool invocation, keyed by its element name
/// (`Compile`, `Link`, `Generate`, `Custom`, ...).
#[derive(Debug, Default)]
pub struct Invocation {
    pub element: String,
    pub command_line: String,
    pub result: i64,
    pub target: String,
    pub target_type: String,
    pub time_start: i64,
    pub duration: i64,
    pub source: String,
    pub language: String,
    pub config: String,
    pub measurements: Vec<Measurement>,
}

impl Invocation {
    /// Command role: the element name with a lowercased first letter.
    pub fn role(&self) -> String {
        let mut chars = self.element.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Measurement {
    pub name: String,
    pub filename: String,
    pub kind: String,
    pub value: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct Testing {
    pub start_time: i64,
    pub end_time: i64,
    pub tests: Vec<Test>,
}

#[derive(Debug, Default)]
pub struct Test {
    pub name: String,
    pub path: String,
    pub full_name: String,
    pub command_line: String,
    pub status: String,
    pub output: String,
    pub measurements: Vec<Measurement>,
    pub labels: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CoverageSection {
    pub start_time: i64,
    pub end_time: i64,
    pub files: Vec<CoverageFile>,
}

#[derive(Debug, Default)]
pub struct CoverageFile {
    pub path: String,
    pub lines_tested: Option<i64>,
    pub lines_untested: Option<i64>,
    pub branches_tested: Option<i64>,
    pub branches_untested: Option<i64>,
    pub functions_tested: Option<i64>,
    pub functions_untested: Option<i64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CoverageLogSection {
    pub start_time: i64,
    pub end_time: i64,
    pub files: Vec<CoverageLogFile>,
}

#[derive(Debug, Default)]
pub struct CoverageLogFile {
    pub path: String,
    pub lines: Vec<i64>,
}

#[derive(Debug, Default)]
pub struct DynamicAnalysis {
    pub checker: String,
    pub start_time: i64,
    pub end_time: i64,
    pub tests: Vec<DynamicAnalysisTest>,
}

#[derive(Debug, Default)]
pub struct DynamicAnalysisTest {
    pub status: String,
    pub name: String,
    pub command_line: String,
    pub log: String,
    pub defects: Vec<(String, i64)>,
}

#[derive(Debug, Default)]
pub struct Note {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Upload {
    pub name: String,
    pub content: Vec<u8>,
}

pub fn read_site(cur: &mut Cursor<'_>, node: &Node) -> Result<Site, ParseError> {
    let mut site = Site {
        change_id: node.attr("ChangeId").to_string(),
        build_name: node.attr("BuildName").to_string(),
        build_stamp: node.attr("BuildStamp").to_string(),
        name: node.attr("Name").to_string(),
        generator: node.attr("Generator").to_string(),
        hostname: node.attr("Hostname").to_string(),
        os_name: node.attr("OSName").to_string(),
        os_release: node.attr("OSRelease").to_string(),
        os_version: node.attr("OSVersion").to_string(),
        os_platform: node.attr("OSPlatform").to_string(),
        vendor_string: node.attr("VendorString").to_string(),
        vendor_id: node.attr("VendorID").to_string(),
        family_id: node.attr_i64("FamilyID"),
        model_id: node.attr_i64("ModelID"),
        model_name: node.attr("ModelName").to_string(),
        processor_cache_size: node.attr_i64("ProcessorCacheSize"),
        logical_cpus: node.attr_i64("NumberOfLogicalCPU"),
        physical_cpus: node.attr_i64("NumberOfPhysicalCPU"),
        virtual_memory: node.attr_i64("TotalVirtualMemory"),
        physical_memory: node.attr_i64("TotalPhysicalMemory"),
        ..Site::default()
    };
    if node.self_closing() {
        return Ok(site);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Subproject" => site.subprojects.push(read_subproject(cur, &child)?),
            "Configure" => site.configure = Some(read_configure(cur, &child)?),
            "Build" => site.build = Some(read_build(cur, &child)?),
            "Testing" => site.testing = Some(read_testing(cur, &child)?),
            "Coverage" => site.coverage = Some(read_coverage(cur, &child)?),
            "CoverageLog" => site.coverage_log = Some(read_coverage_log(cur, &child)?),
            "DynamicAnalysis" => {
                site.dynamic_analysis = Some(read_dynamic_analysis(cur, &child)?)
            }
            "Notes" => read_notes(cur, &child, &mut site.notes)?,
            "Upload" => read_uploads(cur, &child, &mut site.uploads)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(site)
}

pub fn read_update(cur: &mut Cursor<'_>, node: &Node) -> Result<Update, ParseError> {
    let mut update = Update::default();
    if node.self_closing() {
        return Ok(update);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Site" => update.site = cur.text(&child)?,
            "BuildName" => update.build_name = cur.text(&child)?,
            "BuildStamp" => update.build_stamp = cur.text(&child)?,
            "StartTime" => update.start_time = cur.text_i64(&child)?,
            "EndTime" => update.end_time = cur.text_i64(&child)?,
            "UpdateCommand" => update.command = cur.text(&child)?,
            "UpdateType" => update.update_type = cur.text(&child)?,
            "Revision" => update.revision = cur.text(&child)?,
            "UpdateReturnStatus" => update.status = cur.text(&child)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(update)
}

pub fn read_done(cur: &mut Cursor<'_>, node: &Node) -> Result<Done, ParseError> {
    let mut done = Done::default();
    if node.self_closing() {
        return Ok(done);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "buildId" => done.build_id = cur.text(&child)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(done)
}

fn read_subproject(cur: &mut Cursor<'_>, node: &Node) -> Result<Subproject, ParseError> {
    let mut sub = Subproject { name: node.attr("name").to_string(), ..Subproject::default() };
    if node.self_closing() {
        return Ok(sub);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Label" => sub.label = cur.text(&child)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(sub)
}

fn read_configure(cur: &mut Cursor<'_>, node: &Node) -> Result<Configure, ParseError> {
    let mut cfg = Configure::default();
    if node.self_closing() {
        return Ok(cfg);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "StartConfigureTime" => cfg.start_time = cur.text_i64(&child)?,
            "EndConfigureTime" => cfg.end_time = cur.text_i64(&child)?,
            "ConfigureCommand" => cfg.command = cur.text(&child)?,
            "Log" => cfg.log = cur.text(&child)?,
            "ConfigureStatus" => cfg.status = cur.text_i64(&child)?,
            "Commands" => read_invocations(cur, &child, &mut cfg.commands)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(cfg)
}

fn read_build(cur: &mut Cursor<'_>, node: &Node) -> Result<Build, ParseError> {
    let mut build = Build::default();
    if node.self_closing() {
        return Ok(build);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "StartBuildTime" => build.start_time = cur.text_i64(&child)?,
            "EndBuildTime" => build.end_time = cur.text_i64(&child)?,
            "BuildCommand" => build.command = cur.text(&child)?,
            "Failure" => build.failures.push(read_failure(cur, &child)?),
            "Targets" => read_targets(cur, &child, &mut build.targets)?,
            "Commands" => read_invocations(cur, &child, &mut build.commands)?,
            // Bookkeeping elements that must not become diagnostics.
            "StartDateTime" | "EndDateTime" | "Log" | "ElapsedMinutes" => cur.skip(&child)?,
            _ => build.diagnostics.push(read_build_diagnostic(cur, &child)?),
        }
    }
    Ok(build)
}

fn read_build_diagnostic(cur: &mut Cursor<'_>, node: &Node) -> Result<BuildDiagnostic, ParseError> {
    let mut diag =
        BuildDiagnostic { element: node.name.clone(), ..BuildDiagnostic::default() };
    if node.self_closing() {
        return Ok(diag);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "BuildLogLine" => diag.log_line = cur.text_i64(&child)?,
            "Text" => diag.text = cur.text(&child)?,
            "SourceFile" => diag.source_file = cur.text(&child)?,
            "SourceLineNumber" => diag.source_line = cur.text_i64(&child)?,
            "PreContext" => diag.pre_context = cur.text(&child)?,
            "PostContext" => diag.post_context = cur.text(&child)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(diag)
}

fn read_labels(cur: &mut Cursor<'_>, node: &Node, out: &mut Vec<String>) -> Result<(), ParseError> {
    if node.self_closing() {
        return Ok(());
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Label" => out.push(cur.text(&child)?),
            _ => cur.skip(&child)?,
        }
    }
    Ok(())
}

fn read_failure(cur: &mut Cursor<'_>, node: &Node) -> Result<Failure, ParseError> {
    let mut failure = Failure { kind: node.attr("type").to_string(), ..Failure::default() };
    if node.self_closing() {
        return Ok(failure);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Action" => {
                while let Some(field) = cur.child()? {
                    match field.name.as_str() {
                        "TargetName" => failure.target = cur.text(&field)?,
                        "Language" => failure.language = cur.text(&field)?,
                        "SourceFile" => failure.source_file = cur.text(&field)?,
                        "OutputFile" => failure.output_file = cur.text(&field)?,
                        "OutputType" => failure.output_type = cur.text(&field)?,
                        _ => cur.skip(&field)?,
                    }
                }
            }
            "Command" => {
                while let Some(field) = cur.child()? {
                    match field.name.as_str() {
                        "WorkingDirectory" => failure.working_directory = cur.text(&field)?,
                        "Argument" => failure.argv.push(cur.text(&field)?),
                        _ => cur.skip(&field)?,
                    }
                }
            }
            "Result" => {
                while let Some(field) = cur.child()? {
                    match field.name.as_str() {
                        "StdOut" => failure.stdout = cur.text(&field)?,
                        "StdErr" => failure.stderr = cur.text(&field)?,
                        "ExitCondition" => failure.exit_condition = cur.text_i64(&field)?,
                        _ => cur.skip(&field)?,
                    }
                }
            }
            "Labels" => read_labels(cur, &child, &mut failure.labels)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(failure)
}

fn read_targets(cur: &mut Cursor<'_>, node: &Node, out: &mut Vec<Target>) -> Result<(), ParseError> {
    if node.self_closing() {
        return Ok(());
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Target" => {
                let mut target = Target {
                    name: child.attr("name").to_string(),
                    kind: child.attr("type").to_string(),
                    ..Target::default()
                };
                if !child.self_closing() {
                    while let Some(field) = cur.child()? {
                        match field.name.as_str() {
                            "Labels" => read_labels(cur, &field, &mut target.labels)?,
                            "Commands" => read_invocations(cur, &field, &mut target.commands)?,
                            _ => cur.skip(&field)?,
                        }
                    }
                }
                out.push(target);
            }
            _ => cur.skip(&child)?,
        }
    }
    Ok(())
}

fn read_invocations(
    cur: &mut Cursor<'_>,
    node: &Node,
    out: &mut Vec<Invocation>,
) -> Result<(), ParseError> {
    if node.self_closing() {
        return Ok(());
    }
    while let Some(child) = cur.child()? {
        let mut inv = Invocation {
            element: child.name.clone(),
            command_line: child.attr("command").to_string(),
            result: child.attr_i64("result"),
            target: child.attr("target").to_string(),
            target_type: child.attr("targetType").to_string(),
            time_start: child.attr_i64("timeStart"),
            duration: child.attr_i64("duration"),
            source: child.attr("source").to_string(),
            language: child.attr("language").to_string(),
            config: child.attr("config").to_string(),
            ..Invocation::default()
        };
        if !child.self_closing() {
            while let Some(field) = cur.child()? {
                match field.name.as_str() {
                    "NamedMeasurement" => inv.measurements.push(read_measurement(cur, &field)?),
                    _ => cur.skip(&field)?,
                }
            }
        }
        out.push(inv);
    }
    Ok(())
}

fn read_measurement(cur: &mut Cursor<'_>, node: &Node) -> Result<Measurement, ParseError> {
    let mut m = Measurement {
        name: node.attr("name").to_string(),
        filename: node.attr("filename").to_string(),
        kind: node.attr("type").to_string(),
        ..Measurement::default()
    };
    let compression = node.attr("compression").to_string();
    let encoding = node.attr("encoding").to_string();
    if node.self_closing() {
        return Ok(m);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Value" => {
                let text = cur.text(&child)?;
                m.value = crate::decode::decode(&text, &compression, &encoding)?;
            }
            _ => cur.skip(&child)?,
        }
    }
    Ok(m)
}

fn read_testing(cur: &mut Cursor<'_>, node: &Node) -> Result<Testing, ParseError> {
    let mut testing = Testing::default();
    if node.self_closing() {
        return Ok(testing);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "StartTestTime" => testing.start_time = cur.text_i64(&child)?,
            "EndTestTime" => testing.end_time = cur.text_i64(&child)?,
            "Test" => testing.tests.push(read_test(cur, &child)?),
            _ => cur.skip(&child)?,
        }
    }
    Ok(testing)
}

fn read_test(cur: &mut Cursor<'_>, node: &Node) -> Result<Test, ParseError> {
    let mut test = Test { status: node.attr("Status").to_string(), ..Test::default() };
    if node.self_closing() {
        return Ok(test);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Name" => test.name = cur.text(&child)?,
            "Path" => test.path = cur.text(&child)?,
            "FullName" => test.full_name = cur.text(&child)?,
            "FullCommandLine" => test.command_line = cur.text(&child)?,
            "Results" => {
                while let Some(field) = cur.child()? {
                    match field.name.as_str() {
                        "Measurement" => {
                            while let Some(value) = cur.child()? {
                                match value.name.as_str() {
                                    "Value" => {
                                        let text = cur.text(&value)?;
                                        test.output = decode_text(
                                            &text,
                                            value.attr("compression"),
                                            value.attr("encoding"),
                                        )?;
                                    }
                                    _ => cur.skip(&value)?,
                                }
                            }
                        }
                        "NamedMeasurement" => {
                            test.measurements.push(read_measurement(cur, &field)?)
                        }
                        _ => cur.skip(&field)?,
                    }
                }
            }
            "Labels" => read_labels(cur, &child, &mut test.labels)?,
            _ => cur.skip(&child)?,
        }
    }
    Ok(test)
}

fn read_coverage(cur: &mut Cursor<'_>, node: &Node) -> Result<CoverageSection, ParseError> {
    let mut section = CoverageSection::default();
    if node.self_closing() {
        return Ok(section);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "StartTime" => section.start_time = cur.text_i64(&child)?,
            "EndTime" => section.end_time = cur.text_i64(&child)?,
            "File" => {
                let mut file = CoverageFile {
                    path: child.attr("FullPath").to_string(),
                    ..CoverageFile::default()
                };
                if !child.self_closing() {
                    while let Some(field) = cur.child()? {
                        match field.name.as_str() {
                            "LOCTested" => file.lines_tested = Some(cur.text_i64(&field)?),
                            "LOCUnTested" => file.lines_untested = Some(cur.text_i64(&field)?),
                            "BranchesTested" => {
                                file.branches_tested = Some(cur.text_i64(&field)?)
                            }
                            "BranchesUnTested" => {
                                file.branches_untested = Some(cur.text_i64(&field)?)
                            }
                            "FunctionsTested" => {
                                file.functions_tested = Some(cur.text_i64(&field)?)
                            }
                            "FunctionsUnTested" => {
                                file.functions_untested = Some(cur.text_i64(&field)?)
                            }
                            "Labels" => read_labels(cur, &field, &mut file.labels)?,
                            _ => cur.skip(&field)?,
                        }
                    }
                }
                section.files.push(file);
            }
            _ => cur.skip(&child)?,
        }
    }
    Ok(section)
}

fn read_coverage_log(cur: &mut Cursor<'_>, node: &Node) -> Result<CoverageLogSection, ParseError> {
    let mut section = CoverageLogSection::default();
    if node.self_closing() {
        return Ok(section);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "StartTime" => section.start_time = cur.text_i64(&child)?,
            "EndTime" => section.end_time = cur.text_i64(&child)?,
            "File" => {
                let mut file = CoverageLogFile {
                    path: child.attr("FullPath").to_string(),
                    ..CoverageLogFile::default()
                };
                if !child.self_closing() {
                    while let Some(field) = cur.child()? {
                        match field.name.as_str() {
                            "Report" => {
                                while let Some(line) = cur.child()? {
                                    if line.is("Line") {
                                        file.lines.push(line.attr_i64("Count"));
                                    }
                                    cur.skip(&line)?;
                                }
                            }
                            _ => cur.skip(&field)?,
                        }
                    }
                }
                section.files.push(file);
            }
            _ => cur.skip(&child)?,
        }
    }
    Ok(section)
}

fn read_dynamic_analysis(cur: &mut Cursor<'_>, node: &Node) -> Result<DynamicAnalysis, ParseError> {
    let mut da =
        DynamicAnalysis { checker: node.attr("Checker").to_string(), ..DynamicAnalysis::default() };
    if node.self_closing() {
        return Ok(da);
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "StartTestTime" => da.start_time = cur.text_i64(&child)?,
            "EndTestTime" => da.end_time = cur.text_i64(&child)?,
            "Test" => {
                let mut test = DynamicAnalysisTest {
                    status: child.attr("Status").to_string(),
                    ..DynamicAnalysisTest::default()
                };
                if !child.self_closing() {
                    while let Some(field) = cur.child()? {
                        match field.name.as_str() {
                            "Name" => test.name = cur.text(&field)?,
                            "FullCommandLine" => test.command_line = cur.text(&field)?,
                            "Log" => {
                                let text = cur.text(&field)?;
                                test.log = decode_text(
                                    &text,
                                    field.attr("compression"),
                                    field.attr("encoding"),
                                )?;
                            }
                            "Results" => {
                                while let Some(defect) = cur.child()? {
                                    if defect.is("Defect") {
                                        let kind = defect.attr("type").to_string();
                                        let count = cur.text_i64(&defect)?;
                                        test.defects.push((kind, count));
                                    } else {
                                        cur.skip(&defect)?;
                                    }
                                }
                            }
                            _ => cur.skip(&field)?,
                        }
                    }
                }
                da.tests.push(test);
            }
            _ => cur.skip(&child)?,
        }
    }
    Ok(da)
}

fn read_notes(cur: &mut Cursor<'_>, node: &Node, out: &mut Vec<Note>) -> Result<(), ParseError> {
    if node.self_closing() {
        return Ok(());
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "Note" => {
                let mut note = Note { name: child.attr("Name").to_string(), ..Note::default() };
                if !child.self_closing() {
                    while let Some(field) = cur.child()? {
                        match field.name.as_str() {
                            "Text" => note.text = cur.text(&field)?,
                            _ => cur.skip(&field)?,
                        }
                    }
                }
                out.push(note);
            }
            _ => cur.skip(&child)?,
        }
    }
    Ok(())
}

fn read_uploads(cur: &mut Cursor<'_>, node: &Node, out: &mut Vec<Upload>) -> Result<(), ParseError> {
    if node.self_closing() {
        return Ok(());
    }
    while let Some(child) = cur.child()? {
        match child.name.as_str() {
            "File" => {
                let mut upload =
                    Upload { name: child.attr("filename").to_string(), ..Upload::default() };
                if !child.self_closing() {
                    while let Some(field) = cur.child()? {
                        match field.name.as_str() {
                            "Content" => {
                                let text = cur.text(&field)?;
                                upload.content = decode_upload_content(&text)?;
                            }
                            _ => cur.skip(&field)?,
                        }
                    }
                }
                out.push(upload);
            }
            _ => cur.skip(&child)?,
        }
    }
    Ok(())
}

/// CTest pads upload content with 1 to 4 `=` bytes where base64 allows
/// at most 3; one surplus group of four is dropped before decoding.
fn decode_upload_content(text: &str) -> Result<Vec<u8>, ParseError> {
    let filtered: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let trimmed = filtered.strip_suffix("====").unwrap_or(&filtered);
    STANDARD
        .decode(trimmed)
        .map_err(|err| ParseError::Decode(crate::decode::DecodeError::Base64(err)))
}

#[cfg(test)]
#[path = "submission_tests.rs"]
mod tests;
