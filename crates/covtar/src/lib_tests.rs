// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use bzip2::write::BzEncoder;
use bzip2::Compression;
use similar_asserts::assert_eq;

use super::*;

fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let encoder = BzEncoder::new(Vec::new(), Compression::best());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, content.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

const DATA_JSON: &str = r#"{"Binary": "/build/project", "Source": "/src/project/"}"#;

const LIB_GCOV: &str = "        -:    0:Source:/src/project/lib.c\n\
    \x20       -:    1:#include <stdio.h>\n\
    \x20       4:    2:int f(int x) {\n\
    branch  0 taken 75%\n\
    branch  1 taken 0%\n\
    \x20       3:    3:  return x;\n\
    \x20   #####:    4:}\n";

const VENDORED_GCOV: &str = "        -:    0:Source:/opt/vendor/zlib.c\n\
    \x20       7:    1:int z(void) { return 0; }\n";

#[test]
fn gcov_reports_are_rooted_and_filtered() {
    let body = archive(&[
        ("CoverageInfo/data.json", DATA_JSON),
        ("CoverageInfo/lib.c.gcov", LIB_GCOV),
        ("CoverageInfo/zlib.c.gcov", VENDORED_GCOV),
    ]);
    let job = parse(body.as_slice(), "job-1").unwrap();

    assert_eq!(job.job_id, "job-1");
    // The vendored file lies outside the source root and is dropped.
    assert_eq!(job.coverage.len(), 1);
    let file = &job.coverage[0];
    assert_eq!(file.file_path, "lib.c");
    assert_eq!(file.lines, vec![-1, 4, 3, 0]);
    assert_eq!(file.lines_tested, Some(2));
    assert_eq!(file.lines_untested, Some(1));
    assert_eq!(file.branches_tested, Some(1));
    assert_eq!(file.branches_untested, Some(1));
}

#[test]
fn parent_traversal_cannot_escape_the_source_root() {
    let escaping = "        -:    0:Source:/src/project/../../etc/shadow.c\n\
        \x20       4:    1:int s(void) {\n\
        branch  0 taken 0%\n\
        \x20       2:    2:  return 1;\n\
        \x20       1:    3:}\n";
    let body = archive(&[
        ("data.json", DATA_JSON),
        ("shadow.c.gcov", escaping),
        ("lib.c.gcov", LIB_GCOV),
    ]);
    let job = parse(body.as_slice(), "job-1").unwrap();

    // The escaping report and its branch diagnostic both disappear.
    assert_eq!(job.coverage.len(), 1);
    assert_eq!(job.coverage[0].file_path, "lib.c");
    let paths: Vec<&str> = job.commands[0]
        .diagnostics
        .iter()
        .map(|d| d.file_path.as_str())
        .collect();
    assert_eq!(paths, vec!["lib.c"]);
}

#[test]
fn dot_segments_under_the_root_still_resolve() {
    let indirect = "        -:    0:Source:/src/project/./sub/../util.c\n\
        \x20       6:    1:int u(void) { return 0; }\n";
    let body = archive(&[("data.json", DATA_JSON), ("util.c.gcov", indirect)]);
    let job = parse(body.as_slice(), "job-1").unwrap();
    assert_eq!(job.coverage[0].file_path, "util.c");
}

#[test]
fn branch_diagnostics_ride_on_one_coverage_command() {
    let body = archive(&[
        ("data.json", DATA_JSON),
        ("lib.c.gcov", LIB_GCOV),
        ("zlib.c.gcov", VENDORED_GCOV),
    ]);
    let job = parse(body.as_slice(), "job-1").unwrap();

    assert_eq!(job.commands.len(), 1);
    let command = &job.commands[0];
    assert_eq!(command.role, "coverage");
    assert_eq!(command.diagnostics.len(), 1);
    let diag = &command.diagnostics[0];
    assert_eq!(diag.file_path, "lib.c");
    assert_eq!(diag.line, 2);
    assert_eq!(diag.option, "Branch Coverage");
}

#[test]
fn labels_apply_to_surviving_files() {
    let labels = r#"{
        "target": {"name": "lib", "labels": ["Core"]},
        "sources": [{"file": "/src/project/lib.c", "labels": ["Unit"]}]
    }"#;
    let body = archive(&[
        ("data.json", DATA_JSON),
        ("lib/Labels.json", labels),
        ("lib.c.gcov", LIB_GCOV),
    ]);
    let job = parse(body.as_slice(), "job-1").unwrap();
    assert_eq!(job.coverage[0].labels, vec!["Core", "Unit"]);
}

#[test]
fn labels_match_stripped_paths_too() {
    let labels = r#"{
        "target": {"name": "lib", "labels": ["Core"]},
        "sources": [{"file": "lib.c"}]
    }"#;
    let body = archive(&[
        ("data.json", DATA_JSON),
        ("lib/Labels.json", labels),
        ("lib.c.gcov", LIB_GCOV),
    ]);
    let job = parse(body.as_slice(), "job-1").unwrap();
    assert_eq!(job.coverage[0].labels, vec!["Core"]);
}

#[test]
fn missing_data_file_keeps_paths_verbatim() {
    let body = archive(&[("lib.c.gcov", LIB_GCOV)]);
    let job = parse(body.as_slice(), "job-1").unwrap();
    assert_eq!(job.coverage[0].file_path, "/src/project/lib.c");
    assert_eq!(job.commands[0].diagnostics[0].file_path, "/src/project/lib.c");
}

#[test]
fn malformed_metadata_is_an_error() {
    let body = archive(&[("data.json", "{not json")]);
    assert!(matches!(parse(body.as_slice(), "job-1"), Err(ArchiveError::Json(_))));
}

#[test]
fn truncated_archives_error_out() {
    let mut body = archive(&[("lib.c.gcov", LIB_GCOV)]);
    body.truncate(body.len() / 2);
    assert!(parse(body.as_slice(), "job-1").is_err());
}
