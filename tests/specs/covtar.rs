// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage tarball submission specs.

use bzip2::write::BzEncoder;
use bzip2::Compression;
use similar_asserts::assert_eq;

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

#[test]
fn coverage_archive_normalizes_to_one_job() {
    let data = r#"{"Binary": "/build/project", "Source": "/src/project"}"#;
    let gcov = "        -:    0:Source:/src/project/app.c\n\
        \x20       -:    1:#include <stdio.h>\n\
        \x20       6:    2:int main(void) {\n\
        branch  0 taken 80%\n\
        branch  1 taken 0%\n\
        \x20       5:    3:  return 0;\n\
        \x20   #####:    4:}\n";
    let body = archive(&[("cov/data.json", data), ("cov/app.c.gcov", gcov)]);

    let job = relay_covtar::parse(body.as_slice(), "job-1").unwrap();
    let value = serde_json::to_value(&job).unwrap();

    assert_eq!(value["job_id"], "job-1");
    let file = &value["coverage"][0];
    assert_eq!(file["file_path"], "app.c");
    assert_eq!(file["lines"], serde_json::json!([-1, 6, 5, 0]));
    assert_eq!(file["lines_tested"], 2);
    assert_eq!(file["lines_untested"], 1);
    assert_eq!(file["branches_tested"], 1);
    assert_eq!(file["branches_untested"], 1);

    let command = &value["commands"][0];
    assert_eq!(command["role"], "coverage");
    let diag = &command["diagnostics"][0];
    assert_eq!(diag["file_path"], "app.c");
    assert_eq!(diag["line"], 2);
    assert_eq!(diag["type"], "Warning");
    assert_eq!(diag["option"], "Branch Coverage");
}

#[test]
fn files_outside_the_source_root_are_dropped() {
    let data = r#"{"Binary": "/build/project", "Source": "/src/project"}"#;
    let vendored = "        -:    0:Source:/opt/vendor/z.c\n\
        \x20       2:    1:int z;\n";
    let body = archive(&[("data.json", data), ("z.c.gcov", vendored)]);
    let job = relay_covtar::parse(body.as_slice(), "job-1").unwrap();
    assert!(job.coverage.is_empty());
}
