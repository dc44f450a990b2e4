// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CTest XML submission specs.
//!
//! One full `Site` file through `relay_report::parse`, checked via the
//! JSON rendering.

use similar_asserts::assert_eq;

const SITE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Site BuildName="Linux-Clang" BuildStamp="20260829-0100-Nightly"
      Name="worker-1" Generator="ctest-3.30" ChangeId="42">
  <Configure>
    <StartConfigureTime>1724900000</StartConfigureTime>
    <EndConfigureTime>1724900010</EndConfigureTime>
    <ConfigureCommand>cmake -S . -B build</ConfigureCommand>
    <Log>-- Configuring done
CMake Warning at CMakeLists.txt:12 (message):
  deprecated option

-- Generating done</Log>
    <ConfigureStatus>0</ConfigureStatus>
  </Configure>
  <Build>
    <StartBuildTime>1724900020</StartBuildTime>
    <BuildCommand>make -j4</BuildCommand>
    <Warning>
      <BuildLogLine>5</BuildLogLine>
      <Text>src/app.c:7:3: warning: unused variable 'x' [-Wunused-variable]</Text>
      <SourceFile>src/app.c</SourceFile>
      <SourceLineNumber>7</SourceLineNumber>
      <PreContext></PreContext>
      <PostContext></PostContext>
    </Warning>
    <EndBuildTime>1724900030</EndBuildTime>
  </Build>
  <Testing>
    <StartTestTime>1724900040</StartTestTime>
    <Test Status="passed">
      <Name>unit.app</Name>
      <FullCommandLine>/build/tests/app</FullCommandLine>
      <Results>
        <Measurement><Value>all good</Value></Measurement>
        <NamedMeasurement type="numeric/double" name="Execution Time">
          <Value>0.25</Value>
        </NamedMeasurement>
      </Results>
    </Test>
    <EndTestTime>1724900050</EndTestTime>
  </Testing>
</Site>"#;

#[test]
fn site_submission_normalizes_to_one_job() {
    let job = relay_report::parse(SITE_XML.as_bytes(), "Example").unwrap();
    let expected_id =
        relay_core::job_id("Example", "worker-1", "20260829-0100-Nightly", "Linux-Clang");
    assert_eq!(job.job_id, expected_id);

    let value = serde_json::to_value(&job).unwrap();
    assert_eq!(value["project"], "Example");
    assert_eq!(value["build_name"], "Linux-Clang");
    assert_eq!(value["build_group"], "Nightly");
    assert_eq!(value["change_id"], "42");

    let commands = value["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 3);

    let configure = &commands[0];
    assert_eq!(configure["role"], "configure");
    assert_eq!(configure["command_line"], "cmake -S . -B build");
    assert_eq!(configure["duration"], 10000);
    assert_eq!(configure["attributes"]["Generator"], "ctest-3.30");
    let diag = &configure["diagnostics"][0];
    assert_eq!(diag["file_path"], "CMakeLists.txt");
    assert_eq!(diag["line"], 12);
    assert_eq!(diag["type"], "Warning");
    assert_eq!(diag["option"], "message");
    assert_eq!(diag["message"], "deprecated option");

    let build = &commands[1];
    assert_eq!(build["role"], "build");
    assert_eq!(build["command_line"], "make -j4");
    assert_eq!(build["duration"], 10000);
    let diag = &build["diagnostics"][0];
    assert_eq!(diag["file_path"], "src/app.c");
    assert_eq!(diag["line"], 7);
    assert_eq!(diag["column"], 3);
    assert_eq!(diag["type"], "Warning");
    assert_eq!(diag["message"], "unused variable 'x'");
    assert_eq!(diag["option"], "-Wunused-variable");

    let test = &commands[2];
    assert_eq!(test["role"], "test");
    assert_eq!(test["test_name"], "unit.app");
    assert_eq!(test["test_status"], "passed");
    assert_eq!(test["command_line"], "/build/tests/app");
    assert_eq!(test["stdout"], "all good");
    assert_eq!(test["duration"], 250);

    // Phase windows come from the section timestamps.
    assert!(value["start_configure_time"].is_string());
    assert!(value["end_test_time"].is_string());
    assert!(value.get("start_coverage_time").is_none());
}

#[test]
fn update_submission_records_the_revision() {
    let body = br#"<Update>
        <Site>worker-1</Site>
        <BuildName>Linux-Clang</BuildName>
        <BuildStamp>20260829-0100-Nightly</BuildStamp>
        <StartTime>1724900000</StartTime>
        <EndTime>1724900005</EndTime>
        <Revision>deadbeef</Revision>
      </Update>"#;
    let job = relay_report::parse(body, "Example").unwrap();
    assert_eq!(job.change_id, "deadbeef");
    assert_eq!(
        job.job_id,
        relay_core::job_id("Example", "worker-1", "20260829-0100-Nightly", "Linux-Clang")
    );
}

#[test]
fn done_submission_marks_the_job_finished() {
    let job =
        relay_report::parse(b"<Done><buildId>abc123</buildId></Done>", "Example").unwrap();
    assert_eq!(job.job_id, "abc123");
    assert!(job.done);
}

#[test]
fn unknown_root_elements_are_rejected() {
    assert!(relay_report::parse(b"<Bogus/>", "Example").is_err());
}
