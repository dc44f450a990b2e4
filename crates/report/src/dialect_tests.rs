// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    gcc_with_option   = { "src/a.c:10:20: warning: unused variable \u{2018}x\u{2019} [-Wunused-variable]",
                          ("src/a.c", 10, 20, "Warning", "unused variable \u{2018}x\u{2019}", "-Wunused-variable") },
    gcc_without_option = { "src/a.c:19:10: error: incompatible types",
                          ("src/a.c", 19, 10, "Error", "incompatible types", "") },
    clang_note        = { "include/b.h:3:1: note: declared here [-Wshadow]",
                          ("include/b.h", 3, 1, "Note", "declared here", "-Wshadow") },
    msvc              = { "C:/path/file.cpp(12): error C2065: undeclared identifier",
                          ("C:/path/file.cpp", 12, -1, "Error", "C:/path/file.cpp(12): error C2065: undeclared identifier", "") },
    msvc_parallel     = { "3>src/main.cpp(7): warning C4100: unreferenced parameter",
                          ("src/main.cpp", 7, -1, "Error", "3>src/main.cpp(7): warning C4100: unreferenced parameter", "") },
    ibm_xl            = { "\"foo.c\", line 5.2: 1506-046 (S) Syntax error.",
                          ("foo.c", 5, -1, "Error", "\"foo.c\", line 5.2: 1506-046 (S) Syntax error.", "") },
    sun_studio        = { "Error, File = bar.cc, Line = 9",
                          ("bar.cc", 9, -1, "Error", "Error, File = bar.cc, Line = 9", "") },
    borland           = { "Warning W8004 src/thing.cpp 10: 'x' is assigned a value that is never used",
                          ("src/thing.cpp", 10, -1, "Error", "Warning W8004 src/thing.cpp 10: 'x' is assigned a value that is never used", "") },
)]
fn dialect_captures(line: &str, expected: (&str, i64, i64, &str, &str, &str)) {
    let diag = extract_diagnostic("", Severity::error(), line);
    assert_eq!(diag.file_path, expected.0);
    assert_eq!(diag.line, expected.1);
    assert_eq!(diag.column, expected.2);
    assert_eq!(diag.severity.as_str(), expected.3);
    assert_eq!(diag.message, expected.4);
    assert_eq!(diag.option, expected.5);
}

#[test]
fn unmatched_line_keeps_defaults() {
    let diag = extract_diagnostic("main.c", Severity::warning(), "collect2: fatal linker oddity");
    assert_eq!(diag.file_path, "main.c");
    assert_eq!(diag.line, -1);
    assert_eq!(diag.column, -1);
    assert_eq!(diag.severity, Severity::warning());
    assert_eq!(diag.message, "collect2: fatal linker oddity");
    assert_eq!(diag.option, "");
}

#[test]
fn absolute_path_collapses_onto_source_file() {
    let diag = extract_diagnostic(
        "Failures/fpe.c",
        Severity::error(),
        "/home/dp/Projects/Example/Failures/fpe.c:19:10: error: incompatible types",
    );
    assert_eq!(diag.file_path, "Failures/fpe.c");
    assert_eq!(diag.line, 19);
}

#[test]
fn clean_output_strips_markers_everywhere() {
    let text = "[CTest: warning matched] a\n[CTest: warning suppressed] b\nplain";
    assert_eq!(clean_output(text), "a\nb\nplain");
}

#[test]
fn parse_output_without_source_file_yields_nothing() {
    assert!(parse_output("", "a.c:1:1: error: broken").is_empty());
}

#[test]
fn parse_output_skips_suppressed_and_unmatched_plain_lines() {
    let out = "[CTest: warning suppressed] a.c:1:1: warning: hidden [-Wall]\n\
               some progress chatter\n\
               a.c:2:3: error: real problem";
    let diags = parse_output("a.c", out);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 2);
    assert_eq!(diags[0].severity, Severity::error());
}

#[test]
fn parse_output_marked_line_always_yields() {
    let diags = parse_output("a.c", "[CTest: warning matched] 3 warnings generated.");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].file_path, "a.c");
    assert_eq!(diags[0].line, -1);
    assert_eq!(diags[0].severity, Severity::warning());
    assert_eq!(diags[0].message, "3 warnings generated.");
}

// gcc output as CTest stores it in a failure record, after marker
// cleanup. Mixed matched warnings and a plain error line.
#[test]
fn parse_output_gcc_failure_log() {
    let stderr = "/home/dp/Projects/Example/Failures/fpe.c: In function \u{2018}main\u{2019}:\n\
/home/dp/Projects/Example/Failures/fpe.c:10:20: warning: format \u{2018}%d\u{2019} expects \u{2018}int\u{2019} [-Wformat=]\n\
   10 |   printf(\"Result: %d\\n\", result);\n\
/home/dp/Projects/Example/Failures/fpe.c:19:10: error: incompatible types when returning\n\
   19 |   return nullptr;\n\
/home/dp/Projects/Example/Failures/fpe.c:7:7: warning: unused variable \u{2018}unusedVar\u{2019} [-Wunused-variable]";
    let diags = parse_output("Failures/fpe.c", stderr);
    assert_eq!(diags.len(), 3);
    for diag in &diags {
        assert_eq!(diag.file_path, "Failures/fpe.c");
    }
    assert_eq!(diags[0].line, 10);
    assert_eq!(diags[0].severity, Severity::warning());
    assert_eq!(diags[0].option, "-Wformat=");
    assert_eq!(diags[1].line, 19);
    assert_eq!(diags[1].severity, Severity::error());
    assert_eq!(diags[2].line, 7);
    assert_eq!(diags[2].option, "-Wunused-variable");
}

// clazy log where warnings land in a header included from the anchored
// source file. The shared prefix of the anchored file is removed from
// every path.
#[test]
fn parse_output_strips_cross_file_source_prefix() {
    let stderr = "In file included from /source/src/util.cpp:6:\n\
/source/include/util.h:135:1: warning: mp::UnlockGuard has dtor but not copy-ctor [-Wclazy-rule-of-three]\n\
  135 | struct UnlockGuard\n\
/source/src/util.cpp:82:22: warning: Pass small type by value [-Wclazy-function-args-by-value]";
    let diags = parse_output("src/util.cpp", stderr);
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].file_path, "include/util.h");
    assert_eq!(diags[0].line, 135);
    assert_eq!(diags[1].file_path, "src/util.cpp");
    assert_eq!(diags[1].line, 82);
}

// The same input always maps to the same diagnostic, whichever
// thread asks first.
#[test]
fn extraction_is_deterministic() {
    let line = "src/a.c:10:20: warning: unused variable [-Wunused-variable]";
    let first = extract_diagnostic("src/a.c", Severity::error(), line);
    let again = extract_diagnostic("src/a.c", Severity::error(), line);
    let threaded = std::thread::spawn(move || {
        extract_diagnostic("src/a.c", Severity::error(), line)
    })
    .join()
    .unwrap();
    assert_eq!(first, again);
    assert_eq!(first, threaded);
}
