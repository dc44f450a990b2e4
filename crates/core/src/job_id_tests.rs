// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn same_inputs_same_id() {
    let a = job_id("Example", "host1", "20260829-0100-Nightly", "Linux-Clang");
    let b = job_id("Example", "host1", "20260829-0100-Nightly", "Linux-Clang");
    assert_eq!(a, b);
}

#[test]
fn id_is_lowercase_hex() {
    let id = job_id("Example", "host1", "stamp", "build");
    assert_eq!(id.len(), 64);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[yare::parameterized(
    project = { "Other", "host1", "stamp", "build" },
    site = { "Example", "host2", "stamp", "build" },
    stamp = { "Example", "host1", "other", "build" },
    build = { "Example", "host1", "stamp", "other" },
)]
fn any_field_changes_the_id(project: &str, site: &str, stamp: &str, build: &str) {
    let base = job_id("Example", "host1", "stamp", "build");
    assert_ne!(base, job_id(project, site, stamp, build));
}
