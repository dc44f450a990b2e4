// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic job identity.

use sha2::{Digest, Sha256};

/// Content hash over (project, site, build stamp, build name).
///
/// The same four inputs always yield the same id, so resubmissions of
/// one build's report files all land on one job.
pub fn job_id(project: &str, site: &str, stamp: &str, build: &str) -> String {
    let canonical = format!("{}-{}-{}-{}", project, site, stamp, build);
    format!("{:x}", Sha256::digest(canonical.as_bytes()))
}

#[cfg(test)]
#[path = "job_id_tests.rs"]
mod tests;
