// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized CI job model.
//!
//! One [`Job`] is the full result of a single submission: ordered
//! [`Command`]s, per-file [`Coverage`], and attached files. Entities are
//! created once during parsing and never mutated afterwards; they are
//! owned exclusively by the job they belong to.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Diagnostic severity as an open, forward-compatible tag.
///
/// The upstream report format evolves; unknown severities pass through
/// verbatim rather than failing. The well-known values are `Error`,
/// `Warning`, and `Note`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(String);

impl Severity {
    pub fn error() -> Self {
        Severity("Error".to_string())
    }

    pub fn warning() -> Self {
        Severity("Warning".to_string())
    }

    pub fn note() -> Self {
        Severity("Note".to_string())
    }

    pub fn new(tag: impl Into<String>) -> Self {
        Severity(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_error(&self) -> bool {
        self.0 == "Error"
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One structured message tied to a source location.
///
/// `line == -1` and `column == -1` are sentinels meaning "no specific
/// location" (e.g. exit-code-only synthetic diagnostics). They must not
/// be confused with line 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file_path: String,
    pub line: i64,
    pub column: i64,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    pub option: String,
}

impl Default for Diagnostic {
    fn default() -> Self {
        Diagnostic {
            file_path: String::new(),
            line: -1,
            column: -1,
            severity: Severity::error(),
            message: String::new(),
            option: String::new(),
        }
    }
}

/// One executed step (configure/build/compile/test) with captured
/// output and diagnostics.
///
/// The command line doubles as the reconciliation key within one build
/// section, so it must always be reproducible from stored argument
/// lists (see `relay-report`'s canonicalization).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub command_line: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub working_directory: String,
    pub result: i64,
    /// Open role tag: configure/generate/build/compile/link/test/…
    /// Unknown roles pass through.
    pub role: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Wall time in milliseconds.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub duration: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub test_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub test_status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub config: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attached_files: Vec<AttachedFile>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: BTreeMap<String, f64>,
}

impl Command {
    /// Create an empty command with the given role tag.
    pub fn new(role: impl Into<String>) -> Self {
        Command {
            role: role.into(),
            ..Command::default()
        }
    }
}

/// Per-file coverage: either per-line hit counts or tested/untested
/// summary counters. File paths are always project-relative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub file_path: String,
    /// Per-line hit counts; -1 marks an unexecutable line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_tested: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_untested: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches_tested: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches_untested: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions_tested: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions_untested: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// A file captured alongside a command or job (test attachment, note,
/// upload). Content is carried as base64 in the JSON rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub name: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    pub vendor: String,
    pub vendor_id: String,
    pub family_id: i64,
    pub model_id: i64,
    pub model_name: String,
    pub logical_cores: i64,
    pub physical_cores: i64,
    pub cache_size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Os {
    pub name: String,
    pub release: String,
    pub version: String,
    pub platform: String,
}

/// Submitting machine, as self-reported by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub site: String,
    pub name: String,
    pub cpu: Cpu,
    pub os: Os,
    pub physical_memory: i64,
    pub virtual_memory: i64,
}

/// One normalized CI submission's full result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_group: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub change_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub generator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Host>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_update_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_update_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_configure_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_configure_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_build_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_build_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_test_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_test_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_coverage_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_coverage_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_memcheck_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_memcheck_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coverage: Vec<Coverage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attached_files: Vec<AttachedFile>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub done: bool,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(bytes).serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(de)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
