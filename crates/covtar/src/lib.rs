// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage tarball ingestion.
//!
//! CTest ships gcov output as a bzip2-compressed tar archive holding
//! the `.gcov` text reports plus two JSON sidecars: `data.json` names
//! the source and binary roots of the build, `Labels.json` maps files
//! to subproject labels. The archive is normalized into one [`Job`]
//! carrying a coverage record per source file and a `coverage` command
//! whose diagnostics surface uncovered branches.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::collections::HashMap;
use std::io::Read;

use bzip2::read::BzDecoder;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use relay_core::{pathmap, Command, Coverage, Job};

mod gcov;

/// Errors from reading a coverage archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("malformed archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed archive metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Root directories of the instrumented build, from `data.json`.
#[derive(Debug, Deserialize)]
struct DataFile {
    #[serde(rename = "Source")]
    source: String,
}

/// Label assignments from one target's `Labels.json`.
#[derive(Debug, Deserialize)]
struct LabelsFile {
    target: LabelTarget,
    #[serde(default)]
    sources: Vec<LabelSource>,
}

#[derive(Debug, Deserialize)]
struct LabelTarget {
    #[serde(default)]
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LabelSource {
    file: String,
    #[serde(default)]
    labels: Vec<String>,
}

/// Parse a coverage tarball into a job under the given identity.
///
/// Files outside the source root are discarded; surviving paths are
/// reported relative to it.
pub fn parse(reader: impl Read, job_id: &str) -> Result<Job, ArchiveError> {
    let mut archive = tar::Archive::new(BzDecoder::new(reader));

    let mut source_root = String::new();
    let mut labels: HashMap<String, Vec<String>> = HashMap::new();
    let mut files: Vec<Coverage> = Vec::new();
    let mut command = Command::new("coverage");

    for entry in archive.entries()? {
        let mut entry = entry?;
        let name = entry.path()?.to_string_lossy().into_owned();
        debug!(file = %name, "reading archive entry");

        let base = name.rsplit('/').next().unwrap_or(name.as_str());
        if base == "data.json" {
            let data: DataFile = serde_json::from_reader(&mut entry)?;
            source_root = pathmap::clean(&data.source);
        } else if base == "Labels.json" {
            let file: LabelsFile = serde_json::from_reader(&mut entry)?;
            for source in file.sources {
                let merged = labels.entry(source.file).or_default();
                merged.extend(file.target.labels.iter().cloned());
                merged.extend(source.labels);
            }
        } else if name.ends_with(".gcov") {
            let mut raw = Vec::new();
            entry.read_to_end(&mut raw)?;
            let parsed = gcov::parse(&String::from_utf8_lossy(&raw));
            files.push(parsed.file);
            command.diagnostics.extend(parsed.branches);
        }
    }

    let mut coverage = Vec::new();
    for mut file in files {
        let Some(stripped) = relative_to(&file.file_path, &source_root) else {
            continue;
        };
        if let Some(assigned) =
            labels.get(&file.file_path).or_else(|| labels.get(&stripped))
        {
            file.labels = assigned.clone();
        }
        file.file_path = stripped;
        coverage.push(file);
    }

    let diagnostics = std::mem::take(&mut command.diagnostics);
    command.diagnostics = diagnostics
        .into_iter()
        .filter_map(|mut diag| {
            diag.file_path = relative_to(&diag.file_path, &source_root)?;
            Some(diag)
        })
        .collect();

    Ok(Job {
        job_id: job_id.to_string(),
        commands: vec![command],
        coverage,
        ..Job::default()
    })
}

/// Remainder of `path` under the source root, or `None` when the path
/// lies outside it or would escape it through parent traversal.
/// Archives without a `data.json` carry no root and keep paths verbatim.
fn relative_to(path: &str, source_root: &str) -> Option<String> {
    if source_root.is_empty() {
        return Some(path.to_string());
    }
    pathmap::strip_root(path, source_root)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
