// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named-measurement routing.
//!
//! CTest reports everything as named measurements; they fan out onto
//! the command as duration, attachments, numeric measurements, or
//! plain string attributes depending on name and declared type.

use relay_core::{AttachedFile, Command};

use crate::submission::Measurement;

pub fn apply_measurements(measurements: &[Measurement], cmd: &mut Command) {
    for m in measurements {
        apply_measurement(m, cmd);
    }
}

pub fn apply_measurement(m: &Measurement, cmd: &mut Command) {
    let value = String::from_utf8_lossy(&m.value);

    // Already carried as the command line itself.
    if m.name == "Command Line" {
        return;
    }

    if m.name == "Execution Time" {
        let secs: f64 = value.trim().parse().unwrap_or(0.0);
        cmd.duration = (secs * 1000.0).round() as i64;
        return;
    }

    if m.kind == "file" {
        cmd.attached_files.push(AttachedFile {
            name: m.name.clone(),
            filename: m.filename.clone(),
            mime_type: "application/octet-stream".to_string(),
            content: m.value.clone(),
        });
        return;
    }

    if m.kind.starts_with("image/") {
        let Some(ext) = image_extension(&m.kind) else {
            return;
        };
        cmd.attached_files.push(AttachedFile {
            name: m.name.clone(),
            filename: format!("{}{ext}", m.name),
            mime_type: m.kind.clone(),
            content: m.value.clone(),
        });
        return;
    }

    if m.kind.starts_with("numeric/") {
        cmd.measurements.insert(m.name.clone(), value.trim().parse().unwrap_or(0.0));
        return;
    }

    cmd.attributes.insert(m.name.clone(), value.into_owned());
}

fn image_extension(mime: &str) -> Option<&'static str> {
    match mime {
        "image/png" => Some(".png"),
        "image/jpeg" => Some(".jpg"),
        "image/gif" => Some(".gif"),
        "image/bmp" => Some(".bmp"),
        "image/tiff" => Some(".tiff"),
        "image/webp" => Some(".webp"),
        "image/svg+xml" => Some(".svg"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "measurement_tests.rs"]
mod tests;
