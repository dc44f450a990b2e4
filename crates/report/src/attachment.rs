// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Attached-file assembly for notes and uploads.

use relay_core::AttachedFile;

use crate::submission::{Note, Upload};

pub fn from_notes(notes: &[Note]) -> Vec<AttachedFile> {
    notes
        .iter()
        .map(|note| AttachedFile {
            name: note.name.clone(),
            filename: basename(&note.name).to_string(),
            mime_type: "text/plain".to_string(),
            content: note.text.clone().into_bytes(),
        })
        .collect()
}

pub fn from_uploads(uploads: &[Upload]) -> Vec<AttachedFile> {
    uploads
        .iter()
        .map(|upload| AttachedFile {
            name: upload.name.clone(),
            filename: basename(&upload.name).to_string(),
            mime_type: sniff_mime(&upload.content).to_string(),
            content: upload.content.clone(),
        })
        .collect()
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Magic-number content sniffing for uploaded files. Uploads carry no
/// declared type; a handful of signatures covers what CI runs actually
/// attach, text falls back on UTF-8 validity.
fn sniff_mime(content: &[u8]) -> &'static str {
    const SIGNATURES: [(&[u8], &str); 6] = [
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF8", "image/gif"),
        (b"%PDF-", "application/pdf"),
        (b"\x1f\x8b", "application/gzip"),
        (b"PK\x03\x04", "application/zip"),
    ];
    for (magic, mime) in SIGNATURES {
        if content.starts_with(magic) {
            return mime;
        }
    }
    if std::str::from_utf8(content).is_ok() {
        "text/plain; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;
