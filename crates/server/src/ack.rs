// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acknowledgement bodies in the shapes CTest expects.

use quick_xml::escape::escape;
use serde::Serialize;

/// Reply to the upload handshake. Per-file checksum verification is
/// not performed; a zero entry tells the client to proceed.
#[derive(Debug, Serialize)]
pub struct UploadHandshake {
    pub status: i64,
    pub datafilesmd5: Vec<i64>,
    pub buildid: String,
}

impl UploadHandshake {
    pub fn proceed(build_id: String) -> Self {
        UploadHandshake { status: 0, datafilesmd5: vec![0], buildid: build_id }
    }
}

pub fn xml_ok(build_id: &str) -> String {
    format!("<cdash><status>OK</status><buildId>{}</buildId></cdash>", escape(build_id))
}

pub fn xml_error(message: &str) -> String {
    format!("<cdash><status>ERROR</status><message>{}</message></cdash>", escape(message))
}

#[cfg(test)]
#[path = "ack_tests.rs"]
mod tests;
