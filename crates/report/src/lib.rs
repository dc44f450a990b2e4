// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CTest XML submission parsing.
//!
//! [`parse`] turns one submission document (`Site`, `Update`, or
//! `Done`) into a normalized [`Job`]. Parsing is all-or-nothing: a
//! malformed document produces an error and no partial job.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use relay_core::Job;
use thiserror::Error;

mod attachment;
mod build;
pub mod checkers;
mod configure;
mod coverage;
mod decode;
pub mod dialect;
mod measurement;
mod site;
mod submission;
mod testing;
mod xml;

pub use decode::DecodeError;
pub use xml::XmlError;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("submission is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("unknown root element <{0}>")]
    UnknownRoot(String),
}

/// Parse one complete submission document for `project`.
pub fn parse(body: &[u8], project: &str) -> Result<Job, ParseError> {
    let text = std::str::from_utf8(body)?;
    let mut cur = xml::Cursor::new(text);
    let root = cur.root()?;
    tracing::debug!(root = %root.name, project, "parsing submission");
    match root.name.as_str() {
        "Site" => {
            let raw = submission::read_site(&mut cur, &root)?;
            Ok(site::assemble_site(&raw, project))
        }
        "Update" => {
            let raw = submission::read_update(&mut cur, &root)?;
            Ok(site::assemble_update(&raw, project))
        }
        "Done" => {
            let raw = submission::read_done(&mut cur, &root)?;
            Ok(site::assemble_done(&raw, project))
        }
        other => Err(ParseError::UnknownRoot(other.to_string())),
    }
}
