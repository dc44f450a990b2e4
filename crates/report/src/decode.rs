// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload decoding for inline submission content.
//!
//! CTest marks embedded blobs with `encoding` and `compression`
//! attributes. The `gzip` compression label actually carries a raw
//! zlib stream; `tar/gzip` is a gzip-compressed tar archive of which
//! only the first file entry matters.

use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::{GzDecoder, ZlibDecoder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("corrupt compressed payload: {0}")]
    Decompress(#[from] std::io::Error),

    #[error("compressed archive contains no file")]
    EmptyArchive,
}

/// Decode an inline payload according to its declared `encoding` and
/// `compression`. Unknown labels pass the payload through unchanged.
pub fn decode(content: &str, compression: &str, encoding: &str) -> Result<Vec<u8>, DecodeError> {
    let raw = if encoding == "base64" {
        let filtered: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD.decode(filtered)?
    } else {
        content.as_bytes().to_vec()
    };

    match compression {
        "gzip" => {
            let mut out = Vec::new();
            ZlibDecoder::new(raw.as_slice()).read_to_end(&mut out)?;
            Ok(out)
        }
        "tar/gzip" => {
            let mut archive = tar::Archive::new(GzDecoder::new(raw.as_slice()));
            for entry in archive.entries()? {
                let mut entry = entry?;
                if entry.header().entry_type().is_file() {
                    let mut out = Vec::new();
                    entry.read_to_end(&mut out)?;
                    return Ok(out);
                }
            }
            Err(DecodeError::EmptyArchive)
        }
        _ => Ok(raw),
    }
}

/// [`decode`] followed by lossy UTF-8 conversion, for log text.
pub fn decode_text(content: &str, compression: &str, encoding: &str) -> Result<String, DecodeError> {
    Ok(String::from_utf8_lossy(&decode(content, compression, encoding)?).into_owned())
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
