// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin event cursor over quick-xml.
//!
//! The CTest vocabulary has open element-name positions (command roles
//! and build diagnostics are keyed by their tag name), so the raw tree
//! is read with an explicit cursor instead of derived deserialization.
//! Callers must fully consume every child they pull, either via
//! [`Cursor::text`], [`Cursor::skip`], or by reading its own children
//! to exhaustion.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors from reading the submission XML.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("no XML element found")]
    NoRootElement,

    #[error("unexpected end of XML input")]
    UnexpectedEof,
}

/// One start tag, detached from the reader.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
}

impl Node {
    fn from_start(start: &BytesStart<'_>, self_closing: bool) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attrs.push((key, value));
        }
        Ok(Node { name, attrs, self_closing })
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn self_closing(&self) -> bool {
        self.self_closing
    }

    /// Attribute value, or `""` when absent.
    pub fn attr(&self, key: &str) -> &str {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Attribute parsed as integer, or 0 when absent or unparsable.
    pub fn attr_i64(&self, key: &str) -> i64 {
        self.attr(key).trim().parse().unwrap_or(0)
    }
}

/// Streaming cursor positioned inside the element most recently
/// returned by [`Cursor::root`] or [`Cursor::child`].
pub struct Cursor<'b> {
    reader: Reader<&'b [u8]>,
}

impl<'b> Cursor<'b> {
    pub fn new(input: &'b str) -> Self {
        Cursor { reader: Reader::from_str(input) }
    }

    /// First start element of the document.
    pub fn root(&mut self) -> Result<Node, XmlError> {
        loop {
            match self.reader.read_event()? {
                Event::Start(start) => return Node::from_start(&start, false),
                Event::Empty(start) => return Node::from_start(&start, true),
                Event::Eof => return Err(XmlError::NoRootElement),
                _ => {}
            }
        }
    }

    /// Next child element of the current element, or `None` once its
    /// closing tag is consumed.
    pub fn child(&mut self) -> Result<Option<Node>, XmlError> {
        loop {
            match self.reader.read_event()? {
                Event::Start(start) => return Ok(Some(Node::from_start(&start, false)?)),
                Event::Empty(start) => return Ok(Some(Node::from_start(&start, true)?)),
                Event::End(_) => return Ok(None),
                Event::Eof => return Err(XmlError::UnexpectedEof),
                _ => {}
            }
        }
    }

    /// Consume `node` and return its direct character data, unescaped.
    /// Nested elements are skipped; their text does not contribute.
    pub fn text(&mut self, node: &Node) -> Result<String, XmlError> {
        if node.self_closing {
            return Ok(String::new());
        }
        let mut out = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(text) => out.push_str(&text.unescape()?),
                Event::CData(cdata) => out.push_str(&String::from_utf8_lossy(&cdata)),
                Event::Start(_) => self.drain()?,
                Event::End(_) => return Ok(out),
                Event::Eof => return Err(XmlError::UnexpectedEof),
                _ => {}
            }
        }
    }

    /// Like [`Cursor::text`], parsed as an integer (0 when empty or
    /// unparsable; absent numeric fields are not an error).
    pub fn text_i64(&mut self, node: &Node) -> Result<i64, XmlError> {
        Ok(self.text(node)?.trim().parse().unwrap_or(0))
    }

    /// Consume `node` without looking at its content.
    pub fn skip(&mut self, node: &Node) -> Result<(), XmlError> {
        if node.self_closing {
            return Ok(());
        }
        self.drain()
    }

    /// Consume events until the end tag matching the already-consumed
    /// start tag.
    fn drain(&mut self) -> Result<(), XmlError> {
        let mut depth = 1usize;
        loop {
            match self.reader.read_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Event::Eof => return Err(XmlError::UnexpectedEof),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "xml_tests.rs"]
mod tests;
