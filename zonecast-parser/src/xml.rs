//! XML decoding helpers shared by the document parsers.
//!
//! Device state variables arrive with namespace prefixes (`e:`, `r:`,
//! `dc:`, ...) that would force every serde struct to spell out qualified
//! names. [`parse`] runs a prefix-stripping pre-pass before handing the
//! document to quick-xml, so the models can stay flat.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// Parse an XML document into `T` after stripping namespace prefixes.
pub fn parse<T: DeserializeOwned>(xml: &str) -> ParseResult<T> {
    let stripped = strip_prefixes(xml);
    quick_xml::de::from_str(&stripped)
        .map_err(|e| ParseError::XmlDeserializationFailed(e.to_string()))
}

/// An element whose payload lives in a `val` attribute.
///
/// UPnP state variables inside a LastChange document follow the pattern
/// `<TransportState val="PLAYING"/>`; this wrapper captures it once.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ValAttr {
    #[serde(rename = "@val", default)]
    pub val: String,
}

impl ValAttr {
    /// The attribute value, or `None` when it is empty.
    pub fn non_empty(&self) -> Option<&str> {
        if self.val.is_empty() {
            None
        } else {
            Some(self.val.as_str())
        }
    }
}

/// Remove namespace prefixes from element and attribute names and drop
/// `xmlns` declarations.
///
/// `<e:property><dc:title>x</dc:title></e:property>` becomes
/// `<property><title>x</title></property>`. Text content is copied
/// untouched; quoting inside attribute values is respected.
pub fn strip_prefixes(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let bytes = xml.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            let start = i;
            while i < bytes.len() && bytes[i] != b'<' {
                i += 1;
            }
            out.push_str(&xml[start..i]);
            continue;
        }

        let Some(end) = tag_end(bytes, i + 1) else {
            // Unterminated tag, copy the remainder verbatim.
            out.push_str(&xml[i..]);
            break;
        };

        let tag = &xml[i + 1..end];
        out.push('<');
        if tag.starts_with('?') || tag.starts_with('!') {
            out.push_str(tag);
        } else {
            rewrite_tag(tag, &mut out);
        }
        out.push('>');
        i = end + 1;
    }

    out
}

/// Index of the `>` closing the tag that starts at `from`, honoring quotes.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (offset, &b) in bytes[from..].iter().enumerate() {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(from + offset),
                _ => {}
            },
        }
    }
    None
}

/// Re-emit the inside of a tag with prefixes removed.
fn rewrite_tag(tag: &str, out: &mut String) {
    let body = match tag.strip_prefix('/') {
        Some(rest) => {
            out.push('/');
            rest
        }
        None => tag,
    };
    let self_closing = body.ends_with('/');
    let body = body.strip_suffix('/').unwrap_or(body).trim_end();

    let name_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    out.push_str(local_name(&body[..name_end]));

    let mut rest = &body[name_end..];
    while let Some((name, raw_value, remainder)) = next_attribute(rest) {
        rest = remainder;
        if name == "xmlns" || name.starts_with("xmlns:") {
            continue;
        }
        out.push(' ');
        out.push_str(local_name(name));
        out.push('=');
        out.push_str(raw_value);
    }

    if self_closing {
        out.push('/');
    }
}

/// Split off the next `name="value"` pair; the value keeps its quotes.
fn next_attribute(s: &str) -> Option<(&str, &str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let eq = s.find('=')?;
    let name = s[..eq].trim_end();
    let after = s[eq + 1..].trim_start();
    let quote = after.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let close = after[1..].find(quote)? + 1;
    Some((name, &after[..=close], &after[close + 1..]))
}

fn local_name(qualified: &str) -> &str {
    match qualified.find(':') {
        Some(pos) => &qualified[pos + 1..],
        None => qualified,
    }
}
