/// Parsed MIME envelope with mutable top-level headers
use crate::email::RewriteError;
use crate::email::encoding::{decode_header_text, fold_header, unfold};
use mail_parser::MessageParser;
use std::io::Write;

/// One top-level header field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: String,
    /// Bytes after the colon, folding preserved, terminator stripped
    value: Vec<u8>,
    /// Bytes as received, including the line terminator; `None` once rewritten
    source: Option<Vec<u8>>,
}

impl HeaderField {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unfolded, trimmed value; 8-bit text that is not UTF-8 is read as Windows-1252
    pub fn value(&self) -> String {
        decode_header_text(&unfold(&self.value)).trim().to_string()
    }
}

/// A message split into its header block and an opaque body
///
/// The body (including any multipart tree) is never touched; only header
/// fields that are set through [`MailEnvelope::set_header`] are re-rendered.
#[derive(Debug, Clone)]
pub struct MailEnvelope {
    headers: Vec<HeaderField>,
    body: Vec<u8>,
    line_ending: &'static str,
}

impl MailEnvelope {
    pub fn parse(raw: &[u8]) -> Result<Self, RewriteError> {
        if raw.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(RewriteError::Parse("empty message".to_string()));
        }

        let message = MessageParser::default()
            .parse(raw)
            .ok_or_else(|| RewriteError::Parse("could not read mail parts".to_string()))?;

        if message.root_part().headers.is_empty() {
            return Err(RewriteError::Parse("message has no header section".to_string()));
        }

        let line_ending = match raw.iter().position(|b| *b == b'\n') {
            Some(pos) if pos > 0 && raw[pos - 1] == b'\r' => "\r\n",
            Some(_) => "\n",
            None => "\r\n",
        };
        let (headers, body_start) = split_header_block(raw, line_ending)?;
        if headers.is_empty() {
            return Err(RewriteError::Parse("message has no header section".to_string()));
        }

        tracing::debug!(
            headers = headers.len(),
            parts = message.parts.len(),
            body_bytes = raw.len() - body_start,
            "Parsed mail envelope"
        );

        Ok(Self {
            headers,
            body: raw[body_start..].to_vec(),
            line_ending,
        })
    }

    /// First value of `name` (case-insensitive), unfolded and trimmed
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(HeaderField::value)
    }

    pub fn headers(&self) -> &[HeaderField] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replaces the first `name` field in place and drops later duplicates;
    /// appends the field when absent
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), RewriteError> {
        validate_field_name(name).map_err(|reason| RewriteError::HeaderWrite {
            header: name.to_string(),
            reason,
        })?;

        if let Some(bad) = value.chars().find(|c| matches!(c, '\r' | '\n' | '\0')) {
            return Err(RewriteError::HeaderWrite {
                header: name.to_string(),
                reason: format!("value contains forbidden character {:?}", bad),
            });
        }

        let field = HeaderField {
            name: name.to_string(),
            value: value.as_bytes().to_vec(),
            source: None,
        };

        match self
            .headers
            .iter()
            .position(|h| h.name.eq_ignore_ascii_case(name))
        {
            Some(first) => {
                self.headers[first] = field;
                let mut idx = 0;
                self.headers.retain(|h| {
                    let keep = idx <= first || !h.name.eq_ignore_ascii_case(name);
                    idx += 1;
                    keep
                });
            }
            None => self.headers.push(field),
        }

        Ok(())
    }

    /// Serializes the envelope: untouched fields verbatim, rewritten fields folded
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), RewriteError> {
        let io_err = |e: std::io::Error| RewriteError::Encode(e.to_string());

        for field in &self.headers {
            match &field.source {
                Some(source) => writer.write_all(source).map_err(io_err)?,
                None => {
                    let value = decode_header_text(&field.value);
                    let rendered = fold_header(&field.name, &value, self.line_ending)?;
                    writer.write_all(rendered.as_bytes()).map_err(io_err)?;
                }
            }
        }

        writer
            .write_all(self.line_ending.as_bytes())
            .map_err(io_err)?;
        writer.write_all(&self.body).map_err(io_err)?;
        writer.flush().map_err(io_err)
    }

    pub fn encode(&self) -> Result<Vec<u8>, RewriteError> {
        let mut buf = Vec::with_capacity(self.body.len() + 1024);
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}

/// RFC 5322 field name: printable ASCII except colon
fn validate_field_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty header name".to_string());
    }
    match name.chars().find(|c| !matches!(c, '!'..='9' | ';'..='~')) {
        Some(c) => Err(format!("header name contains invalid character {:?}", c)),
        None => Ok(()),
    }
}

/// Splits the header block into fields; returns the offset where the body starts
fn split_header_block(
    raw: &[u8],
    line_ending: &str,
) -> Result<(Vec<HeaderField>, usize), RewriteError> {
    let mut fields: Vec<HeaderField> = Vec::new();
    let mut pos = 0;

    while pos < raw.len() {
        let line_end = raw[pos..]
            .iter()
            .position(|b| *b == b'\n')
            .map(|i| pos + i + 1)
            .unwrap_or(raw.len());
        let line = &raw[pos..line_end];
        let content = strip_line_ending(line);

        if content.is_empty() {
            return Ok((fields, line_end));
        }

        if content[0] == b' ' || content[0] == b'\t' {
            let field = fields.last_mut().ok_or_else(|| {
                RewriteError::Parse("continuation line before first header".to_string())
            })?;
            if let Some(source) = field.source.as_mut() {
                source.extend_from_slice(line);
                terminate(source, line_ending);
            }
            field.value.push(b'\n');
            field.value.extend_from_slice(content);
        } else {
            let colon = content.iter().position(|b| *b == b':').ok_or_else(|| {
                RewriteError::Parse(format!(
                    "header line without colon: {:?}",
                    String::from_utf8_lossy(&content[..content.len().min(40)])
                ))
            })?;
            // Obsolete syntax allows whitespace between the name and the colon
            let name = String::from_utf8_lossy(content[..colon].trim_ascii_end()).to_string();
            validate_field_name(&name).map_err(|reason| {
                RewriteError::Parse(format!("invalid header field: {}", reason))
            })?;

            let mut source = line.to_vec();
            terminate(&mut source, line_ending);
            fields.push(HeaderField {
                name,
                value: content[colon + 1..].to_vec(),
                source: Some(source),
            });
        }

        pos = line_end;
    }

    // Header-only message without a separating blank line
    Ok((fields, raw.len()))
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Adds a line ending to the last line of a message that lacks one
fn terminate(source: &mut Vec<u8>, line_ending: &str) {
    if !source.ends_with(b"\n") {
        source.extend_from_slice(line_ending.as_bytes());
    }
}
