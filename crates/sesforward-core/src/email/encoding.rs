/// Header value encoding: RFC 2047 encoded-words, mailbox formatting and folding
use crate::constants::{ENCODED_WORD_CHUNK_BYTES, HEADER_FOLD_WIDTH, MAX_HEADER_LINE_LENGTH};
use crate::email::RewriteError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use encoding_rs::WINDOWS_1252;
use mail_parser::MessageParser;

const SPECIALS: &[char] = &['(', ')', '<', '>', '[', ']', ':', ';', '@', '\\', ',', '.', '"'];

/// Encodes text as one or more `=?UTF-8?B?...?=` words separated by spaces
pub fn encode_word(text: &str) -> String {
    let mut words = Vec::new();
    let mut chunk_start = 0;
    let mut chunk_end = 0;

    for (idx, ch) in text.char_indices() {
        let next = idx + ch.len_utf8();
        if next - chunk_start > ENCODED_WORD_CHUNK_BYTES && chunk_end > chunk_start {
            words.push(&text[chunk_start..chunk_end]);
            chunk_start = chunk_end;
        }
        chunk_end = next;
    }
    if chunk_end > chunk_start {
        words.push(&text[chunk_start..chunk_end]);
    }

    words
        .into_iter()
        .map(|chunk| format!("=?UTF-8?B?{}?=", STANDARD.encode(chunk.as_bytes())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Encodes an unstructured value (e.g. Subject), leaving ASCII words untouched
///
/// Runs of adjacent non-ASCII words are encoded together so the spaces
/// between them survive decoding. A run next to an encoded-word copied from
/// the input carries the separating space inside its own encoded-word, since
/// decoders drop whitespace between two encoded-words.
pub fn encode_unstructured(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let tokens: Vec<&str> = text.split(' ').collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut idx = 0;

    while idx < tokens.len() {
        if tokens[idx].is_ascii() {
            out.push(tokens[idx].to_string());
            idx += 1;
            continue;
        }

        let start = idx;
        while idx < tokens.len() && !tokens[idx].is_ascii() {
            idx += 1;
        }

        let mut run = tokens[start..idx].join(" ");
        if start > 0 && is_encoded_word(tokens[start - 1]) {
            run.insert(0, ' ');
        }
        if idx < tokens.len() && is_encoded_word(tokens[idx]) {
            run.push(' ');
        }
        out.push(encode_word(&run));
    }

    out.join(" ")
}

fn is_encoded_word(token: &str) -> bool {
    token.len() > 4 && token.starts_with("=?") && token.ends_with("?=")
}

/// Renders an address list (e.g. an original `From`) as ASCII
///
/// Non-ASCII display names become encoded-words; ASCII input is returned
/// as-is. Text that yields no addresses is encoded as unstructured text.
pub fn encode_address_list(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let header_block = format!("From: {}\r\n\r\n", text);
    let mailboxes: Vec<String> = MessageParser::default()
        .parse(header_block.as_bytes())
        .and_then(|message| {
            message.from().map(|from| {
                from.iter()
                    .filter_map(|addr| {
                        addr.address()
                            .map(|address| format_mailbox(addr.name().unwrap_or_default(), address))
                    })
                    .collect()
            })
        })
        .unwrap_or_default();

    if mailboxes.is_empty() {
        encode_unstructured(text)
    } else {
        mailboxes.join(", ")
    }
}

/// Decodes raw header bytes: UTF-8 when valid, otherwise Windows-1252
///
/// Older clients put unlabelled Latin-1 bytes into headers; Windows-1252 is
/// the superset browsers and mail readers assume for them.
pub fn decode_header_text(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_owned(),
        Err(_) => WINDOWS_1252
            .decode_without_bom_handling(raw)
            .0
            .into_owned(),
    }
}

/// Formats `Name <address>`, quoting or encoding the display name as needed
pub fn format_mailbox(name: &str, address: &str) -> String {
    let name = name.trim();

    if name.is_empty() {
        format!("<{}>", address)
    } else if !name.is_ascii() {
        format!("{} <{}>", encode_word(name), address)
    } else if name.contains(SPECIALS) {
        let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\" <{}>", escaped, address)
    } else {
        format!("{} <{}>", name, address)
    }
}

/// Removes folding line breaks from a raw header value
pub fn unfold(value: &[u8]) -> Vec<u8> {
    value
        .iter()
        .copied()
        .filter(|b| *b != b'\r' && *b != b'\n')
        .collect()
}

/// Renders `Name: value` folded at spaces, terminated by `line_ending`
pub fn fold_header(name: &str, value: &str, line_ending: &str) -> Result<String, RewriteError> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = format!("{}:", name);
    let mut has_word = false;

    for token in value.split(' ') {
        // Never start a continuation line with an empty token
        if has_word && !token.is_empty() && current.len() + 1 + token.len() > HEADER_FOLD_WIDTH {
            lines.push(std::mem::take(&mut current));
        }
        current.push(' ');
        current.push_str(token);
        has_word = true;
    }
    lines.push(current);

    if let Some(line) = lines.iter().find(|l| l.len() > MAX_HEADER_LINE_LENGTH) {
        return Err(RewriteError::Encode(format!(
            "{} header line of {} octets cannot be folded below {}",
            name,
            line.len(),
            MAX_HEADER_LINE_LENGTH
        )));
    }

    let mut rendered = lines.join(line_ending);
    rendered.push_str(line_ending);
    Ok(rendered)
}
