//! Tokenizer for the server-rendered page templates the behaviors run on.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are lowercased.
//! `script`/`style` bodies are raw text; `textarea`/`title` bodies are raw text with
//! character references decoded. This is not an HTML5 state machine: there is no
//! parse-error recovery beyond skipping bytes it cannot make sense of.
use crate::entities::decode_entities;
use crate::types::{Attribute, RawBody, Token, is_void_element, raw_body_kind};
use memchr::memchr;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

/// Tokenize a whole document.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(input);
    let mut out = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        out.push(token);
    }
    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", input.len(), out.len());
    out
}

/// Pull tokenizer over a borrowed input.
///
/// Invariant: `pos` only ever stops on ASCII structural bytes or after ASCII-only runs, so
/// every slice taken from `input` starts and ends on a UTF-8 boundary.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    pending: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: Vec::new(),
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn starts_with_ignore_case(&self, needle: &[u8]) -> bool {
        self.bytes()
            .get(self.pos..self.pos + needle.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(needle))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn take_name(&mut self) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(is_name_byte) {
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    pub fn next_token(&mut self) -> Option<Token> {
        if !self.pending.is_empty() {
            return Some(self.pending.remove(0));
        }
        loop {
            if self.at_end() {
                return None;
            }
            if self.peek() != Some(b'<') {
                if let Some(text) = self.text() {
                    return Some(text);
                }
                continue;
            }
            if self.input[self.pos..].starts_with(COMMENT_OPEN) {
                return Some(self.comment());
            }
            if self.starts_with_ignore_case(b"<!doctype") {
                if let Some(doctype) = self.doctype() {
                    return Some(doctype);
                }
                return None;
            }
            if self.starts_with_ignore_case(b"</") {
                return Some(self.end_tag());
            }
            if self
                .bytes()
                .get(self.pos + 1)
                .is_some_and(|b| b.is_ascii_alphabetic())
            {
                return Some(self.start_tag());
            }
            // A stray `<` that does not open markup is text.
            let start = self.pos;
            self.pos += 1;
            let rest = self.scan_text_end();
            return Some(Token::Text(decode_entities(&self.input[start..rest])));
        }
    }

    fn scan_text_end(&mut self) -> usize {
        let end = memchr(b'<', &self.bytes()[self.pos..])
            .map(|rel| self.pos + rel)
            .unwrap_or(self.input.len());
        self.pos = end;
        end
    }

    fn text(&mut self) -> Option<Token> {
        let start = self.pos;
        let end = self.scan_text_end();
        let decoded = decode_entities(&self.input[start..end]);
        (!decoded.is_empty()).then_some(Token::Text(decoded))
    }

    fn comment(&mut self) -> Token {
        let body_start = self.pos + COMMENT_OPEN.len();
        match self.input[body_start..].find(COMMENT_CLOSE) {
            Some(rel) => {
                self.pos = body_start + rel + COMMENT_CLOSE.len();
                Token::Comment(self.input[body_start..body_start + rel].to_string())
            }
            None => {
                self.pos = self.input.len();
                Token::Comment(self.input[body_start..].to_string())
            }
        }
    }

    fn doctype(&mut self) -> Option<Token> {
        let body_start = self.pos + 2;
        let rel = memchr(b'>', &self.bytes()[body_start..])?;
        self.pos = body_start + rel + 1;
        Some(Token::Doctype(
            self.input[body_start..body_start + rel].trim().to_string(),
        ))
    }

    fn end_tag(&mut self) -> Token {
        self.pos += 2;
        let name = self.take_name().to_ascii_lowercase();
        match memchr(b'>', &self.bytes()[self.pos..]) {
            Some(rel) => self.pos += rel + 1,
            None => self.pos = self.input.len(),
        }
        Token::EndTag(name)
    }

    fn start_tag(&mut self) -> Token {
        self.pos += 1;
        let name = self.take_name().to_ascii_lowercase();
        let mut attributes: Vec<Attribute> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.peek() == Some(b'>') {
                        self.pos += 1;
                        self_closing = true;
                        break;
                    }
                }
                Some(b) if is_name_byte(b) => {
                    let attr_name = self.take_name().to_ascii_lowercase();
                    let value = self.attribute_value();
                    if !attributes.iter().any(|(k, _)| *k == attr_name) {
                        attributes.push((attr_name, value));
                    }
                }
                Some(_) => self.pos += 1,
            }
        }

        if is_void_element(&name) {
            self_closing = true;
        }

        if !self_closing && let Some(kind) = raw_body_kind(&name) {
            self.raw_body(&name, kind);
        }

        Token::StartTag {
            name,
            attributes,
            self_closing,
        }
    }

    fn attribute_value(&mut self) -> Option<String> {
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return None;
        }
        self.pos += 1;
        self.skip_whitespace();

        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                let end = memchr(quote, &self.bytes()[start..])
                    .map(|rel| start + rel)
                    .unwrap_or(self.input.len());
                self.pos = (end + 1).min(self.input.len());
                Some(decode_entities(&self.input[start..end]))
            }
            _ => {
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    if b == b'/' && self.bytes().get(self.pos + 1) == Some(&b'>') {
                        break;
                    }
                    self.pos += 1;
                }
                Some(decode_entities(&self.input[start..self.pos]))
            }
        }
    }

    /// Queue the body and the implicit end tag of a raw-text element.
    fn raw_body(&mut self, name: &str, kind: RawBody) {
        let body_start = self.pos;
        let (body_end, resume) = find_close_tag(&self.input[body_start..], name)
            .map(|(s, e)| (body_start + s, body_start + e))
            .unwrap_or((self.input.len(), self.input.len()));

        let raw = &self.input[body_start..body_end];
        if !raw.is_empty() {
            let text = match kind {
                RawBody::RawText => raw.to_string(),
                RawBody::RcData => decode_entities(raw),
            };
            self.pending.push(Token::Text(text));
        }
        self.pending.push(Token::EndTag(name.to_string()));
        self.pos = resume;
    }
}

/// Locate `</name` followed by optional ASCII whitespace and `>`; returns (start, end) byte offsets.
fn find_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let name = name.as_bytes();
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        let at = i + rel;
        let name_start = at + 2;
        let name_end = name_start + name.len();
        if bytes.get(at + 1) == Some(&b'/')
            && bytes
                .get(name_start..name_end)
                .is_some_and(|s| s.eq_ignore_ascii_case(name))
        {
            let mut k = name_end;
            while bytes.get(k).is_some_and(|b| b.is_ascii_whitespace()) {
                k += 1;
            }
            if bytes.get(k) == Some(&b'>') {
                return Some((at, k + 1));
            }
        }
        i = at + 1;
    }
    None
}
