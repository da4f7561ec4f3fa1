//! Reader for PHP translation files of the form `<?php return [ 'key' => 'value' ];`.
//!
//! Only the literal subset that translation files use is understood:
//! short and long array syntax, quoted strings, scalars, string
//! concatenation with `.`, and comments. Anything else (function calls,
//! constants, heredocs) is reported as a parse error with its line.

use std::fmt::{self, Display};

use crate::types::{Group, TranslationNode};

/// Parse failure with the 1-based line where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpError {
    pub line: usize,
    pub message: String,
}

impl Display for PhpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for PhpError {}

/// Parses the array returned by a PHP translation file.
pub fn parse(source: &str) -> Result<TranslationNode, PhpError> {
    let mut parser = PhpParser::new(source);
    parser.parse_file()
}

/// Array keys after PHP's normalisation of numeric strings.
enum ArrayKey {
    Index(i64),
    Name(String),
}

struct PhpParser<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> PhpParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    fn parse_file(&mut self) -> Result<TranslationNode, PhpError> {
        self.skip_trivia()?;
        if self.rest().starts_with("<?php") {
            self.advance_by("<?php".len());
        }

        // Skip `declare(...)`, `namespace ...;`, `use ...;` until `return`.
        loop {
            self.skip_trivia()?;
            if self.at_end() {
                return Err(self.error("expected `return` statement"));
            }
            if self.eat_keyword("return") {
                break;
            }
            self.skip_statement()?;
        }

        let value = self.parse_expr()?;
        self.skip_trivia()?;
        self.eat(';');
        self.skip_trivia()?;
        if self.rest().starts_with("?>") {
            self.advance_by(2);
        }
        Ok(value)
    }

    fn parse_expr(&mut self) -> Result<TranslationNode, PhpError> {
        let first = self.parse_term()?;
        self.skip_trivia()?;
        if self.peek() != Some('.') {
            return Ok(first);
        }

        let mut text = self.expect_text(first)?;
        while self.eat('.') {
            self.skip_trivia()?;
            let next = self.parse_term()?;
            text.push_str(&self.expect_text(next)?);
            self.skip_trivia()?;
        }
        Ok(TranslationNode::Leaf(text))
    }

    fn parse_term(&mut self) -> Result<TranslationNode, PhpError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('\'') => Ok(TranslationNode::Leaf(self.parse_single_quoted()?)),
            Some('"') => Ok(TranslationNode::Leaf(self.parse_double_quoted()?)),
            Some('[') => {
                self.bump();
                self.parse_array_items(']')
            }
            Some('(') => {
                self.bump();
                let inner = self.parse_expr()?;
                self.skip_trivia()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => {
                Ok(TranslationNode::Leaf(self.parse_number()?))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.parse_word();
                match word.to_ascii_lowercase().as_str() {
                    "array" => {
                        self.skip_trivia()?;
                        self.expect('(')?;
                        self.parse_array_items(')')
                    }
                    "true" | "false" => Ok(TranslationNode::Leaf(word.to_ascii_lowercase())),
                    "null" => Ok(TranslationNode::Leaf(String::new())),
                    _ => Err(self.error(format!("unsupported expression `{}`", word))),
                }
            }
            Some('<') if self.rest().starts_with("<<<") => {
                Err(self.error("heredoc strings are not supported"))
            }
            Some(c) => Err(self.error(format!("unexpected character `{}`", c))),
            None => Err(self.error("unexpected end of file")),
        }
    }

    /// Parses items up to `close`; the opening bracket is already consumed.
    fn parse_array_items(&mut self, close: char) -> Result<TranslationNode, PhpError> {
        let mut group = Group::new();
        // `None` once the largest integer key has been used.
        let mut next_index: Option<i64> = Some(0);

        loop {
            self.skip_trivia()?;
            if self.eat(close) {
                break;
            }

            let first = self.parse_expr()?;
            self.skip_trivia()?;
            let (key, value) = if self.rest().starts_with("=>") {
                self.advance_by(2);
                let key = self.expect_text(first)?;
                (normalize_key(key), self.parse_expr()?)
            } else {
                let Some(index) = next_index else {
                    return Err(self.error(
                        "cannot append an item after the largest integer key",
                    ));
                };
                (ArrayKey::Index(index), first)
            };

            let key = match key {
                ArrayKey::Index(index) => {
                    next_index = match (next_index, index.checked_add(1)) {
                        (Some(next), Some(after)) => Some(next.max(after)),
                        _ => None,
                    };
                    index.to_string()
                }
                ArrayKey::Name(name) => name,
            };
            group.insert(key, value);

            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            self.skip_trivia()?;
            self.expect(close)?;
            break;
        }

        Ok(TranslationNode::Group(group))
    }

    fn parse_single_quoted(&mut self) -> Result<String, PhpError> {
        let start_line = self.line;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.peek() {
                    Some(c @ ('\'' | '\\')) => {
                        self.bump();
                        out.push(c);
                    }
                    _ => out.push('\\'),
                },
                Some('\'') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error_at(start_line, "unterminated string")),
            }
        }
    }

    fn parse_double_quoted(&mut self) -> Result<String, PhpError> {
        let start_line = self.line;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => {
                    let escaped = match self.peek() {
                        Some('n') => Some('\n'),
                        Some('t') => Some('\t'),
                        Some('r') => Some('\r'),
                        Some('v') => Some('\u{0B}'),
                        Some('f') => Some('\u{0C}'),
                        Some('e') => Some('\u{1B}'),
                        Some(c @ ('\\' | '$' | '"')) => Some(c),
                        _ => None,
                    };
                    match escaped {
                        Some(c) => {
                            self.bump();
                            out.push(c);
                        }
                        None if self.rest().starts_with("u{") => {
                            out.push(self.parse_unicode_escape()?);
                        }
                        None => out.push('\\'),
                    }
                }
                Some('"') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error_at(start_line, "unterminated string")),
            }
        }
    }

    /// Parses `u{XXXX}` after a backslash.
    fn parse_unicode_escape(&mut self) -> Result<char, PhpError> {
        let Some(close) = self.rest().find('}') else {
            return Err(self.error("unterminated unicode escape"));
        };
        let digits = &self.rest()[2..close];
        let c = u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(format!("invalid unicode escape `\\u{{{}}}`", digits)))?;
        self.advance_by(close + 1);
        Ok(c)
    }

    fn parse_number(&mut self) -> Result<String, PhpError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '.' || c == '_') {
            self.bump();
        }
        let literal = &self.src[start..self.pos];
        let cleaned = literal.trim_start_matches('+').replace('_', "");
        if cleaned.parse::<f64>().is_err() && cleaned.parse::<i64>().is_err() {
            return Err(self.error(format!("invalid number `{}`", literal)));
        }
        Ok(cleaned)
    }

    fn parse_word(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '\\') {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        if !rest
            .get(..keyword.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
        {
            return false;
        }
        let boundary = rest[keyword.len()..].chars().next();
        if matches!(boundary, Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            return false;
        }
        self.advance_by(keyword.len());
        true
    }

    /// Skips a statement up to and including its `;`, honouring strings.
    fn skip_statement(&mut self) -> Result<(), PhpError> {
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(';') => {
                    self.bump();
                    return Ok(());
                }
                Some('\'') => {
                    self.parse_single_quoted()?;
                }
                Some('"') => {
                    self.parse_double_quoted()?;
                }
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.error("expected `return` statement")),
            }
        }
    }

    fn skip_trivia(&mut self) -> Result<(), PhpError> {
        loop {
            let rest = self.rest();
            if rest.starts_with("//") || (rest.starts_with('#') && !rest.starts_with("#[")) {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.bump();
                }
            } else if rest.starts_with("/*") {
                let start_line = self.line;
                let Some(end) = rest[2..].find("*/") else {
                    return Err(self.error_at(start_line, "unterminated comment"));
                };
                self.advance_by(end + 4);
            } else if matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.bump();
            } else {
                return Ok(());
            }
        }
    }

    fn expect_text(&self, node: TranslationNode) -> Result<String, PhpError> {
        match node {
            TranslationNode::Leaf(text) => Ok(text),
            TranslationNode::Group(_) => Err(self.error("expected a string, found an array")),
        }
    }

    fn expect(&mut self, c: char) -> Result<(), PhpError> {
        if self.eat(c) {
            return Ok(());
        }
        match self.peek() {
            Some(found) => Err(self.error(format!("expected `{}`, found `{}`", c, found))),
            None => Err(self.error(format!("expected `{}`, found end of file", c))),
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn advance_by(&mut self, bytes: usize) {
        let end = (self.pos + bytes).min(self.src.len());
        self.line += self.src[self.pos..end].matches('\n').count();
        self.pos = end;
    }

    fn error(&self, message: impl Into<String>) -> PhpError {
        self.error_at(self.line, message)
    }

    fn error_at(&self, line: usize, message: impl Into<String>) -> PhpError {
        PhpError {
            line,
            message: message.into(),
        }
    }
}

/// PHP casts decimal integer strings used as keys to integers.
fn normalize_key(key: String) -> ArrayKey {
    let canonical = key == "0" || (!key.starts_with('0') && !key.starts_with("-0"));
    match key.parse::<i64>() {
        Ok(index) if canonical && !key.starts_with('+') => ArrayKey::Index(index),
        _ => ArrayKey::Name(key),
    }
}
