//! Literal-list input parsing.
//!
//! # Format
//! ```text
//! cards = (
//!     ('What is ownership?', 'A set of compile-time rules.'),
//!     ('What is borrowing?', 'Taking a reference without ownership.'),
//! )
//! ```
//!
//! The text is cleaned (assignment prefix stripped, line endings normalized,
//! common indentation removed, one redundant outer paren layer collapsed) and
//! then evaluated by a restricted literal parser. Only strings, numbers,
//! `True`, `False`, `None`, lists, tuples, and dicts are accepted; names and
//! call expressions are rejected outright, so user input can never execute
//! anything.

use crate::error::{ParseError, Result};
use crate::types::CardPair;

pub(crate) fn parse(raw: &str) -> Result<Vec<CardPair>> {
    let cleaned = clean(raw);
    let value = match eval(&cleaned) {
        Ok(value) => value,
        // Tolerate a bare top-level comma list of pairs by retrying once
        // with an enclosing paren pair. The retry only runs when the first
        // parse failed, and the first error is the one reported.
        Err(first) => {
            let wrapped = format!("({cleaned})");
            eval(&wrapped).map_err(|_| ParseError::MalformedLiteral(first))?
        }
    };
    into_pairs(value)
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

fn clean(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = strip_assignment(&text);
    let text = dedent(text);
    let trimmed = text.trim();
    match strip_double_wrap(trimmed) {
        Some(inner) => inner.to_string(),
        None => trimmed.to_string(),
    }
}

/// Strip a leading `name = ` assignment prefix if present.
fn strip_assignment(text: &str) -> &str {
    let trimmed = text.trim_start();
    let ident_len = trimmed
        .char_indices()
        .take_while(|&(i, c)| {
            if i == 0 {
                c.is_ascii_alphabetic() || c == '_'
            } else {
                c.is_ascii_alphanumeric() || c == '_'
            }
        })
        .count();
    if ident_len == 0 {
        return trimmed;
    }
    let after = trimmed[ident_len..].trim_start();
    if let Some(rest) = after.strip_prefix('=') {
        if !rest.starts_with('=') {
            return rest;
        }
    }
    trimmed
}

/// Remove the longest common leading-whitespace prefix of all non-blank lines.
fn dedent(text: &str) -> String {
    let mut prefix: Option<&str> = None;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = &line[..line.len() - line.trim_start().len()];
        prefix = Some(match prefix {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }

    let prefix = prefix.unwrap_or("");
    if prefix.is_empty() {
        return text.to_string();
    }
    text.lines()
        .map(|line| line.strip_prefix(prefix).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

/// Collapse one outer paren layer when the whole text is doubly wrapped,
/// e.g. `(('Q', 'A'))` becomes `('Q', 'A')`.
fn strip_double_wrap(text: &str) -> Option<&str> {
    let inner = strip_outer_parens(text)?.trim();
    strip_outer_parens(inner).map(|_| inner)
}

/// Return the text inside the outermost parens, but only when the opening
/// paren at position 0 matches the closing paren at the end.
fn strip_outer_parens(text: &str) -> Option<&str> {
    if !(text.starts_with('(') && text.ends_with(')')) {
        return None;
    }

    let mut depth = 0usize;
    let mut in_str: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if let Some(quote) = in_str {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_str = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => in_str = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 && i != text.len() - 1 {
                    return None;
                }
            }
            _ => {}
        }
    }

    Some(&text[1..text.len() - 1])
}

// ---------------------------------------------------------------------------
// Restricted literal evaluator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    Seq(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    fn is_scalar(&self) -> bool {
        !matches!(self, Value::Seq(_) | Value::Map(_))
    }

    /// Textual form of a scalar; containers have none.
    fn into_text(self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(true) => Some("True".to_string()),
            Value::Bool(false) => Some("False".to_string()),
            Value::None => Some("None".to_string()),
            Value::Seq(_) | Value::Map(_) => None,
        }
    }
}

type EvalResult<T> = std::result::Result<T, String>;

fn eval(text: &str) -> EvalResult<Value> {
    let mut reader = Reader { input: text, pos: 0 };
    reader.skip_ws();
    let value = reader.parse_value()?;
    reader.skip_ws();
    if reader.pos != reader.input.len() {
        return Err(format!("unexpected trailing input at byte {}", reader.pos));
    }
    Ok(value)
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_value(&mut self) -> EvalResult<Value> {
        match self.peek() {
            Some('\'') | Some('"') => self.parse_string(),
            Some('(') => self.parse_seq(')'),
            Some('[') => self.parse_seq(']'),
            Some('{') => self.parse_map(),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.parse_keyword(),
            Some(c) => Err(format!("unexpected character {c:?} at byte {}", self.pos)),
            None => Err("unexpected end of input".to_string()),
        }
    }

    fn parse_string(&mut self) -> EvalResult<Value> {
        let quote = self.bump().ok_or("unexpected end of input")?;
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err("unterminated string literal".to_string());
            };
            if c == quote {
                return Ok(Value::Str(out));
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let Some(escape) = self.bump() else {
                return Err("unterminated string literal".to_string());
            };
            match escape {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                '\\' => out.push('\\'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                // line continuation
                '\n' => {}
                // unrecognized escapes keep the backslash, like the source syntax
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
        }
    }

    fn parse_seq(&mut self, close: char) -> EvalResult<Value> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                break;
            }
            if self.peek().is_none() {
                return Err(format!("missing closing {close:?}"));
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {
                    self.bump();
                    break;
                }
                Some(c) => return Err(format!("expected ',' or {close:?}, found {c:?}")),
                None => return Err(format!("missing closing {close:?}")),
            }
        }
        Ok(Value::Seq(items))
    }

    fn parse_map(&mut self) -> EvalResult<Value> {
        self.bump();
        let mut entries = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            let key = self.parse_value()?;
            self.skip_ws();
            if self.peek() != Some(':') {
                return Err("expected ':' in dict literal".to_string());
            }
            self.bump();
            self.skip_ws();
            let value = self.parse_value()?;
            entries.push((key, value));
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                _ => return Err("expected ',' or '}' in dict literal".to_string()),
            }
        }
        Ok(Value::Map(entries))
    }

    fn parse_number(&mut self) -> EvalResult<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.bump();
        }
        let mut saw_digit = false;
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {
                    saw_digit = true;
                    self.bump();
                }
                '.' => {
                    is_float = true;
                    self.bump();
                }
                'e' | 'E' if saw_digit => {
                    is_float = true;
                    self.bump();
                    if matches!(self.peek(), Some('+') | Some('-')) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        let text = &self.input[start..self.pos];
        if !saw_digit {
            return Err(format!("invalid number literal {text:?}"));
        }
        if is_float {
            text.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| format!("invalid number literal {text:?}"))
        } else {
            text.parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("invalid number literal {text:?}"))
        }
    }

    /// Only the three literal keywords are allowed. Any other identifier,
    /// including a would-be function call, is rejected here.
    fn parse_keyword(&mut self) -> EvalResult<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.bump();
        }
        match &self.input[start..self.pos] {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::None),
            word => Err(format!("name {word:?} is not allowed, only literals are accepted")),
        }
    }
}

// ---------------------------------------------------------------------------
// Shape interpretation
// ---------------------------------------------------------------------------

fn into_pairs(value: Value) -> Result<Vec<CardPair>> {
    let Value::Seq(items) = value else {
        return Err(ParseError::InvalidShape(
            "top-level value must be a list or tuple of pairs".to_string(),
        ));
    };

    // A two-element sequence of plain values is a single pair.
    if items.len() == 2 && items.iter().all(Value::is_scalar) {
        return Ok(vec![pair_from(items)?]);
    }

    items
        .into_iter()
        .map(|item| match item {
            Value::Seq(seq) => pair_from(seq),
            _ => Err(ParseError::InvalidShape(
                "every element must be a two-element list or tuple".to_string(),
            )),
        })
        .collect()
}

fn pair_from(seq: Vec<Value>) -> Result<CardPair> {
    if seq.len() != 2 {
        return Err(ParseError::InvalidShape(format!(
            "expected a (front, back) pair, found a sequence of {} elements",
            seq.len()
        )));
    }
    let mut parts = seq.into_iter();
    let front = parts.next().and_then(Value::into_text);
    let back = parts.next().and_then(Value::into_text);
    match (front, back) {
        (Some(front), Some(back)) => Ok(CardPair::new(front, back)),
        _ => Err(ParseError::InvalidShape(
            "pair elements must be plain values, not nested containers".to_string(),
        )),
    }
}
