//! Term codec: facts to text lines and back
//!
//! Line shape: `predicate(arg1, arg2, ...).` optionally followed by
//! ` % comment`. Strings are single-quoted with `'` doubled; bare atoms
//! (`[a-z][a-zA-Z0-9_]*`) go unquoted. The decoder also accepts legacy
//! hand-authored text: triple-quoted strings (`'''...'''`), double-quoted
//! strings, backslash escapes, and comments placed before the terminal dot.

use thiserror::Error;
use tracing::warn;
use veracity_domain::fact::{canonical_number, is_atom, parse_numeric};
use veracity_domain::{Fact, Value};

/// Starts a comment, both as a whole line and after a fact
pub const COMMENT_MARKER: char = '%';

/// Rule clause separator; lines containing it are never facts
pub const RULE_SEPARATOR: &str = ":-";

const QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';
const TRIPLE_QUOTE: [char; 3] = [QUOTE, QUOTE, QUOTE];
const ESCAPE: char = '\\';

/// Reasons a line cannot be decoded as a fact
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Line is a rule clause
    #[error("rule clauses are not facts")]
    RuleClause,

    /// Missing terminal `.`
    #[error("missing terminating '.'")]
    MissingTerminator,

    /// A quoted string is never closed
    #[error("unbalanced quotes")]
    UnbalancedQuotes,

    /// Argument list is not closed by `)`
    #[error("missing closing parenthesis")]
    MissingParenthesis,

    /// Predicate name is not an atom
    #[error("invalid predicate name: {0}")]
    InvalidPredicate(String),

    /// Unquoted uppercase-leading or `_`-leading token
    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    /// Empty slot between commas
    #[error("empty argument")]
    EmptyArgument,
}

/// Encode a fact as a single line (without trailing newline)
///
/// # Examples
///
/// ```
/// use veracity_domain::{Fact, Value};
/// use veracity_store::term::encode_fact;
///
/// let fact = Fact::new("evaluation", vec![
///     Value::text("it's raining"),
///     Value::text("doubtful"),
///     Value::Number(42.5),
/// ]).with_comment("manual");
///
/// assert_eq!(
///     encode_fact(&fact),
///     "evaluation('it''s raining', doubtful, 42.5). % manual"
/// );
/// ```
pub fn encode_fact(fact: &Fact) -> String {
    let mut line = fact.predicate.clone();

    if !fact.arguments.is_empty() {
        let args: Vec<String> = fact.arguments.iter().map(encode_value).collect();
        line.push('(');
        line.push_str(&args.join(", "));
        line.push(')');
    }
    line.push('.');

    if let Some(comment) = &fact.comment {
        line.push(' ');
        line.push(COMMENT_MARKER);
        line.push(' ');
        line.push_str(comment);
    }

    line
}

/// Encode a single argument value
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => canonical_number(*n),
        Value::Text(s) if is_atom(s) && s != "true" && s != "false" => s.clone(),
        Value::Text(s) => quote_text(s),
    }
}

/// Wrap text in single quotes
///
/// `'` is doubled. Characters that would break the one-line grammar are
/// backslash-escaped, and a leading quote is escaped so the opening cannot
/// be read as a triple quote.
fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(QUOTE);
    for (i, c) in s.chars().enumerate() {
        match c {
            QUOTE if i == 0 => out.push_str("\\'"),
            QUOTE => out.push_str("''"),
            ESCAPE => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push(QUOTE);
    out
}

/// Decode one line
///
/// Returns `Ok(None)` for blank and comment-only lines, `Err` for lines
/// that look like content but are not well-formed facts.
///
/// Comment text after `%` is kept verbatim, minus the one space the
/// encoder writes after the marker.
pub fn decode_line(line: &str) -> Result<Option<Fact>, DecodeError> {
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() || trimmed.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }
    if trimmed.contains(RULE_SEPARATOR) {
        return Err(DecodeError::RuleClause);
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let (code, comment) = split_comment(&chars)?;
    let (code, comment) = strip_terminator(code.trim_end(), comment)?;

    let (predicate, arguments) = parse_term(code.trim())?;
    Ok(Some(Fact {
        predicate,
        arguments,
        comment: comment.filter(|c| !c.is_empty()),
    }))
}

/// Decode every well-formed fact in a document, skipping everything else
pub fn decode_document(text: &str) -> impl Iterator<Item = Fact> + '_ {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| match decode_line(line) {
            Ok(fact) => fact,
            Err(e) => {
                warn!("Skipping line {}: {}", index + 1, e);
                None
            }
        })
}

/// Split at the first `%` outside quotes
fn split_comment(chars: &[char]) -> Result<(String, Option<String>), DecodeError> {
    let mut scanner = QuoteScanner::new(chars);
    while let Some((i, c)) = scanner.next_top_level() {
        if c == COMMENT_MARKER {
            let code: String = chars[..i].iter().collect();
            let comment: String = chars[i + 1..].iter().collect();
            let comment = comment.strip_prefix(' ').unwrap_or(&comment).to_string();
            return Ok((code, Some(comment)));
        }
    }
    if !scanner.is_balanced() {
        return Err(DecodeError::UnbalancedQuotes);
    }
    Ok((chars.iter().collect(), None))
}

/// Remove the terminal `.`
///
/// Accepts both `fact(..). % comment` and the legacy `fact(..) % comment.`
fn strip_terminator(
    code: &str,
    comment: Option<String>,
) -> Result<(&str, Option<String>), DecodeError> {
    if let Some(code) = code.strip_suffix('.') {
        return Ok((code, comment));
    }
    match comment {
        Some(comment) => match comment.trim_end().strip_suffix('.') {
            Some(stripped) => Ok((code, Some(stripped.trim_end().to_string()))),
            None => Err(DecodeError::MissingTerminator),
        },
        None => Err(DecodeError::MissingTerminator),
    }
}

/// Parse `name(args)` or a bare `name`
fn parse_term(code: &str) -> Result<(String, Vec<Value>), DecodeError> {
    let (name, arguments) = match code.find('(') {
        None => (code, Vec::new()),
        Some(open) => {
            let inner = code[open + 1..]
                .strip_suffix(')')
                .ok_or(DecodeError::MissingParenthesis)?;
            (code[..open].trim(), split_arguments(inner)?)
        }
    };

    if !is_atom(name) {
        return Err(DecodeError::InvalidPredicate(name.to_string()));
    }
    Ok((name.to_string(), arguments))
}

/// Split an argument list on top-level commas and unwrap each argument
fn split_arguments(inner: &str) -> Result<Vec<Value>, DecodeError> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let chars: Vec<char> = inner.chars().collect();
    let mut scanner = QuoteScanner::new(&chars);
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;

    while let Some((i, c)) = scanner.next_top_level() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(chars[start..i].iter().collect::<String>());
                start = i + 1;
            }
            _ => {}
        }
    }
    if !scanner.is_balanced() {
        return Err(DecodeError::UnbalancedQuotes);
    }
    pieces.push(chars[start..].iter().collect());

    pieces.iter().map(|p| unwrap_argument(p.trim())).collect()
}

/// Turn one raw argument into a value
fn unwrap_argument(raw: &str) -> Result<Value, DecodeError> {
    let len = raw.chars().count();

    if len >= 6 && raw.starts_with("'''") && raw.ends_with("'''") {
        return Ok(Value::Text(unescape(&raw[3..raw.len() - 3], QUOTE)));
    }
    if len >= 2 && raw.starts_with(QUOTE) && raw.ends_with(QUOTE) {
        return Ok(Value::Text(unescape(&raw[1..raw.len() - 1], QUOTE)));
    }
    if len >= 2 && raw.starts_with(DOUBLE_QUOTE) && raw.ends_with(DOUBLE_QUOTE) {
        return Ok(Value::Text(unescape(&raw[1..raw.len() - 1], DOUBLE_QUOTE)));
    }

    match raw {
        "" => Err(DecodeError::EmptyArgument),
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => {
            if let Some(n) = parse_numeric(raw) {
                return Ok(Value::Number(n));
            }
            match raw.chars().next() {
                Some(c) if c.is_uppercase() || c == '_' => {
                    Err(DecodeError::UnboundVariable(raw.to_string()))
                }
                _ => Ok(Value::Text(raw.to_string())),
            }
        }
    }
}

/// Undouble `quote` and resolve backslash escapes
fn unescape(body: &str, quote: char) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push(ESCAPE),
            },
            c if c == quote && chars.peek() == Some(&quote) => {
                chars.next();
                out.push(quote);
            }
            c => out.push(c),
        }
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Outside,
    Single,
    Triple,
    Double,
}

/// Walks a character slice tracking quote state
///
/// `'''` is checked before `'` whenever no single-quoted string is open.
/// Inside a single-quoted string `''` is an escaped quote, and inside a
/// double-quoted one `""` is; the other quote character is plain text.
/// An escape character suppresses toggling for the next character.
struct QuoteScanner<'a> {
    chars: &'a [char],
    pos: usize,
    state: QuoteState,
}

impl<'a> QuoteScanner<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            pos: 0,
            state: QuoteState::Outside,
        }
    }

    fn is_balanced(&self) -> bool {
        self.state == QuoteState::Outside
    }

    fn at_triple(&self) -> bool {
        self.chars[self.pos..].starts_with(&TRIPLE_QUOTE)
    }

    /// Next character (with its index) that lies outside any quotes
    fn next_top_level(&mut self) -> Option<(usize, char)> {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];

            if c == ESCAPE {
                self.pos += 2;
                continue;
            }

            match self.state {
                QuoteState::Outside => {
                    if self.at_triple() {
                        self.state = QuoteState::Triple;
                        self.pos += 3;
                    } else if c == QUOTE {
                        self.state = QuoteState::Single;
                        self.pos += 1;
                    } else if c == DOUBLE_QUOTE {
                        self.state = QuoteState::Double;
                        self.pos += 1;
                    } else {
                        self.pos += 1;
                        return Some((self.pos - 1, c));
                    }
                }
                QuoteState::Single | QuoteState::Double => {
                    let quote = if self.state == QuoteState::Single {
                        QUOTE
                    } else {
                        DOUBLE_QUOTE
                    };
                    if c == quote {
                        if self.chars.get(self.pos + 1) == Some(&quote) {
                            self.pos += 2;
                        } else {
                            self.state = QuoteState::Outside;
                            self.pos += 1;
                        }
                    } else {
                        self.pos += 1;
                    }
                }
                QuoteState::Triple => {
                    if self.at_triple() {
                        self.state = QuoteState::Outside;
                        self.pos += 3;
                    } else {
                        self.pos += 1;
                    }
                }
            }
        }
        None
    }
}
