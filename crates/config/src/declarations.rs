//! `NAME = literal` declaration files.
//!
//! The accepted language is the literal subset of Python assignments: strings, numbers,
//! `True`/`False`/`None`, tuples, lists and dicts, plus references to names assigned earlier in
//! the same file.  Only UPPERCASE names become settings; other names may be assigned and
//! referenced but are not returned.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use serde_yaml::Mapping;
use serde_yaml::Number;
use serde_yaml::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    line: usize,
    column: usize,
    message: String,
}

impl ParseError {
    fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for ParseError {}

/// Parse a declarations source into its settings, in first-assignment order.
pub fn parse(text: &str) -> Result<Mapping, ParseError> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        names: Mapping::new(),
    };
    parser.module()
}

/// Whether an assigned name is exported as a setting.
pub fn is_setting_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Str(String),
    Int(i64),
    Float(f64),
    Punct(char),
    Newline,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Name(name) => format!("`{name}`"),
            Token::Str(_) => "a string".to_owned(),
            Token::Int(_) | Token::Float(_) => "a number".to_owned(),
            Token::Punct(c) => format!("`{c}`"),
            Token::Newline => "end of line".to_owned(),
            Token::Eof => "end of file".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Spanned {
    token: Token,
    line: usize,
    column: usize,
}

struct Lexer<'s> {
    chars: Peekable<Chars<'s>>,
    line: usize,
    column: usize,
    depth: usize,
    tokens: Vec<Spanned>,
}

impl<'s> Lexer<'s> {
    fn new(text: &'s str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
            depth: 0,
            tokens: Vec::new(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn bump_if(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn push(&mut self, token: Token, line: usize, column: usize) {
        self.tokens.push(Spanned {
            token,
            line,
            column,
        });
    }

    fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
        loop {
            let (line, column) = (self.line, self.column);
            let Some(&c) = self.chars.peek() else {
                // The last statement ends in a newline too, unless a bracket is still open.
                if self.depth == 0 {
                    self.push(Token::Newline, line, column);
                }
                self.push(Token::Eof, line, column);
                return Ok(self.tokens);
            };
            match c {
                '#' => {
                    while self.chars.peek().is_some_and(|c| *c != '\n') {
                        self.bump();
                    }
                }
                '\n' => {
                    self.bump();
                    if self.depth == 0 {
                        self.push(Token::Newline, line, column);
                    }
                }
                '\\' => {
                    self.bump();
                    self.bump_if('\r');
                    if !self.bump_if('\n') {
                        return Err(ParseError::new(line, column, "unexpected `\\`"));
                    }
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '(' | '[' | '{' => {
                    self.bump();
                    self.depth += 1;
                    self.push(Token::Punct(c), line, column);
                }
                ')' | ']' | '}' => {
                    self.bump();
                    if self.depth == 0 {
                        return Err(ParseError::new(
                            line,
                            column,
                            format!("unmatched `{c}`"),
                        ));
                    }
                    self.depth -= 1;
                    self.push(Token::Punct(c), line, column);
                }
                ',' | ':' | '=' | '-' | '+' | '*' | '.' => {
                    self.bump();
                    self.push(Token::Punct(c), line, column);
                }
                '\'' | '"' => {
                    let value = self.string(false)?;
                    self.push(Token::Str(value), line, column);
                }
                c if c.is_ascii_digit() => {
                    let token = self.number()?;
                    self.push(token, line, column);
                }
                c if c.is_alphabetic() || c == '_' => {
                    let name = self.name();
                    let quoted = matches!(self.chars.peek(), Some('\'' | '"'));
                    match name.as_str() {
                        "r" | "R" if quoted => {
                            let value = self.string(true)?;
                            self.push(Token::Str(value), line, column);
                        }
                        "u" | "U" if quoted => {
                            let value = self.string(false)?;
                            self.push(Token::Str(value), line, column);
                        }
                        _ if quoted => {
                            return Err(ParseError::new(
                                line,
                                column,
                                format!("unsupported string prefix `{name}`"),
                            ));
                        }
                        _ => self.push(Token::Name(name), line, column),
                    }
                }
                other => {
                    return Err(ParseError::new(
                        line,
                        column,
                        format!("unexpected character `{other}`"),
                    ));
                }
            }
        }
    }

    fn name(&mut self) -> String {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            self.bump();
        }
        name
    }

    fn number(&mut self) -> Result<Token, ParseError> {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        let mut is_float = false;
        while let Some(&c) = self.chars.peek() {
            match c {
                '0'..='9' => text.push(c),
                '_' => {}
                '.' if !is_float => {
                    is_float = true;
                    text.push(c);
                }
                'e' | 'E' => {
                    is_float = true;
                    text.push(c);
                    self.bump();
                    if let Some(&sign @ ('+' | '-')) = self.chars.peek() {
                        text.push(sign);
                        self.bump();
                    }
                    continue;
                }
                _ => break,
            }
            self.bump();
        }

        let invalid = || ParseError::new(line, column, format!("invalid number `{text}`"));
        if is_float {
            text.parse::<f64>().map(Token::Float).map_err(|_| invalid())
        } else {
            text.parse::<i64>().map(Token::Int).map_err(|_| invalid())
        }
    }

    fn string(&mut self, raw: bool) -> Result<String, ParseError> {
        let (line, column) = (self.line, self.column);
        let unterminated = || ParseError::new(line, column, "unterminated string");
        let Some(quote) = self.bump() else {
            return Err(unterminated());
        };
        let triple = if self.bump_if(quote) {
            if !self.bump_if(quote) {
                return Ok(String::new());
            }
            true
        } else {
            false
        };

        let mut value = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(unterminated());
            };
            match c {
                c if c == quote => {
                    if !triple {
                        return Ok(value);
                    }
                    if self.bump_if(quote) {
                        if self.bump_if(quote) {
                            return Ok(value);
                        }
                        value.push(quote);
                    }
                    value.push(quote);
                }
                '\n' if !triple => return Err(unterminated()),
                '\\' if raw => {
                    value.push('\\');
                    match self.bump() {
                        Some(escaped) => value.push(escaped),
                        None => return Err(unterminated()),
                    }
                }
                '\\' => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some('\n') => {}
                    Some(escaped @ ('\\' | '\'' | '"')) => value.push(escaped),
                    Some(other) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => return Err(unterminated()),
                },
                c => value.push(c),
            }
        }
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    names: Mapping,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn peek_punct(&self, expected: char) -> bool {
        *self.peek() == Token::Punct(expected)
    }

    fn next(&mut self) -> Spanned {
        let spanned = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        spanned
    }

    fn expect_punct(&mut self, expected: char, context: &str) -> Result<(), ParseError> {
        let Spanned {
            token,
            line,
            column,
        } = self.next();
        if token == Token::Punct(expected) {
            Ok(())
        } else {
            Err(ParseError::new(
                line,
                column,
                format!("expected `{expected}` {context}, found {}", token.describe()),
            ))
        }
    }

    fn module(&mut self) -> Result<Mapping, ParseError> {
        let mut settings = Mapping::new();
        loop {
            let Spanned {
                token,
                line,
                column,
            } = self.next();
            match token {
                Token::Eof => return Ok(settings),
                Token::Newline => {}
                Token::Name(name) => {
                    self.expect_punct('=', &format!("after `{name}`"))?;
                    let value = self.expression_list()?;
                    self.end_of_statement()?;
                    if is_setting_name(&name) {
                        settings.insert(Value::String(name.clone()), value.clone());
                    } else {
                        log::debug!("Skipping non-setting name `{name}`");
                    }
                    self.names.insert(Value::String(name), value);
                }
                other => {
                    return Err(ParseError::new(
                        line,
                        column,
                        format!("expected a setting name, found {}", other.describe()),
                    ));
                }
            }
        }
    }

    fn end_of_statement(&mut self) -> Result<(), ParseError> {
        let Spanned {
            token,
            line,
            column,
        } = self.next();
        match token {
            Token::Newline | Token::Eof => Ok(()),
            other => Err(ParseError::new(
                line,
                column,
                format!("expected end of line, found {}", other.describe()),
            )),
        }
    }

    /// A bare `A = 1, 2` is a tuple.
    fn expression_list(&mut self) -> Result<Value, ParseError> {
        let first = self.expression()?;
        if !self.peek_punct(',') {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.peek_punct(',') {
            self.next();
            if matches!(self.peek(), Token::Newline | Token::Eof) {
                break;
            }
            items.push(self.expression()?);
        }
        Ok(Value::Sequence(items))
    }

    fn expression(&mut self) -> Result<Value, ParseError> {
        let Spanned {
            token,
            line,
            column,
        } = self.next();
        match token {
            Token::Str(mut value) => {
                // Adjacent literals concatenate
                while matches!(self.peek(), Token::Str(_)) {
                    if let Token::Str(more) = self.next().token {
                        value.push_str(&more);
                    }
                }
                Ok(Value::String(value))
            }
            Token::Int(value) => Ok(Value::Number(value.into())),
            Token::Float(value) => Ok(Value::Number(value.into())),
            Token::Punct(sign @ ('-' | '+')) => {
                let operand = self.expression()?;
                signed(sign, operand)
                    .ok_or_else(|| ParseError::new(line, column, format!("`{sign}` needs a number")))
            }
            Token::Name(name) => match name.as_str() {
                "True" => Ok(Value::Bool(true)),
                "False" => Ok(Value::Bool(false)),
                "None" => Ok(Value::Null),
                _ => self
                    .names
                    .get(name.as_str())
                    .cloned()
                    .ok_or_else(|| ParseError::new(line, column, format!("`{name}` is not defined"))),
            },
            Token::Punct('(') => {
                let (mut items, trailing_comma) = self.items(')')?;
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Value::Sequence(items))
                }
            }
            Token::Punct('[') => {
                let (items, _) = self.items(']')?;
                Ok(Value::Sequence(items))
            }
            Token::Punct('{') => self.dict(),
            other => Err(ParseError::new(
                line,
                column,
                format!("expected a value, found {}", other.describe()),
            )),
        }
    }

    fn items(&mut self, close: char) -> Result<(Vec<Value>, bool), ParseError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            if self.peek_punct(close) {
                self.next();
                return Ok((items, trailing_comma));
            }
            items.push(self.expression()?);
            trailing_comma = false;
            let Spanned {
                token,
                line,
                column,
            } = self.next();
            match token {
                Token::Punct(c) if c == close => return Ok((items, trailing_comma)),
                Token::Punct(',') => trailing_comma = true,
                other => {
                    return Err(ParseError::new(
                        line,
                        column,
                        format!("expected `,` or `{close}`, found {}", other.describe()),
                    ));
                }
            }
        }
    }

    fn dict(&mut self) -> Result<Value, ParseError> {
        let mut mapping = Mapping::new();
        loop {
            if self.peek_punct('}') {
                self.next();
                return Ok(Value::Mapping(mapping));
            }
            let (line, column) = (self.tokens[self.pos].line, self.tokens[self.pos].column);
            let key = self.expression()?;
            if key.is_mapping() {
                return Err(ParseError::new(line, column, "dict keys must be scalars"));
            }
            self.expect_punct(':', "after dict key")?;
            let value = self.expression()?;
            mapping.insert(key, value);
            let Spanned {
                token,
                line,
                column,
            } = self.next();
            match token {
                Token::Punct('}') => return Ok(Value::Mapping(mapping)),
                Token::Punct(',') => {}
                other => {
                    return Err(ParseError::new(
                        line,
                        column,
                        format!("expected `,` or `}}`, found {}", other.describe()),
                    ));
                }
            }
        }
    }
}

fn signed(sign: char, operand: Value) -> Option<Value> {
    let Value::Number(number) = operand else {
        return None;
    };
    if sign == '+' {
        return Some(Value::Number(number));
    }
    let negated = if number.is_f64() {
        Number::from(-number.as_f64()?)
    } else {
        Number::from(number.as_i64()?.checked_neg()?)
    };
    Some(Value::Number(negated))
}

#[cfg(test)]
mod test {
    use super::*;

    fn get<'m>(mapping: &'m Mapping, key: &str) -> &'m Value {
        mapping.get(key).unwrap()
    }

    fn pair(label: &str, url: &str) -> Value {
        Value::Sequence(vec![
            Value::String(label.to_owned()),
            Value::String(url.to_owned()),
        ])
    }

    #[test]
    fn parse_site_identity() {
        let text = "AUTHOR = 'Shailesh Kumar'
SITENAME = 'In Digits'
SITEURL = ''

PATH = 'content'
";
        let actual = parse(text).unwrap();
        assert_eq!(actual.len(), 4);
        assert_eq!(get(&actual, "SITENAME"), &Value::String("In Digits".to_owned()));
        assert_eq!(get(&actual, "SITEURL"), &Value::String(String::new()));
    }

    #[test]
    fn parse_preserves_order() {
        let actual = parse("B = 1\nA = 2\nC = 3").unwrap();
        let keys: Vec<_> = actual.keys().map(|k| k.as_str().unwrap()).collect();
        assert_eq!(keys, ["B", "A", "C"]);
    }

    #[test]
    fn parse_tuple_of_pairs() {
        let text = "# Blogroll
LINKS = (
         ('A', 'urlA'),   # first
         ('B', \"urlB\"),
         )
";
        let actual = parse(text).unwrap();
        assert_eq!(
            get(&actual, "LINKS"),
            &Value::Sequence(vec![pair("A", "urlA"), pair("B", "urlB")])
        );
    }

    #[test]
    fn parse_constants() {
        let actual = parse("FEED_ALL_ATOM = None\nDEFAULT_PAGINATION = False\nX = True").unwrap();
        assert_eq!(get(&actual, "FEED_ALL_ATOM"), &Value::Null);
        assert_eq!(get(&actual, "DEFAULT_PAGINATION"), &Value::Bool(false));
        assert_eq!(get(&actual, "X"), &Value::Bool(true));
    }

    #[test]
    fn parse_numbers() {
        let actual = parse("A = 10\nB = -3\nC = 0.5\nD = 1_000\nE = -2.5e1").unwrap();
        assert_eq!(get(&actual, "A").as_i64(), Some(10));
        assert_eq!(get(&actual, "B").as_i64(), Some(-3));
        assert_eq!(get(&actual, "C").as_f64(), Some(0.5));
        assert_eq!(get(&actual, "D").as_i64(), Some(1000));
        assert_eq!(get(&actual, "E").as_f64(), Some(-25.0));
    }

    #[test]
    fn parse_nested_dict() {
        let text = r#"SITEMAP = {
    "format": "xml",
    "priorities": {"articles": 0.5, "indexes": 0.5, "pages": 0.5},
}"#;
        let actual = parse(text).unwrap();
        let sitemap = get(&actual, "SITEMAP").as_mapping().unwrap();
        assert_eq!(sitemap.get("format"), Some(&Value::String("xml".to_owned())));
        let priorities = sitemap.get("priorities").unwrap().as_mapping().unwrap();
        assert_eq!(priorities.get("pages").and_then(Value::as_f64), Some(0.5));
    }

    #[test]
    fn parse_list_of_dicts() {
        let text = r#"PROJECTS = [
    {
        "name": "CR-Sparse",
        "url": "https://github.com/carnotresearch/cr-sparse",
        "description": "Functional models and algorithms "
                       "for sparse signal processing",
    },
]"#;
        let actual = parse(text).unwrap();
        let projects = get(&actual, "PROJECTS").as_sequence().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(
            projects[0].get("description"),
            Some(&Value::String(
                "Functional models and algorithms for sparse signal processing".to_owned()
            ))
        );
    }

    #[test]
    fn parse_parens_without_comma_is_not_a_tuple() {
        let actual = parse("A = ('x')\nB = ('x',)\nC = ()").unwrap();
        assert_eq!(get(&actual, "A"), &Value::String("x".to_owned()));
        assert_eq!(
            get(&actual, "B"),
            &Value::Sequence(vec![Value::String("x".to_owned())])
        );
        assert_eq!(get(&actual, "C"), &Value::Sequence(vec![]));
    }

    #[test]
    fn parse_bare_tuple() {
        let actual = parse("A = 'x', 'y'").unwrap();
        assert_eq!(get(&actual, "A"), &pair("x", "y"));
    }

    #[test]
    fn parse_string_escapes() {
        let actual = parse(r#"A = 'it\'s'
B = "tab\there"
C = r'\d+'
D = '''multi
line'''"#)
        .unwrap();
        assert_eq!(get(&actual, "A"), &Value::String("it's".to_owned()));
        assert_eq!(get(&actual, "B"), &Value::String("tab\there".to_owned()));
        assert_eq!(get(&actual, "C"), &Value::String(r"\d+".to_owned()));
        assert_eq!(get(&actual, "D"), &Value::String("multi\nline".to_owned()));
    }

    #[test]
    fn parse_skips_lowercase_names_but_resolves_them() {
        let actual = parse("base = 'https://indigits.github.io'\nSITEURL = base\nFEED_DOMAIN = SITEURL").unwrap();
        assert_eq!(actual.len(), 2);
        assert!(actual.get("base").is_none());
        assert_eq!(
            get(&actual, "FEED_DOMAIN"),
            &Value::String("https://indigits.github.io".to_owned())
        );
    }

    #[test]
    fn parse_reassignment_replaces() {
        let actual = parse("A = 1\nB = 2\nA = 3").unwrap();
        assert_eq!(get(&actual, "A").as_i64(), Some(3));
        let keys: Vec<_> = actual.keys().map(|k| k.as_str().unwrap()).collect();
        assert_eq!(keys, ["A", "B"]);
    }

    #[test]
    fn parse_line_continuation() {
        let actual = parse("A = \\\n    'x'").unwrap();
        assert_eq!(get(&actual, "A"), &Value::String("x".to_owned()));
    }

    #[test]
    fn parse_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# nothing here\n\n").unwrap().is_empty());
    }

    #[test]
    fn parse_undefined_name() {
        let err = parse("A = 1\nB = MISSING").unwrap_err();
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 5);
        assert_eq!(err.message(), "`MISSING` is not defined");
    }

    #[test]
    fn parse_unterminated_string() {
        let err = parse("SITENAME = 'In Digits").unwrap_err();
        assert_eq!((err.line(), err.column()), (1, 12));
        assert_eq!(err.message(), "unterminated string");
    }

    #[test]
    fn parse_unclosed_bracket() {
        let err = parse("LINKS = (('A', 'urlA'),").unwrap_err();
        assert_eq!(err.message(), "expected a value, found end of file");
    }

    #[test]
    fn parse_unmatched_bracket() {
        let err = parse("A = 1)").unwrap_err();
        assert_eq!(err.message(), "unmatched `)`");
    }

    #[test]
    fn parse_rejects_imports() {
        let err = parse("from pelicanconf import *").unwrap_err();
        assert_eq!(err.line(), 1);
        assert_eq!(err.message(), "expected `=` after `from`, found `pelicanconf`");
    }

    #[test]
    fn parse_rejects_two_values_on_a_line() {
        let err = parse("A = 1 2").unwrap_err();
        assert_eq!(err.message(), "expected end of line, found a number");
    }

    #[test]
    fn parse_error_display() {
        let err = parse("A = ?").unwrap_err();
        assert_eq!(err.to_string(), "unexpected character `?` at line 1, column 5");
    }

    #[test]
    fn setting_names() {
        assert!(is_setting_name("SITENAME"));
        assert!(is_setting_name("FEED_ALL_ATOM"));
        assert!(is_setting_name("H1_TITLE"));
        assert!(!is_setting_name("_PRIVATE"));
        assert!(!is_setting_name("sitename"));
        assert!(!is_setting_name("SiteName"));
        assert!(!is_setting_name(""));
    }
}
