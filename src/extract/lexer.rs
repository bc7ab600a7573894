//! Minimal call lexer shared by the PHP and JS extractors.
//!
//! Walks source text tracking comments and string literals, yielding
//! translation function calls with their argument lists. Only plain string
//! literals are captured as argument values; anything else (variables,
//! concatenation, nested calls) is reported as a non-literal argument so
//! the extractor can decide whether to skip the call.

/// Language-specific lexical rules.
pub struct Syntax {
    pub line_comments: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    pub quotes: &'static [u8],
    /// Accept calls through member access, e.g. `wp.i18n.__( ... )`.
    pub member_calls: bool,
}

/// One recognized translation call.
#[derive(Debug, PartialEq)]
pub struct Call {
    pub name: String,
    /// 1-based line of the call site.
    pub line: usize,
    /// Arguments by position; `None` when not a plain string literal.
    pub args: Vec<Option<String>>,
    /// `translators:` comment immediately preceding the call, if any.
    pub comment: Option<String>,
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0, line: 1 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
        }
        Some(byte)
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.text[self.pos..].starts_with(pattern)
    }

    fn advance(&mut self, bytes: usize) {
        for _ in 0..bytes {
            self.bump();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.bump();
        }
    }
}

/// Find all calls to the given functions in `source`.
pub fn find_calls(source: &str, syntax: &Syntax, functions: &[&str]) -> Vec<Call> {
    let mut cursor = Cursor::new(source);
    let mut calls = Vec::new();
    // Most recent translators: comment and the line it ended on.
    let mut pending: Option<(String, usize)> = None;
    // Set while the previous identifier was `function`, so declarations like
    // `function __( $text ) {}` are not mistaken for calls.
    let mut after_function = false;

    while let Some(byte) = cursor.peek() {
        if let Some(marker) = syntax
            .line_comments
            .iter()
            .find(|m| cursor.starts_with(m))
        {
            cursor.advance(marker.len());
            let start = cursor.pos;
            while cursor.peek().is_some_and(|b| b != b'\n') {
                cursor.bump();
            }
            let text = cursor.text[start..cursor.pos].trim();
            if is_translators(text) {
                pending = Some((text.to_string(), cursor.line));
            }
            continue;
        }

        if let Some((open, close)) = syntax.block_comment {
            if cursor.starts_with(open) {
                cursor.advance(open.len());
                let start = cursor.pos;
                while cursor.pos < cursor.text.len() && !cursor.starts_with(close) {
                    cursor.bump();
                }
                let text = clean_block_comment(&cursor.text[start..cursor.pos]);
                cursor.advance(close.len());
                if is_translators(&text) {
                    pending = Some((text, cursor.line));
                }
                continue;
            }
        }

        if syntax.quotes.contains(&byte) {
            read_string(&mut cursor, byte, syntax);
            after_function = false;
            continue;
        }

        if byte == b'_' || byte.is_ascii_alphabetic() {
            let start = cursor.pos;
            while cursor
                .peek()
                .is_some_and(|b| b == b'_' || b.is_ascii_alphanumeric())
            {
                cursor.bump();
            }
            let ident = &cursor.text[start..cursor.pos];
            let before = if start == 0 {
                0
            } else {
                cursor.text.as_bytes()[start - 1]
            };
            let mut rejected = matches!(before, b'$' | b'>' | b':' | b'\\') || after_function;
            if before == b'.' && !syntax.member_calls {
                rejected = true;
            }
            if !rejected && functions.contains(&ident) {
                let line = cursor.line;
                cursor.skip_whitespace();
                if cursor.peek() == Some(b'(') {
                    cursor.bump();
                    let args = parse_args(&mut cursor, syntax);
                    let comment = match pending.take() {
                        Some((text, ended)) if line >= ended && line - ended <= 2 => Some(text),
                        _ => None,
                    };
                    calls.push(Call {
                        name: ident.to_string(),
                        line,
                        args,
                        comment,
                    });
                }
            }
            after_function = ident == "function";
            continue;
        }

        cursor.bump();
        if !byte.is_ascii_whitespace() {
            after_function = false;
        }
    }
    calls
}

/// Parse a call's argument list up to and including the closing paren.
fn parse_args(cursor: &mut Cursor, syntax: &Syntax) -> Vec<Option<String>> {
    let mut args = Vec::new();
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => break,
            Some(b')') => {
                cursor.bump();
                break;
            }
            Some(quote) if syntax.quotes.contains(&quote) => {
                let literal = read_string(cursor, quote, syntax);
                cursor.skip_whitespace();
                match cursor.peek() {
                    Some(b',') => {
                        cursor.bump();
                        args.push(literal);
                    }
                    Some(b')') => {
                        cursor.bump();
                        args.push(literal);
                        break;
                    }
                    _ => {
                        // Concatenation or similar; not a plain literal.
                        args.push(None);
                        if skip_to_arg_end(cursor, syntax) {
                            break;
                        }
                    }
                }
            }
            Some(_) => {
                args.push(None);
                if skip_to_arg_end(cursor, syntax) {
                    break;
                }
            }
        }
    }
    args
}

/// Consume a non-literal argument. Returns true when the call's closing
/// paren was consumed.
fn skip_to_arg_end(cursor: &mut Cursor, syntax: &Syntax) -> bool {
    let mut depth = 0usize;
    while let Some(byte) = cursor.peek() {
        if syntax.quotes.contains(&byte) {
            read_string(cursor, byte, syntax);
            continue;
        }
        match byte {
            b'(' | b'[' | b'{' => depth += 1,
            b')' if depth == 0 => {
                cursor.bump();
                return true;
            }
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                cursor.bump();
                return false;
            }
            _ => {}
        }
        cursor.bump();
    }
    true
}

/// Consume a string literal, returning its unescaped value when it is a
/// plain literal (no interpolation).
fn read_string(cursor: &mut Cursor, quote: u8, syntax: &Syntax) -> Option<String> {
    cursor.bump();
    let mut out = Vec::new();
    let mut literal = true;
    let interpolating = quote != b'\'' && syntax.quotes.contains(&quote);
    while let Some(byte) = cursor.peek() {
        if byte == quote {
            cursor.bump();
            return literal
                .then(|| String::from_utf8(out).ok())
                .flatten();
        }
        if byte == b'\\' {
            cursor.bump();
            let Some(escaped) = cursor.bump() else { break };
            if quote == b'\'' {
                match escaped {
                    b'\\' | b'\'' => out.push(escaped),
                    _ => {
                        out.push(b'\\');
                        out.push(escaped);
                    }
                }
            } else {
                match escaped {
                    b'n' => out.push(b'\n'),
                    b't' => out.push(b'\t'),
                    b'r' => out.push(b'\r'),
                    b'\\' | b'\'' | b'"' | b'`' | b'$' => out.push(escaped),
                    _ => {
                        out.push(b'\\');
                        out.push(escaped);
                    }
                }
            }
            continue;
        }
        if interpolating && byte == b'$' {
            let next = cursor.text.as_bytes().get(cursor.pos + 1);
            if next.is_some_and(|&b| b == b'{' || b == b'_' || b.is_ascii_alphabetic()) {
                literal = false;
            }
        }
        out.push(byte);
        cursor.bump();
    }
    None
}

fn is_translators(text: &str) -> bool {
    let text = text.trim_start();
    text.len() >= 12
        && text.is_char_boundary(12)
        && text[..12].eq_ignore_ascii_case("translators:")
}

/// Strip decoration from a block comment body: per-line leading `*`,
/// surrounding whitespace, joined to a single line.
fn clean_block_comment(body: &str) -> String {
    body.lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
