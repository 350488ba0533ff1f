//! Scanner for `define( 'NAME', VALUE );` statements in PHP source.
//!
//! This is not a PHP parser. It walks the text once, steps over comments,
//! string literals and heredocs, and only tries to read a statement where a
//! `define` call could actually start. Anything that does not have exactly
//! the shape keyword, `(`, quoted name, `,`, value, `)`, `;` is ignored.
//!
//! The input is raw bytes, so files in legacy encodings scan fine. Only the
//! name and value tokens of a statement must be valid UTF-8.

use std::ops::Range;

/// The value token of a `define` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal<'a> {
    /// Unquoted token such as `true` or `E_ALL`.
    Bare(&'a str),
    /// Quoted string; `text` excludes the quotes.
    Quoted { quote: char, text: &'a str },
}

impl<'a> Literal<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Literal::Bare(text) | Literal::Quoted { text, .. } => text,
        }
    }
}

/// A `define` statement located in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'a> {
    /// Byte range from the keyword through the terminating `;`.
    pub span: Range<usize>,
    pub name: &'a str,
    pub value: Literal<'a>,
    /// Byte range of the value token, quotes included.
    pub value_span: Range<usize>,
}

/// Iterator over every `define` statement in document order.
#[derive(Debug, Clone)]
pub struct Statements<'a> {
    src: &'a [u8],
    pos: usize,
}

pub fn statements<S: AsRef<[u8]> + ?Sized>(src: &S) -> Statements<'_> {
    Statements {
        src: src.as_ref(),
        pos: 0,
    }
}

impl<'a> Iterator for Statements<'a> {
    type Item = Statement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.src;

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            let next = bytes.get(self.pos + 1).copied();

            match b {
                b'/' if next == Some(b'/') => self.pos = line_end(bytes, self.pos),
                b'#' => self.pos = line_end(bytes, self.pos),
                b'/' if next == Some(b'*') => {
                    self.pos = find(bytes, self.pos + 2, b"*/").map_or(bytes.len(), |i| i + 2);
                }
                b'\'' | b'"' | b'`' => self.pos = string_end(bytes, self.pos),
                b'<' if bytes[self.pos..].starts_with(b"<<<") => {
                    self.pos = heredoc_end(bytes, self.pos);
                }
                b'$' => self.pos = ident_end(bytes, self.pos + 1),
                _ if is_ident_byte(b) => {
                    let start = self.pos;
                    let end = ident_end(bytes, start);
                    self.pos = end;

                    if !bytes[start..end].eq_ignore_ascii_case(b"define")
                        || is_member_access(bytes, start)
                    {
                        continue;
                    }
                    if let Some(statement) = parse_define(self.src, start, end) {
                        self.pos = statement.span.end;
                        return Some(statement);
                    }
                }
                _ => self.pos += 1,
            }
        }

        None
    }
}

/// Reads the rest of a `define` call whose keyword spans `start..after_keyword`.
fn parse_define(bytes: &[u8], start: usize, after_keyword: usize) -> Option<Statement<'_>> {
    let mut i = expect(bytes, skip_ws(bytes, after_keyword), b'(')?;
    i = skip_ws(bytes, i);

    let (name, name_end) = match quoted(bytes, i)? {
        (Literal::Quoted { text, .. }, end) => (text, end),
        (Literal::Bare(_), _) => return None,
    };

    i = expect(bytes, skip_ws(bytes, name_end), b',')?;
    let value_start = skip_ws(bytes, i);
    let (value, value_end) = match *bytes.get(value_start)? {
        b'\'' | b'"' => quoted(bytes, value_start)?,
        b if b.is_ascii_alphanumeric() || b == b'_' => {
            let end = bare_end(bytes, value_start);
            (Literal::Bare(utf8(&bytes[value_start..end])?), end)
        }
        _ => return None,
    };

    i = expect(bytes, skip_ws(bytes, value_end), b')')?;
    i = expect(bytes, skip_ws(bytes, i), b';')?;

    Some(Statement {
        span: start..i,
        name,
        value,
        value_span: value_start..value_end,
    })
}

/// Reads a single- or double-quoted literal starting at `start`.
fn quoted(bytes: &[u8], start: usize) -> Option<(Literal<'_>, usize)> {
    let quote = *bytes.get(start)?;
    if quote != b'\'' && quote != b'"' {
        return None;
    }
    let end = string_close(bytes, start)?;
    Some((
        Literal::Quoted {
            quote: quote as char,
            text: utf8(&bytes[start + 1..end - 1])?,
        },
        end,
    ))
}

fn utf8(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes).ok()
}

fn expect(bytes: &[u8], i: usize, want: u8) -> Option<usize> {
    (bytes.get(i) == Some(&want)).then_some(i + 1)
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

// Non-ASCII bytes count as identifier bytes, as in PHP.
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn ident_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_ident_byte(bytes[i]) {
        i += 1;
    }
    i
}

fn bare_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    i
}

/// True when the identifier at `start` is a method or static member name.
fn is_member_access(bytes: &[u8], start: usize) -> bool {
    let before = bytes[..start].trim_ascii_end();
    before.ends_with(b"->") || before.ends_with(b"::")
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    find(bytes, from, b"\n").unwrap_or(bytes.len())
}

/// Returns the index just past the closing quote, or the end of input.
fn string_end(bytes: &[u8], start: usize) -> usize {
    string_close(bytes, start).unwrap_or(bytes.len())
}

fn string_close(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

fn heredoc_end(bytes: &[u8], start: usize) -> usize {
    let mut i = skip_ws(bytes, start + 3);
    if matches!(bytes.get(i).copied(), Some(b'\'' | b'"')) {
        i += 1;
    }
    let label_start = i;
    let label_end = ident_end(bytes, label_start);
    if label_end == label_start {
        return start + 3;
    }
    let label = &bytes[label_start..label_end];

    let mut line = line_end(bytes, label_end);
    while line < bytes.len() {
        let body = skip_ws(bytes, line + 1);
        if bytes[body..].starts_with(label)
            && !bytes.get(body + label.len()).is_some_and(|b| is_ident_byte(*b))
        {
            return body + label.len();
        }
        line = line_end(bytes, line + 1);
    }
    bytes.len()
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(src: &str) -> Vec<&str> {
        statements(src).map(|s| s.name).collect()
    }

    #[test]
    fn test_reads_canonical_statement() {
        let src = "<?php\ndefine( 'WP_DEBUG', false );\n";
        let stmt = statements(src).next().unwrap();

        assert_eq!(stmt.name, "WP_DEBUG");
        assert_eq!(stmt.value, Literal::Bare("false"));
        assert_eq!(&src[stmt.span.clone()], "define( 'WP_DEBUG', false );");
        assert_eq!(&src[stmt.value_span.clone()], "false");
    }

    #[test]
    fn test_whitespace_variance() {
        let src = "define('A',true);\nDEFINE (\n\t\"B\" ,\n 'x' ) ;";
        let all: Vec<_> = statements(src).collect();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].value, Literal::Bare("true"));
        assert_eq!(all[1].name, "B");
        assert_eq!(all[1].value, Literal::Quoted { quote: '\'', text: "x" });
        assert_eq!(&src[all[1].span.clone()], "DEFINE (\n\t\"B\" ,\n 'x' ) ;");
    }

    #[test]
    fn test_skips_comments() {
        let src = "// define( 'A', true );\n# define( 'B', true );\n/* define( 'C', true ); */\ndefine( 'D', true );";
        assert_eq!(names(src), vec!["D"]);
    }

    #[test]
    fn test_skips_string_literals() {
        let src = "$s = \"define( 'A', true );\";\n$t = 'it\\'s define( \"B\", 1 );';\ndefine( 'C', 1 );";
        assert_eq!(names(src), vec!["C"]);
    }

    #[test]
    fn test_skips_heredoc() {
        let src = "$h = <<<EOT\ndefine( 'A', true );\nEOT;\n$n = <<<'RAW'\ndefine( 'B', true );\n  RAW;\ndefine( 'C', true );";
        assert_eq!(names(src), vec!["C"]);
    }

    #[test]
    fn test_ignores_methods_and_variables() {
        let src = "$x->define( 'A', 1 );\nFoo::define( 'B', 1 );\n$define( 'C', 1 );\nundefine( 'D', 1 );\n\\define( 'E', 1 );";
        assert_eq!(names(src), vec!["E"]);
    }

    #[test]
    fn test_requires_terminator_and_simple_value() {
        let src = "define( 'A', true )\ndefine( 'B', getenv( 'B' ) );\ndefine( 'C', true, true );\ndefine( 'D', 0 );";
        assert_eq!(names(src), vec!["D"]);
    }

    #[test]
    fn test_unterminated_input_is_safe() {
        assert!(statements("define( 'A', 'open").next().is_none());
        assert!(statements("/* never closed define( 'A', 1 );").next().is_none());
        assert!(statements("define(").next().is_none());
        assert!(statements("").next().is_none());
    }

    #[test]
    fn test_legacy_encoded_bytes_around_statement() {
        let src: &[u8] = b"<?php\n// f\xfcr die Entwicklung\n$s = '\xe9t\xe9';\ndefine( 'WP_DEBUG', false );\n";
        let stmt = statements(src).next().unwrap();

        assert_eq!(stmt.name, "WP_DEBUG");
        assert_eq!(&src[stmt.value_span], b"false");
    }

    #[test]
    fn test_non_utf8_value_is_skipped() {
        let src: &[u8] = b"define( 'A', '\xff' );\ndefine( 'B', 'ok' );";
        let all: Vec<_> = statements(src).collect();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "B");
    }

    #[test]
    fn test_multibyte_text_around_statement() {
        let src = "<?php // café\n$ünï = 'ß';\ndefine( 'WP_DEBUG', true );";
        let stmt = statements(src).next().unwrap();
        assert_eq!(&src[stmt.span], "define( 'WP_DEBUG', true );");
    }
}
