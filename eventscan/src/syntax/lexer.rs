//! Lossless C# tokenizer.
//!
//! Whitespace, comments and preprocessor lines become the leading trivia of the
//! next token. Trivia after the last token is not attached to anything; the tree
//! keeps the full source text for it.

use super::kind::SyntaxKind;
use super::tree::SyntaxToken;
use text_size::{TextRange, TextSize};

/// Multi-character punctuation, longest first.
const OPERATORS: &[(&str, SyntaxKind)] = &[
    ("??=", SyntaxKind::CompoundAssign),
    ("<<=", SyntaxKind::CompoundAssign),
    (">>=", SyntaxKind::CompoundAssign),
    ("::", SyntaxKind::ColonColon),
    ("+=", SyntaxKind::PlusEq),
    ("-=", SyntaxKind::MinusEq),
    ("*=", SyntaxKind::CompoundAssign),
    ("/=", SyntaxKind::CompoundAssign),
    ("%=", SyntaxKind::CompoundAssign),
    ("&=", SyntaxKind::CompoundAssign),
    ("|=", SyntaxKind::CompoundAssign),
    ("^=", SyntaxKind::CompoundAssign),
    ("=>", SyntaxKind::FatArrow),
    ("?.", SyntaxKind::QuestionDot),
    ("??", SyntaxKind::Operator),
    ("==", SyntaxKind::Operator),
    ("!=", SyntaxKind::Operator),
    ("<=", SyntaxKind::Operator),
    (">=", SyntaxKind::Operator),
    ("&&", SyntaxKind::Operator),
    ("||", SyntaxKind::Operator),
    ("++", SyntaxKind::Operator),
    ("--", SyntaxKind::Operator),
    ("->", SyntaxKind::Operator),
];

/// Splits `source` into tokens.
#[must_use]
pub fn tokenize(source: &str) -> Vec<SyntaxToken> {
    let mut lexer = Lexer { source, pos: 0 };
    let mut tokens = Vec::new();
    loop {
        let trivia_start = lexer.pos;
        lexer.skip_trivia();
        if lexer.pos >= source.len() {
            break;
        }
        let start = lexer.pos;
        let kind = lexer.token();
        tokens.push(SyntaxToken::new(
            kind,
            &source[start..lexer.pos],
            &source[trivia_start..start],
            range(start, lexer.pos),
        ));
    }
    tokens
}

#[allow(clippy::cast_possible_truncation)]
fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::new(start as u32), TextSize::new(end as u32))
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn rest(&self) -> &str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_byte(&self, ahead: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_line(&mut self) {
        let len = self.rest().find('\n').unwrap_or(self.rest().len());
        self.pos += len;
    }

    fn at_line_start(&self) -> bool {
        self.source[..self.pos]
            .chars()
            .rev()
            .take_while(|&c| c != '\n')
            .all(char::is_whitespace)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_byte(1) == Some(b'/') => self.skip_line(),
                Some('/') if self.peek_byte(1) == Some(b'*') => {
                    self.pos += 2;
                    match self.rest().find("*/") {
                        Some(end) => self.pos += end + 2,
                        None => self.pos = self.source.len(),
                    }
                }
                Some('#') if self.at_line_start() => self.skip_line(),
                _ => return,
            }
        }
    }

    fn token(&mut self) -> SyntaxKind {
        let Some(c) = self.peek() else {
            return SyntaxKind::Error;
        };
        if c == '@' && self.peek_byte(1).is_some_and(is_ident_start_byte) {
            self.bump();
            self.ident_tail();
            return SyntaxKind::Ident;
        }
        if c == '_' || c.is_alphabetic() {
            let start = self.pos;
            self.ident_tail();
            return SyntaxKind::from_keyword(&self.source[start..self.pos])
                .unwrap_or(SyntaxKind::Ident);
        }
        if c.is_ascii_digit() || (c == '.' && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()))
        {
            self.number();
            return SyntaxKind::NumericLiteral;
        }
        if let Some(kind) = self.string_literal() {
            return kind;
        }
        if c == '\'' {
            self.char_literal();
            return SyntaxKind::CharLiteral;
        }
        for (text, kind) in OPERATORS {
            if self.rest().starts_with(text) {
                self.pos += text.len();
                return *kind;
            }
        }
        self.bump();
        match c {
            '{' => SyntaxKind::LBrace,
            '}' => SyntaxKind::RBrace,
            '(' => SyntaxKind::LParen,
            ')' => SyntaxKind::RParen,
            '[' => SyntaxKind::LBracket,
            ']' => SyntaxKind::RBracket,
            '<' => SyntaxKind::Lt,
            '>' => SyntaxKind::Gt,
            ';' => SyntaxKind::Semicolon,
            ',' => SyntaxKind::Comma,
            '.' => SyntaxKind::Dot,
            '?' => SyntaxKind::Question,
            ':' => SyntaxKind::Colon,
            '=' => SyntaxKind::Eq,
            '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '!' | '~' => SyntaxKind::Operator,
            _ => SyntaxKind::Error,
        }
    }

    fn ident_tail(&mut self) {
        while let Some(c) = self.peek() {
            if c == '_' || c.is_alphanumeric() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn number(&mut self) {
        while let Some(c) = self.peek() {
            let fraction = c == '.' && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit());
            if c == '_' || c.is_ascii_alphanumeric() || fraction {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Lexes regular, verbatim (`@`), interpolated (`$`) and raw (`"""`) strings.
    fn string_literal(&mut self) -> Option<SyntaxKind> {
        let prefix_len = self
            .rest()
            .bytes()
            .take_while(|&b| b == b'@' || b == b'$')
            .count();
        if self.peek_byte(prefix_len) != Some(b'"') {
            return None;
        }
        let prefix = &self.rest()[..prefix_len];
        let verbatim = prefix.contains('@');
        let interpolated = prefix.contains('$');
        self.pos += prefix_len;

        let quotes = self.rest().bytes().take_while(|&b| b == b'"').count();
        if quotes >= 3 {
            self.pos += quotes;
            let closing = "\"".repeat(quotes);
            match self.rest().find(closing.as_str()) {
                Some(end) => self.pos += end + quotes,
                None => self.pos = self.source.len(),
            }
            return Some(SyntaxKind::StringLiteral);
        }

        self.pos += 1;
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            match c {
                '"' if verbatim && depth == 0 && self.peek() == Some('"') => {
                    self.bump();
                }
                '"' if depth == 0 => break,
                '"' => self.skip_hole_string(),
                '\\' if !verbatim => {
                    self.bump();
                }
                '\n' if !verbatim && depth == 0 => break,
                '{' if interpolated => {
                    if depth == 0 && self.peek() == Some('{') {
                        self.bump();
                    } else {
                        depth += 1;
                    }
                }
                '}' if interpolated && depth > 0 => depth -= 1,
                _ => {}
            }
        }
        Some(SyntaxKind::StringLiteral)
    }

    /// Skips a regular string nested inside an interpolation hole.
    fn skip_hole_string(&mut self) {
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '"' | '\n' => break,
                _ => {}
            }
        }
    }

    fn char_literal(&mut self) {
        self.bump();
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '\'' | '\n' => break,
                _ => {}
            }
        }
    }
}

fn is_ident_start_byte(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        tokenize(source).iter().map(SyntaxToken::kind).collect()
    }

    #[test]
    fn test_event_declaration_tokens() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("public virtual event EventHandler<EventArgs> OnChanged;"),
            vec![PublicKw, VirtualKw, EventKw, Ident, Lt, Ident, Gt, Ident, Semicolon]
        );
    }

    #[test]
    fn test_compound_operators() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("a += value; b -= value; c?.Invoke(); d ??= e;"),
            vec![
                Ident, PlusEq, Ident, Semicolon, Ident, MinusEq, Ident, Semicolon, Ident,
                QuestionDot, Ident, LParen, RParen, Semicolon, Ident, CompoundAssign, Ident,
                Semicolon
            ]
        );
    }

    #[test]
    fn test_nested_generics_close_separately() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("List<List<int>>"),
            vec![Ident, Lt, Ident, Lt, Ident, Gt, Gt]
        );
    }

    #[test]
    fn test_trivia_is_attached_to_next_token() {
        let tokens = tokenize("  // note\n  /* block */ virtual");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].leading_trivia(), "  // note\n  /* block */ ");
        assert_eq!(tokens[0].text(), "virtual");
        assert_eq!(usize::from(tokens[0].text_range().start()), 24);
    }

    #[test]
    fn test_preprocessor_lines_are_trivia() {
        let tokens = tokenize("#region Events\nevent\n#endregion\n");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), SyntaxKind::EventKw);
    }

    #[test]
    fn test_string_flavors() {
        let source = r#"a = "x\"y"; b = @"c:\""dir"; c = $"{d + "}"}"; e = """raw "q" """;"#;
        let strings: Vec<String> = tokenize(source)
            .into_iter()
            .filter(|t| t.kind() == SyntaxKind::StringLiteral)
            .map(|t| t.text().to_owned())
            .collect();
        assert_eq!(
            strings,
            vec![
                r#""x\"y""#,
                r#"@"c:\""dir""#,
                r#"$"{d + "}"}""#,
                r#""""raw "q" """"#
            ]
        );
    }

    #[test]
    fn test_verbatim_identifier_and_char() {
        use SyntaxKind::*;
        assert_eq!(kinds("@event = '\\''"), vec![Ident, Eq, CharLiteral]);
    }
}
