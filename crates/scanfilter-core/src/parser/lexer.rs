//! Lexer for filter expressions
//!
//! The lexer tokenizes a filter expression into a stream of tokens. Lexical
//! failures become `TokenKind::Error` tokens so the parser can report them
//! with a position.

use super::token::{Token, TokenKind};
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Lexer for tokenizing filter expressions
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer from source text
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start_line = self.line;
        let start_column = self.column;

        if self.is_at_end() {
            return Token::new(TokenKind::Eof, String::new(), start_line, start_column);
        }

        let ch = self.current_char();

        if ch == '\'' {
            return self.lex_string();
        }

        if ch == '"' {
            return self.lex_quoted_identifier();
        }

        // A sign binds to the number only when a digit follows directly
        if ch.is_ascii_digit()
            || ((ch == '-' || ch == '+') && self.peek_char().is_some_and(|c| c.is_ascii_digit()))
        {
            return self.lex_number();
        }

        if ch.is_alphabetic() || ch == '_' {
            return self.lex_identifier_or_keyword();
        }

        self.lex_operator_or_punctuation()
    }

    /// Tokenize all input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn advance(&mut self) -> char {
        let ch = self.current_char();
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        ch
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Lex a single-quoted string
    ///
    /// The token keeps the raw body: a backslash and the character after it
    /// are both retained so that `LIKE` lowering can still tell `\%` from `%`.
    fn lex_string(&mut self) -> Token {
        let start_line = self.line;
        let start_column = self.column;

        self.advance(); // Skip opening quote

        let mut raw = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();

            if ch == '\\' {
                raw.push(self.advance());
                if self.is_at_end() {
                    break;
                }
                raw.push(self.advance());
            } else if ch == '\'' {
                self.advance(); // Skip closing quote
                return Token::new(
                    TokenKind::StringLit(raw.clone()),
                    format!("'{}'", raw),
                    start_line,
                    start_column,
                );
            } else if ch == '\n' {
                break;
            } else {
                raw.push(self.advance());
            }
        }

        Token::new(
            TokenKind::Error("Unterminated string literal".to_string()),
            format!("'{}", raw),
            start_line,
            start_column,
        )
    }

    /// Lex a double-quoted identifier, taken verbatim
    fn lex_quoted_identifier(&mut self) -> Token {
        let start_line = self.line;
        let start_column = self.column;

        self.advance(); // Skip opening quote

        let mut name = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch == '"' {
                self.advance();
                return Token::new(
                    TokenKind::QuotedIdent(name.clone()),
                    format!("\"{}\"", name),
                    start_line,
                    start_column,
                );
            } else if ch == '\n' {
                break;
            }
            name.push(self.advance());
        }

        Token::new(
            TokenKind::Error("Unterminated quoted identifier".to_string()),
            format!("\"{}", name),
            start_line,
            start_column,
        )
    }

    fn lex_number(&mut self) -> Token {
        let start_line = self.line;
        let start_column = self.column;

        let mut number_str = String::new();
        let mut is_decimal = false;

        if matches!(self.current_char(), '-' | '+') {
            number_str.push(self.advance());
        }

        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            number_str.push(self.advance());
        }

        // A dot only belongs to the number when digits follow it
        if !self.is_at_end() && self.current_char() == '.' {
            if let Some(next_ch) = self.peek_char() {
                if next_ch.is_ascii_digit() {
                    is_decimal = true;
                    number_str.push(self.advance()); // Add '.'

                    while !self.is_at_end() && self.current_char().is_ascii_digit() {
                        number_str.push(self.advance());
                    }
                }
            }
        }

        let kind = if is_decimal {
            match BigDecimal::from_str(&number_str) {
                Ok(d) => TokenKind::DecimalLit(d),
                Err(_) => TokenKind::Error(format!("Invalid decimal literal: {}", number_str)),
            }
        } else {
            match number_str.parse::<i64>() {
                Ok(n) => TokenKind::IntLit(n),
                Err(_) => TokenKind::Error(format!("Invalid integer literal: {}", number_str)),
            }
        };

        Token::new(kind, number_str, start_line, start_column)
    }

    fn lex_identifier_or_keyword(&mut self) -> Token {
        let start_line = self.line;
        let start_column = self.column;

        let mut ident = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(self.advance());
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&ident).unwrap_or_else(|| TokenKind::Ident(ident.clone()));

        Token::new(kind, ident, start_line, start_column)
    }

    fn lex_operator_or_punctuation(&mut self) -> Token {
        let start_line = self.line;
        let start_column = self.column;

        let ch = self.advance();

        // Try to match two-character operators
        if !self.is_at_end() {
            let next_ch = self.current_char();
            let kind = match (ch, next_ch) {
                ('=', '=') => Some(TokenKind::Eq),
                ('!', '=') | ('<', '>') => Some(TokenKind::Neq),
                ('<', '=') => Some(TokenKind::LtEq),
                ('>', '=') => Some(TokenKind::GtEq),
                _ => None,
            };

            if let Some(kind) = kind {
                self.advance();
                return Token::new(kind, format!("{}{}", ch, next_ch), start_line, start_column);
            }
        }

        let kind = match ch {
            '=' => TokenKind::Eq,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ => TokenKind::Error(format!("Unexpected character: {}", ch)),
        };

        Token::new(kind, ch.to_string(), start_line, start_column)
    }
}
