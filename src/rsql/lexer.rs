// RSQL lexer - tokenizes filter expressions

use super::token::Token;
use crate::error::{RsqlError, RsqlResult};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> RsqlResult<Token> {
        self.skip_whitespace();

        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return Ok(Token::Eof),
        };

        let token = match ch {
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            ';' => {
                self.advance();
                Token::Semicolon
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '\'' | '"' => self.read_quoted(ch)?,
            '=' => self.read_fiql_operator()?,
            '!' => {
                let start = self.position;
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::Operator("!=".to_string())
                } else {
                    return Err(self.error_at(start, "expected '=' after '!'"));
                }
            }
            '<' | '>' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::Operator(format!("{}=", ch))
                } else {
                    Token::Operator(ch.to_string())
                }
            }
            '~' => return Err(self.error_at(self.position, "unexpected character '~'")),
            _ => self.read_word(),
        };

        Ok(token)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Characters that terminate an unquoted word
    fn is_reserved(ch: char) -> bool {
        ch.is_whitespace()
            || matches!(
                ch,
                '"' | '\'' | '(' | ')' | ';' | ',' | '=' | '!' | '~' | '<' | '>'
            )
    }

    fn read_word(&mut self) -> Token {
        let mut word = String::new();

        while let Some(ch) = self.current_char() {
            if Self::is_reserved(ch) {
                break;
            }
            word.push(ch);
            self.advance();
        }

        Token::Word(word)
    }

    /// Read `==` or `=name=`
    fn read_fiql_operator(&mut self) -> RsqlResult<Token> {
        let start = self.position;
        self.advance(); // Skip leading '='

        let mut name = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphabetic() {
                name.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if self.current_char() != Some('=') {
            return Err(self.error_at(start, "malformed comparison operator"));
        }
        self.advance(); // Skip trailing '='

        Ok(Token::Operator(format!("={}=", name)))
    }

    /// Read a single or double quoted argument with backslash escapes
    fn read_quoted(&mut self, quote: char) -> RsqlResult<Token> {
        let start = self.position;
        self.advance(); // Skip opening quote
        let mut string = String::new();

        loop {
            match self.current_char() {
                Some('\\') => {
                    self.advance();
                    match self.current_char() {
                        Some(escaped) => {
                            string.push(escaped);
                            self.advance();
                        }
                        None => break,
                    }
                }
                Some(ch) if ch == quote => {
                    self.advance(); // Skip closing quote
                    return Ok(Token::Quoted(string));
                }
                Some(ch) => {
                    string.push(ch);
                    self.advance();
                }
                None => break,
            }
        }

        Err(self.error_at(start, "unterminated quoted string"))
    }

    fn error_at(&self, position: usize, message: &str) -> RsqlError {
        RsqlError::syntax(format!("{} at position {}", message, position))
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> RsqlResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }
}
