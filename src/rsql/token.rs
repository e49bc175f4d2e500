// RSQL tokens for lexical analysis

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Word(String),
    Quoted(String),

    // Comparison operator symbol, e.g. "==" or "=in="
    Operator(String),

    // Delimiters
    Semicolon,
    Comma,
    LeftParen,
    RightParen,

    // Special
    Eof,
}

/// Logical connective spelled as a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    Or,
}

impl Token {
    /// Check whether this token can start or continue a logical connective
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Word(word) => Keyword::from_str(word),
            _ => None,
        }
    }

    /// Human readable description for error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Quoted(q) => format!("quoted string '{}'", q),
            Token::Operator(op) => format!("operator '{}'", op),
            Token::Semicolon => "';'".to_string(),
            Token::Comma => "','".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

impl Keyword {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Keyword> {
        match s.to_uppercase().as_str() {
            "AND" => Some(Keyword::And),
            "OR" => Some(Keyword::Or),
            _ => None,
        }
    }
}
