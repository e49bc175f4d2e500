// RSQL module - filter expression parsing and AST representation

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{ComparisonNode, ComparisonOperator, Node};
pub use lexer::Lexer;
pub use parser::{parse, Parser};
pub use token::{Keyword, Token};
