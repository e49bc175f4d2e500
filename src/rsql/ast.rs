// RSQL AST - comparison and logical nodes produced by the parser

use std::fmt;

/// Comparison operator of a constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    /// `=li=`, case-insensitive pattern match
    Like,
    /// Any other well-formed `=name=` symbol
    Other(String),
}

impl ComparisonOperator {
    /// Map a lexed symbol to an operator, normalizing the alternative notation
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.to_ascii_lowercase().as_str() {
            "==" => ComparisonOperator::Equal,
            "!=" => ComparisonOperator::NotEqual,
            "=gt=" | ">" => ComparisonOperator::GreaterThan,
            "=ge=" | ">=" => ComparisonOperator::GreaterThanOrEqual,
            "=lt=" | "<" => ComparisonOperator::LessThan,
            "=le=" | "<=" => ComparisonOperator::LessThanOrEqual,
            "=in=" => ComparisonOperator::In,
            "=out=" => ComparisonOperator::NotIn,
            "=li=" => ComparisonOperator::Like,
            other => ComparisonOperator::Other(other.to_string()),
        }
    }

    /// Canonical FIQL symbol
    pub fn symbol(&self) -> &str {
        match self {
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::GreaterThan => "=gt=",
            ComparisonOperator::GreaterThanOrEqual => "=ge=",
            ComparisonOperator::LessThan => "=lt=",
            ComparisonOperator::LessThanOrEqual => "=le=",
            ComparisonOperator::In => "=in=",
            ComparisonOperator::NotIn => "=out=",
            ComparisonOperator::Like => "=li=",
            ComparisonOperator::Other(symbol) => symbol,
        }
    }

    /// Whether the operator accepts a parenthesized argument list
    pub fn is_multi_value(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::In | ComparisonOperator::NotIn | ComparisonOperator::Other(_)
        )
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single `selector operator arguments` constraint
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonNode {
    pub selector: String,
    pub operator: ComparisonOperator,
    pub arguments: Vec<String>,
}

impl ComparisonNode {
    pub fn new(
        selector: impl Into<String>,
        operator: ComparisonOperator,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            operator,
            arguments,
        }
    }
}

/// Parsed RSQL expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Comparison(ComparisonNode),
    And(Vec<Node>),
    Or(Vec<Node>),
}

impl fmt::Display for ComparisonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.selector, self.operator)?;
        let args: Vec<String> = self.arguments.iter().map(|a| quote_argument(a)).collect();
        if args.len() == 1 {
            write!(f, "{}", args[0])
        } else {
            write!(f, "({})", args.join(","))
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Comparison(c) => write!(f, "{}", c),
            Node::And(children) => write_children(f, children, ";", false),
            Node::Or(children) => write_children(f, children, ",", true),
        }
    }
}

fn write_children(
    f: &mut fmt::Formatter<'_>,
    children: &[Node],
    separator: &str,
    is_or: bool,
) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        // OR inside AND needs grouping to keep precedence
        match child {
            Node::Or(_) if !is_or => write!(f, "({})", child)?,
            _ => write!(f, "{}", child)?,
        }
    }
    Ok(())
}

fn quote_argument(argument: &str) -> String {
    let needs_quotes = argument.is_empty()
        || argument.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '"' | '\'' | '(' | ')' | ';' | ',' | '=' | '!' | '~' | '<' | '>'
                )
        });
    if needs_quotes {
        format!(
            "'{}'",
            argument.replace('\\', "\\\\").replace('\'', "\\'")
        )
    } else {
        argument.to_string()
    }
}
