// RSQL parser - converts tokens to an expression tree

use super::ast::{ComparisonNode, ComparisonOperator, Node};
use super::lexer::Lexer;
use super::token::{Keyword, Token};
use crate::error::{RsqlError, RsqlResult};
use log::debug;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(rsql: &str) -> RsqlResult<Self> {
        let tokens = Lexer::new(rsql).tokenize()?;
        Ok(Parser {
            tokens,
            position: 0,
        })
    }

    /// Parse the whole input into a single node
    pub fn parse(&mut self) -> RsqlResult<Node> {
        if self.match_token(&Token::Eof) {
            return Err(RsqlError::syntax("empty expression"));
        }

        let node = self.parse_or()?;

        if !self.match_token(&Token::Eof) {
            return Err(self.unexpected("';', ',' or end of input"));
        }

        debug!("parsed rsql expression {}", node);
        Ok(node)
    }

    /// or_expr := and_expr ( (',' | 'or') and_expr )*
    fn parse_or(&mut self) -> RsqlResult<Node> {
        let mut children = vec![self.parse_and()?];

        while self.match_connective(Token::Comma, Keyword::Or) {
            self.advance();
            children.push(self.parse_and()?);
        }

        Ok(Self::flatten(children, Node::Or))
    }

    /// and_expr := constraint ( (';' | 'and') constraint )*
    fn parse_and(&mut self) -> RsqlResult<Node> {
        let mut children = vec![self.parse_constraint()?];

        while self.match_connective(Token::Semicolon, Keyword::And) {
            self.advance();
            children.push(self.parse_constraint()?);
        }

        Ok(Self::flatten(children, Node::And))
    }

    /// constraint := '(' or_expr ')' | comparison
    fn parse_constraint(&mut self) -> RsqlResult<Node> {
        if self.match_token(&Token::LeftParen) {
            self.advance();
            let node = self.parse_or()?;
            self.expect_token(Token::RightParen)?;
            return Ok(node);
        }

        self.parse_comparison().map(Node::Comparison)
    }

    /// comparison := selector operator arguments
    fn parse_comparison(&mut self) -> RsqlResult<ComparisonNode> {
        let selector = match self.current_token() {
            Token::Word(word) => {
                self.advance();
                word
            }
            _ => return Err(self.unexpected("selector")),
        };

        let operator = match self.current_token() {
            Token::Operator(symbol) => {
                self.advance();
                ComparisonOperator::from_symbol(&symbol)
            }
            _ => return Err(self.unexpected("comparison operator")),
        };

        let arguments = if self.match_token(&Token::LeftParen) {
            self.advance();
            let arguments = self.parse_argument_list()?;
            if arguments.len() > 1 && !operator.is_multi_value() {
                return Err(RsqlError::syntax(format!(
                    "operator {} of selector {} expects a single argument",
                    operator, selector
                )));
            }
            arguments
        } else {
            vec![self.parse_argument()?]
        };

        Ok(ComparisonNode {
            selector,
            operator,
            arguments,
        })
    }

    /// arguments := value (',' value)* ')'
    fn parse_argument_list(&mut self) -> RsqlResult<Vec<String>> {
        let mut arguments = vec![self.parse_argument()?];

        while self.match_token(&Token::Comma) {
            self.advance();
            arguments.push(self.parse_argument()?);
        }

        self.expect_token(Token::RightParen)?;
        Ok(arguments)
    }

    /// value := unreserved-word | quoted-string
    fn parse_argument(&mut self) -> RsqlResult<String> {
        match self.current_token() {
            Token::Word(value) | Token::Quoted(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("argument")),
        }
    }

    fn flatten(mut children: Vec<Node>, combine: fn(Vec<Node>) -> Node) -> Node {
        if children.len() == 1 {
            return children.remove(0);
        }

        // Same-operator groups merge into their parent, e.g. a;(b;c) -> AND(a, b, c)
        let probe = combine(Vec::new());
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match (child, &probe) {
                (Node::And(grand), Node::And(_)) | (Node::Or(grand), Node::Or(_)) => {
                    flat.extend(grand)
                }
                (child, _) => flat.push(child),
            }
        }
        combine(flat)
    }

    // Helper methods

    fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .cloned()
            .unwrap_or(Token::Eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn match_token(&self, token: &Token) -> bool {
        match self.tokens.get(self.position) {
            Some(current) => current == token,
            None => *token == Token::Eof,
        }
    }

    fn match_connective(&self, symbol: Token, keyword: Keyword) -> bool {
        match self.tokens.get(self.position) {
            Some(token) => *token == symbol || token.keyword() == Some(keyword),
            None => false,
        }
    }

    fn expect_token(&mut self, token: Token) -> RsqlResult<()> {
        if self.match_token(&token) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&token.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> RsqlError {
        RsqlError::syntax(format!(
            "expected {} but found {} at token {}",
            expected,
            self.current_token().describe(),
            self.position
        ))
    }
}

/// Parse an RSQL expression into its node tree
pub fn parse(rsql: &str) -> RsqlResult<Node> {
    Parser::new(rsql)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(selector: &str, operator: ComparisonOperator, args: &[&str]) -> Node {
        Node::Comparison(ComparisonNode::new(
            selector,
            operator,
            args.iter().map(|a| a.to_string()).collect(),
        ))
    }

    #[test]
    fn test_parse_single_comparison() {
        let node = parse("version==2.0.0").unwrap();
        assert_eq!(
            node,
            comparison("version", ComparisonOperator::Equal, &["2.0.0"])
        );
    }

    #[test]
    fn test_parse_and_forms() {
        let expected = Node::And(vec![
            comparison("name", ComparisonOperator::Equal, &["targetId1"]),
            comparison("description", ComparisonOperator::Equal, &["plugAndPlay"]),
        ]);
        assert_eq!(parse("name==targetId1;description==plugAndPlay").unwrap(), expected);
        assert_eq!(
            parse("name==targetId1 and description==plugAndPlay").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_or_forms() {
        let expected = Node::Or(vec![
            comparison("name", ComparisonOperator::Equal, &["targetId1"]),
            comparison("description", ComparisonOperator::Equal, &["plugAndPlay"]),
            comparison("updateStatus", ComparisonOperator::Equal, &["UNKNOWN"]),
        ]);
        assert_eq!(
            parse("name==targetId1,description==plugAndPlay,updateStatus==UNKNOWN").unwrap(),
            expected
        );
        assert_eq!(
            parse("name==targetId1 or description==plugAndPlay or updateStatus==UNKNOWN")
                .unwrap(),
            expected
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let node = parse("a==1;b==2,c==3").unwrap();
        assert_eq!(
            node,
            Node::Or(vec![
                Node::And(vec![
                    comparison("a", ComparisonOperator::Equal, &["1"]),
                    comparison("b", ComparisonOperator::Equal, &["2"]),
                ]),
                comparison("c", ComparisonOperator::Equal, &["3"]),
            ])
        );
    }

    #[test]
    fn test_parentheses_and_flattening() {
        let node = parse("a==1;(b==2,c==3)").unwrap();
        assert!(matches!(&node, Node::And(children) if children.len() == 2));

        let node = parse("a==1;(b==2;c==3)").unwrap();
        assert!(matches!(&node, Node::And(children) if children.len() == 3));

        let node = parse("((a==1))").unwrap();
        assert_eq!(node, comparison("a", ComparisonOperator::Equal, &["1"]));
    }

    #[test]
    fn test_parse_multi_value_arguments() {
        let node = parse("status=in=(pending, 'in sync',\"error\")").unwrap();
        assert_eq!(
            node,
            comparison("status", ComparisonOperator::In, &["pending", "in sync", "error"])
        );
        let node = parse("status=out=(a)").unwrap();
        assert_eq!(node, comparison("status", ComparisonOperator::NotIn, &["a"]));
        let node = parse("status=IN=(a,b)").unwrap();
        assert_eq!(node, comparison("status", ComparisonOperator::In, &["a", "b"]));
    }

    #[test]
    fn test_keywords_as_arguments() {
        let node = parse("name==and").unwrap();
        assert_eq!(node, comparison("name", ComparisonOperator::Equal, &["and"]));
    }

    #[test]
    fn test_alternative_operators_normalized() {
        let node = parse("id>5;id<=10").unwrap();
        assert_eq!(
            node,
            Node::And(vec![
                comparison("id", ComparisonOperator::GreaterThan, &["5"]),
                comparison("id", ComparisonOperator::LessThanOrEqual, &["10"]),
            ])
        );
    }

    #[test]
    fn test_unknown_operator_kept() {
        let node = parse("name=foo=bar").unwrap();
        assert_eq!(
            node,
            comparison("name", ComparisonOperator::Other("=foo=".to_string()), &["bar"])
        );
    }

    #[test]
    fn test_syntax_errors() {
        for rsql in [
            "",
            "   ",
            "name",
            "name==",
            "==foo",
            "name==foo;",
            "(name==foo",
            "name==foo)",
            "name==foo bar==baz",
            "name==(a,b)",
            "name=in=()",
        ] {
            assert!(
                matches!(parse(rsql), Err(RsqlError::Syntax { .. })),
                "expected syntax error for {:?}",
                rsql
            );
        }
    }
}
