//! Recursive-descent parsing: token stream -> [`Node`] tree.

use crate::catalog::Catalog;
use crate::error::{Error, ErrorKind, Result};
use crate::node::{Node, Value, WidthPayload};
use crate::scanner::Scanner;
use crate::token::{Category, Token};

/// Parses `source` into a single root [`Node`] (possibly anonymous).
pub fn parse<U: Catalog + WidthPayload>(source: &[U]) -> Result<Node> {
    Parser::new(source).parse()
}

/// A recursive-descent driver over a [`Scanner`], with one token of
/// lookahead (needed to tell an empty/trailing-comma sequence from one
/// with more members to parse, without a pushback-capable scanner).
pub struct Parser<'a, U> {
    scanner: Scanner<'a, U>,
    peeked: Option<Token<'a, U>>,
}

impl<'a, U: Catalog + WidthPayload> Parser<'a, U> {
    pub fn new(source: &'a [U]) -> Self {
        Parser {
            scanner: Scanner::new(source),
            peeked: None,
        }
    }

    /// Reads one top-level node — possibly anonymous — per
    /// `node := id? '{' seq '}' | id ':' scalar | '{' seq '}'`.
    pub fn parse(&mut self) -> Result<Node> {
        self.parse_node(true)
    }

    fn advance(&mut self) -> Result<Token<'a, U>> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scanner.tokenize(),
        }
    }

    fn peek(&mut self) -> Result<Token<'a, U>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.scanner.tokenize()?);
        }
        Ok(self.peeked.unwrap())
    }

    /// Consumes the next token and checks it is a member of `expected`;
    /// otherwise raises *expected token* (at end of input) or *unexpected
    /// token* (with the full set of what would have been acceptable).
    fn expect(&mut self, expected: Category) -> Result<Token<'a, U>> {
        let token = self.advance()?;
        if token.category().intersects(expected) {
            return Ok(token);
        }
        if token.category() == Category::EOF {
            return Err(Error::at(ErrorKind::ExpectedToken, token.location()));
        }
        Err(Error::at(
            ErrorKind::UnexpectedToken {
                expected: expected.to_string(),
            },
            token.location(),
        ))
    }

    fn parse_node(&mut self, allow_anonymous: bool) -> Result<Node> {
        let expected = if allow_anonymous {
            Category::IDENTIFIER | Category::BEG_SEQ
        } else {
            Category::IDENTIFIER
        };
        let token = self.expect(expected)?;

        let (identifier, assignment) = if token.category() == Category::IDENTIFIER {
            let identifier = U::render(token.expression());
            let assignment = self.expect(Category::BEG_SEQ | Category::ASSIGN)?;
            (identifier, assignment)
        } else {
            (String::new(), token)
        };

        if assignment.category() == Category::BEG_SEQ {
            let members = self.parse_sequence()?;
            Ok(Node::new(identifier, Value::Sequence(members)))
        } else {
            let value = self.parse_scalar()?;
            Ok(Node::new(identifier, value))
        }
    }

    /// `seq := ε | node (',' node)*`, already past the opening `{`.
    fn parse_sequence(&mut self) -> Result<Vec<Node>> {
        let mut members = Vec::new();

        if self.peek()?.category() == Category::END_SEQ {
            self.advance()?;
            return Ok(members);
        }

        loop {
            members.push(self.parse_node(false)?);

            let separator = self.expect(Category::SEPARATOR | Category::END_SEQ)?;
            if separator.category() == Category::END_SEQ {
                break;
            }
            if self.peek()?.category() == Category::END_SEQ {
                self.advance()?;
                break;
            }
        }

        Ok(members)
    }

    fn parse_scalar(&mut self) -> Result<Value> {
        let token = self.expect(Category::DATA)?;
        let text = U::render(token.expression());

        match token.category() {
            Category::INTEGER => text
                .parse::<i32>()
                .map(Value::Int)
                .map_err(|_| Error::at(ErrorKind::IntegerOverflow, token.location())),

            Category::FLOAT => {
                let trimmed = text.trim_end_matches(['f', 'F']);
                let magnitude: f64 = trimmed
                    .parse()
                    .map_err(|_| Error::at(ErrorKind::FloatOverflow, token.location()))?;
                if magnitude.abs() > 1e37 {
                    return Err(Error::at(ErrorKind::FloatOverflow, token.location()));
                }
                Ok(Value::Float(magnitude as f32))
            }

            Category::BOOLEAN => Ok(Value::Bool(text == "true")),

            Category::STRING => {
                let expr = token.expression();
                let content = &expr[1..expr.len() - 1];
                Ok(U::string_value(content.to_vec()))
            }

            Category::CHAR => {
                let expr = token.expression();
                Ok(U::char_value(expr[1]))
            }

            _ => unreachable!("expect(DATA) only returns a DATA-category token"),
        }
    }
}
