use std::mem;

use thiserror::Error;

use crate::{
    ast::{Chain, FilterNode, Literal, SubsetEntry, Token, Tree},
    lexer::{LexError, Lexer, Position, Spanned},
};

/// A syntax error, located at the token that could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} (line {}, column {})", position.line, position.column)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError {
            message: e.message,
            position: e.position,
        }
    }
}

pub struct Parser {
    lexer: Lexer,
    current: Spanned,
}

/// Parse a complete filter expression.
///
/// # Examples
///
/// ```
/// use pipette_lang::parser::parse;
///
/// let tree = parse("query < id > id, headers < host").unwrap();
/// assert_eq!(tree.chains.len(), 2);
/// assert_eq!(tree.chains[0].filters.len(), 3);
/// ```
pub fn parse(input: &str) -> Result<Tree, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current.token) == mem::discriminant(token)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            position: self.current.position,
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        self.error(format!(
            "Expected {}, found {}",
            expected,
            self.current.token.describe()
        ))
    }

    /// Take the current token, leaving `Eof` behind until the next advance.
    fn take(&mut self) -> Token {
        mem::replace(&mut self.current.token, Token::Eof)
    }

    /// Parse chains until end of input.
    pub fn parse(&mut self) -> Result<Tree, ParseError> {
        let mut chains = vec![self.parse_chain()?];

        while self.check(&Token::Comma) {
            self.advance()?;
            chains.push(self.parse_chain()?);
        }

        if !self.check(&Token::Eof) {
            return Err(self.unexpected("',' or end of input"));
        }

        Ok(Tree { chains })
    }

    fn parse_chain(&mut self) -> Result<Chain, ParseError> {
        let mut filters = vec![self.parse_filter()?];

        loop {
            match &self.current.token {
                Token::Pipe => {
                    self.advance()?;
                    filters.push(self.parse_filter()?);
                }
                // Self-delimiting forms may abut the previous filter
                Token::Lt | Token::Gt | Token::LBracket | Token::Dot => {
                    filters.push(self.parse_filter()?);
                }
                Token::Comma | Token::Eof => break,
                _ => return Err(self.unexpected("'|' between filters")),
            }
        }

        Ok(Chain { filters })
    }

    fn parse_filter(&mut self) -> Result<FilterNode, ParseError> {
        let node = match self.take() {
            Token::Match { find, flags } => FilterNode::Match {
                pattern: find,
                flags,
            },
            Token::Substitute {
                find,
                replace,
                flags,
            } => FilterNode::Substitute {
                pattern: find,
                replacement: replace,
                flags,
            },
            token => {
                self.current.token = token;
                return self.parse_named_filter();
            }
        };

        self.advance()?;
        Ok(node)
    }

    /// Filters that start with a word or a sigil.
    fn parse_named_filter(&mut self) -> Result<FilterNode, ParseError> {
        match self.current.token {
            Token::Word(_) => self.parse_function(),
            Token::Lt => {
                self.advance()?;
                let name = self.expect_name("a property name after '<'")?;
                Ok(FilterNode::Access { name })
            }
            Token::Gt => {
                self.advance()?;
                let name = self.expect_name("a property name after '>'")?;
                Ok(FilterNode::Assign { name })
            }
            Token::Dot => self.parse_property(),
            Token::LBracket => self.parse_subset(),
            _ => Err(self.unexpected("a filter")),
        }
    }

    fn expect_name(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.take() {
            Token::Word(name) => {
                self.advance()?;
                Ok(name)
            }
            token => {
                self.current.token = token;
                Err(self.unexpected(expected))
            }
        }
    }

    fn parse_function(&mut self) -> Result<FilterNode, ParseError> {
        let name = self.expect_name("a function name")?;

        let arguments = if self.check(&Token::LParen) {
            self.advance()?;
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(FilterNode::Function { name, arguments })
    }

    fn parse_arguments(&mut self) -> Result<Vec<Literal>, ParseError> {
        if self.check(&Token::RParen) {
            return Err(self.error(
                "Empty argument list; leave out the parentheses to call a function without arguments",
            ));
        }

        let mut arguments = vec![self.parse_argument()?];
        loop {
            match self.current.token {
                Token::Comma => {
                    self.advance()?;
                    arguments.push(self.parse_argument()?);
                }
                Token::RParen => {
                    self.advance()?;
                    return Ok(arguments);
                }
                _ => return Err(self.unexpected("',' or ')' in argument list")),
            }
        }
    }

    fn parse_argument(&mut self) -> Result<Literal, ParseError> {
        let negative = match self.current.token {
            Token::Minus => {
                self.advance()?;
                Some(true)
            }
            Token::Plus => {
                self.advance()?;
                Some(false)
            }
            _ => None,
        };

        let literal = match self.take() {
            Token::String(s) if negative.is_none() => Literal::String(s),
            Token::Float(n) => Literal::Float(if negative == Some(true) { -n } else { n }),
            Token::Word(word) if word.chars().all(|c| c.is_ascii_digit()) => {
                let n = self.parse_integer(&word)?;
                Literal::Integer(if negative == Some(true) { -n } else { n })
            }
            Token::Word(word) if negative.is_none() => {
                return Err(self.error(format!(
                    "Unexpected bareword '{}' in argument list; quote string arguments",
                    word
                )));
            }
            token => {
                self.current.token = token;
                return Err(self.unexpected(if negative.is_some() {
                    "a number after the sign"
                } else {
                    "a string or number argument"
                }));
            }
        };

        self.advance()?;
        Ok(literal)
    }

    fn parse_integer(&self, digits: &str) -> Result<i64, ParseError> {
        digits
            .parse::<i64>()
            .map_err(|_| self.error(format!("Integer '{}' is out of range", digits)))
    }

    fn parse_property(&mut self) -> Result<FilterNode, ParseError> {
        let mut path = Vec::new();

        while self.check(&Token::Dot) {
            self.advance()?;
            path.push(self.expect_name("a property name after '.'")?);
        }

        Ok(FilterNode::Property { path })
    }

    fn parse_subset(&mut self) -> Result<FilterNode, ParseError> {
        self.advance()?; // [

        if self.check(&Token::RBracket) {
            return Err(self.error("Empty subset; expected an index or a range"));
        }

        let mut entries = vec![self.parse_subset_entry()?];
        loop {
            match self.current.token {
                Token::Comma => {
                    self.advance()?;
                    entries.push(self.parse_subset_entry()?);
                }
                Token::RBracket => {
                    self.advance()?;
                    return Ok(FilterNode::Subset { entries });
                }
                _ => return Err(self.unexpected("',' or ']' in subset")),
            }
        }
    }

    fn parse_subset_entry(&mut self) -> Result<SubsetEntry, ParseError> {
        let start = self.current.position;
        let lo = self.parse_bound()?;

        if self.check(&Token::Minus) {
            self.advance()?;
            let hi = self.parse_bound()?;
            return Ok(SubsetEntry::Range(lo, hi));
        }

        if lo < 0 {
            return Err(ParseError {
                message: "Subset indices must not be negative".to_string(),
                position: start,
            });
        }

        Ok(SubsetEntry::Index(lo))
    }

    /// An integer, optionally preceded by `-`.
    fn parse_bound(&mut self) -> Result<i64, ParseError> {
        let negative = if self.check(&Token::Minus) {
            self.advance()?;
            true
        } else {
            false
        };

        let n = match &self.current.token {
            Token::Word(word) if word.chars().all(|c| c.is_ascii_digit()) => {
                self.parse_integer(word)?
            }
            Token::Float(_) => {
                return Err(self.error("Subset indices must be whole numbers"));
            }
            _ => return Err(self.unexpected("an integer in subset")),
        };

        self.advance()?;
        Ok(if negative { -n } else { n })
    }
}
