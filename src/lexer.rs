use thiserror::Error;

use crate::ast::Token;

/// 1-based line and column of a character in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A token together with where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {}, column {}", position.line, position.column)]
pub struct LexError {
    pub message: String,
    pub position: Position,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    previous: Option<Token>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            previous: None,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn error(&self, message: impl Into<String>, position: Position) -> LexError {
        LexError {
            message: message.into(),
            position,
        }
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

    fn is_word_char(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_word_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.here();
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_at = self.here();
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(
                                self.error(format!("Invalid escape sequence '\\{}'", ch), escape_at)
                            );
                        }
                        None => return Err(self.error("Unterminated string", start)),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(self.error("Unterminated string: missing closing quote", start))
    }

    /// Reads a word that starts with a digit; `12.5` becomes a float unless
    /// the word names a property (`.12`, `< 1`, `> 1`).
    fn read_number(&mut self) -> Token {
        let mut word = self.read_word();

        let is_name = matches!(self.previous, Some(Token::Dot | Token::Lt | Token::Gt));
        if !is_name
            && word.chars().all(|c| c.is_ascii_digit())
            && self.current_char() == Some('.')
            && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            word.push('.');
            self.advance();
            while let Some(ch) = self.current_char() {
                if ch.is_ascii_digit() {
                    word.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
            if let Ok(n) = word.parse::<f64>() {
                return Token::Float(n);
            }
        }

        Token::Word(word)
    }

    /// Reads one slash-terminated section of a regex literal. `\/` and any
    /// other escape are kept as written.
    fn read_regex_part(&mut self, start: Position) -> Result<String, LexError> {
        let mut result = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '/' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    result.push(ch);
                    self.advance();
                    if let Some(escaped) = self.current_char() {
                        result.push(escaped);
                        self.advance();
                    }
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(self.error("Unterminated regular expression", start))
    }

    fn read_regex_flags(&mut self) -> String {
        let mut flags = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphabetic() {
                flags.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        flags
    }

    fn read_match(&mut self, start: Position) -> Result<Token, LexError> {
        self.advance(); // m
        self.advance(); // /
        let find = self.read_regex_part(start)?;
        if find.is_empty() {
            return Err(self.error("Empty pattern in match expression", start));
        }
        let flags = self.read_regex_flags();
        Ok(Token::Match { find, flags })
    }

    fn read_substitute(&mut self, start: Position) -> Result<Token, LexError> {
        self.advance(); // s
        self.advance(); // /
        let find = self.read_regex_part(start)?;
        if find.is_empty() {
            return Err(self.error("Empty pattern in substitution expression", start));
        }
        let replace = self.read_regex_part(start)?;
        let flags = self.read_regex_flags();
        Ok(Token::Substitute {
            find,
            replace,
            flags,
        })
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    pub fn next_token(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace();

        let position = self.here();
        let token = match self.current_char() {
            None => Token::Eof,
            Some('|') => self.single(Token::Pipe),
            Some(',') => self.single(Token::Comma),
            Some('<') => self.single(Token::Lt),
            Some('>') => self.single(Token::Gt),
            Some('.') => self.single(Token::Dot),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('-') => self.single(Token::Minus),
            Some('+') => self.single(Token::Plus),
            Some('"') => Token::String(self.read_string('"')?),
            Some('\'') => Token::String(self.read_string('\'')?),
            Some('m') if self.peek_char(1) == Some('/') => self.read_match(position)?,
            Some('s') if self.peek_char(1) == Some('/') => self.read_substitute(position)?,
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) if Self::is_word_char(ch) => Token::Word(self.read_word()),
            Some(ch) => {
                return Err(self.error(format!("Unexpected character '{}'", ch), position));
            }
        };

        self.previous = Some(token.clone());
        Ok(Spanned { token, position })
    }
}

#[test]
fn test_sigils_abut_words() {
    let mut lexer = Lexer::new("<a>b[1].c");
    let tokens: Vec<Token> = std::iter::from_fn(|| {
        let spanned = lexer.next_token().unwrap();
        (spanned.token != Token::Eof).then_some(spanned.token)
    })
    .collect();
    assert_eq!(
        tokens,
        vec![
            Token::Lt,
            Token::Word("a".to_string()),
            Token::Gt,
            Token::Word("b".to_string()),
            Token::LBracket,
            Token::Word("1".to_string()),
            Token::RBracket,
            Token::Dot,
            Token::Word("c".to_string()),
        ]
    );
}

#[test]
fn test_positions() {
    let mut lexer = Lexer::new("a |\n  b");
    assert_eq!(lexer.next_token().unwrap().position, Position { line: 1, column: 1 });
    assert_eq!(lexer.next_token().unwrap().position, Position { line: 1, column: 3 });
    assert_eq!(lexer.next_token().unwrap().position, Position { line: 2, column: 3 });
}
