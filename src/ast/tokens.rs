#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bareword made of `[A-Za-z0-9_]`
    ///
    /// Function names, property names, and integer literals all lex as words;
    /// the parser decides which one it is looking at.
    ///
    /// # Examples
    /// ```text
    /// query
    /// __abc_01923_ABC
    /// 42
    /// ```
    Word(String),

    /// Decimal number with a fractional part
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 123.45
    /// ```
    Float(f64),

    /// String literal enclosed in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'a,b'
    /// ```
    String(String),

    /// Regular expression match
    ///
    /// Escaped slashes (`\/`) are kept verbatim in `find`.
    ///
    /// # Examples
    /// ```text
    /// m/[a-z]+/ig
    /// m/a\/b/
    /// ```
    Match { find: String, flags: String },

    /// Regular expression substitution
    ///
    /// # Examples
    /// ```text
    /// s/a_([a-z]{0,3})/b_$1/ig
    /// s/-//g
    /// ```
    Substitute {
        find: String,
        replace: String,
        flags: String,
    },

    /// Explicit pipe between filters
    Pipe,

    /// Chain separator at the top level, entry separator elsewhere
    Comma,

    /// Single-hop property access (`< name`)
    Lt,

    /// Context assignment (`> name`)
    Gt,

    /// Dot-chain property access (`.a.b`)
    Dot,

    /// Opening subset bracket
    LBracket,

    /// Closing subset bracket
    RBracket,

    /// Opening argument list
    LParen,

    /// Closing argument list
    RParen,

    /// Sign, or the range separator inside a subset
    Minus,

    /// Sign
    Plus,

    /// End of input
    Eof,
}

impl Token {
    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Float(n) => format!("number {}", n),
            Token::String(s) => format!("string \"{}\"", s),
            Token::Match { .. } => "match expression".to_string(),
            Token::Substitute { .. } => "substitution expression".to_string(),
            Token::Pipe => "'|'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Lt => "'<'".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::Dot => "'.'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}
