use thiserror::Error;

/// The four kinds of failure a filter expression can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed source text
    Parse,
    /// Structural fault in a node (unknown function, null property hop, bad range)
    Node,
    /// A value did not have the shape an operation requires
    Type,
    /// Registry misuse and everything else
    Generic,
}

/// Errors raised while parsing, evaluating, or extending the language.
///
/// Parse errors are returned synchronously by [`Runtime::execute`]; node and
/// type errors surface from the evaluation future and abort every remaining
/// chain.
///
/// [`Runtime::execute`]: crate::runtime::Runtime::execute
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Line {line}, col {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("NodeError: {0}")]
    Node(String),

    #[error("TypeError: {0}")]
    Type(String),

    #[error("FilterError: {0}")]
    Generic(String),
}

impl FilterError {
    pub fn parse(message: impl Into<String>, line: usize, column: usize) -> Self {
        FilterError::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    pub fn node(message: impl Into<String>) -> Self {
        FilterError::Node(message.into())
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        FilterError::Type(message.into())
    }

    pub fn generic(message: impl Into<String>) -> Self {
        FilterError::Generic(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::Parse { .. } => ErrorKind::Parse,
            FilterError::Node(_) => ErrorKind::Node,
            FilterError::Type(_) => ErrorKind::Type,
            FilterError::Generic(_) => ErrorKind::Generic,
        }
    }

    /// The bare message, without the kind prefix or position.
    pub fn message(&self) -> &str {
        match self {
            FilterError::Parse { message, .. } => message,
            FilterError::Node(message)
            | FilterError::Type(message)
            | FilterError::Generic(message) => message,
        }
    }
}

impl From<crate::parser::ParseError> for FilterError {
    fn from(e: crate::parser::ParseError) -> Self {
        FilterError::Parse {
            message: e.message,
            line: e.position.line,
            column: e.position.column,
        }
    }
}
