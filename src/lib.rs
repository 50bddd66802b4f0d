pub mod ast;
pub mod behaviour;
#[cfg(feature = "cli")]
pub mod cli;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod pattern;
pub mod runtime;
pub mod value;

pub use ast::{Chain, FilterNode, Literal, SubsetEntry, Token, Tree};
pub use context::{Context, REQUEST_KEY};
pub use error::{ErrorKind, FilterError};
pub use evaluator::Evaluator;
pub use functions::{Function, FunctionRegistry};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser, parse};
pub use runtime::Runtime;
pub use value::Value;
