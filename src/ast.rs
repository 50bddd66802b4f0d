//! # Filter Language - Abstract Syntax Tree
//!
//! A filter expression is a comma-separated list of independent **chains**.
//! Each chain is a pipeline of **filter nodes**; the value produced by one node
//! is handed to the next.
//!
//! ```text
//! query.tags | split(",") [0-2] | join(" ") > tags, headers < host > host
//! ```
//!
//! ## The Seven Filter Forms
//!
//! | Form       | Syntax                 | Needs a `|` before it |
//! |------------|------------------------|-----------------------|
//! | Function   | `name` / `name('a', 1)`| yes                   |
//! | Property   | `.a.b.c`               | no                    |
//! | Access     | `< name`               | no                    |
//! | Assign     | `> name`               | no                    |
//! | Subset     | `[0, 2-4]`             | no                    |
//! | Match      | `m/find/flags`         | yes                   |
//! | Substitute | `s/find/replace/flags` | yes                   |
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[filters]** - Filter nodes and their parts
//! - **[tree]** - Chains and the whole tree
pub mod filters;
pub mod tokens;
pub mod tree;

pub use filters::{FilterNode, Literal, SubsetEntry};
pub use tokens::Token;
pub use tree::{Chain, Tree};
