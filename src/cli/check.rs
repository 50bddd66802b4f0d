//! Validate filter expressions without running them

use super::CliError;
use crate::{Runtime, Tree};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter expression to validate
    pub expression: String,
    /// Hand back the parsed tree instead of a bare confirmation
    pub tree: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid { chains: usize },
    /// Syntax validation passed; here is what it parsed to
    Tree(Tree),
}

/// Execute a pipette check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let tree = Runtime::parse(&options.expression)?;

    if options.tree {
        Ok(CheckResult::Tree(tree))
    } else {
        Ok(CheckResult::SyntaxValid {
            chains: tree.chains.len(),
        })
    }
}
