use crate::ast::FilterNode;

/// One independent pipeline of filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// Filters in evaluation order (never empty when produced by the parser)
    pub filters: Vec<FilterNode>,
}

/// A parsed filter expression: every chain, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub chains: Vec<Chain>,
}
