use crate::value::Value;

/// A literal function argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Integer(n) => Value::Integer(*n),
            Literal::Float(n) => Value::Float(*n),
        }
    }
}

/// One entry of a subset filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetEntry {
    /// Single element (`[3]`)
    Index(i64),

    /// Inclusive range (`[2-5]`); a negative `lo` counts from the end and
    /// leaves `hi` exclusive
    Range(i64, i64),
}

/// One step of a chain.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// Registered function call
    ///
    /// The value flowing into the node is passed first, followed by the
    /// literal arguments.
    ///
    /// # Examples
    /// ```text
    /// query
    /// split(",")
    /// get('abc')
    /// ```
    Function {
        name: String,
        arguments: Vec<Literal>,
    },

    /// Dot-chain property access, one or more hops
    ///
    /// # Examples
    /// ```text
    /// .abc
    /// .user.address.0
    /// ```
    Property { path: Vec<String> },

    /// Single-hop property access
    ///
    /// # Example
    /// ```text
    /// < qrs
    /// ```
    Access { name: String },

    /// Store the value in the context under `name` and pass it on
    ///
    /// # Example
    /// ```text
    /// > qwerty
    /// ```
    Assign { name: String },

    /// Pick elements and ranges out of an array
    ///
    /// # Example
    /// ```text
    /// [0-1, 3]
    /// ```
    Subset { entries: Vec<SubsetEntry> },

    /// Regular expression match
    Match { pattern: String, flags: String },

    /// Regular expression substitution
    Substitute {
        pattern: String,
        replacement: String,
        flags: String,
    },
}

impl FilterNode {
    /// Short name of the node's form, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterNode::Function { .. } => "function",
            FilterNode::Property { .. } => "property",
            FilterNode::Access { .. } => "access",
            FilterNode::Assign { .. } => "assign",
            FilterNode::Subset { .. } => "subset",
            FilterNode::Match { .. } => "match",
            FilterNode::Substitute { .. } => "substitute",
        }
    }
}
