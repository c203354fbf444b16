//! # Symbols
//!
//! A symbol is an opaque label for a tableau column. User variables, slack variables, error
//! variables and dummy variables all appear in rows as symbols; the solver manipulates them
//! uniformly and only their type distinguishes how they may be pivoted.
use std::fmt;

/// The role a symbol plays in the tableau.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SymbolType {
    /// Stands in for a user variable that appeared in at least one constraint.
    External,
    /// Non-negative auxiliary variable of an inequality. Carries no weight in the objective.
    Slack,
    /// Non-negative auxiliary variable measuring by how much a non-required constraint is
    /// violated. Weighted by the constraint's strength in the objective.
    Error,
    /// Zero-valued placeholder marking a required equality, such that the constraint can be
    /// found again on removal.
    Dummy,
    /// The "no such symbol" sentinel.
    Invalid,
}

/// A column label in the tableau.
///
/// Symbols are compared, ordered and hashed by id; minted ids are unique and strictly
/// increasing, which makes the ordering a stable total order and iteration over any map keyed by
/// symbols deterministic.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Symbol {
    id: usize,
    symbol_type: SymbolType,
}

impl Symbol {
    /// Create a symbol with a caller-chosen id.
    ///
    /// Ids should come from a single strictly increasing counter; the sentinel id `0` is
    /// reserved for `Symbol::invalid`.
    pub fn new(id: usize, symbol_type: SymbolType) -> Self {
        debug_assert!(id > 0);
        debug_assert_ne!(symbol_type, SymbolType::Invalid);

        Self { id, symbol_type }
    }

    /// The sentinel symbol, unequal to every minted symbol.
    pub fn invalid() -> Self {
        Self { id: 0, symbol_type: SymbolType::Invalid }
    }

    pub fn symbol_type(&self) -> SymbolType {
        self.symbol_type
    }

    /// Whether this symbol may be chosen as a pivot subject: slack and error variables are
    /// restricted to non-negative values and can enter the basis, external and dummy variables
    /// can not be picked this way.
    pub fn is_pivotable(&self) -> bool {
        matches!(self.symbol_type, SymbolType::Slack | SymbolType::Error)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = match self.symbol_type {
            SymbolType::External => "x",
            SymbolType::Slack => "s",
            SymbolType::Error => "e",
            SymbolType::Dummy => "d",
            SymbolType::Invalid => return write!(f, "invalid"),
        };
        write!(f, "{}{}", prefix, self.id)
    }
}
