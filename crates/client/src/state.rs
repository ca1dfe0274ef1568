//! Per-query state machine.

/// The state of one status query.
///
/// State transitions:
/// ```text
/// Pending ──┬──► Succeeded
///           └──► Failed
/// ```
///
/// Both outcomes are terminal; a query never returns to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryState {
    /// Request issued, no outcome yet.
    #[default]
    Pending,

    /// A well-formed 2xx reply arrived (terminal state).
    Succeeded,

    /// Transport error, non-2xx status, or malformed body (terminal state).
    Failed,
}

impl QueryState {
    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryState::Succeeded | QueryState::Failed)
    }

    /// Moves to `outcome` if still pending.
    ///
    /// Returns false, leaving the state untouched, when the query has already
    /// settled or `outcome` is `Pending`.
    pub fn settle(&mut self, outcome: QueryState) -> bool {
        if self.is_terminal() || !outcome.is_terminal() {
            return false;
        }
        *self = outcome;
        true
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryState::Pending => "Pending",
            QueryState::Succeeded => "Succeeded",
            QueryState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for QueryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
