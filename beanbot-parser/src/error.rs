use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Local, recoverable parse failures.  The caller surfaces these to the user
/// verbatim; nothing here is a crash, and an ambiguous-but-resolvable message
/// is not an error at all (it succeeds with a `!` flag).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// A message needs at least one explicit account+amount pair plus the
    /// balancing account.
    #[error("too few tokens: expected an account, an amount, and a balancing account, got {found} token(s)")]
    TooFewTokens { found: usize },

    /// The message ends on an amount with no account to balance into.
    #[error("dangling amount '{token}': the message must end on an account, not a number")]
    DanglingAmount { token: String },

    /// A token sat in an amount position but is not a usable amount.
    #[error("invalid amount '{token}': {reason}")]
    InvalidAmountFormat { token: String, reason: String },

    /// Every leg failed to resolve, leaving nothing sensible to emit.
    #[error("no account matched any leg of the message")]
    NoLegsMatched,
}
