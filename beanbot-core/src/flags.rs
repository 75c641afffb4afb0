use std::fmt;

/// Confidence tag on a resolved transaction.
///
/// `Okay` renders as `*` and means every leg resolved to exactly one account.
/// `Warning` renders as `!` and marks an entry the user is expected to review
/// because at least one leg was unresolved or ambiguous.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flag {
    Okay,
    Warning,
}

impl Flag {
    pub fn is_warning(self) -> bool {
        self == Flag::Warning
    }
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Okay
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Okay => f.write_str("*"),
            Flag::Warning => f.write_str("!"),
        }
    }
}
