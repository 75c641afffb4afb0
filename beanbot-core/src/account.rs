use std::borrow::Cow;
use std::fmt;

/// Represents an account.
///
/// An account name is a colon-separated hierarchical path.  Beanbot takes the
/// chart of accounts as given by the ledger collaborator and does not impose
/// Beancount's five root categories on it; identity is the exact path string.
///
/// Some example accounts:
///
/// ```text
/// Assets:Savings:BOC1234
/// Expenses:Food:Restaurant
/// Income:Alibaba
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Account<'a> {
    path: Cow<'a, str>,
}

impl<'a> Account<'a> {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The colon-separated parts of the path, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split(':')
    }

    pub fn into_owned(self) -> Account<'static> {
        Account {
            path: Cow::Owned(self.path.into_owned()),
        }
    }
}

impl<'a> From<Cow<'a, str>> for Account<'a> {
    fn from(path: Cow<'a, str>) -> Self {
        Account { path }
    }
}

impl<'a> From<&'a str> for Account<'a> {
    fn from(path: &'a str) -> Self {
        Cow::Borrowed(path).into()
    }
}

impl From<String> for Account<'static> {
    fn from(path: String) -> Self {
        Cow::from(path).into()
    }
}

impl fmt::Display for Account<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
