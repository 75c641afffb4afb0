use super::account::Account;

/// The chart of accounts, ordered by historical usage.
///
/// Most-used accounts iterate first; equally-used accounts keep the order
/// they were first inserted in.  The index is the only state that outlives a
/// single message: the ledger collaborator loads it at startup, bumps ranks
/// with `record_usage` once a transaction is accepted, and replaces it
/// wholesale with `reload`.  Both mutations happen strictly between
/// message-processing calls, so resolution always sees a fixed snapshot.
#[derive(Clone, Debug, Default)]
pub struct AccountIndex {
    entries: Vec<IndexEntry>,
}

#[derive(Clone, Debug)]
struct IndexEntry {
    account: Account<'static>,
    uses: u64,
    seq: usize,
}

impl AccountIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an account, refusing exact-path duplicates.
    pub fn insert(&mut self, account: Account<'static>) -> bool {
        if self.contains(account.path()) {
            return false;
        }
        let seq = self.entries.len();
        self.entries.push(IndexEntry {
            account,
            uses: 0,
            seq,
        });
        true
    }

    /// Replaces the chart wholesale, deduplicating on exact path while
    /// preserving first-occurrence order.  Usage history does not survive a
    /// reload.
    pub fn reload<I>(&mut self, accounts: I)
    where
        I: IntoIterator<Item = Account<'static>>,
    {
        self.entries.clear();
        for account in accounts {
            self.insert(account);
        }
    }

    /// Counts one more use for the account and re-ranks.  Returns `false`
    /// when the path is not in the chart.
    pub fn record_usage(&mut self, path: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.account.path() == path) {
            Some(entry) => entry.uses += 1,
            None => return false,
        }
        // Stable, so equally-used accounts keep insertion order.
        self.entries
            .sort_by(|a, b| b.uses.cmp(&a.uses).then(a.seq.cmp(&b.seq)));
        true
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.account.path() == path)
    }

    /// Accounts in rank order, most used first.
    pub fn iter(&self) -> impl Iterator<Item = &Account<'static>> {
        self.entries.iter().map(|e| &e.account)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::iter::FromIterator<Account<'static>> for AccountIndex {
    fn from_iter<I: IntoIterator<Item = Account<'static>>>(iter: I) -> Self {
        let mut index = AccountIndex::new();
        for account in iter {
            index.insert(account);
        }
        index
    }
}
