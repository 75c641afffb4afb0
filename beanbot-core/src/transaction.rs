use std::borrow::Cow;

use typed_builder::TypedBuilder;

use super::account::Account;
use super::amount::Amount;
use super::date::Date;
use super::flags::Flag;

/// A resolved, balanced transaction ready for rendering.
///
/// Postings keep the original leg order: explicit legs first, the implicit
/// balancing leg last.  Posting amounts sum to zero per currency.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Transaction<'a> {
    pub date: Date<'a>,

    pub flag: Flag,

    /// Chat-born entries carry no payee; kept for ledger-shape fidelity.
    pub payee: Cow<'a, str>,

    /// The free-text note trailing the message.
    pub narration: Cow<'a, str>,

    pub postings: Vec<Posting<'a>>,
}

impl<'a> Transaction<'a> {
    /// The revert entry: same date, note, and accounts with every posting
    /// amount sign-flipped.  Appending it undoes this entry without touching
    /// ledger history.
    pub fn inverse(&self) -> Transaction<'a> {
        Transaction {
            date: self.date.clone(),
            flag: self.flag,
            payee: self.payee.clone(),
            narration: self.narration.clone(),
            postings: self.postings.iter().map(Posting::inverse).collect(),
        }
    }
}

/// A single account/amount line within a transaction.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Posting<'a> {
    /// Account being posted to.
    pub account: Account<'a>,

    /// The amount being posted.
    pub units: Amount<'a>,
}

impl<'a> Posting<'a> {
    pub fn inverse(&self) -> Posting<'a> {
        Posting {
            account: self.account.clone(),
            units: self.units.negated(),
        }
    }
}
