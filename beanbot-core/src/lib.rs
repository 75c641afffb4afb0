use std::borrow::Cow;

pub use account::Account;
pub use amount::Amount;
pub use date::Date;
pub use flags::Flag;
pub use index::AccountIndex;
pub use transaction::{Posting, Transaction};

pub mod account;
pub mod amount;
mod date;
pub mod flags;
pub mod index;
pub mod transaction;

pub type Currency<'a> = Cow<'a, str>;
