use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

use super::Currency;

/// A number of units of a certain commodity.
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Amount<'a> {
    /// The value of the amount.
    pub num: Decimal,

    /// The commodity of the amount.
    pub currency: Currency<'a>,
}

impl<'a> Amount<'a> {
    pub fn new(num: Decimal, currency: impl Into<Currency<'a>>) -> Self {
        Amount {
            num,
            currency: currency.into(),
        }
    }

    /// The same amount with the sign flipped.
    pub fn negated(&self) -> Amount<'a> {
        Amount {
            num: -self.num,
            currency: self.currency.clone(),
        }
    }
}
