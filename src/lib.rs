//! beanbot — turns a terse chat message into a balanced double-entry ledger
//! entry.
//!
//! A message like `1234 20 Restau 中饭` is one explicit leg (`1234` paid
//! `20`), one balancing account (`Restau`), and a note.  Account
//! abbreviations are fuzzy-matched against the chart of accounts, the
//! unstated amount is inferred so the entry sums to zero, and the result is
//! rendered as canonical ledger text together with its sign-flipped revert
//! entry.
//!
//! The caller owns all I/O and state: it supplies the message text, a
//! snapshot of the [`AccountIndex`], and the calendar date, and later feeds
//! accepted accounts back through [`AccountIndex::record_usage`].  Nothing in
//! here reads files, the network, or the clock.

use chrono::NaiveDate;
use thiserror::Error;

pub use beanbot_core::{
    Account, AccountIndex, Amount, Currency, Date, Flag, Posting, Transaction,
};
pub use beanbot_parser::{
    resolve, resolve_query, tokenize, MatchCandidate, ParseError, ParseOptions, ParsedMessage,
    RawLeg,
};
pub use beanbot_render::{render_entry, render_transaction, RenderError};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A fully processed message: the resolved transaction plus its canonical
/// and revert text.
#[derive(Debug)]
pub struct Processed<'i> {
    pub transaction: Transaction<'i>,
    pub canonical: String,
    pub inverse: String,
}

/// Runs the whole pipeline for one message against an index snapshot.
///
/// Pure request/response: the index is read-only for the duration of the
/// call, and the same `(message, index, date)` always produces the same
/// output.
pub fn process<'i>(
    raw: &'i str,
    index: &'i AccountIndex,
    date: NaiveDate,
    opts: &ParseOptions,
) -> Result<Processed<'i>, ProcessError> {
    let parsed = tokenize(raw, opts)?;
    let transaction = resolve(parsed, index, Date::from(date), opts)?;
    let (canonical, inverse) = render_entry(&transaction)?;
    Ok(Processed {
        transaction,
        canonical,
        inverse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn index(paths: &[&str]) -> AccountIndex {
        paths.iter().map(|p| Account::from(p.to_string())).collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    fn run<'i>(msg: &'i str, index: &'i AccountIndex) -> Result<Processed<'i>, ProcessError> {
        process(msg, index, date(), &ParseOptions::default())
    }

    #[test]
    fn scenario_unique_two_leg_message() -> anyhow::Result<()> {
        let index = index(&["Assets:Savings:BOC1234", "Expenses:Food:Restaurant"]);
        let out = run("1234 20 Restau 中饭", &index)?;

        assert_eq!(out.transaction.flag, Flag::Okay);
        assert_eq!(out.transaction.narration, "中饭");
        assert_eq!(
            out.canonical,
            indoc! {r#"
                2024-01-05 * "" "中饭"
                    Assets:Savings:BOC1234    -20.00 CNY
                    Expenses:Food:Restaurant   20.00 CNY
            "#}
        );
        Ok(())
    }

    #[test]
    fn scenario_three_leg_message_balances_to_zero() -> anyhow::Result<()> {
        let index = index(&[
            "Assets:Savings:BOC1234",
            "Expenses:Food:Restaurant",
            "Income:Alibaba",
            "Expenses:Food:Fruit",
        ]);
        let out = run("1234 48.12 in:alibaba 1.88 fruit 水果：西瓜 菠萝蜜", &index)?;

        let tx = &out.transaction;
        assert_eq!(tx.postings.len(), 3);
        assert_eq!(tx.flag, Flag::Okay);
        assert_eq!(tx.narration, "水果：西瓜 菠萝蜜");
        assert_eq!(tx.postings[2].account.path(), "Expenses:Food:Fruit");
        assert_eq!(tx.postings[2].units.num, Decimal::new(5000, 2));
        assert_eq!(tx.postings[2].units.currency, "CNY");

        let total: Decimal = tx.postings.iter().map(|p| p.units.num).sum();
        assert_eq!(total, Decimal::ZERO);
        Ok(())
    }

    #[test]
    fn scenario_ambiguous_query_renders_a_warning() -> anyhow::Result<()> {
        let index = index(&["Assets:Savings:BOC1234", "Expenses:Food", "Income:Food"]);
        let out = run("1234 20 food", &index)?;
        assert_eq!(out.transaction.flag, Flag::Warning);
        assert!(out.canonical.starts_with("2024-01-05 ! "));
        Ok(())
    }

    #[test]
    fn scenario_two_tokens_fail() {
        let index = index(&["Assets:Savings:BOC1234"]);
        match run("1234 20", &index) {
            Err(ProcessError::Parse(ParseError::TooFewTokens { found: 2 })) => {}
            other => panic!("expected TooFewTokens, got {:?}", other.map(|p| p.canonical)),
        }
    }

    #[test]
    fn scenario_trailing_number_fails() {
        let index = index(&["Assets:Savings:BOC1234"]);
        match run("1234 20 50", &index) {
            Err(ProcessError::Parse(ParseError::DanglingAmount { token })) => {
                assert_eq!(token, "50")
            }
            other => panic!("expected DanglingAmount, got {:?}", other.map(|p| p.canonical)),
        }
    }

    #[test]
    fn explicit_legs_gain_one_balancing_posting() -> anyhow::Result<()> {
        let index = index(&["Assets:A2739", "Assets:A9423", "Assets:Ecard", "Expenses:Yyyy"]);
        for (msg, explicit) in &[
            ("2739 4.5 yyyy", 1usize),
            ("2739 4.5 9423 2.3 yyyy", 2),
            ("2739 4.5 9423 2.3 ecard 5 yyyy", 3),
        ] {
            let out = run(msg, &index)?;
            assert_eq!(out.transaction.postings.len(), explicit + 1);
            let total: Decimal = out.transaction.postings.iter().map(|p| p.units.num).sum();
            assert_eq!(total, Decimal::ZERO);
        }
        Ok(())
    }

    #[test]
    fn processing_twice_is_byte_identical() -> anyhow::Result<()> {
        let index = index(&["Assets:Savings:BOC1234", "Expenses:Food:Restaurant"]);
        let first = run("1234 20 Restau 中饭", &index)?;
        let second = run("1234 20 Restau 中饭", &index)?;
        assert_eq!(first.canonical, second.canonical);
        assert_eq!(first.inverse, second.inverse);
        Ok(())
    }

    #[test]
    fn revert_round_trip_zeroes_every_account() -> anyhow::Result<()> {
        let index = index(&[
            "Assets:Savings:BOC1234",
            "Income:Alibaba",
            "Expenses:Food:Fruit",
        ]);
        let out = run("1234 48.12 in:alibaba 1.88 fruit", &index)?;

        let mut balances: HashMap<String, Decimal> = HashMap::new();
        for posting in out
            .transaction
            .postings
            .iter()
            .chain(out.transaction.inverse().postings.iter())
        {
            *balances.entry(posting.account.path().to_string()).or_default() += posting.units.num;
        }
        assert!(balances.values().all(|total| *total == Decimal::ZERO));
        Ok(())
    }

    #[test]
    fn growing_the_chart_never_raises_confidence() -> anyhow::Result<()> {
        let narrow = index(&["Assets:Savings:BOC1234", "Expenses:Food"]);
        let wide = index(&["Assets:Savings:BOC1234", "Expenses:Food", "Income:Food"]);

        assert_eq!(run("1234 20 food", &narrow)?.transaction.flag, Flag::Okay);
        assert_eq!(run("1234 20 food", &wide)?.transaction.flag, Flag::Warning);
        Ok(())
    }

    #[test]
    fn every_unique_leg_means_a_confirmed_flag() -> anyhow::Result<()> {
        let index = index(&["Assets:Savings:BOC1234", "Expenses:Food:Restaurant"]);
        let out = run("1234 20 Restau", &index)?;
        assert_eq!(out.transaction.flag, Flag::Okay);
        assert!(out.canonical.starts_with("2024-01-05 * "));
        Ok(())
    }
}
