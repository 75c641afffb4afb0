//! Canonical ledger-text rendering for resolved transactions.
//!
//! Rendering is pure and deterministic: the date comes from the transaction,
//! so the same input always yields byte-identical text.

use std::io::{self, Write};

use rust_decimal::Decimal;
use thiserror::Error;

use beanbot_core::{Posting, Transaction};


/// Renders a transaction into the canonical append-ready shape:
///
/// ```text
/// 2024-01-05 * "" "中饭"
///     Assets:Savings:BOC1234    -20.00 CNY
///     Expenses:Food:Restaurant   20.00 CNY
/// ```
///
/// One indented posting line per leg in original order, accounts padded to a
/// common width, amounts right-aligned at fixed two decimals with the
/// currency code suffixed.  An uncertain transaction carries `!` in place of
/// `*`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct BasicRenderer {}

impl BasicRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

pub fn render<W: Write>(w: &mut W, transaction: &Transaction<'_>) -> Result<(), RenderError> {
    BasicRenderer::default().render(transaction, w)
}

/// Canonical text for one transaction.
pub fn render_transaction(transaction: &Transaction<'_>) -> Result<String, RenderError> {
    let mut out = Vec::new();
    render(&mut out, transaction)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Canonical text plus the sign-flipped revert entry.  Appending the second
/// string to the ledger undoes the first without deleting anything.
pub fn render_entry(transaction: &Transaction<'_>) -> Result<(String, String), RenderError> {
    Ok((
        render_transaction(transaction)?,
        render_transaction(&transaction.inverse())?,
    ))
}

impl<'a, W: Write> Renderer<&'a Transaction<'_>, W> for BasicRenderer {
    type Error = RenderError;

    fn render(&self, transaction: &'a Transaction<'_>, write: &mut W) -> Result<(), Self::Error> {
        writeln!(
            write,
            "{} {} \"{}\" \"{}\"",
            transaction.date, transaction.flag, transaction.payee, transaction.narration
        )?;

        let account_width = transaction
            .postings
            .iter()
            .map(|p| p.account.path().chars().count())
            .max()
            .unwrap_or(0);
        let amount_width = transaction
            .postings
            .iter()
            .map(|p| fixed_point(&p.units.num).len())
            .max()
            .unwrap_or(0);

        for posting in &transaction.postings {
            posting_line(write, posting, account_width, amount_width)?;
        }
        Ok(())
    }
}

fn posting_line<W: Write>(
    write: &mut W,
    posting: &Posting<'_>,
    account_width: usize,
    amount_width: usize,
) -> Result<(), RenderError> {
    writeln!(
        write,
        "    {:<aw$}  {:>nw$} {}",
        posting.account.path(),
        fixed_point(&posting.units.num),
        posting.units.currency,
        aw = account_width,
        nw = amount_width,
    )?;
    Ok(())
}

/// Fixed two decimal places; the sign travels with the stored value.
fn fixed_point(num: &Decimal) -> String {
    let mut num = *num;
    num.rescale(2);
    num.to_string()
}
