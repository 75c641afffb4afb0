//! Turns one chat message into a balanced transaction against a snapshot of
//! the account index.
//!
//! The pipeline is pure and synchronous: `tokenize` splits the message into
//! explicit `(account query, amount)` legs, one trailing implicit leg, and a
//! free-text note; `resolve` runs every query through the fuzzy matcher,
//! infers the implicit amount so each currency sums to zero, and tags the
//! result `*` or `!` from the candidate counts.  The index is never mutated
//! here; recording usage for accepted accounts is the caller's move.

use std::borrow::Cow;

use pest::Parser;
use pest_derive::Parser as PestParser;
use rust_decimal::Decimal;

use beanbot_core as bb;

pub use error::{ParseError, ParseResult};
pub use matcher::{resolve_query, MatchCandidate};

pub mod error;
pub mod matcher;

#[derive(PestParser)]
#[grammar = "message.pest"]
struct MessageParser;

/// Knobs supplied by the caller; the engine itself reads no configuration.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Currency assumed for amounts without an explicit code.
    pub default_currency: Cow<'static, str>,

    /// Maximum number of fractional digits an amount may carry.  Longer
    /// fractions are rejected, never rounded.
    pub max_scale: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            default_currency: Cow::Borrowed("CNY"),
            max_scale: 2,
        }
    }
}

/// One leg of a message before account resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawLeg<'i> {
    /// An account query paired with the amount the user typed.
    Explicit {
        query: &'i str,
        amount: Decimal,
        /// Upper-cased code from the token suffix, absent for the default.
        currency: Option<Cow<'i, str>>,
    },
    /// The final account query, whose amount will be inferred.
    Implicit { query: &'i str },
}

impl<'i> RawLeg<'i> {
    pub fn query(&self) -> &'i str {
        match self {
            RawLeg::Explicit { query, .. } | RawLeg::Implicit { query } => query,
        }
    }
}

/// A tokenized message: explicit legs, one trailing implicit leg, and the
/// free-text note.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedMessage<'i> {
    pub legs: Vec<RawLeg<'i>>,
    pub note: Cow<'i, str>,
}

/// A leg with its ranked account candidates attached.
#[derive(Clone, Debug)]
pub struct Leg<'i> {
    pub raw: RawLeg<'i>,
    pub candidates: Vec<MatchCandidate<'i>>,
}

/// Splits a raw message into legs and note.
///
/// Tokens are paired `(query, amount)` from the front for as long as the
/// amount slot holds a number, but a pair never consumes the final token:
/// that one is reserved for the balancing account.  Everything after the
/// balancing account is the note, rejoined with single spaces.
pub fn tokenize<'i>(raw: &'i str, opts: &ParseOptions) -> ParseResult<ParsedMessage<'i>> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(ParseError::TooFewTokens {
            found: tokens.len(),
        });
    }

    let mut legs = Vec::new();
    let mut at = 0;
    while at + 1 < tokens.len() - 1 {
        match parse_amount_token(tokens[at + 1], opts)? {
            Some(token) => {
                legs.push(RawLeg::Explicit {
                    query: tokens[at],
                    amount: token.num,
                    currency: token.currency.map(currency_code),
                });
                at += 2;
            }
            None => break,
        }
    }
    if legs.is_empty() {
        return Err(ParseError::InvalidAmountFormat {
            token: tokens[1].to_string(),
            reason: "expected a signed decimal amount".to_string(),
        });
    }

    let balancing = tokens[at];
    match parse_amount_token(balancing, opts) {
        // Amount-shaped, valid or not: there is no account to balance into.
        Ok(Some(_)) | Err(ParseError::InvalidAmountFormat { .. }) => {
            return Err(ParseError::DanglingAmount {
                token: balancing.to_string(),
            });
        }
        Ok(None) => {}
        Err(other) => return Err(other),
    }
    legs.push(RawLeg::Implicit { query: balancing });

    let note = match &tokens[at + 1..] {
        [] => Cow::Borrowed(""),
        rest => Cow::Owned(rest.join(" ")),
    };
    Ok(ParsedMessage { legs, note })
}

/// Resolves accounts, balances amounts, and tags confidence.
///
/// The top-ranked candidate is chosen for every leg; a leg with no candidate
/// falls back to its literal query text as a placeholder account.  The whole
/// transaction is flagged `!` unless every leg resolved to exactly one
/// candidate.  Only a message where *no* leg matched at all is rejected.
pub fn resolve<'i>(
    parsed: ParsedMessage<'i>,
    index: &'i bb::AccountIndex,
    date: bb::Date<'i>,
    opts: &ParseOptions,
) -> ParseResult<bb::Transaction<'i>> {
    let legs: Vec<Leg<'i>> = parsed
        .legs
        .into_iter()
        .map(|raw| {
            let candidates = matcher::resolve_query(raw.query(), index);
            Leg { raw, candidates }
        })
        .collect();

    if legs.iter().all(|leg| leg.candidates.is_empty()) {
        return Err(ParseError::NoLegsMatched);
    }
    let uncertain = legs.iter().any(|leg| leg.candidates.len() != 1);

    // Typed amounts grouped by currency.  An explicit posting stores the
    // negation of what was typed; the implicit posting carries the group
    // total, so each currency sums to zero.
    let mut sums: Vec<(bb::Currency<'i>, Decimal)> = Vec::new();
    let mut postings = Vec::new();
    for leg in &legs {
        let account = chosen_account(leg);
        let units = match &leg.raw {
            RawLeg::Explicit {
                amount, currency, ..
            } => {
                let currency = currency
                    .clone()
                    .unwrap_or_else(|| opts.default_currency.clone());
                add_to_group(&mut sums, &currency, *amount);
                bb::Amount::new(-*amount, currency)
            }
            RawLeg::Implicit { .. } => {
                let (currency, total) = balancing_units(&sums, opts);
                bb::Amount::new(total, currency)
            }
        };
        postings.push(bb::Posting { account, units });
    }

    Ok(bb::Transaction {
        date,
        flag: if uncertain {
            bb::Flag::Warning
        } else {
            bb::Flag::Okay
        },
        payee: Cow::Borrowed(""),
        narration: parsed.note,
        postings,
    })
}

fn chosen_account<'i>(leg: &Leg<'i>) -> bb::Account<'i> {
    match leg.candidates.first() {
        Some(candidate) => bb::Account::from(candidate.account.path()),
        None => bb::Account::from(leg.raw.query()),
    }
}

fn add_to_group<'i>(sums: &mut Vec<(bb::Currency<'i>, Decimal)>, currency: &bb::Currency<'i>, amount: Decimal) {
    match sums.iter_mut().find(|(c, _)| c == currency) {
        Some((_, total)) => *total += amount,
        None => sums.push((currency.clone(), amount)),
    }
}

/// The implicit leg balances the single currency the explicit legs share,
/// falling back to the configured default when they disagree.
fn balancing_units<'i>(
    sums: &[(bb::Currency<'i>, Decimal)],
    opts: &ParseOptions,
) -> (bb::Currency<'i>, Decimal) {
    match sums {
        [(currency, total)] => (currency.clone(), *total),
        _ => {
            let currency: bb::Currency<'i> = opts.default_currency.clone();
            let total = sums
                .iter()
                .find(|(c, _)| *c == currency)
                .map(|(_, total)| *total)
                .unwrap_or(Decimal::ZERO);
            (currency, total)
        }
    }
}

/// The pieces of one amount token.
#[derive(Debug)]
struct AmountToken<'i> {
    num: Decimal,
    currency: Option<&'i str>,
}

/// Classifies a token: `Ok(None)` when it is not an amount at all, an
/// `InvalidAmountFormat` error when it is amount-shaped but carries more
/// fractional digits than the configured precision allows.
fn parse_amount_token<'i>(
    token: &'i str,
    opts: &ParseOptions,
) -> ParseResult<Option<AmountToken<'i>>> {
    let parsed = match MessageParser::parse(Rule::amount_token, token) {
        Ok(mut pairs) => match pairs.next() {
            Some(pair) => pair,
            None => return Ok(None),
        },
        Err(_) => return Ok(None),
    };

    let mut negative = false;
    let mut num = Decimal::ZERO;
    let mut currency = None;
    for piece in parsed.into_inner() {
        match piece.as_rule() {
            Rule::sign => negative = piece.as_str() == "-",
            Rule::num => num = parse_num(piece, token, opts)?,
            Rule::currency => currency = Some(piece.as_str()),
            _ => {}
        }
    }
    Ok(Some(AmountToken {
        num: if negative { -num } else { num },
        currency,
    }))
}

fn parse_num(piece: pest::iterators::Pair<'_, Rule>, token: &str, opts: &ParseOptions) -> ParseResult<Decimal> {
    let text = piece.as_str();
    if let Some(frac) = text.split('.').nth(1) {
        if frac.len() > opts.max_scale {
            return Err(ParseError::InvalidAmountFormat {
                token: token.to_string(),
                reason: format!(
                    "at most {} fractional digit(s) allowed, got {}",
                    opts.max_scale,
                    frac.len()
                ),
            });
        }
    }
    let normalized: Cow<'_, str> = if text.starts_with('.') {
        Cow::Owned(format!("0{}", text))
    } else {
        Cow::Borrowed(text)
    };
    normalized
        .parse::<Decimal>()
        .map_err(|err| ParseError::InvalidAmountFormat {
            token: token.to_string(),
            reason: err.to_string(),
        })
}

/// Borrow the code when it is already upper-case, allocate otherwise.
fn currency_code(code: &str) -> Cow<'_, str> {
    if code.bytes().all(|b| b.is_ascii_uppercase()) {
        Cow::Borrowed(code)
    } else {
        Cow::Owned(code.to_ascii_uppercase())
    }
}
