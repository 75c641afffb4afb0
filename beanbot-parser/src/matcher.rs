//! Fuzzy resolution of short account queries against the chart of accounts.
//!
//! A query matches an account when its characters occur as a subsequence of
//! the account path in order (the fuzzy path-completion family), or when its
//! colon-separated parts are in-order prefixes of the account's segments
//! (`in:alibaba` matches `Income:Alibaba`).  Matching is case-insensitive.

use beanbot_core::{Account, AccountIndex};

/// One account that matched a query, with its ranking score.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchCandidate<'i> {
    pub account: &'i Account<'static>,
    pub score: i64,
}

/// Resolves a query to ranked candidates, best first.
///
/// Pure with respect to the index: ranking results never records a usage.
/// Equal scores keep the index's frequency order, so the more-used account
/// wins ties.  An empty result means the query is unresolved.
pub fn resolve_query<'i>(query: &str, index: &'i AccountIndex) -> Vec<MatchCandidate<'i>> {
    let mut candidates: Vec<MatchCandidate<'i>> = index
        .iter()
        .filter_map(|account| {
            score(query, account.path()).map(|score| MatchCandidate { account, score })
        })
        .collect();
    // Stable: candidates were collected in index rank order.
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

const BASE: i64 = 1000;
const SEGMENT_BONUS: i64 = 400;

/// Scores one account against a query; `None` when it does not match.
/// Matches that start earlier and spread over fewer characters score higher,
/// and segment-prefix matches get a fixed bonus on top.
fn score(query: &str, path: &str) -> Option<i64> {
    let query = query.to_lowercase();
    let path = path.to_lowercase();
    if query.is_empty() {
        return None;
    }

    let span = subsequence_span(&query, &path);
    let segmented = segment_prefix_match(&query, &path);
    if span.is_none() && !segmented {
        return None;
    }

    let mut score = 0;
    if let Some((first, span)) = span {
        let width = query.chars().count();
        score += BASE - 4 * first as i64 - 2 * (span - width) as i64;
    }
    if segmented {
        score += SEGMENT_BONUS;
    }
    Some(score)
}

/// Greedy in-order subsequence match.  Returns the position of the first hit
/// and the span covered, in characters, when every query character occurs in
/// the path in order.
fn subsequence_span(query: &str, path: &str) -> Option<(usize, usize)> {
    let mut pending = query.chars().peekable();
    let mut first = None;
    let mut last = 0;
    for (pos, c) in path.chars().enumerate() {
        match pending.peek() {
            Some(&needle) if needle == c => {
                pending.next();
                first.get_or_insert(pos);
                last = pos;
            }
            Some(_) => {}
            None => break,
        }
    }
    match (pending.peek().is_none(), first) {
        (true, Some(first)) => Some((first, last - first + 1)),
        _ => None,
    }
}

/// True when every colon-separated query part is a prefix of an account
/// segment, parts and segments taken in order.
fn segment_prefix_match(query: &str, path: &str) -> bool {
    let mut segments = path.split(':');
    query
        .split(':')
        .all(|part| !part.is_empty() && segments.by_ref().any(|seg| seg.starts_with(part)))
}
