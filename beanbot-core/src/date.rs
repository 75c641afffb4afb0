use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;

/// A calendar date as it appears on a ledger entry.  Held as text so that
/// rendering the same transaction twice is byte-identical regardless of how
/// the date was supplied.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Date<'a> {
    s: Cow<'a, str>,
}

impl<'a> Date<'a> {
    pub fn as_str(&self) -> &str {
        &self.s
    }
}

impl fmt::Display for Date<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.s)
    }
}

impl<'a> From<Cow<'a, str>> for Date<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        Date { s }
    }
}

impl<'a> From<&'a str> for Date<'a> {
    fn from(s: &'a str) -> Self {
        Cow::from(s).into()
    }
}

impl From<NaiveDate> for Date<'static> {
    fn from(d: NaiveDate) -> Self {
        Cow::from(d.format("%Y-%m-%d").to_string()).into()
    }
}

#[test]
fn test_date_from_chrono() {
    assert_eq!(
        Date::from(chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
        Cow::from("2024-01-05").into()
    );
}
