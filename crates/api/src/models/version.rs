//! Maven version precedence.
//!
//! A version string is split into items on `.` and `-` and on every
//! transition between digits and letters. `-` and digit/letter transitions
//! open a nested list, so `1.0-beta-2` becomes `[1, 0, [beta, [2]]]`.
//! Trailing "null" items (`0`, empty qualifiers, `ga`, `final`,
//! `release`) are dropped, which makes `1`, `1.0` and `1.0.0` equal.
//!
//! Qualifier order:
//! `alpha < beta < milestone < rc = cr < snapshot < "" = ga = final = release < sp`,
//! with unknown qualifiers sorting after `sp` lexically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const QUALIFIERS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];
const RELEASE_QUALIFIER_INDEX: &str = "5";

#[derive(Debug, Clone)]
enum Item {
    /// Decimal digits with leading zeros stripped; empty means zero.
    Int(String),
    /// Normalized qualifier.
    Str(String),
    List(Vec<Item>),
}

impl Item {
    fn int(digits: &str) -> Self {
        Item::Int(digits.trim_start_matches('0').to_string())
    }

    fn qualifier(value: &str, followed_by_digit: bool) -> Self {
        let value = match value {
            "a" if followed_by_digit => "alpha",
            "b" if followed_by_digit => "beta",
            "m" if followed_by_digit => "milestone",
            "ga" | "final" | "release" => "",
            "cr" => "rc",
            other => other,
        };
        Item::Str(value.to_string())
    }

    fn parse(is_digit: bool, text: &str) -> Self {
        if is_digit {
            Item::int(text)
        } else {
            Item::qualifier(text, false)
        }
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Int(digits) => digits.is_empty(),
            Item::Str(value) => value.is_empty(),
            Item::List(items) => items.is_empty(),
        }
    }

    fn compare(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Int(digits), None) => {
                if digits.is_empty() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Item::Int(a), Some(Item::Int(b))) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Item::Int(_), Some(_)) => Ordering::Greater,

            (Item::Str(value), None) => {
                comparable_qualifier(value).as_str().cmp(RELEASE_QUALIFIER_INDEX)
            }
            (Item::Str(a), Some(Item::Str(b))) => {
                comparable_qualifier(a).cmp(&comparable_qualifier(b))
            }
            (Item::Str(_), Some(Item::Int(_))) | (Item::Str(_), Some(Item::List(_))) => {
                Ordering::Less
            }

            (Item::List(items), None) => items
                .iter()
                .map(|item| item.compare(None))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal),
            (Item::List(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::List(_), Some(Item::Str(_))) => Ordering::Greater,
            (Item::List(left), Some(Item::List(right))) => compare_lists(left, right),
        }
    }
}

fn compare_lists(left: &[Item], right: &[Item]) -> Ordering {
    let len = left.len().max(right.len());
    for i in 0..len {
        let ord = match (left.get(i), right.get(i)) {
            (Some(l), r) => l.compare(r),
            (None, Some(r)) => r.compare(None).reverse(),
            (None, None) => Ordering::Equal,
        };
        if ord.is_ne() {
            return ord;
        }
    }
    Ordering::Equal
}

fn comparable_qualifier(qualifier: &str) -> String {
    match QUALIFIERS.iter().position(|q| *q == qualifier) {
        Some(index) => index.to_string(),
        None => format!("{}-{}", QUALIFIERS.len(), qualifier),
    }
}

fn normalize(items: &mut Vec<Item>) {
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if items[i].is_null() {
            items.remove(i);
        } else if !matches!(items[i], Item::List(_)) {
            break;
        }
    }
}

fn parse_items(version: &str) -> Vec<Item> {
    let version = version.to_lowercase();
    let chars: Vec<(usize, char)> = version.char_indices().collect();

    // Each nested list is opened as the last element of its parent and
    // nothing is appended to a parent afterwards, so a plain stack suffices.
    let mut stack: Vec<Vec<Item>> = vec![Vec::new()];
    let mut is_digit = false;
    let mut start = 0usize;

    for &(i, c) in &chars {
        let Some(list) = stack.last_mut() else {
            break;
        };
        if c == '.' || c == '-' {
            if i == start {
                list.push(Item::Int(String::new()));
            } else {
                list.push(Item::parse(is_digit, &version[start..i]));
            }
            start = i + c.len_utf8();
            if c == '-' {
                stack.push(Vec::new());
            }
        } else if c.is_ascii_digit() {
            if !is_digit && i > start {
                list.push(Item::qualifier(&version[start..i], true));
                start = i;
                stack.push(Vec::new());
            }
            is_digit = true;
        } else {
            if is_digit && i > start {
                list.push(Item::int(&version[start..i]));
                start = i;
                stack.push(Vec::new());
            }
            is_digit = false;
        }
    }

    if version.len() > start
        && let Some(list) = stack.last_mut()
    {
        list.push(Item::parse(is_digit, &version[start..]));
    }

    let mut child = stack.pop().unwrap_or_default();
    normalize(&mut child);
    while let Some(mut parent) = stack.pop() {
        parent.push(Item::List(child));
        normalize(&mut parent);
        child = parent;
    }
    child
}

/// A version string ordered by Maven precedence rules.
///
/// Equality is precedence equality: `1.0` and `1` compare equal even
/// though [`ComparableVersion::as_str`] differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ComparableVersion {
    text: String,
    items: Vec<Item>,
}

impl ComparableVersion {
    pub fn new(version: impl Into<String>) -> Self {
        let text = version.into();
        let items = parse_items(&text);
        Self { text, items }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<String> for ComparableVersion {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ComparableVersion> for String {
    fn from(value: ComparableVersion) -> Self {
        value.text
    }
}

impl FromStr for ComparableVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Ord for ComparableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }
}

impl PartialOrd for ComparableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ComparableVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableVersion {}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ComparableVersion {
        ComparableVersion::new(s)
    }

    fn assert_ascending(versions: &[&str]) {
        for pair in versions.windows(2) {
            assert!(
                v(pair[0]) < v(pair[1]),
                "expected {} < {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_trailing_zeros_are_equal() {
        assert_eq!(v("1"), v("1.0"));
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("1-ga"), v("1"));
        assert_eq!(v("1.0.FINAL"), v("1"));
    }

    #[test]
    fn test_numeric_not_lexical() {
        assert_ascending(&["1.2", "1.9", "1.10", "1.100", "2"]);
        assert!(v("10.0") > v("9.9.9"));
    }

    #[test]
    fn test_qualifier_order() {
        assert_ascending(&[
            "1.0-alpha-1",
            "1.0-beta-1",
            "1.0-milestone-1",
            "1.0-rc-1",
            "1.0-SNAPSHOT",
            "1.0",
            "1.0-sp",
            "1.0-whatever",
            "1.0.1",
        ]);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(v("1.0-cr1"), v("1.0-rc1"));
        assert_eq!(v("1.0a1"), v("1.0-alpha-1"));
        assert_eq!(v("1.0b2"), v("1.0-beta-2"));
        assert_eq!(v("1.0m3"), v("1.0-milestone-3"));
    }

    #[test]
    fn test_large_numbers() {
        assert!(v("1.12345678901234567890") > v("1.12345678901234567889"));
        assert_eq!(v("1.007"), v("1.7"));
    }

    #[test]
    fn test_snapshot_sorts_above_older_release() {
        let mut versions = vec![v("1.0"), v("2.0-SNAPSHOT"), v("1.5")];
        versions.sort_by(|a, b| b.cmp(a));
        let texts: Vec<_> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(texts, vec!["2.0-SNAPSHOT", "1.5", "1.0"]);
    }

    #[test]
    fn test_display_keeps_original_text() {
        assert_eq!(v("1.0-RC1").to_string(), "1.0-RC1");
    }
}
