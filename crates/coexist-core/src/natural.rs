//! Natural (digit-aware) string ordering.
//!
//! Strings are split into alternating runs of ASCII digits and everything
//! else. Digit runs compare by numeric value, other runs compare
//! case-insensitively, so `rc9 < rc10` and `RC2 == rc2`. No locale collation
//! is involved.

use std::cmp::Ordering;

/// A maximal run of either digits or non-digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Iterator over the runs of a string.
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);
        let (run, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits { Run::Digits(run) } else { Run::Text(run) })
    }
}

/// Compare two strings in natural order.
///
/// A string that is a run-wise prefix of the other sorts first, so the empty
/// string sorts before everything else. At a position where one side has
/// digits and the other text, the digits sort first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Runs { rest: a };
    let mut right = Runs { rest: b };
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = cmp_runs(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn cmp_runs(a: Run<'_>, b: Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Digits(x), Run::Digits(y)) => cmp_numeric(x, y),
        (Run::Text(x), Run::Text(y)) => cmp_caseless(x, y),
        (Run::Digits(_), Run::Text(_)) => Ordering::Less,
        (Run::Text(_), Run::Digits(_)) => Ordering::Greater,
    }
}

/// Compare digit runs by value without parsing, so arbitrarily long runs
/// cannot overflow. Leading zeros are insignificant.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_caseless(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_runs_compare_numerically() {
        assert_eq!(natural_cmp("rc9", "rc10"), Ordering::Less);
        assert_eq!(natural_cmp("rc10", "rc9"), Ordering::Greater);
        assert_eq!(natural_cmp("beta2.10", "beta2.9"), Ordering::Greater);
    }

    #[test]
    fn text_runs_ignore_case() {
        assert_eq!(natural_cmp("RC2", "rc2"), Ordering::Equal);
        assert_eq!(natural_cmp("Alpha", "beta"), Ordering::Less);
    }

    #[test]
    fn leading_zeros_are_insignificant() {
        assert_eq!(natural_cmp("rc007", "rc7"), Ordering::Equal);
        assert_eq!(natural_cmp("rc010", "rc9"), Ordering::Greater);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("rc", "rc1"), Ordering::Less);
        assert_eq!(natural_cmp("", ""), Ordering::Equal);
    }

    #[test]
    fn digits_sort_before_text() {
        assert_eq!(natural_cmp("1a", "aa"), Ordering::Less);
        assert_eq!(natural_cmp("b", "10"), Ordering::Greater);
    }

    #[test]
    fn very_long_digit_runs() {
        let big = "9".repeat(40);
        let bigger = format!("1{}", "0".repeat(40));
        assert_eq!(natural_cmp(&big, &bigger), Ordering::Less);
    }

    #[test]
    fn ordering_is_antisymmetric() {
        let samples = ["", "a", "A1", "rc9", "rc10", "rc010", "beta", "beta.2", "1", "x-y"];
        for a in samples {
            for b in samples {
                assert_eq!(natural_cmp(a, b), natural_cmp(b, a).reverse(), "{a:?} vs {b:?}");
            }
        }
    }
}
