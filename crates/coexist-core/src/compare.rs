//! Precedence between version descriptors.
//!
//! The comparison is a cascade: major, minor, patch, then either build time
//! (when either side is a next build) or the natural order of the suffix.
//! The first nonzero step decides.

use std::cmp::Ordering;

use crate::descriptor::VersionDescriptor;
use crate::natural::natural_cmp;

/// Compare two descriptors with `a - b` sign semantics.
///
/// Positive means `a` is newer, zero means equal precedence, negative means
/// `a` is older. For the numeric steps the magnitude is the field
/// difference (saturated to the `i64` range); the suffix step yields -1, 0
/// or 1.
///
/// The build-time step applies as soon as *one* side is a next build, so a
/// next build and a release with the same numbers are ordered by build time
/// alone.
pub fn compare(a: &VersionDescriptor, b: &VersionDescriptor) -> i64 {
    let steps = [
        difference(a.major, b.major),
        difference(a.minor, b.minor),
        difference(a.patch, b.patch),
    ];
    if let Some(&diff) = steps.iter().find(|d| **d != 0) {
        return diff;
    }

    if a.is_next || b.is_next {
        return difference(a.build_time, b.build_time);
    }

    match compare_suffix(&a.suffix, &b.suffix) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// [`compare`] collapsed to an [`Ordering`].
pub fn precedence(a: &VersionDescriptor, b: &VersionDescriptor) -> Ordering {
    compare(a, b).cmp(&0)
}

/// Order two pre-release suffixes.
///
/// An empty suffix is a plain release and outranks every non-empty suffix.
/// Non-empty suffixes use [`natural_cmp`].
pub fn compare_suffix(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => natural_cmp(a, b),
    }
}

/// Signed difference, clamped to a range symmetric around zero so that
/// negating a result never overflows.
fn difference(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    let limit = i128::from(i64::MAX);
    diff.clamp(-limit, limit) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(major: u64, minor: u64, patch: u64) -> VersionDescriptor {
        VersionDescriptor::new(major, minor, patch)
    }

    fn samples() -> Vec<VersionDescriptor> {
        vec![
            release(1, 0, 0),
            release(1, 0, 1),
            release(1, 2, 0),
            release(2, 0, 0),
            release(2, 0, 0).with_suffix("rc9"),
            release(2, 0, 0).with_suffix("rc10"),
            release(2, 0, 0).with_suffix("RC10"),
            release(2, 0, 0).with_next_build(100),
            release(2, 0, 0).with_next_build(200),
            release(u64::MAX, 0, 0),
            release(0, 0, 0),
        ]
    }

    #[test]
    fn major_minor_patch_cascade() {
        assert_eq!(compare(&release(2, 0, 0), &release(1, 9, 9)), 1);
        assert_eq!(compare(&release(1, 3, 0), &release(1, 1, 7)), 2);
        assert_eq!(compare(&release(1, 1, 2), &release(1, 1, 7)), -5);
    }

    #[test]
    fn equal_descriptors_compare_zero() {
        for d in samples() {
            assert_eq!(compare(&d, &d), 0, "{d}");
        }
    }

    #[test]
    fn antisymmetric() {
        let all = samples();
        for a in &all {
            for b in &all {
                assert_eq!(compare(a, b), -compare(b, a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn transitive_over_numeric_fields() {
        let chain = [release(3, 0, 0), release(2, 5, 1), release(2, 5, 0), release(0, 9, 9)];
        for (i, a) in chain.iter().enumerate() {
            for c in &chain[i + 1..] {
                assert!(compare(a, c) > 0, "{a} should outrank {c}");
            }
        }
    }

    #[test]
    fn suffix_uses_natural_order() {
        let rc9 = release(2, 0, 0).with_suffix("rc9");
        let rc10 = release(2, 0, 0).with_suffix("rc10");
        assert!(compare(&rc9, &rc10) < 0);
    }

    #[test]
    fn suffix_is_case_insensitive() {
        let lower = release(2, 0, 0).with_suffix("rc10");
        let upper = release(2, 0, 0).with_suffix("RC10");
        assert_eq!(compare(&lower, &upper), 0);
    }

    #[test]
    fn empty_suffix_outranks_prerelease() {
        let stable = release(2, 0, 0);
        let rc = release(2, 0, 0).with_suffix("rc10");
        assert!(compare(&stable, &rc) > 0);
        assert!(compare(&rc, &stable) < 0);
    }

    #[test]
    fn newer_next_build_wins() {
        let old = release(2, 0, 0).with_next_build(100);
        let new = release(2, 0, 0).with_next_build(200);
        assert!(compare(&new, &old) > 0);
        assert_eq!(precedence(&old, &new), Ordering::Less);
    }

    #[test]
    fn one_sided_next_uses_build_time() {
        let next = release(2, 0, 0).with_next_build(50);
        let stable = release(2, 0, 0).with_suffix("rc1");
        // The suffix would rank the release lower; build time decides instead.
        assert!(compare(&next, &stable) > 0);
    }

    #[test]
    fn numeric_fields_beat_next_builds() {
        let next = release(1, 9, 0).with_next_build(u64::MAX);
        assert!(compare(&next, &release(2, 0, 0)) < 0);
    }

    #[test]
    fn huge_differences_saturate() {
        assert_eq!(compare(&release(u64::MAX, 0, 0), &release(0, 0, 0)), i64::MAX);
        assert_eq!(compare(&release(0, 0, 0), &release(u64::MAX, 0, 0)), -i64::MAX);
    }
}
