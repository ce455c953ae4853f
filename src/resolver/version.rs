//! Range-qualifier stripping for dependency versions
//!
//! This is deliberately not semver resolution: `^2.1.0` becomes `2.1.0` and
//! anything else is passed through verbatim as a literal version.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_QUALIFIERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\^~]+").unwrap());

/// Strip leading `^`/`~` qualifiers from a declared range
pub fn strip_range_qualifiers(range: &str) -> String {
    LEADING_QUALIFIERS.replace(range, "").into_owned()
}

/// Whether the literal names one exact version
pub fn is_exact_version(literal: &str) -> bool {
    semver::Version::parse(literal).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_caret_and_tilde() {
        assert_eq!(strip_range_qualifiers("^2.1.0"), "2.1.0");
        assert_eq!(strip_range_qualifiers("~1.2.0"), "1.2.0");
        assert_eq!(strip_range_qualifiers("^~3.0.0"), "3.0.0");
        assert_eq!(strip_range_qualifiers("1.0.0"), "1.0.0");
    }

    #[test]
    fn test_other_ranges_pass_through() {
        assert_eq!(strip_range_qualifiers(">=1.0.0 <2.0.0"), ">=1.0.0 <2.0.0");
        assert_eq!(strip_range_qualifiers("*"), "*");
        assert_eq!(strip_range_qualifiers("latest"), "latest");
    }

    #[test]
    fn test_is_exact_version() {
        assert!(is_exact_version("2.1.0"));
        assert!(is_exact_version("1.0.0-beta.1"));
        assert!(!is_exact_version(">=1.0.0 <2.0.0"));
        assert!(!is_exact_version("1.x"));
    }
}
