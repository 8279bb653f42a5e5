//! Version parsing and comparison.
//!
//! Two kinds of comparison happen during a probe:
//!
//! - [`Version`] ordering, used by the minimum-version gate. Parsing is
//!   lenient (`"2021.1"` is 2021.1.0, `"16.0.0-dev"` is 16.0.0) and a string
//!   that does not parse, such as `"unknown"`, is simply never compared.
//! - [`compare_raw`], used to pick between two candidates that share an
//!   install path. It works on the raw directory suffix and never fails.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static VERSION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)(?:\.(\d+)(?:\.(\d+))?)?").expect("VERSION_PREFIX must compile")
});

/// A `major.minor.patch` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a version from its components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse the leading `major[.minor[.patch]]` of a version string.
    ///
    /// Returns `None` when the string does not start with a number.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = VERSION_PREFIX.captures(text)?;
        let part = |i: usize| -> Option<u64> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };
        Some(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Whether `installed` is strictly older than `minimum`.
///
/// The gate is skipped (returns `false`) when there is no minimum or when
/// `installed` does not parse.
pub fn below_minimum(installed: &str, minimum: Option<Version>) -> bool {
    let Some(minimum) = minimum else {
        return false;
    };
    match Version::parse(installed) {
        Some(version) => version < minimum,
        None => false,
    }
}

/// Compare two raw version strings, e.g. directory suffixes `2019.3` and
/// `2019.10`.
///
/// Dot-separated components are compared numerically when both are
/// numbers and lexically otherwise. When one string is a prefix of the
/// other, the longer one is greater.
pub fn compare_raw(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}
