//! # Versions
//!
//! Semantic versions as they appear in milestone titles (`1.2.3`) and in the
//! names of maintenance branches (`1.2.x`), optionally behind a tag prefix
//! such as `v`.

use std::cmp::Ordering;
use std::fmt;

use crate::config::VERSION_REGEX;
use crate::errors::BackportWardenError;

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;

/// The patch component of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Patch {
    /// A concrete patch number, as used by milestones
    Number(u64),

    /// The `x` placeholder of a branch version, matching any patch number
    Wildcard,
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Patch::Number(n) => write!(f, "{}", n),
            Patch::Wildcard => write!(f, "x"),
        }
    }
}

/// A `major.minor` release line. Every branch version names exactly one bucket,
/// and every milestone belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bucket {
    pub major: u64,
    pub minor: u64,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.x", self.major, self.minor)
    }
}

/// A semantic version with a concrete or wildcard patch component.
///
/// Versions order by major, then minor, then patch. A wildcard patch only
/// compares equal to another wildcard; comparing it with a concrete patch in
/// the same bucket has no defined order and `partial_cmp` returns `None`.
///
/// # Examples
///
/// ```
/// use backport_warden_core::version::{Patch, SemanticVersion};
///
/// let milestone = SemanticVersion::parse_milestone("v1.2.3", "v").unwrap();
/// assert_eq!(milestone.patch, Patch::Number(3));
///
/// let branch = SemanticVersion::parse_branch("1.2.x", "").unwrap();
/// assert_eq!(branch.bucket(), milestone.bucket());
/// assert_eq!(branch.to_string(), "1.2.x");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: Patch,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch: Patch::Number(patch),
        }
    }

    pub fn branch(major: u64, minor: u64) -> Self {
        Self {
            major,
            minor,
            patch: Patch::Wildcard,
        }
    }

    /// Parses `<prefix><major>.<minor>.<patch>` or `<prefix><major>.<minor>.x`.
    ///
    /// # Errors
    ///
    /// Returns `BackportWardenError::ParseError` if `input` does not start with
    /// `prefix` or the remainder is not a version.
    pub fn parse(input: &str, prefix: &str) -> Result<Self, BackportWardenError> {
        let Some(rest) = input.strip_prefix(prefix) else {
            return Err(BackportWardenError::parse(
                input,
                format!("expected the prefix '{}'", prefix),
            ));
        };

        let Some(captures) = VERSION_REGEX.captures(rest) else {
            return Err(BackportWardenError::parse(
                input,
                "expected <major>.<minor>.<patch> or <major>.<minor>.x",
            ));
        };

        let major = parse_number(input, &captures[1])?;
        let minor = parse_number(input, &captures[2])?;
        let patch = match &captures[3] {
            "x" => Patch::Wildcard,
            digits => Patch::Number(parse_number(input, digits)?),
        };

        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    /// Parses a milestone title. The patch component must be a number.
    pub fn parse_milestone(input: &str, prefix: &str) -> Result<Self, BackportWardenError> {
        let version = Self::parse(input, prefix)?;
        if version.is_branch() {
            return Err(BackportWardenError::parse(
                input,
                "a milestone needs a concrete patch number",
            ));
        }

        Ok(version)
    }

    /// Parses a branch version. The patch component must be `x`.
    pub fn parse_branch(input: &str, prefix: &str) -> Result<Self, BackportWardenError> {
        let version = Self::parse(input, prefix)?;
        if !version.is_branch() {
            return Err(BackportWardenError::parse(
                input,
                "a branch version must end in '.x'",
            ));
        }

        Ok(version)
    }

    pub fn bucket(&self) -> Bucket {
        Bucket {
            major: self.major,
            minor: self.minor,
        }
    }

    pub fn is_branch(&self) -> bool {
        self.patch == Patch::Wildcard
    }

    /// Returns `true` if this version lies on the release line of `bucket`.
    pub fn is_in(&self, bucket: Bucket) -> bool {
        self.bucket() == bucket
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.bucket().cmp(&other.bucket()) {
            Ordering::Equal => match (self.patch, other.patch) {
                (Patch::Number(a), Patch::Number(b)) => Some(a.cmp(&b)),
                (Patch::Wildcard, Patch::Wildcard) => Some(Ordering::Equal),
                _ => None,
            },
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn parse_number(input: &str, digits: &str) -> Result<u64, BackportWardenError> {
    digits.parse::<u64>().map_err(|_| {
        BackportWardenError::parse(input, format!("'{}' is out of range", digits))
    })
}
