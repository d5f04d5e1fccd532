//! # Backport Checks
//!
//! The validation checks that are performed on the repository and on the pull
//! request before a milestone is resolved.
//!
//! The checks are organized into submodules:
//! - `descriptions`: backport labels carry the description the backport bot requires
//! - `branches`: backport labels name existing branches, and the no-backport label exists
//! - `consistency`: the pull request carries either backport labels or the no-backport label
//!
//! Every check fails with a `BackportWardenError` that names the offending
//! label or branch.

pub mod branches;
pub mod consistency;
pub mod descriptions;
