//! # Label Consistency
//!
//! Every pull request has to make an explicit backport decision: either it is
//! backported to one or more branches, or it carries the no-backport label.

use tracing::debug;

use crate::config::BackportConfig;
use crate::errors::BackportWardenError;
use crate::labels::PullRequestLabels;

#[cfg(test)]
#[path = "consistency_tests.rs"]
mod tests;

/// Checks that a pull request carries backport labels or the no-backport
/// label, but not both.
///
/// # Errors
///
/// Returns `InconsistentLabels` describing the problem.
///
/// # Examples
///
/// ```
/// use backport_warden_core::checks::consistency::check_label_consistency;
/// use backport_warden_core::config::BackportConfig;
/// use backport_warden_core::labels::PullRequestLabels;
///
/// let labels = PullRequestLabels {
///     no_backport: true,
///     backports: Vec::new(),
/// };
///
/// assert!(check_label_consistency(&labels, &BackportConfig::default()).is_ok());
/// ```
pub fn check_label_consistency(
    labels: &PullRequestLabels,
    config: &BackportConfig,
) -> Result<(), BackportWardenError> {
    match (labels.no_backport, labels.has_backports()) {
        (false, false) => Err(BackportWardenError::InconsistentLabels(format!(
            "the pull request needs the '{}' label or at least one '{}' label",
            config.no_backport, config.label_prefix
        ))),
        (true, true) => {
            let names = labels
                .backports
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Err(BackportWardenError::InconsistentLabels(format!(
                "the '{}' label cannot be combined with backport labels ({})",
                config.no_backport, names
            )))
        }
        _ => {
            debug!(
                no_backport = labels.no_backport,
                count = labels.backports.len(),
                "Backport labels are consistent"
            );
            Ok(())
        }
    }
}
