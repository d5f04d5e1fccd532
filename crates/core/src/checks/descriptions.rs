//! # Label Description Verification
//!
//! The backport bot only acts on labels whose description reads
//! `on-merge: backport to <branch>`. A label with any other description is
//! silently ignored by the bot, so every backport label defined on the
//! repository is checked, not just the ones applied to the pull request.

use backport_warden_developer_platforms::models::Label;
use tracing::{debug, warn};

use crate::config::BackportConfig;
use crate::errors::BackportWardenError;
use crate::labels::{is_backport_label_name, BackportLabel, DescriptionMismatch};

#[cfg(test)]
#[path = "descriptions_tests.rs"]
mod tests;

/// Verifies the descriptions of all backport labels defined on a repository.
///
/// # Arguments
///
/// * `labels` - Every label defined on the repository
/// * `config` - The run configuration
///
/// # Returns
///
/// The parsed backport labels of the repository.
///
/// # Errors
///
/// * `ParseError` for the first backport-prefixed label that does not name a
///   branch version
/// * `LabelDescriptionMismatch` listing every label with a wrong description
///
/// # Examples
///
/// ```
/// use backport_warden_developer_platforms::models::Label;
/// use backport_warden_core::checks::descriptions::verify_label_descriptions;
/// use backport_warden_core::config::BackportConfig;
///
/// let labels = vec![Label {
///     name: "backport-1.2.x".to_string(),
///     description: Some("on-merge: backport to 1.2.x".to_string()),
/// }];
///
/// let backports = verify_label_descriptions(&labels, &BackportConfig::default()).unwrap();
/// assert_eq!(backports.len(), 1);
/// ```
pub fn verify_label_descriptions(
    labels: &[Label],
    config: &BackportConfig,
) -> Result<Vec<BackportLabel>, BackportWardenError> {
    let mut backports = Vec::new();
    let mut mismatches = Vec::new();

    for label in labels
        .iter()
        .filter(|l| is_backport_label_name(&l.name, config))
    {
        let backport = BackportLabel::parse(&label.name, config)?;
        let expected = backport.required_description();
        if label.description.as_deref() != Some(expected.as_str()) {
            warn!(
                label = label.name.as_str(),
                expected = expected.as_str(),
                actual = label.description.as_deref().unwrap_or_default(),
                "Backport label has an incorrect description"
            );
            mismatches.push(DescriptionMismatch {
                label: label.name.clone(),
                expected,
                actual: label.description.clone(),
            });
        }

        backports.push(backport);
    }

    if !mismatches.is_empty() {
        return Err(BackportWardenError::LabelDescriptionMismatch(mismatches));
    }

    debug!(
        count = backports.len(),
        "All backport labels have the required description"
    );
    Ok(backports)
}
