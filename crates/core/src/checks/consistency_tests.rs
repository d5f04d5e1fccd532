use super::*;
use crate::labels::BackportLabel;

fn labels(no_backport: bool, backports: &[&str]) -> PullRequestLabels {
    let config = BackportConfig::default();
    PullRequestLabels {
        no_backport,
        backports: backports
            .iter()
            .map(|n| BackportLabel::parse(n, &config).unwrap())
            .collect(),
    }
}

#[test]
fn test_backport_labels_only_is_consistent() {
    let result = check_label_consistency(
        &labels(false, &["backport-1.1.x", "backport-2.0.x"]),
        &BackportConfig::default(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_no_backport_only_is_consistent() {
    let result = check_label_consistency(&labels(true, &[]), &BackportConfig::default());

    assert!(result.is_ok());
}

#[test]
fn test_no_labels_is_inconsistent() {
    let err = check_label_consistency(&labels(false, &[]), &BackportConfig::default())
        .unwrap_err();

    assert!(matches!(err, BackportWardenError::InconsistentLabels(_)));
    assert!(err.to_string().contains("'no-backport'"));
}

#[test]
fn test_no_backport_with_backport_label_is_inconsistent() {
    let err = check_label_consistency(
        &labels(true, &["backport-1.1.x"]),
        &BackportConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, BackportWardenError::InconsistentLabels(_)));
    assert!(err.to_string().contains("backport-1.1.x"));
}
