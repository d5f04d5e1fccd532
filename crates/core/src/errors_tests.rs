use super::*;
use crate::labels::DescriptionMismatch;

#[test]
fn test_label_description_mismatch_lists_every_label() {
    let err = BackportWardenError::LabelDescriptionMismatch(vec![
        DescriptionMismatch {
            label: "backport-1.1.x".to_string(),
            expected: "on-merge: backport to 1.1.x".to_string(),
            actual: Some("backport".to_string()),
        },
        DescriptionMismatch {
            label: "backport-2.0.x".to_string(),
            expected: "on-merge: backport to 2.0.x".to_string(),
            actual: None,
        },
    ]);

    let message = err.to_string();

    assert!(message.starts_with("2 backport label(s) have an incorrect description:"));
    assert!(message.contains("- backport-1.1.x: expected 'on-merge: backport to 1.1.x', found 'backport'"));
    assert!(message.contains("- backport-2.0.x: expected 'on-merge: backport to 2.0.x', found '<none>'"));
}

#[test]
fn test_errors_name_the_failing_entity() {
    let cases = vec![
        (
            BackportWardenError::BackportBranchNotFound(
                "backport-1.1.x".to_string(),
                "1.1.x".to_string(),
            ),
            "1.1.x",
        ),
        (
            BackportWardenError::NoBackportLabelNotFound("no-backport".to_string()),
            "no-backport",
        ),
        (
            BackportWardenError::MilestoneNotFound("1.2.x".to_string()),
            "1.2.x",
        ),
        (
            BackportWardenError::MilestoneMismatch {
                current: "1.1.1".to_string(),
                resolved: "1.1.2".to_string(),
            },
            "1.1.2",
        ),
        (
            BackportWardenError::AmbiguousLabelSet(
                "backport-1.1.x".to_string(),
                "backport-v1.1.x".to_string(),
                "1.1.x".to_string(),
            ),
            "backport-v1.1.x",
        ),
        (
            BackportWardenError::parse("1.x.0", "bad minor"),
            "1.x.0",
        ),
    ];

    for (err, expected) in cases {
        assert!(
            err.to_string().contains(expected),
            "'{}' should mention '{}'",
            err,
            expected
        );
    }
}

#[test]
fn test_platform_error_converts() {
    let err: BackportWardenError =
        PlatformError::NotFound("pull request 5".to_string()).into();

    assert!(matches!(err, BackportWardenError::GitProviderError(_)));
    assert!(err.to_string().contains("pull request 5"));
}

#[test]
fn test_config_load_error_messages() {
    let err = ConfigLoadError::NotFound("missing.toml".to_string());

    assert_eq!(err.to_string(), "Configuration file not found: missing.toml");
}
