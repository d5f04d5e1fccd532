use super::*;
use proptest::prelude::*;

#[test]
fn test_parse_milestone_version() {
    let version = SemanticVersion::parse("1.2.3", "").unwrap();

    assert_eq!(version, SemanticVersion::new(1, 2, 3));
    assert!(!version.is_branch());
}

#[test]
fn test_parse_branch_version() {
    let version = SemanticVersion::parse("1.2.x", "").unwrap();

    assert_eq!(version, SemanticVersion::branch(1, 2));
    assert!(version.is_branch());
}

#[test]
fn test_parse_with_prefix() {
    let version = SemanticVersion::parse("v10.0.12", "v").unwrap();

    assert_eq!(version, SemanticVersion::new(10, 0, 12));
}

#[test]
fn test_parse_rejects_missing_prefix() {
    let err = SemanticVersion::parse("1.2.3", "v").unwrap_err();

    match err {
        BackportWardenError::ParseError { input, reason } => {
            assert_eq!(input, "1.2.3");
            assert!(reason.contains("'v'"));
        }
        other => panic!("Unexpected error: {:?}", other),
    }
}

#[test]
fn test_parse_rejects_malformed_versions() {
    let malformed = vec![
        "", "1", "1.2", "1.2.", "1..3", "a.b.c", "1.2.X", "1.2.3.4", "1.2.3-rc1", " 1.2.3",
        "-1.2.3", "1.2.xx",
    ];

    for input in malformed {
        let result = SemanticVersion::parse(input, "");
        assert!(
            matches!(result, Err(BackportWardenError::ParseError { .. })),
            "'{}' should not parse",
            input
        );
    }
}

#[test]
fn test_parse_rejects_out_of_range_numbers() {
    let result = SemanticVersion::parse("99999999999999999999.0.0", "");

    assert!(matches!(
        result,
        Err(BackportWardenError::ParseError { reason, .. }) if reason.contains("out of range")
    ));
}

#[test]
fn test_parse_milestone_rejects_wildcard() {
    assert!(SemanticVersion::parse_milestone("1.2.x", "").is_err());
    assert!(SemanticVersion::parse_milestone("1.2.0", "").is_ok());
}

#[test]
fn test_parse_branch_rejects_concrete_patch() {
    assert!(SemanticVersion::parse_branch("1.2.0", "").is_err());
    assert!(SemanticVersion::parse_branch("1.2.x", "").is_ok());
}

#[test]
fn test_ordering_of_concrete_versions() {
    let mut versions = vec![
        SemanticVersion::new(2, 0, 0),
        SemanticVersion::new(1, 10, 0),
        SemanticVersion::new(1, 2, 10),
        SemanticVersion::new(1, 2, 9),
    ];

    versions.sort_by(|a, b| a.partial_cmp(b).unwrap());

    assert_eq!(
        versions,
        vec![
            SemanticVersion::new(1, 2, 9),
            SemanticVersion::new(1, 2, 10),
            SemanticVersion::new(1, 10, 0),
            SemanticVersion::new(2, 0, 0),
        ]
    );
}

#[test]
fn test_wildcard_ordering() {
    let branch = SemanticVersion::branch(1, 2);

    assert!(branch < SemanticVersion::new(1, 3, 0));
    assert!(branch > SemanticVersion::new(1, 1, 99));
    assert_eq!(
        branch.partial_cmp(&SemanticVersion::branch(1, 2)),
        Some(Ordering::Equal)
    );
    assert_eq!(branch.partial_cmp(&SemanticVersion::new(1, 2, 0)), None);
}

#[test]
fn test_bucket_membership() {
    let bucket = SemanticVersion::branch(1, 1).bucket();

    assert!(SemanticVersion::new(1, 1, 0).is_in(bucket));
    assert!(SemanticVersion::new(1, 1, 7).is_in(bucket));
    assert!(!SemanticVersion::new(11, 1, 0).is_in(bucket));
    assert!(!SemanticVersion::new(1, 11, 0).is_in(bucket));
}

#[test]
fn test_bucket_ordering_and_display() {
    let older = Bucket { major: 1, minor: 9 };
    let newer = Bucket { major: 1, minor: 10 };

    assert!(older < newer);
    assert_eq!(newer.to_string(), "1.10.x");
}

#[test]
fn test_display() {
    assert_eq!(SemanticVersion::new(3, 4, 5).to_string(), "3.4.5");
    assert_eq!(SemanticVersion::branch(3, 4).to_string(), "3.4.x");
}

proptest! {
    #[test]
    fn prop_branch_version_round_trips(major in 0u64..100_000, minor in 0u64..100_000) {
        let text = format!("{}.{}.x", major, minor);

        let parsed = SemanticVersion::parse_branch(&text, "").unwrap();

        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn prop_prefixed_branch_version_round_trips(
        prefix in "[a-z]{0,3}",
        major in 0u64..1000,
        minor in 0u64..1000,
    ) {
        let text = format!("{}{}.{}.x", prefix, major, minor);

        let parsed = SemanticVersion::parse_branch(&text, &prefix).unwrap();

        prop_assert_eq!(format!("{}{}", prefix, parsed), text);
    }

    #[test]
    fn prop_concrete_versions_are_totally_ordered(
        a in (0u64..50, 0u64..50, 0u64..50),
        b in (0u64..50, 0u64..50, 0u64..50),
    ) {
        let left = SemanticVersion::new(a.0, a.1, a.2);
        let right = SemanticVersion::new(b.0, b.1, b.2);

        prop_assert_eq!(left.partial_cmp(&right), Some(a.cmp(&b)));
    }
}
