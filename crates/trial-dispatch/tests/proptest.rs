//! Property-based tests for normalization using proptest.

use proptest::prelude::*;
use trial_dispatch::{
    normalize_filters, normalize_options, normalize_path, CliOptions, CoverageOptions, OneOrMany,
};

// ============================================================================
// Strategies
// ============================================================================

/// Paths built from the pieces normalization cares about.
fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("".to_string()),
        Just(".".to_string()),
        Just("..".to_string()),
        "[a-z]{1,6}",
        "[a-z]{1,4}\\.test\\.ts",
    ];
    (
        prop_oneof![Just(""), Just("/"), Just("./"), Just("C:/"), Just("c:\\")],
        prop::collection::vec(segment, 0..6),
        prop_oneof![Just("/"), Just("\\"), Just("//")],
        any::<bool>(),
    )
        .prop_map(|(prefix, segments, separator, trailing)| {
            let mut path = format!("{prefix}{}", segments.join(separator));
            if trailing {
                path.push('/');
            }
            path
        })
}

fn one_or_many_strategy() -> impl Strategy<Value = Option<OneOrMany>> {
    prop_oneof![
        Just(None),
        "[a-z*/]{1,10}".prop_map(|s| Some(OneOrMany::One(s))),
        prop::collection::vec("[a-z*/]{1,10}", 0..4).prop_map(|v| Some(OneOrMany::Many(v))),
    ]
}

fn options_strategy() -> impl Strategy<Value = CliOptions> {
    (
        prop::option::of(path_strategy()),
        prop::option::of(path_strategy()),
        prop::option::of(path_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of((
            prop::option::of(any::<bool>()),
            one_or_many_strategy(),
            one_or_many_strategy(),
            one_or_many_strategy(),
        )),
    )
        .prop_map(|(root, config, dir, watch, coverage)| CliOptions {
            root,
            config,
            dir,
            watch,
            coverage: coverage.map(|(enabled, include, exclude, ignore_class_methods)| {
                CoverageOptions {
                    enabled,
                    include,
                    exclude,
                    ignore_class_methods,
                    ..CoverageOptions::default()
                }
            }),
            ..CliOptions::default()
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Normalizing a path twice gives the same result as once.
    #[test]
    fn path_normalization_is_idempotent(path in path_strategy()) {
        let once = normalize_path(&path);
        prop_assert_eq!(normalize_path(&once), once);
    }

    /// Normalized paths never contain backslashes or empty segments.
    #[test]
    fn normalized_paths_are_clean(path in path_strategy()) {
        let normalized = normalize_path(&path);
        prop_assert!(!normalized.contains('\\'));
        prop_assert!(!normalized.contains("//"));
        prop_assert!(!normalized.is_empty());
    }

    /// Normalizing options twice gives the same result as once.
    #[test]
    fn option_normalization_is_idempotent(options in options_strategy()) {
        let mut once = options;
        normalize_options(&mut once);
        let mut twice = once.clone();
        normalize_options(&mut twice);
        prop_assert_eq!(twice, once);
    }

    /// Path options are absent after normalization exactly when they were
    /// absent or empty before.
    #[test]
    fn path_options_presence(options in options_strategy()) {
        let mut normalized = options.clone();
        normalize_options(&mut normalized);
        for (before, after) in [
            (&options.root, &normalized.root),
            (&options.config, &normalized.config),
            (&options.dir, &normalized.dir),
        ] {
            let present = before.as_deref().is_some_and(|p| !p.is_empty());
            prop_assert_eq!(after.is_some(), present);
        }
    }

    /// After normalization every coverage pattern field is a list holding
    /// the same values as before.
    #[test]
    fn coverage_patterns_become_lists(options in options_strategy()) {
        let mut normalized = options.clone();
        normalize_options(&mut normalized);
        if let (Some(before), Some(after)) = (&options.coverage, &normalized.coverage) {
            for (b, a) in [
                (&before.include, &after.include),
                (&before.exclude, &after.exclude),
                (&before.ignore_class_methods, &after.ignore_class_methods),
            ] {
                match (b, a) {
                    (None, None) => {}
                    (Some(b), Some(a @ OneOrMany::Many(_))) => prop_assert_eq!(a.as_slice(), b.as_slice()),
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }
        }
    }

    /// Filter normalization keeps length and order.
    #[test]
    fn filters_keep_order(filters in prop::collection::vec(path_strategy(), 0..8)) {
        let normalized = normalize_filters(filters.clone());
        prop_assert_eq!(normalized.len(), filters.len());
        for (original, result) in filters.iter().zip(&normalized) {
            prop_assert_eq!(result, &normalize_path(original));
        }
    }
}
