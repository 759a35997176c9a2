//! `SKIP_TEST_CLUSTER` policy for suites backed by embedded PostgreSQL.
//!
//! Environments that cannot start the embedded cluster (no bundled
//! binaries, restrictive sandboxes) export `SKIP_TEST_CLUSTER=1` to turn
//! bootstrap failures into skipped suites. Everywhere else a failed
//! bootstrap stays a hard error so CI breakage is not masked.

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Returns true when `SKIP_TEST_CLUSTER` opts this environment out of the
/// embedded-cluster suites.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER").is_ok_and(|value| is_truthy(&value))
}

/// Converts a cluster bootstrap failure into a skip or a panic.
///
/// Prints a `SKIP-TEST-CLUSTER` marker and returns `None` when the
/// environment opted out; panics otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the skip-policy environment parsing.

    use rstest::rstest;

    #[rstest]
    #[case("1", true)]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("Yes", true)]
    #[case("0", false)]
    #[case("no", false)]
    #[case("", false)]
    fn truthy_values_follow_the_documented_set(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(super::is_truthy(value), expected);
    }

    #[test]
    fn skip_policy_reads_the_environment() {
        let guard = env_lock::lock_env([("SKIP_TEST_CLUSTER", Some("yes"))]);
        assert!(super::should_skip_test_cluster());
        drop(guard);

        let _guard = env_lock::lock_env([("SKIP_TEST_CLUSTER", None::<&str>)]);
        assert!(!super::should_skip_test_cluster());
    }
}
