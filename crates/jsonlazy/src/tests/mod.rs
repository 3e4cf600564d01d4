mod arbitrary;
mod key;
mod laziness;
mod property_layout;

/// Quickcheck iteration count, scaled up on CI.
pub(crate) fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
