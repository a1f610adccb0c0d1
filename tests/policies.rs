use std::time::Duration;

use freshcell::{
    BackoffPolicy, ConstantDelay, JitterPolicy, Limited, RetryDecision, RetryPolicy,
};

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

#[test]
fn limited_backoff_grows_then_gives_up() {
    let policy = Limited::new(
        BackoffPolicy {
            first: Duration::from_millis(100),
            max: Duration::from_secs(5),
            factor: 2.0,
            jitter: JitterPolicy::None,
        },
        3,
    );

    assert_eq!(
        policy.decide(1, Duration::ZERO),
        RetryDecision::Delay(Duration::from_millis(100)),
    );
    assert_eq!(
        policy.decide(2, Duration::ZERO),
        RetryDecision::Delay(Duration::from_millis(200)),
    );
    assert_eq!(
        policy.decide(3, Duration::ZERO),
        RetryDecision::Delay(Duration::from_millis(400)),
    );
    assert_eq!(policy.decide(4, Duration::ZERO), RetryDecision::GiveUp);
}

#[test]
fn limited_constant_is_flat_until_exhausted() {
    let policy = Limited::new(ConstantDelay::new(Duration::from_secs(1)), 2);
    assert_eq!(
        policy.decide(1, Duration::from_secs(100)),
        RetryDecision::Delay(Duration::from_secs(1)),
    );
    assert_eq!(policy.decide(3, Duration::ZERO), RetryDecision::GiveUp);
}

// ---------------------------------------------------------------------------
// Jittered backoff stays within its envelope
// ---------------------------------------------------------------------------

#[test]
fn full_jitter_never_exceeds_the_base_delay() {
    let policy = BackoffPolicy {
        first: Duration::from_millis(400),
        max: Duration::from_secs(2),
        factor: 2.0,
        jitter: JitterPolicy::Full,
    };
    for attempt in 1..=8 {
        let unjittered = BackoffPolicy {
            jitter: JitterPolicy::None,
            ..policy
        }
        .delay_for(attempt);
        for _ in 0..50 {
            assert!(policy.delay_for(attempt) <= unjittered);
        }
    }
}

#[test]
fn equal_jitter_keeps_at_least_half_the_delay() {
    let policy = BackoffPolicy {
        first: Duration::from_millis(400),
        max: Duration::from_secs(2),
        factor: 1.0,
        jitter: JitterPolicy::Equal,
    };
    for _ in 0..50 {
        let delay = policy.delay_for(1);
        assert!(delay >= Duration::from_millis(200));
        assert!(delay <= Duration::from_millis(400));
    }
}

#[test]
fn decorrelated_jitter_is_bounded_by_floor_and_cap() {
    let policy = BackoffPolicy {
        first: Duration::from_millis(100),
        max: Duration::from_secs(1),
        factor: 2.0,
        jitter: JitterPolicy::Decorrelated,
    };
    for attempt in 1..=10 {
        for _ in 0..50 {
            let delay = policy.delay_for(attempt);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_secs(1));
        }
    }
}
