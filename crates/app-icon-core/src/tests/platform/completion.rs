use crate::IconChangeCompletion;

use std::{sync::Arc, thread};

/// WHAT: Only the first completion reaches the waiting caller
/// WHY: A request must never resolve twice
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_completion_when_invoked_twice_then_only_first_delivered() {
    // Given: A fresh completion and its receiver
    let (completion, pending) = IconChangeCompletion::channel();

    // When: The host answers twice, success then error
    let first = completion.complete(None);
    let second = completion.complete(Some("late error".to_string()));

    // Then: Only the success is delivered
    assert!(first);
    assert!(!second);
    assert!(completion.is_completed());
    assert_eq!(pending.await.unwrap(), Ok(()));
}

/// WHAT: Host error message is delivered verbatim
/// WHY: Callers surface the host's message to the user
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_host_error_when_completing_then_message_preserved() {
    // Given: A fresh completion
    let (completion, pending) = IconChangeCompletion::channel();

    // When: The host reports an error
    completion.complete(Some("The file doesn't exist.".to_string()));

    // Then: The message arrives unchanged
    assert_eq!(
        pending.await.unwrap(),
        Err("The file doesn't exist.".to_string())
    );
}

/// WHAT: Completing after the caller left is harmless
/// WHY: Hosts may answer long after the caller stopped waiting
#[test]
fn given_dropped_receiver_when_completing_then_reports_not_delivered() {
    // Given: A completion whose receiver is gone
    let (completion, pending) = IconChangeCompletion::channel();
    drop(pending);

    // When: The host answers
    let delivered = completion.complete(None);

    // Then: Nothing is delivered and nothing panics
    assert!(!delivered);
    assert!(completion.is_completed());
}

/// WHAT: Racing answers from several threads settle exactly once
/// WHY: UIKit may call back on any thread
#[test]
#[allow(clippy::unwrap_used)]
fn given_concurrent_answers_when_completing_then_exactly_one_wins() {
    // Given: One completion shared by four host threads
    let (completion, pending) = IconChangeCompletion::channel();
    let completion = Arc::new(completion);

    // When: All threads answer at once
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let completion = Arc::clone(&completion);
            thread::spawn(move || completion.complete(None))
        })
        .collect();
    let wins = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    // Then: Exactly one answer was delivered
    assert_eq!(wins, 1);
    assert_eq!(pending.blocking_recv().unwrap(), Ok(()));
}
