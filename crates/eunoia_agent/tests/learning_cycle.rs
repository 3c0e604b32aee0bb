//! End-to-end tests for the learning state machine and the message
//! pipeline's bounded-state invariants.

use eunoia_agent::learning::{spawn_scheduler, LearnStatus};
use eunoia_agent::{AgentOptions, WellnessAgent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn fast_agent() -> WellnessAgent {
    WellnessAgent::with_options(AgentOptions {
        learn_cycle: Duration::from_millis(100),
        rng_seed: Some(42),
    })
}

#[tokio::test]
async fn concurrent_learn_calls_run_one_cycle() {
    let agent = Arc::new(fast_agent());

    let first = {
        let agent = agent.clone();
        tokio::spawn(async move { agent.trigger_learn().await.unwrap() })
    };
    // Let the first call take the guard and enter its simulated sleep.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = agent.trigger_learn().await.unwrap();
    let first = first.await.unwrap();

    assert_eq!(first.status, LearnStatus::Completed);
    assert_eq!(second.status, LearnStatus::AlreadyLearning);
    assert!(second.improvements.is_none());

    // Network state was mutated exactly once.
    let network = agent.network_state().await;
    assert_eq!(network.training_epochs, 1);
}

#[tokio::test]
async fn learn_cycle_keeps_network_monotonic_and_bounded() {
    let agent = fast_agent();
    let before = agent.network_state().await;

    let report = agent.trigger_learn().await.unwrap();
    assert_eq!(report.status, LearnStatus::Completed);
    let improvements = report.improvements.unwrap();
    assert!(improvements.accuracy_increase > 0.0);
    assert_eq!(improvements.insights_generated, 2);

    let after = agent.network_state().await;
    for (b, a) in before.layers.iter().zip(&after.layers) {
        assert!(a.activation >= b.activation);
        assert!(a.activation <= 1.0);
    }
    assert!(after.accuracy > before.accuracy);
    assert!(after.connections > before.connections);
    assert_eq!(after.training_epochs, before.training_epochs + 1);

    // Guard released: a follow-up cycle runs normally.
    assert!(!agent.is_learning());
    let again = agent.trigger_learn().await.unwrap();
    assert_eq!(again.status, LearnStatus::Completed);
}

#[tokio::test]
async fn learn_cycle_appends_insights_bounded() {
    let agent = fast_agent();
    for _ in 0..8 {
        agent.trigger_learn().await.unwrap();
    }
    // 8 cycles × 2 insights, retained list capped at 10.
    assert_eq!(agent.insights().await.len(), 10);
}

#[tokio::test]
async fn cancelled_cycle_releases_guard() {
    let agent = Arc::new(WellnessAgent::with_options(AgentOptions {
        learn_cycle: Duration::from_secs(60),
        rng_seed: Some(42),
    }));

    let handle = {
        let agent = agent.clone();
        tokio::spawn(async move { agent.trigger_learn().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(agent.is_learning());

    // Abort mid-sleep; the drop guard must reset the flag.
    handle.abort();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!agent.is_learning());
}

#[tokio::test]
async fn scheduler_learns_when_idle_and_stops_on_shutdown() {
    let agent = Arc::new(fast_agent());
    agent
        .process_message("hello there, how are you today", "ada")
        .await
        .unwrap();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = spawn_scheduler(agent.clone(), 1, 1, shutdown_rx);

    // Wait for at least one scheduled cycle (interval 1s + cycle 100ms).
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(agent.network_state().await.training_epochs >= 1);

    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("scheduler did not stop on shutdown")
        .unwrap();
}

#[tokio::test]
async fn scheduler_skips_without_conversations() {
    let agent = Arc::new(fast_agent());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = spawn_scheduler(agent.clone(), 1, 1, shutdown_rx);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(agent.network_state().await.training_epochs, 0);

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn history_and_trace_stay_bounded_through_pipeline() {
    let agent = fast_agent();
    for i in 0..110 {
        agent
            .process_message(&format!("thinking about message number {i}"), "ada")
            .await
            .unwrap();
    }

    let snapshot = agent.export_snapshot().await;
    let profile = &snapshot.user_profiles["ada"];
    assert_eq!(profile.conversation_history.len(), 100);
    assert_eq!(
        profile.conversation_history.front().unwrap().message,
        "thinking about message number 10"
    );

    let thoughts = agent.thoughts().await;
    assert_eq!(thoughts.len(), 10);
    // Oldest-first ordering.
    assert!(thoughts.windows(2).all(|w| w[0].step < w[1].step));

    assert_eq!(snapshot.learning_stats.total_interactions, 110);
    assert!(snapshot.learning_stats.patterns_learned >= 11);
}

#[tokio::test]
async fn per_message_nudge_is_distinct_from_cycle() {
    let agent = fast_agent();
    // Nudges touch stats but never the network.
    for i in 0..20 {
        agent
            .process_message(&format!("plain message {i}"), "ada")
            .await
            .unwrap();
    }
    assert_eq!(agent.network_state().await.training_epochs, 0);
    let stats = agent.learning_stats().await;
    assert_eq!(stats.total_interactions, 20);
    assert!(stats.accuracy_score > 0.75);
}
