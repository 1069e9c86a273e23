//! End-to-end tests for the highlights pipeline
//!
//! Drives the aggregator and outbound dispatcher against a recording fake of
//! the delivery collaborator.

use std::sync::Arc;

use integration_tests::fixtures::{source_message, star, thumbs_up};
use integration_tests::TestHarness;

use highlight_common::HighlightConfig;
use highlight_core::{EntryState, HighlightEvent, PublicationResolved, Snowflake};

// ============================================================================
// Promotion
// ============================================================================

#[tokio::test]
async fn test_no_entry_below_threshold() {
    let harness = TestHarness::start();
    let msg = source_message("nice take");

    for (reactor, count) in [(1, 1), (2, 2), (3, 3)] {
        harness.aggregator.handle_reaction(&star(&msg, reactor, count));
    }
    harness.settle().await;

    assert_eq!(harness.aggregator.entry_count(), 0);
    assert!(harness.delivery.calls().is_empty());
}

#[tokio::test]
async fn test_non_emblem_reactions_never_promote() {
    let harness = TestHarness::start();
    let msg = source_message("nice take");

    for reactor in 1..20 {
        harness
            .aggregator
            .handle_reaction(&thumbs_up(&msg, reactor, 50));
    }
    harness.settle().await;

    assert_eq!(harness.aggregator.entry_count(), 0);
}

#[tokio::test]
async fn test_burst_promotes_once_and_credits_everyone() {
    // Scenario A, first half: R1..R4 react, each event reporting the raw
    // count after the burst landed
    let harness = TestHarness::start();
    let msg = source_message("a worthy message");

    for reactor in 1..=4 {
        harness.aggregator.handle_reaction(&star(&msg, reactor, 4));
    }
    harness.settle().await;

    let entry = harness.aggregator.entry(msg.id).unwrap();
    assert_eq!(entry.score, 4);
    assert_eq!(entry.participants.len(), 4);
    assert_eq!(entry.state, EntryState::Publishing);

    let publishes = harness.delivery.publishes();
    assert_eq!(publishes.len(), 1, "exactly one publish per promotion");
}

#[tokio::test]
async fn test_scenario_a_duplicate_then_new_reactor() {
    let harness = TestHarness::start();
    let msg = source_message("a worthy message");

    for reactor in 1..=4 {
        harness.aggregator.handle_reaction(&star(&msg, reactor, 4));
    }
    harness.settle().await;

    let token = harness.delivery.publishes()[0].0;
    harness.resolve(token, 1).await;

    // going live flushes the score recorded while publishing
    let edits = harness.delivery.edits();
    assert_eq!(edits.len(), 1);
    assert!(edits[0].1.title.contains("4 reactions"));

    // R4 reacts again: already counted, nothing happens
    harness.aggregator.handle_reaction(&star(&msg, 4, 5));
    harness.settle().await;
    assert_eq!(harness.delivery.edits().len(), 1);
    assert_eq!(harness.aggregator.entry(msg.id).unwrap().score, 4);

    // R5 reacts: score 5, edit at the lowest tier
    harness.aggregator.handle_reaction(&star(&msg, 5, 5));
    harness.settle().await;

    let edits = harness.delivery.edits();
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[1].1.title, "⭐ POPULAR | 5 reactions");
    assert_eq!(harness.aggregator.entry(msg.id).unwrap().score, 5);
}

#[tokio::test]
async fn test_scenario_b_interleaved_first_promotion() {
    // two qualifying events for the same previously-unseen message
    let harness = TestHarness::start();
    let msg = source_message("a worthy message");

    harness.aggregator.handle_reaction(&star(&msg, 1, 4));
    harness.aggregator.handle_reaction(&star(&msg, 2, 4));
    harness.settle().await;

    // exactly one publication is in flight; the second event was absorbed
    // into the existing entry
    assert_eq!(harness.delivery.publishes().len(), 1);
    assert!(harness.aggregator.has_pending_publication(msg.id));

    let entry = harness.aggregator.entry(msg.id).unwrap();
    assert_eq!(entry.score, 2);
}

// ============================================================================
// Resolution
// ============================================================================

#[tokio::test]
async fn test_scenario_c_double_resolution() {
    let harness = TestHarness::start();
    let msg = source_message("a worthy message");

    harness.aggregator.handle_reaction(&star(&msg, 1, 4));
    harness.settle().await;
    let token = harness.delivery.publishes()[0].0;

    let handles = harness.resolve(token, 1).await;
    let entry = harness.aggregator.entry(msg.id).unwrap();
    assert!(entry.is_live());
    assert_eq!(entry.published_posts, handles);

    // the delivery layer notifies again: dropped, no state change
    let before = harness.aggregator.entry(msg.id).unwrap();
    let calls_before = harness.delivery.calls().len();
    harness.resolve(token, 3).await;

    assert_eq!(harness.aggregator.entry(msg.id).unwrap(), before);
    assert_eq!(harness.delivery.calls().len(), calls_before);
}

#[tokio::test]
async fn test_multi_post_fanout_edits_in_order() {
    let harness = TestHarness::start();
    let msg = source_message("a worthy message");

    harness.aggregator.handle_reaction(&star(&msg, 1, 4));
    harness.settle().await;
    let token = harness.delivery.publishes()[0].0;

    // the feed split the content across two posts
    let handles = harness.resolve(token, 2).await;

    harness.aggregator.handle_reaction(&star(&msg, 2, 5));
    harness.aggregator.handle_reaction(&star(&msg, 3, 6));
    harness.settle().await;

    let edited: Vec<_> = harness.delivery.edits().into_iter().map(|(h, _)| h).collect();
    // each score bump edits every handle, in sequence order
    assert_eq!(edited, vec![handles[0], handles[1], handles[0], handles[1]]);

    let titles: Vec<_> = harness
        .delivery
        .edits()
        .into_iter()
        .map(|(_, p)| p.title)
        .collect();
    assert!(titles[0].contains("2 reactions") && titles[1].contains("2 reactions"));
    assert!(titles[2].contains("3 reactions") && titles[3].contains("3 reactions"));
}

// ============================================================================
// Dedup law
// ============================================================================

#[tokio::test]
async fn test_score_equals_distinct_reactors_any_order() {
    let reactors: Vec<i64> = (1..=6).collect();

    // several delivery orders, each with redelivered duplicates mixed in
    let mut orders: Vec<Vec<i64>> = Vec::new();
    for rotation in 0..reactors.len() {
        let mut order: Vec<i64> = reactors
            .iter()
            .cycle()
            .skip(rotation)
            .take(reactors.len())
            .copied()
            .collect();
        order.extend_from_slice(&[order[0], order[1], order[0]]);
        orders.push(order);
    }
    orders.push(reactors.iter().rev().copied().collect());

    for order in orders {
        let harness = TestHarness::start();
        let msg = source_message("a worthy message");

        for reactor in &order {
            harness.aggregator.handle_reaction(&star(&msg, *reactor, 6));
        }
        harness.settle().await;

        let entry = harness.aggregator.entry(msg.id).unwrap();
        assert_eq!(entry.score, 6, "order {order:?} broke the dedup law");
        assert_eq!(entry.score as usize, entry.participants.len());
        assert_eq!(harness.delivery.publishes().len(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_burst_on_one_message() {
    let harness = TestHarness::start();
    let msg = source_message("a worthy message");

    let mut tasks = Vec::new();
    for reactor in 1..=16i64 {
        // every reactor delivered twice, from separate tasks
        for _ in 0..2 {
            let aggregator = Arc::clone(&harness.aggregator);
            let event = star(&msg, reactor, 16);
            tasks.push(tokio::spawn(async move {
                aggregator.handle_reaction(&event);
            }));
        }
    }
    for task in tasks {
        task.await.unwrap();
    }
    harness.settle().await;

    let entry = harness.aggregator.entry(msg.id).unwrap();
    assert_eq!(entry.score, 16);
    assert_eq!(entry.participants.len(), 16);
    assert_eq!(
        harness.delivery.publishes().len(),
        1,
        "concurrent first-promotion events must publish exactly once"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bursts_on_distinct_messages() {
    let harness = TestHarness::start();
    let messages: Vec<_> = (0..8).map(|_| source_message("worthy")).collect();

    let mut tasks = Vec::new();
    for msg in &messages {
        for reactor in 1..=4i64 {
            let aggregator = Arc::clone(&harness.aggregator);
            let event = star(msg, reactor, 4);
            tasks.push(tokio::spawn(async move {
                aggregator.handle_reaction(&event);
            }));
        }
    }
    for task in tasks {
        task.await.unwrap();
    }
    harness.settle().await;

    assert_eq!(harness.aggregator.entry_count(), messages.len());
    assert_eq!(harness.delivery.publishes().len(), messages.len());
    for msg in &messages {
        assert_eq!(harness.aggregator.entry(msg.id).unwrap().score, 4);
    }
}

// ============================================================================
// Rendering through the pipeline
// ============================================================================

#[tokio::test]
async fn test_long_content_splits_into_reconstructible_segments() {
    let config = HighlightConfig {
        field_limit: 16,
        ..HighlightConfig::default()
    };
    let harness = TestHarness::start_with_config(config);

    let content = "word ".repeat(10);
    let msg = source_message(&content);
    harness.aggregator.handle_reaction(&star(&msg, 1, 4));
    harness.settle().await;

    let (_, payload) = harness.delivery.publishes().remove(0);
    assert!(payload.segments.len() > 1);
    assert_eq!(payload.segments[0].label, "Message");
    assert!(payload.segments[1..].iter().all(|s| s.label == "Continued"));

    let rebuilt: String = payload.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(rebuilt, content);
}

#[tokio::test]
async fn test_oversized_content_still_publishes_truncated() {
    let config = HighlightConfig {
        field_limit: 8,
        max_segments: 2,
        ..HighlightConfig::default()
    };
    let harness = TestHarness::start_with_config(config);

    let msg = source_message(&"x".repeat(100));
    harness.aggregator.handle_reaction(&star(&msg, 1, 4));
    harness.settle().await;

    let publishes = harness.delivery.publishes();
    assert_eq!(publishes.len(), 1);
    assert_eq!(publishes[0].1.segments.len(), 2);
}

// ============================================================================
// Event loop
// ============================================================================

#[tokio::test]
async fn test_full_pipeline_through_event_stream() {
    let harness = TestHarness::start();
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
    let loop_handle = harness.aggregator.start(event_rx);

    let msg = source_message("a worthy message");
    for reactor in 1..=4 {
        event_tx
            .send(HighlightEvent::ReactionObserved(star(&msg, reactor, 4)))
            .unwrap();
    }
    harness.settle().await;

    let token = harness.delivery.publishes()[0].0;
    let handles = harness.delivery.allocate_handles(1);
    event_tx
        .send(HighlightEvent::PublicationResolved(
            PublicationResolved::new(token, handles.clone()),
        ))
        .unwrap();

    drop(event_tx);
    loop_handle.await.unwrap();
    harness.settle().await;

    let entry = harness.aggregator.entry(msg.id).unwrap();
    assert!(entry.is_live());
    assert_eq!(entry.published_posts, handles);
    assert_eq!(entry.score, 4);
    assert!(!harness.aggregator.has_pending_publication(msg.id));
}

// ============================================================================
// Unresolved publications (documented gap)
// ============================================================================

#[tokio::test]
async fn test_unresolved_publication_defers_edits_forever() {
    let harness = TestHarness::start();
    let msg = source_message("a worthy message");

    harness.aggregator.handle_reaction(&star(&msg, 1, 4));
    for reactor in 2..=10 {
        harness.aggregator.handle_reaction(&star(&msg, reactor, 10));
    }
    harness.settle().await;

    // the resolution never arrives: score keeps accruing, nothing is edited
    let entry = harness.aggregator.entry(msg.id).unwrap();
    assert_eq!(entry.score, 10);
    assert_eq!(entry.state, EntryState::Publishing);
    assert!(harness.delivery.edits().is_empty());
    assert!(harness.aggregator.has_pending_publication(msg.id));
}

// ============================================================================
// Self/bot exclusion end to end
// ============================================================================

#[tokio::test]
async fn test_author_and_bot_reactions_do_not_count() {
    let harness = TestHarness::start();
    let msg = source_message("a worthy message");
    let author = msg.author_id.into_inner();
    let bot = integration_tests::fixtures::BOT_USER.into_inner();

    harness.aggregator.handle_reaction(&star(&msg, author, 10));
    harness.aggregator.handle_reaction(&star(&msg, bot, 10));
    harness.settle().await;
    assert_eq!(harness.aggregator.entry_count(), 0);

    harness.aggregator.handle_reaction(&star(&msg, 12345, 10));
    harness.settle().await;
    let entry = harness.aggregator.entry(msg.id).unwrap();
    assert_eq!(entry.score, 1);
    assert!(!entry.participants.contains(&Snowflake::new(author)));
}
