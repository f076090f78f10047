//! Dispatcher integration tests: in-memory store plus recording outbound.

mod common;

use std::sync::Arc;

use brewbot::dispatch::Dispatcher;
use brewbot::format::{
    CSV_CAPTION, CSV_FAILED, CSV_PROGRESS, FALLBACK, FIND_USAGE, GREETING, NO_TRANSACTIONS,
    OVERFLOW_CAPTION,
};
use brewbot_store::bson::{doc, Document};
use brewbot_store::MemoryTeamStore;
use common::mock_outbound::{MockOutbound, Sent};
use tokio::sync::mpsc::UnboundedReceiver;

const CHAT: i64 = 42;

fn dispatcher_with(docs: Vec<Document>) -> (Dispatcher, UnboundedReceiver<Sent>) {
    let (outbound, rx) = MockOutbound::with_receiver();
    let store = Arc::new(MemoryTeamStore::new(docs));
    (Dispatcher::new(store, outbound), rx)
}

fn drain(rx: &mut UnboundedReceiver<Sent>) -> Vec<Sent> {
    let mut sent = Vec::new();
    while let Ok(s) = rx.try_recv() {
        sent.push(s);
    }
    sent
}

fn only_text(sent: &[Sent]) -> String {
    match sent {
        [Sent::Text { text, .. }] => text.clone(),
        other => panic!("expected a single text message, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stats_on_empty_collection() {
    let (dispatcher, mut rx) = dispatcher_with(Vec::new());
    dispatcher.dispatch_text(CHAT, "tester", "/stats").await;
    assert_eq!(
        only_text(&drain(&mut rx)),
        "Registration Stats\n\nTotal Teams: 0\nTotal Members: 0"
    );
}

#[tokio::test]
async fn test_stats_counts_members() {
    let (dispatcher, mut rx) = dispatcher_with(vec![
        doc! { "teamName": "Alpha", "member1Name": "A", "member2Name": "B" },
        doc! { "teamName": "Beta", "member1Name": "C" },
    ]);
    dispatcher.dispatch_text(CHAT, "tester", "View Stats").await;
    assert_eq!(
        only_text(&drain(&mut rx)),
        "Registration Stats\n\nTotal Teams: 2\nTotal Members: 3"
    );
}

#[tokio::test]
async fn test_find_returns_team_details() {
    let (dispatcher, mut rx) = dispatcher_with(vec![
        doc! { "teamName": "Alpha", "member1Name": "A", "transactionId": "t1" },
    ]);
    dispatcher.dispatch_text(CHAT, "tester", "/find Alpha").await;
    let text = only_text(&drain(&mut rx));
    assert!(text.contains("Team Found: Alpha"));
    assert!(text.contains("member1Name: A"));
}

#[tokio::test]
async fn test_find_is_case_insensitive() {
    let (dispatcher, mut rx) =
        dispatcher_with(vec![doc! { "teamName": "Alpha", "member1Name": "A" }]);
    dispatcher.dispatch_text(CHAT, "tester", "/find alpha").await;
    assert!(only_text(&drain(&mut rx)).contains("Team Found: Alpha"));
}

#[tokio::test]
async fn test_find_without_argument() {
    let (dispatcher, mut rx) = dispatcher_with(Vec::new());
    dispatcher.dispatch_text(CHAT, "tester", "/find").await;
    assert_eq!(only_text(&drain(&mut rx)), FIND_USAGE);
}

#[tokio::test]
async fn test_find_metacharacters_do_not_match() {
    let (dispatcher, mut rx) = dispatcher_with(vec![doc! { "teamName": "Alpha" }]);
    dispatcher.dispatch_text(CHAT, "tester", "/find Al.ha").await;
    assert_eq!(
        only_text(&drain(&mut rx)),
        "No team found with name: Al.ha"
    );
}

#[tokio::test]
async fn test_greeting_and_fallback_attach_menu() {
    let (dispatcher, mut rx) = dispatcher_with(Vec::new());
    dispatcher.dispatch_text(CHAT, "tester", "HI").await;
    dispatcher.dispatch_text(CHAT, "tester", "anything else").await;
    let sent = drain(&mut rx);
    match &sent[..] {
        [Sent::Menu { text: greeting, .. }, Sent::Menu { text: fallback, .. }] => {
            assert_eq!(greeting, GREETING);
            assert_eq!(fallback, FALLBACK);
        }
        other => panic!("expected two menu messages, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transactions_sorted_inline() {
    let (dispatcher, mut rx) = dispatcher_with(vec![
        doc! { "teamName": "Beta", "transactionId": "t2" },
        doc! { "teamName": "Alpha", "transactionId": "t1" },
    ]);
    dispatcher.dispatch_text(CHAT, "tester", "/transactions").await;
    assert_eq!(only_text(&drain(&mut rx)), "Alpha: t1\nBeta: t2\n");
}

#[tokio::test]
async fn test_transactions_empty() {
    let (dispatcher, mut rx) = dispatcher_with(Vec::new());
    dispatcher.dispatch_text(CHAT, "tester", "View Transactions").await;
    assert_eq!(only_text(&drain(&mut rx)), NO_TRANSACTIONS);
}

#[tokio::test]
async fn test_transactions_overflow_goes_as_file() {
    let docs: Vec<Document> = (0..500)
        .map(|i| doc! { "teamName": format!("team-{i:04}"), "transactionId": format!("t{i}") })
        .collect();
    let (dispatcher, mut rx) = dispatcher_with(docs);
    dispatcher.dispatch_text(CHAT, "tester", "/transactions").await;

    let sent = drain(&mut rx);
    match &sent[..] {
        [Sent::Document {
            path,
            file_name,
            caption,
            content,
            ..
        }] => {
            assert_eq!(file_name, "transactions_list.txt");
            assert_eq!(caption, OVERFLOW_CAPTION);
            let content = content.as_deref().expect("file readable at send time");
            assert_eq!(content.lines().count(), 500);
            assert!(content.starts_with("team-0000: t0\n"));
            // Removed once the handler returns.
            assert!(!path.exists());
        }
        other => panic!("expected a document attachment, got {other:?}"),
    }
}

#[tokio::test]
async fn test_registrations_export_flow() {
    let (dispatcher, mut rx) = dispatcher_with(vec![
        doc! { "teamName": "Alpha", "transactionId": "t1" },
    ]);
    dispatcher.dispatch_text(CHAT, "tester", "/registrations").await;

    let sent = drain(&mut rx);
    match &sent[..] {
        [Sent::Text { text: progress, .. }, Sent::Document {
            path,
            file_name,
            caption,
            content,
            ..
        }, Sent::Deleted { message_id, .. }] => {
            assert_eq!(progress, CSV_PROGRESS);
            assert_eq!(file_name, "registrations.csv");
            assert_eq!(caption, CSV_CAPTION);
            let content = content.as_deref().expect("file readable at send time");
            assert!(content.starts_with("teamName,transactionId\n"));
            assert!(content.contains("Alpha,t1"));
            assert_eq!(*message_id, 1);
            assert!(!path.exists());
        }
        other => panic!("expected progress, document, delete; got {other:?}"),
    }
}

#[tokio::test]
async fn test_registrations_empty_collection() {
    let (dispatcher, mut rx) = dispatcher_with(Vec::new());
    dispatcher.dispatch_text(CHAT, "tester", "Download Registrations").await;

    let sent = drain(&mut rx);
    match &sent[..] {
        [Sent::Text { text: progress, .. }, Sent::Text { text: failed, .. }] => {
            assert_eq!(progress, CSV_PROGRESS);
            assert_eq!(failed, CSV_FAILED);
        }
        other => panic!("expected progress then failure text, got {other:?}"),
    }
}
