#![cfg(feature = "serde")]

use hookline::{Compaction, event};

#[test]
fn test_compaction_round_trip() {
    let json = serde_json::to_string(&Compaction::Threshold(8)).unwrap();
    let back: Compaction = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Compaction::Threshold(8));
}

#[test]
fn test_subscriber_id_serializes_as_number() {
    let (reader, _emitter) = event::<()>();
    let _first = reader.subscribe(|_| {});
    let second = reader.subscribe(|_| {});
    let id = second.id().unwrap();
    assert_eq!(serde_json::to_string(&id).unwrap(), "1");
}
