//! Integration tests demonstrating the testing utilities.

use anyhow::Result;
use ironchain::testing::*;
use ironchain::*;
use std::time::{Duration, Instant};

#[test]
fn test_sample_documents() {
    let docs = sample_documents();
    assert_collection_size(&docs, 2);
    assert_all(&docs, |d| d.content().is_some() && d.source().is_some());
}

#[test]
fn test_retrieved_documents_carry_question() {
    let docs = retrieved_documents("why?");
    assert_all(&docs, |d| d.question() == Some("why?"));
    let sources: Vec<_> = docs.iter().filter_map(Document::source).collect();
    assert_collections_equal(&sources, &["1", "2", "3"]);
}

#[test]
fn test_long_text_has_paragraphs() {
    let text = long_text();
    assert!(text.contains("\n\n"));
    assert_lossless(&SentenceStreamer.partitions(&text), &text);
}

#[test]
#[should_panic(expected = "Collection mismatch at index 1")]
fn test_collections_equal_reports_index() {
    assert_collections_equal(&[1, 2, 3], &[1, 5, 3]);
}

#[test]
#[should_panic(expected = "Chunks do not reconstruct the text")]
fn test_lossless_detects_dropped_text() {
    assert_lossless(&["Hi. ", "Bye"], "Hi. Bye.");
}

#[test]
#[should_panic(expected = "exceeds the bound")]
fn test_chunks_within_detects_oversized_chunk() {
    assert_chunks_within(&["short", "much too long"], 6, CharCount);
}

#[test]
#[should_panic(expected = "Expected a chain error")]
fn test_chain_error_rejects_ok() {
    let ok: Result<u8> = Ok(1);
    assert_chain_error(&ok, |_| true);
}

#[test]
fn test_recording_chain_shares_calls_between_clones() -> Result<()> {
    let rec = RecordingChain::new();
    let stage = rec.clone();
    stage.run("a")?;
    stage.run("b")?;
    assert_eq!(rec.calls(), vec!["a", "b"]);
    assert_eq!(rec.call_count(), 2);
    Ok(())
}

#[test]
fn test_failing_chain_fails_with_message() {
    let stage: BoxChain<(), ()> = Box::new(FailingChain::new("nope"));
    assert_eq!(stage.run(()).unwrap_err().to_string(), "nope");
}

#[test]
fn test_delayed_chain_waits() -> Result<()> {
    let stage = DelayedChain::millis(20, 'x');
    let start = Instant::now();
    let out: char = stage.run(())?;
    assert_eq!(out, 'x');
    assert!(start.elapsed() >= Duration::from_millis(20));
    Ok(())
}
