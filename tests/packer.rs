use anyhow::Result;
use ironchain::testing::*;
use ironchain::*;
use proptest::prelude::*;

#[test]
fn sentences_over_the_bound_become_separate_chunks() -> Result<()> {
    let splitter = MaxLengthSplitter::new(50, CharCount)?;
    let chunks = splitter.split(SCENARIO_TEXT)?;
    assert_collections_equal(
        &chunks,
        &[
            "Hi there. ".to_string(),
            "This is an example text used for unit testing.".to_string(),
        ],
    );
    assert_lossless(&chunks, SCENARIO_TEXT);
    assert_chunks_within(&chunks, 50, CharCount);
    Ok(())
}

#[test]
fn text_exactly_at_the_bound_is_one_chunk() -> Result<()> {
    let bound = CharCount.measure(SCENARIO_TEXT);
    assert_eq!(bound, 56);
    let chunks = MaxLengthSplitter::new(bound, CharCount)?.split(SCENARIO_TEXT)?;
    assert_eq!(chunks, vec![SCENARIO_TEXT.to_string()]);
    Ok(())
}

#[test]
fn text_under_the_bound_is_one_trailing_chunk() -> Result<()> {
    let chunks = MaxLengthSplitter::new(500, CharCount)?.split(SCENARIO_TEXT)?;
    assert_eq!(chunks, vec![SCENARIO_TEXT.to_string()]);
    Ok(())
}

#[test]
fn zero_bound_is_a_configuration_error() {
    let result = MaxLengthSplitter::new(0, CharCount);
    assert_chain_error(&result, |e| matches!(e, ChainError::Configuration(_)));

    let first = pack(["a"], 0, CharCount).collect::<Result<Vec<String>>>();
    assert_chain_error(&first, |e| matches!(e, ChainError::Configuration(_)));
}

#[test]
fn empty_text_yields_no_chunks() -> Result<()> {
    let chunks = MaxLengthSplitter::new(10, CharCount)?.split("")?;
    assert!(chunks.is_empty());
    Ok(())
}

#[test]
fn oversized_first_partition_fails() {
    let result = pack(["toolong", "ok"], 3, CharCount).collect::<Result<Vec<String>>>();
    assert_chain_error(&result, |e| {
        *e == ChainError::PartitionTooLarge {
            length: 7,
            max_length: 3,
        }
    });
}

#[test]
fn oversized_later_partition_fails_after_earlier_chunks() -> Result<()> {
    let splitter = MaxLengthSplitter::new(12, CharCount)?;
    let mut chunks = splitter.chunks(SCENARIO_TEXT);
    assert_eq!(chunks.next().transpose()?, Some("Hi there. ".to_string()));

    let failed = chunks.next().transpose();
    assert_chain_error(&failed, |e| {
        matches!(e, ChainError::PartitionTooLarge { length: 46, max_length: 12 })
    });
    assert!(chunks.next().is_none());

    assert_chain_error(&splitter.split(SCENARIO_TEXT), |e| {
        matches!(e, ChainError::PartitionTooLarge { .. })
    });
    Ok(())
}

#[test]
fn partitions_are_never_split() -> Result<()> {
    let chunks = pack(["ab", "cd", "ef", "g"], 5, CharCount).collect::<Result<Vec<_>>>()?;
    assert_eq!(chunks, vec!["abcd", "efg"]);
    Ok(())
}

#[test]
fn custom_metric_drives_the_bound() -> Result<()> {
    let words = metric_fn(|s: &str| s.split_whitespace().count());
    let chunks = pack(["a b ", "c ", "d e f ", "g"], 3, words).collect::<Result<Vec<_>>>()?;
    assert_eq!(chunks, vec!["a b c ", "d e f ", "g"]);
    Ok(())
}

#[test]
fn token_metric_packs_sentences() -> Result<()> {
    let splitter = MaxLengthSplitter::new(12, TokenEstimate::new())?;
    let text = "This is a short text. This is another short text. And a third one.";
    let chunks = splitter.split(text)?;
    assert_eq!(
        chunks,
        vec![
            "This is a short text. This is another short text. ",
            "And a third one.",
        ]
    );
    assert_chunks_within(&chunks, 12, TokenEstimate::new());
    Ok(())
}

#[test]
fn splitter_works_as_a_stage() -> Result<()> {
    let stage = MaxLengthSplitter::new(50, CharCount)?;
    let chunks = stage.run(SCENARIO_TEXT.to_string())?.try_collect()?;
    assert_eq!(chunks.len(), 2);
    Ok(())
}

#[test]
fn word_streamer_packs_finer_than_sentences() -> Result<()> {
    let splitter = MaxLengthSplitter::with_streamer(12, WordStreamer, CharCount)?;
    let chunks = splitter.split(SCENARIO_TEXT)?;
    assert_lossless(&chunks, SCENARIO_TEXT);
    assert_chunks_within(&chunks, 12, CharCount);
    assert_eq!(chunks[0], "Hi there. ");
    Ok(())
}

proptest! {
    #[test]
    fn packing_is_lossless_and_bounded(
        parts in prop::collection::vec("[a-z ]{0,8}", 0..30),
        max in 1usize..20,
    ) {
        let oversized = parts.iter().any(|p| p.chars().count() > max);
        let result = pack(&parts, max, CharCount).collect::<Result<Vec<String>>>();

        prop_assert_eq!(result.is_err(), oversized);
        match result {
            Ok(chunks) => {
                prop_assert_eq!(chunks.concat(), parts.concat());
                for chunk in &chunks {
                    prop_assert!(!chunk.is_empty());
                    prop_assert!(chunk.chars().count() <= max);
                }
            }
            Err(e) => {
                let too_large = matches!(
                    chain_error(&e),
                    Some(ChainError::PartitionTooLarge { .. })
                );
                prop_assert!(too_large);
            }
        }
    }

    #[test]
    fn packing_is_greedy(
        parts in prop::collection::vec("[a-z]{1,5}", 1..30),
        max in 5usize..20,
    ) {
        let chunks = pack(&parts, max, CharCount).collect::<Result<Vec<String>>>().unwrap();
        // Each closed chunk could not take the next partition without overflowing.
        let mut idx = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            let mut len = 0;
            while len < chunk.len() {
                len += parts[idx].len();
                idx += 1;
            }
            prop_assert_eq!(len, chunk.len());
            if i + 1 < chunks.len() && chunk.len() < max {
                prop_assert!(chunk.len() + parts[idx].len() > max);
            }
        }
        prop_assert_eq!(idx, parts.len());
    }

    #[test]
    fn splitter_fails_only_on_oversized_sentences(
        text in "[A-Za-z ,.!?\n]{0,200}",
        max in 1usize..80,
    ) {
        let splitter = MaxLengthSplitter::new(max, CharCount).unwrap();
        let oversized = SentenceStreamer
            .partitions(&text)
            .iter()
            .any(|p| p.chars().count() > max);

        match splitter.split(&text) {
            Ok(chunks) => {
                prop_assert!(!oversized);
                prop_assert_eq!(chunks.concat(), text);
                for chunk in &chunks {
                    prop_assert!(chunk.chars().count() <= max);
                }
            }
            Err(_) => prop_assert!(oversized),
        }
    }
}
