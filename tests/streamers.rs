use anyhow::Result;
use ironchain::testing::*;
use ironchain::*;
use proptest::prelude::*;

#[test]
fn sentence_streamer_splits_on_terminators() {
    let parts = SentenceStreamer.partitions("Hello world! How are you? Fine.");
    assert_eq!(parts, vec!["Hello world! ", "How are you? ", "Fine."]);
}

#[test]
fn sentence_streamer_breaks_after_line_feeds() {
    let parts = SentenceStreamer.partitions("Line one\ncontinues here. Next.");
    assert_eq!(parts, vec!["Line one\n", "continues here. ", "Next."]);
}

#[test]
fn sentence_streamer_splits_cjk_full_stops() {
    let parts = SentenceStreamer.partitions("今日は晴れです。明日は雨です。");
    assert_eq!(parts, vec!["今日は晴れです。", "明日は雨です。"]);

    let parts = SentenceStreamer.partitions("你好！你在哪里？我在家。");
    assert_eq!(parts, vec!["你好！", "你在哪里？", "我在家。"]);
}

#[test]
fn sentence_streamer_handles_mixed_scripts() {
    let text = "東京に行きました。It was fun! 次は大阪です。";
    let parts = SentenceStreamer.partitions(text);
    assert_eq!(parts, vec!["東京に行きました。", "It was fun! ", "次は大阪です。"]);
    assert_lossless(&parts, text);
}

#[test]
fn cjk_sentences_pack_under_a_tight_bound() -> Result<()> {
    let text = "今日は晴れです。明日は雨です。";
    let chunks = MaxLengthSplitter::new(10, CharCount)?.split(text)?;
    assert_eq!(chunks, vec!["今日は晴れです。", "明日は雨です。"]);
    assert_chunks_within(&chunks, 10, CharCount);
    Ok(())
}

#[test]
fn blank_line_breaks_before_a_lowercase_paragraph() {
    let text = "Intro ends here.\n\nsecond paragraph starts lowercase.";
    let parts = SentenceStreamer.partitions(text);
    assert_eq!(
        parts,
        vec!["Intro ends here.\n\n", "second paragraph starts lowercase."]
    );
}

#[test]
fn sentence_streamer_handles_mixed_prose() {
    let text = long_text();
    let parts = SentenceStreamer.partitions(&text);
    assert_eq!(
        parts,
        vec![
            "The survey covered 3.5 million records. ",
            "Results were mixed!\n",
            "Analysts, e.g. the regional teams, disagreed. ",
            "\"Why?\" ",
            "asked one.\n\n",
            "A second paragraph follows here. ",
            "It has two sentences.\n",
            "Finally a line without a terminator",
        ]
    );
    assert_lossless(&parts, &text);
}

#[test]
fn sentence_streamer_on_whitespace_only_text() {
    let parts = SentenceStreamer.partitions("   ");
    assert_eq!(parts, vec!["   "]);
    assert!(SentenceStreamer.partitions("").is_empty());
}

#[test]
fn word_streamer_attaches_trailing_whitespace() {
    let parts = WordStreamer.partitions("Hi there.\tBye");
    assert_eq!(parts, vec!["Hi ", "there.\t", "Bye"]);
}

#[test]
fn fixed_width_rejects_zero_width() {
    let result = FixedWidthStreamer::new(0);
    assert_chain_error(&result, |e| matches!(e, ChainError::Configuration(_)));
}

#[test]
fn fixed_width_counts_characters() -> Result<()> {
    let streamer = FixedWidthStreamer::new(3)?;
    assert_eq!(streamer.width(), 3);
    assert_eq!(streamer.partitions("abcdefg"), vec!["abc", "def", "g"]);
    Ok(())
}

fn check_streamer(streamer: &dyn TextStreamer, text: &str) -> Result<(), TestCaseError> {
    let parts = streamer.partitions(text);
    prop_assert_eq!(parts.concat(), text);
    prop_assert!(parts.iter().all(|p| !p.is_empty()));
    Ok(())
}

proptest! {
    #[test]
    fn sentence_streamer_reconstructs_input(text in "(?s).{0,200}") {
        check_streamer(&SentenceStreamer, &text)?;
    }

    #[test]
    fn sentence_streamer_reconstructs_cjk(text in "[今日は晴れです明雨。！？、 \n]{0,200}") {
        check_streamer(&SentenceStreamer, &text)?;
    }

    #[test]
    fn sentence_streamer_reconstructs_prose(text in "[A-Za-z0-9 ,.!?\"')\n]{0,300}") {
        check_streamer(&SentenceStreamer, &text)?;
    }

    #[test]
    fn word_streamer_reconstructs_input(text in "(?s).{0,200}") {
        check_streamer(&WordStreamer, &text)?;
        for part in WordStreamer.partitions(&text) {
            prop_assert!(!part.trim().contains(char::is_whitespace));
        }
    }

    #[test]
    fn fixed_width_reconstructs_input(text in "(?s).{0,200}", width in 1usize..10) {
        let streamer = FixedWidthStreamer::new(width).unwrap();
        check_streamer(&streamer, &text)?;
        for part in streamer.partitions(&text) {
            prop_assert!(part.chars().count() <= width);
        }
    }
}
