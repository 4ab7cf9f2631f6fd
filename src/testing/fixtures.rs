//! Pre-built documents and texts for common testing scenarios.

use crate::document::{CONTENT, Document, QUESTION, SOURCE};

/// Two sentences that only fit together under a bound of at least 56 characters.
pub const SCENARIO_TEXT: &str = "Hi there. This is an example text used for unit testing.";

/// Two short documents from different sources.
///
/// The first holds two sentences, the second one. Under an approximate token bound of
/// 10 the first splits into two chunks and the second stays whole.
///
/// # Example
///
/// ```
/// use ironchain::testing::sample_documents;
///
/// let docs = sample_documents();
/// assert_eq!(docs[0].source(), Some("book of john"));
/// ```
#[must_use]
pub fn sample_documents() -> Vec<Document> {
    vec![
        Document::new()
            .with(SOURCE, "book of john")
            .with(CONTENT, "This is a short text. This is another short text."),
        Document::new()
            .with(SOURCE, "book of jane")
            .with(CONTENT, "This is a short text."),
    ]
}

/// Documents as a retriever would return them for `question`.
#[must_use]
pub fn retrieved_documents(question: &str) -> Vec<Document> {
    vec![
        Document::from([
            (SOURCE, "1"),
            (CONTENT, "John Doe is a scientist and humanitarian."),
            (QUESTION, question),
        ]),
        Document::from([
            (SOURCE, "2"),
            (CONTENT, "Jane Doe wrote a travel memoir about South America."),
            (QUESTION, question),
        ]),
        Document::from([
            (SOURCE, "3"),
            (CONTENT, "John Doe founded a charity for clean water."),
            (QUESTION, question),
        ]),
    ]
}

/// A multi-paragraph text with abbreviations, decimals and quotes.
#[must_use]
pub fn long_text() -> String {
    [
        "The survey covered 3.5 million records. Results were mixed!",
        "Analysts, e.g. the regional teams, disagreed. \"Why?\" asked one.",
        "",
        "A second paragraph follows here. It has two sentences.",
        "Finally a line without a terminator",
    ]
    .join("\n")
}
