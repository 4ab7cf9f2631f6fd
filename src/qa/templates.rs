//! Prompt templates for question answering over documents.
//!
//! Placeholders use the `${key}` form understood by [`render`](super::render); keys
//! are document fields.

/// One retrieved document inside a combined prompt.
pub const QA_DOCUMENT: &str = "Content: ${content}\nSource: ${source}";

/// Final QA prompt over the combined documents.
pub const QA_COMBINE: &str = "Given the following extracted parts of a long document and a question, \
create a final answer with references (\"SOURCES\"). If you don't know the answer, just say that you \
don't know. Don't try to make up an answer. ALWAYS return a \"SOURCES\" part in your answer.\n\n\
QUESTION: ${question}\n=========\n${content}\n=========\nFINAL ANSWER:";

/// Summarize one document with respect to a question.
pub const SUMMARIZE: &str = "Use the following portion of a long document to see if any of the text \
is relevant to answer the question. Return any relevant text verbatim.\n${content}\n\
Question: ${question}\nRelevant text, if any:";
