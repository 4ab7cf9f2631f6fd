//! Stages for retrieval-augmented question answering over [`Document`]s.
//!
//! The LLM and retrieval stages themselves live outside this crate; these are the
//! document-shaping steps between them:
//! - [`CombineDocuments`] folds retrieved documents into one prompt document
//! - [`ModifyDocumentsContent`] rewrites each document's content with another stage
//! - [`MapAnswerWithSources`] parses `"... SOURCES: a, b"` answers

pub mod templates;

use crate::chain::Chain;
use crate::document::{CONTENT, Document, QUESTION};
use crate::runner::{ExecMode, par_map_ordered};
use crate::seq::Seq;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static placeholder pattern"));

/// Fill `${key}` placeholders from `document`. Unknown keys stay as written.
pub fn render(template: &str, document: &Document) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            document
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), str::to_string)
        })
        .into_owned()
}

/// Renders each document with a template and joins them into one document.
///
/// The output holds `question` (taken from the first document that has one) and
/// `content` (the renders separated by blank lines).
#[derive(Clone, Debug)]
pub struct CombineDocuments {
    template: String,
    separator: String,
}

impl CombineDocuments {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            separator: "\n\n".to_string(),
        }
    }

    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for CombineDocuments {
    fn default() -> Self {
        Self::new(templates::QA_DOCUMENT)
    }
}

impl Chain<Seq<Document>, Document> for CombineDocuments {
    fn run(&self, input: Seq<Document>) -> Result<Document> {
        let mut question: Option<String> = None;
        let mut parts = Vec::new();
        for doc in input {
            let doc = doc?;
            if question.is_none() {
                question = doc.question().map(str::to_string);
            }
            parts.push(render(&self.template, &doc));
        }

        let mut combined = Document::new();
        if let Some(q) = question {
            combined.insert(QUESTION, q);
        }
        combined.insert(CONTENT, parts.join(&self.separator));
        Ok(combined)
    }
}

/// Rewrites each document's `content` with the output of a per-document stage,
/// e.g. an LLM summarizer.
///
/// Runs sequentially and lazily unless [`parallel`](Self::parallel) or
/// [`mode`](Self::mode) asks for a rayon pool; the parallel mode reads the whole
/// input first.
pub struct ModifyDocumentsContent<C> {
    inner: Arc<C>,
    mode: ExecMode,
}

impl<C: Chain<Document, String>> ModifyDocumentsContent<C> {
    /// Sequential stage around `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner: Arc::new(inner),
            mode: ExecMode::Sequential,
        }
    }

    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.mode = ExecMode::from(parallel);
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }
}

fn modify(inner: &dyn Chain<Document, String>, doc: Document) -> Result<Document> {
    tracing::trace!(document = %doc, "pre modification");
    let content = inner.run(doc.clone())?;
    tracing::trace!(%content, "post modification");
    Ok(doc.with_content(content))
}

impl<C: Chain<Document, String> + 'static> Chain<Seq<Document>, Seq<Document>>
    for ModifyDocumentsContent<C>
{
    fn run(&self, input: Seq<Document>) -> Result<Seq<Document>> {
        match self.mode {
            ExecMode::Sequential => {
                let inner = Arc::clone(&self.inner);
                Ok(input.map_ok(move |doc| modify(inner.as_ref(), doc)))
            }
            ExecMode::Parallel { threads } => {
                let docs = input.try_collect()?;
                let inner = self.inner.as_ref();
                let results = par_map_ordered(threads, docs, |doc| modify(inner, doc))?;
                Ok(Seq::from_vec(results.into_iter().collect::<Result<Vec<_>>>()?))
            }
        }
    }
}

/// An answer and the sources it cites.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerWithSources {
    pub answer: String,
    pub sources: Vec<String>,
}

impl AnswerWithSources {
    pub fn new(answer: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            answer: answer.into(),
            sources,
        }
    }
}

impl fmt::Display for AnswerWithSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.answer, self.sources.join(", "))
    }
}

/// Default pattern: everything before a `Source:`/`Sources:` marker is the answer,
/// everything after it the comma-separated sources.
pub const DEFAULT_SOURCES_PATTERN: &str = r"(?is)(.*?)(?:Source(?:s)?:\s*)(.*)";

/// Splits a QA answer into text and cited sources.
#[derive(Clone, Debug)]
pub struct MapAnswerWithSources {
    pattern: Regex,
}

impl MapAnswerWithSources {
    /// # Errors
    /// When `pattern` is not a valid regex. It needs two capture groups: the answer
    /// and the sources list.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).with_context(|| format!("compile sources pattern {pattern:?}"))?;
        Ok(Self::with_regex(pattern))
    }

    pub fn with_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn parse(&self, text: &str) -> AnswerWithSources {
        let Some(caps) = self.pattern.captures(text) else {
            return AnswerWithSources::new(text, Vec::new());
        };
        let answer = caps.get(1).map_or("", |m| m.as_str()).trim();
        let mut sources: Vec<String> = Vec::new();
        for s in caps.get(2).map_or("", |m| m.as_str()).split(',') {
            let s = s.trim();
            if !s.is_empty() && !sources.iter().any(|seen| seen == s) {
                sources.push(s.to_string());
            }
        }
        AnswerWithSources::new(answer, sources)
    }
}

impl Default for MapAnswerWithSources {
    fn default() -> Self {
        Self::with_regex(Regex::new(DEFAULT_SOURCES_PATTERN).expect("static sources pattern"))
    }
}

impl Chain<String, AnswerWithSources> for MapAnswerWithSources {
    fn run(&self, input: String) -> Result<AnswerWithSources> {
        Ok(self.parse(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_keeps_unknown_placeholders() {
        let doc = Document::from([("content", "body")]);
        assert_eq!(render("${content} / ${missing}", &doc), "body / ${missing}");
    }

    #[test]
    fn display_joins_sources() {
        let a = AnswerWithSources::new("yes", vec!["a".into(), "b".into()]);
        assert_eq!(a.to_string(), "yes (a, b)");
    }
}
