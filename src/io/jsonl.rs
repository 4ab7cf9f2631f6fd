//! JSON Lines document I/O.
//!
//! This module provides:
//! - **Typed vector I/O** with Serde: [`read_jsonl_vec`] and [`write_jsonl_vec`]
//! - **Reader stage**: [`ReadDocumentsJsonl`] streams one [`Document`] per line
//! - **Writer stage**: [`WriteDocumentsJsonl`] drains a document sequence into a file
//!
//! # Notes
//! - Files are newline-delimited JSON; empty/whitespace-only lines are skipped on read.
//! - Every document line is a flat JSON object with string values.

use crate::chain::Chain;
use crate::document::Document;
use crate::seq::Seq;
use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read a JSONL file into a typed `Vec<T>`.
///
/// # Errors
/// Returns an error if the file cannot be opened, read, or if any line fails
/// to parse into `T`. Errors include contextual information (line number).
pub fn read_jsonl_vec<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_lines(BufReader::new(f), path).collect()
}

/// Write a typed slice as a JSONL file (one JSON value per line).
///
/// Parent directories are created as needed.
///
/// # Returns
/// The number of items written (`data.len()`).
///
/// # Errors
/// Returns an error if the file/dirs cannot be created or any item fails to
/// serialize/flush.
pub fn write_jsonl_vec<T: Serialize>(path: impl AsRef<Path>, data: &[T]) -> Result<usize> {
    write_items(path.as_ref(), data.iter().map(Ok))
}

fn parse_lines<T, R>(reader: R, path: &Path) -> impl Iterator<Item = Result<T>> + use<T, R>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let path = path.to_path_buf();
    reader.lines().enumerate().filter_map(move |(i, line)| {
        let line = match line.with_context(|| format!("read line {} in {}", i + 1, path.display())) {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        if line.trim().is_empty() {
            return None;
        }
        Some(serde_json::from_str(&line).with_context(|| {
            format!("parse JSONL line {} in {}: {}", i + 1, path.display(), line)
        }))
    })
}

fn write_items<T, It>(path: &Path, items: It) -> Result<usize>
where
    T: Serialize,
    It: IntoIterator<Item = Result<T>>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    let mut n = 0usize;
    for item in items {
        let item = item?;
        serde_json::to_writer(&mut w, &item)
            .with_context(|| format!("serialize item #{} to {}", n, path.display()))?;
        w.write_all(b"\n")?;
        n += 1;
    }
    w.flush()?;
    Ok(n)
}

/// Reader stage: a JSONL file path in, its documents out.
///
/// The file is opened when the stage runs; lines are parsed as the sequence is
/// consumed, so a malformed line surfaces as an `Err` item.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReadDocumentsJsonl;

impl Chain<PathBuf, Seq<Document>> for ReadDocumentsJsonl {
    fn run(&self, path: PathBuf) -> Result<Seq<Document>> {
        let f = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        Ok(Seq::new(parse_lines(BufReader::new(f), &path)))
    }
}

/// Writer stage: drains documents into `path` and returns how many were written.
///
/// The first failed item aborts the write; lines already written stay in the file.
#[derive(Clone, Debug)]
pub struct WriteDocumentsJsonl {
    path: PathBuf,
}

impl WriteDocumentsJsonl {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Chain<Seq<Document>, usize> for WriteDocumentsJsonl {
    fn run(&self, input: Seq<Document>) -> Result<usize> {
        let n = write_items(&self.path, input)?;
        tracing::debug!(documents = n, path = %self.path.display(), "wrote documents");
        Ok(n)
    }
}
