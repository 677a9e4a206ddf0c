// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Merging session results back into a deck file.

use std::collections::HashMap;
use std::fs::metadata;
use std::io;
use std::io::Write;
use std::path::Path;

use csv::QuoteStyle;
use csv::Terminator;
use csv::WriterBuilder;
use tempfile::NamedTempFile;

use crate::error::DeckError;
use crate::parser::parse_header;
use crate::parser::read_record;
use crate::types::card::Card;

/// Render a card as a four-field scheduled row, without a line terminator.
///
/// Front and back are always quoted. The day multiplier and due date are
/// written bare.
pub fn format_card(card: &Card) -> io::Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record([card.front.as_str(), card.back.as_str()])?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let text = String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(format!(
        "{},{},{}",
        text.trim_end_matches('\n'),
        card.day_multiplier,
        card.due_date
    ))
}

/// Rewrite the text of a deck file with the given finished cards.
///
/// Rows whose front matches a finished card are replaced by the card's
/// updated record. Every other row, blank rows included, is copied
/// verbatim, so the row count and order never change. Blank rows are never
/// matched, even against a card with an empty front.
pub fn merge(
    original: &str,
    finished: &HashMap<String, Card>,
    source_path: &Path,
) -> Result<String, DeckError> {
    let mut lines = original.lines();
    let new_cards_per_day = parse_header(lines.next(), source_path)?;
    let mut out = format!("NewCards: {new_cards_per_day}\n");
    for line in lines {
        let updated = if line.trim().is_empty() {
            None
        } else {
            read_record(line)
                .ok()
                .and_then(|record| record.get(0).and_then(|front| finished.get(front)))
        };
        match updated {
            Some(card) => {
                let row = format_card(card).map_err(|e| DeckError::resource(source_path, e))?;
                out.push_str(&row);
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    Ok(out)
}

/// Replace the file at `path` with `contents`.
///
/// The contents are fully written and synced to a temporary file in the
/// same directory, which is then renamed over the original. If anything
/// fails the original file is left as it was.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), DeckError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let err = |e: std::io::Error| DeckError::resource(path, e);
    let mut tmp = NamedTempFile::new_in(dir).map_err(err)?;
    if let Ok(meta) = metadata(path) {
        tmp.as_file().set_permissions(meta.permissions()).map_err(err)?;
    }
    tmp.write_all(contents.as_bytes()).map_err(err)?;
    tmp.as_file().sync_all().map_err(err)?;
    tmp.persist(path).map_err(|e| err(e.error))?;
    Ok(())
}

/// Merge the finished cards into `original` and write the result to
/// `path`.
pub fn write_back(
    path: &Path,
    original: &str,
    finished: &HashMap<String, Card>,
) -> Result<(), DeckError> {
    let contents = merge(original, finished, path)?;
    write_atomic(path, &contents)?;
    log::debug!(
        "Wrote {} updated cards to {}.",
        finished.len(),
        path.display()
    );
    Ok(())
}
