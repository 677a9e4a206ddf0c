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

use std::path::Path;
use std::path::PathBuf;

use csv::ReaderBuilder;
use csv::StringRecord;
use csv::Trim;

use crate::error::DeckError;
use crate::rng::TinyRng;
use crate::rng::swap_remove_random;
use crate::types::card::Card;
use crate::types::card::MIN_DAY_MULTIPLIER;
use crate::types::date::Date;

const HEADER_PREFIX: &str = "NewCards: ";

/// The cards selected for a review session, plus the header quota.
#[derive(Debug)]
pub struct DeckContents {
    pub new_cards_per_day: usize,
    pub pool: Vec<Card>,
}

/// Parse a deck file's text into a session pool.
///
/// Scheduled cards due on or before `today` go straight into the pool.
/// Cards due later are dropped. Up to `new_cards_per_day` new cards are
/// sampled uniformly at random from the file's new cards.
pub fn parse_deck_content(
    text: &str,
    source_path: &Path,
    today: Date,
    rng: &mut TinyRng,
) -> Result<DeckContents, DeckError> {
    let parser = Parser::new(source_path.to_path_buf(), today);
    let rows = parser.parse(text)?;
    let mut pool = rows.due;
    let mut candidates = rows.candidates;
    let quota = rows.new_cards_per_day.min(candidates.len());
    for _ in 0..quota {
        if let Some(card) = swap_remove_random(&mut candidates, rng) {
            pool.push(card);
        }
    }
    log::debug!(
        "Loaded {} due cards and {quota} new cards ({} deferred, {} new cards left for later).",
        pool.len() - quota,
        rows.deferred,
        candidates.len()
    );
    Ok(DeckContents {
        new_cards_per_day: rows.new_cards_per_day,
        pool,
    })
}

/// Parse the `NewCards: <N>` header row.
///
/// Surrounding whitespace is ignored. The prefix must be followed by a
/// single space and a plain decimal count.
pub fn parse_header(line: Option<&str>, source_path: &Path) -> Result<usize, DeckError> {
    let line = match line {
        Some(line) => line.trim(),
        None => return Err(DeckError::config(source_path, "Missing `NewCards: <N>` header.")),
    };
    let value = line.strip_prefix(HEADER_PREFIX).ok_or_else(|| {
        DeckError::config(
            source_path,
            format!("Expected `NewCards: <N>` header, found `{line}`."),
        )
    })?;
    value
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| value.parse::<usize>().ok())
        .flatten()
        .ok_or_else(|| {
            DeckError::config(
                source_path,
                format!("New cards per day must be a non-negative integer, found `{value}`."),
            )
        })
}

/// Read the comma-separated fields of one deck row.
///
/// Fields may be wrapped in double quotes, where `""` stands for a literal
/// quote. Whitespace around every field is trimmed.
pub fn read_record(line: &str) -> Result<StringRecord, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.trim_start().as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Every card row of a deck file, classified by due date.
struct Rows {
    new_cards_per_day: usize,
    due: Vec<Card>,
    candidates: Vec<Card>,
    deferred: usize,
}

enum Row {
    /// An empty line.
    Blank,
    /// A two-field row: a card that has never been reviewed.
    New(Card),
    /// A four-field row carrying scheduling state.
    Scheduled(Card),
}

pub struct Parser {
    source_path: PathBuf,
    today: Date,
}

impl Parser {
    pub fn new(source_path: PathBuf, today: Date) -> Self {
        Parser { source_path, today }
    }

    fn parse(&self, text: &str) -> Result<Rows, DeckError> {
        let mut lines = text.lines();
        let new_cards_per_day = parse_header(lines.next(), &self.source_path)?;
        let mut rows = Rows {
            new_cards_per_day,
            due: Vec::new(),
            candidates: Vec::new(),
            deferred: 0,
        };
        // Line 0 is the header.
        for (idx, line) in lines.enumerate() {
            match self.read_row(line, idx + 1)? {
                Row::Blank => {}
                Row::New(card) => rows.candidates.push(card),
                Row::Scheduled(card) => {
                    if card.is_due(self.today) {
                        rows.due.push(card);
                    } else {
                        rows.deferred += 1;
                    }
                }
            }
        }
        Ok(rows)
    }

    fn read_row(&self, line: &str, line_num: usize) -> Result<Row, DeckError> {
        if line.trim().is_empty() {
            return Ok(Row::Blank);
        }
        let record = read_record(line)
            .map_err(|e| self.error(format!("Unreadable card row: {e}"), line_num))?;
        let fields: Vec<&str> = record.iter().collect();
        match fields.as_slice() {
            [front, back] => Ok(Row::New(Card::new(*front, *back, self.today))),
            [front, back, day_multiplier, due_date] => {
                let day_multiplier: u32 = day_multiplier.parse().map_err(|_| {
                    self.error(
                        format!("Day multiplier must be an integer, found `{day_multiplier}`."),
                        line_num,
                    )
                })?;
                if day_multiplier < MIN_DAY_MULTIPLIER {
                    return Err(self.error(
                        format!(
                            "Day multiplier must be at least {MIN_DAY_MULTIPLIER}, found {day_multiplier}."
                        ),
                        line_num,
                    ));
                }
                let due_date: Date = due_date.parse().map_err(|_| {
                    self.error(
                        format!("Review date must be YYYY-MM-DD, found `{due_date}`."),
                        line_num,
                    )
                })?;
                Ok(Row::Scheduled(Card {
                    front: front.to_string(),
                    back: back.to_string(),
                    day_multiplier,
                    due_date,
                }))
            }
            [_, _, _] => Err(self.error("Card is missing day multiplier / review date.", line_num)),
            _ => Err(self.error(
                format!("Card must have 2 or 4 fields, found {}.", fields.len()),
                line_num,
            )),
        }
    }

    fn error(&self, message: impl Into<String>, line_num: usize) -> DeckError {
        DeckError::malformed(&self.source_path, line_num, message)
    }
}
