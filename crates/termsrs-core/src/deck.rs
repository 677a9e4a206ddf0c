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

use std::collections::HashMap;
use std::fs::File;
use std::fs::read_dir;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::error::DeckError;
use crate::parser::DeckContents;
use crate::parser::parse_deck_content;
use crate::rng::TinyRng;
use crate::scheduler::Outcome;
use crate::scheduler::schedule;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::writer::write_back;

/// The file extension of deck files in the deck directory.
pub const DECK_EXTENSION: &str = "srs";

/// A deck loaded for a single review session.
///
/// Holds the session pool, the cards answered correctly so far, and the
/// open backing file, which is re-read when the deck is flushed.
pub struct Deck {
    cards: Vec<Card>,
    size: usize,
    new_cards_per_day: usize,
    finished_cards: HashMap<String, Card>,
    source_path: PathBuf,
    source: File,
}

impl Deck {
    /// Load a deck by name or path.
    ///
    /// `<deck_dir>/<name>.srs` is tried first. If it does not exist, `name`
    /// is treated as a path.
    pub fn load(
        name: &str,
        deck_dir: Option<&Path>,
        today: Date,
        rng: &mut TinyRng,
    ) -> Result<Self, DeckError> {
        let path = resolve_deck_path(name, deck_dir);
        Self::open(&path, today, rng)
    }

    /// Load the deck file at `path`.
    pub fn open(path: &Path, today: Date, rng: &mut TinyRng) -> Result<Self, DeckError> {
        log::debug!("Loading deck from {}...", path.display());
        let start = Instant::now();
        let source_path = path
            .canonicalize()
            .map_err(|e| DeckError::resource(path, e))?;
        let mut source = File::open(&source_path).map_err(|e| DeckError::resource(path, e))?;
        let mut text = String::new();
        source
            .read_to_string(&mut text)
            .map_err(|e| DeckError::resource(&source_path, e))?;
        let DeckContents {
            new_cards_per_day,
            pool,
        } = parse_deck_content(&text, &source_path, today, rng)?;
        let duration = start.elapsed().as_millis();
        log::debug!("Deck loaded in {duration}ms.");
        Ok(Self {
            size: pool.len(),
            cards: pool,
            new_cards_per_day,
            finished_cards: HashMap::new(),
            source_path,
            source,
        })
    }

    /// The live session pool.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The pool size when the deck was loaded.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn new_cards_per_day(&self) -> usize {
        self.new_cards_per_day
    }

    /// The updated state of every card answered correctly, by front.
    pub fn finished_cards(&self) -> &HashMap<String, Card> {
        &self.finished_cards
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Apply an answer to the card at `index` in the pool. Correctly
    /// answered cards are recorded as finished.
    pub(crate) fn answer(&mut self, index: usize, outcome: Outcome, today: Date) {
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        schedule(card, outcome, today);
        if outcome == Outcome::Correct {
            self.finished_cards.insert(card.front.clone(), card.clone());
        }
    }

    /// Remove the card at `index` from the pool, moving the last card into
    /// its slot.
    pub(crate) fn remove(&mut self, index: usize) {
        if index < self.cards.len() {
            self.cards.swap_remove(index);
        }
    }

    /// Write the finished cards back to the deck file and release it.
    pub fn flush(mut self) -> Result<(), DeckError> {
        let mut original = String::new();
        self.source
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.source.read_to_string(&mut original))
            .map_err(|e| DeckError::resource(&self.source_path, e))?;
        write_back(&self.source_path, &original, &self.finished_cards)
    }
}

/// Where the deck called `name` lives.
pub fn resolve_deck_path(name: &str, deck_dir: Option<&Path>) -> PathBuf {
    deck_dir
        .map(|dir| dir.join(format!("{name}.{DECK_EXTENSION}")))
        .filter(|path| path.is_file())
        .unwrap_or_else(|| PathBuf::from(name))
}

/// The names of the decks in `dir`, sorted.
pub fn list_decks(dir: &Path) -> Result<Vec<String>, DeckError> {
    let mut names = Vec::new();
    let entries = read_dir(dir).map_err(|e| DeckError::resource(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| DeckError::resource(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == DECK_EXTENSION) {
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().into_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir;
    use std::fs::read_to_string;
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::error::Fallible;

    const EXAMPLE: &str = "NewCards: 1\n\"a\",\"1\",2,2000-01-01\n\"b\",\"2\"\n\"c\",\"3\"\n";

    fn today() -> Date {
        "2024-06-15".parse().unwrap()
    }

    fn fronts(deck: &Deck) -> Vec<String> {
        let mut v: Vec<String> = deck.cards().iter().map(|c| c.front.clone()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_open_example() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("example.srs");
        write(&path, EXAMPLE)?;
        let mut rng = TinyRng::from_seed(3);
        let deck = Deck::open(&path, today(), &mut rng)?;
        assert_eq!(deck.new_cards_per_day(), 1);
        assert_eq!(deck.size(), 2);
        assert!(deck.cards().iter().any(|c| c.front == "a"));
        assert!(deck.cards().iter().any(|c| c.front == "b" || c.front == "c"));
        assert!(deck.finished_cards().is_empty());
        assert_eq!(deck.source_path(), path.canonicalize()?);
        Ok(())
    }

    #[test]
    fn test_open_missing_file() {
        let mut rng = TinyRng::from_seed(3);
        let result = Deck::open(Path::new("./derpherp.srs"), today(), &mut rng);
        assert!(matches!(result, Err(DeckError::Resource { .. })));
    }

    #[test]
    fn test_flush_without_answers_round_trips() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("example.srs");
        write(&path, EXAMPLE)?;
        let mut rng = TinyRng::from_seed(3);
        let deck = Deck::open(&path, today(), &mut rng)?;
        let before = fronts(&deck);
        deck.flush()?;
        assert_eq!(read_to_string(&path)?, EXAMPLE);

        let mut rng = TinyRng::from_seed(3);
        let reloaded = Deck::open(&path, today(), &mut rng)?;
        assert_eq!(fronts(&reloaded), before);
        Ok(())
    }

    #[test]
    fn test_flush_writes_finished_cards() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("example.srs");
        write(&path, EXAMPLE)?;
        let mut rng = TinyRng::from_seed(3);
        let mut deck = Deck::open(&path, today(), &mut rng)?;
        let index = deck
            .cards()
            .iter()
            .position(|c| c.front == "a")
            .unwrap();
        deck.answer(index, Outcome::Correct, today());
        let a = &deck.finished_cards()["a"];
        assert_eq!(a.day_multiplier, 4);
        assert_eq!(a.due_date.to_string(), "2024-06-17");
        deck.flush()?;

        let written = read_to_string(&path)?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec!["NewCards: 1", "\"a\",\"1\",4,2024-06-17", "\"b\",\"2\"", "\"c\",\"3\""]
        );
        Ok(())
    }

    #[test]
    fn test_incorrect_answer_is_not_finished() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("example.srs");
        write(&path, "NewCards: 0\n\"a\",\"1\",8,2000-01-01\n")?;
        let mut rng = TinyRng::from_seed(3);
        let mut deck = Deck::open(&path, today(), &mut rng)?;
        deck.answer(0, Outcome::Incorrect, today());
        assert_eq!(deck.cards()[0].day_multiplier, 4);
        assert!(deck.finished_cards().is_empty());
        deck.flush()?;
        assert_eq!(
            read_to_string(&path)?,
            "NewCards: 0\n\"a\",\"1\",8,2000-01-01\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_front_does_not_claim_blank_rows() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("example.srs");
        write(&path, "NewCards: 5\n\"\",\"x\"\n\n\"b\",\"2\"\n")?;
        let mut rng = TinyRng::from_seed(3);
        let mut deck = Deck::open(&path, today(), &mut rng)?;
        assert_eq!(deck.size(), 2);
        let index = deck.cards().iter().position(|c| c.front.is_empty()).unwrap();
        deck.answer(index, Outcome::Correct, today());
        deck.flush()?;
        assert_eq!(
            read_to_string(&path)?,
            "NewCards: 5\n\"\",\"x\",4,2024-06-17\n\n\"b\",\"2\"\n"
        );

        let later: Date = "2024-06-17".parse()?;
        let mut rng = TinyRng::from_seed(3);
        let reloaded = Deck::open(&path, later, &mut rng)?;
        assert_eq!(reloaded.size(), 2);
        Ok(())
    }

    #[test]
    fn test_resolve_prefers_deck_dir() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("spanish.srs"), "NewCards: 0\n")?;
        assert_eq!(
            resolve_deck_path("spanish", Some(dir.path())),
            dir.path().join("spanish.srs")
        );
        assert_eq!(
            resolve_deck_path("other/latin.srs", Some(dir.path())),
            PathBuf::from("other/latin.srs")
        );
        assert_eq!(
            resolve_deck_path("spanish", None),
            PathBuf::from("spanish")
        );
        Ok(())
    }

    #[test]
    fn test_load_by_name() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("spanish.srs"), "NewCards: 3\n\"hola\",\"hello\"\n")?;
        let mut rng = TinyRng::from_seed(3);
        let deck = Deck::load("spanish", Some(dir.path()), today(), &mut rng)?;
        assert_eq!(deck.new_cards_per_day(), 3);
        assert_eq!(fronts(&deck), vec!["hola".to_string()]);
        Ok(())
    }

    #[test]
    fn test_list_decks() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("spanish.srs"), "NewCards: 0\n")?;
        write(dir.path().join("latin.srs"), "NewCards: 0\n")?;
        write(dir.path().join(".srs"), "NewCards: 0\n")?;
        write(dir.path().join("notes.txt"), "")?;
        create_dir(dir.path().join("nested.srs"))?;
        assert_eq!(list_decks(dir.path())?, vec!["latin", "spanish"]);
        Ok(())
    }

    #[test]
    fn test_list_decks_missing_directory() {
        let result = list_decks(Path::new("./no-such-deck-dir"));
        assert!(matches!(result, Err(DeckError::Resource { .. })));
    }
}
