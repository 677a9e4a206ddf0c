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

//! termsrs-core: deck scheduling engine for the termsrs flashcard reviewer.
//!
//! This library provides:
//! - Parsing `.srs` deck files into a review pool
//! - The interval doubling/halving scheduler
//! - The review session state machine
//! - Merging session results back into the deck file

pub mod deck;
pub mod error;
pub mod parser;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod types;
pub mod writer;

// Re-exports for convenience
pub use deck::{Deck, list_decks, resolve_deck_path};
pub use error::{DeckError, ErrorReport, Fallible, fail};
pub use parser::parse_deck_content;
pub use rng::TinyRng;
pub use scheduler::{Outcome, schedule};
pub use session::{Session, State};
pub use types::card::Card;
pub use types::date::Date;
