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

use crate::deck::Deck;
use crate::rng::TinyRng;
use crate::scheduler::Outcome;
use crate::types::card::Card;
use crate::types::date::Date;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// The front of the current card is shown.
    AwaitingReveal,
    /// The back of the current card is shown.
    AwaitingAnswer,
    /// The session is over. The deck should be flushed.
    Terminated,
}

/// A review session over a deck's pool.
///
/// Driven by `reveal`, `answer` and `quit`. Events that are not valid in
/// the current state are ignored.
pub struct Session {
    deck: Deck,
    rng: TinyRng,
    today: Date,
    state: State,
    current_index: usize,
    solved: usize,
}

impl Session {
    /// Start a session on a random card. A deck with an empty pool yields a
    /// session that is already terminated.
    pub fn new(deck: Deck, today: Date, mut rng: TinyRng) -> Self {
        let (state, current_index) = if deck.is_empty() {
            (State::Terminated, 0)
        } else {
            (State::AwaitingReveal, rng.generate(deck.cards().len()))
        };
        Self {
            deck,
            rng,
            today,
            state,
            current_index,
            solved: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == State::Terminated
    }

    /// Whether the back of the current card is shown.
    pub fn revealed(&self) -> bool {
        self.state == State::AwaitingAnswer
    }

    /// The card being reviewed, if the session has one.
    pub fn current_card(&self) -> Option<&Card> {
        self.deck.cards().get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The number of cards answered correctly.
    pub fn solved(&self) -> usize {
        self.solved
    }

    /// The pool size at the start of the session.
    pub fn size(&self) -> usize {
        self.deck.size()
    }

    /// Percentage of the session's cards answered correctly.
    pub fn progress(&self) -> f64 {
        if self.size() == 0 {
            0.0
        } else {
            self.solved as f64 / self.size() as f64 * 100.0
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Show the back of the current card.
    pub fn reveal(&mut self) -> State {
        if self.state == State::AwaitingReveal {
            self.state = State::AwaitingAnswer;
        }
        self.state
    }

    /// Grade the current card and move on to the next one.
    pub fn answer(&mut self, correct: bool) -> State {
        if self.state != State::AwaitingAnswer {
            return self.state;
        }
        let outcome = Outcome::from(correct);
        self.deck.answer(self.current_index, outcome, self.today);
        if outcome == Outcome::Correct {
            self.solved += 1;
            if self.deck.cards().len() == 1 {
                log::debug!("Last card solved, ending session.");
                self.state = State::Terminated;
                return self.state;
            }
            self.deck.remove(self.current_index);
        }
        self.current_index = self
            .rng
            .generate_excluding(self.deck.cards().len(), self.current_index);
        self.state = State::AwaitingReveal;
        self.state
    }

    /// End the session early. Cards already answered correctly are kept.
    pub fn quit(&mut self) -> State {
        self.state = State::Terminated;
        self.state
    }

    /// Give back the deck so it can be flushed.
    pub fn into_deck(self) -> Deck {
        self.deck
    }
}
