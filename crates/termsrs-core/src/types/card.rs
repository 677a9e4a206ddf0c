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

use crate::types::date::Date;

/// The smallest review interval, in days. Intervals never drop below this.
pub const MIN_DAY_MULTIPLIER: u32 = 2;

/// A flashcard together with its scheduling state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// The card's front text. Unique within a deck.
    pub front: String,
    pub back: String,
    /// The current review interval in days.
    pub day_multiplier: u32,
    /// The date on or after which the card is due.
    pub due_date: Date,
}

impl Card {
    /// A card that has never been reviewed.
    pub fn new(front: impl Into<String>, back: impl Into<String>, today: Date) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            day_multiplier: MIN_DAY_MULTIPLIER,
            due_date: today,
        }
    }

    pub fn is_due(&self, today: Date) -> bool {
        self.due_date <= today
    }
}
