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

//! Interval doubling/halving scheduler.

use crate::types::card::Card;
use crate::types::card::MIN_DAY_MULTIPLIER;
use crate::types::date::Date;

/// How the user answered a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl From<bool> for Outcome {
    fn from(correct: bool) -> Self {
        if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Update a card's scheduling state in place.
///
/// A correct answer pushes the due date out by the current interval and
/// then doubles the interval. An incorrect answer halves the interval,
/// never going below [`MIN_DAY_MULTIPLIER`], and leaves the due date alone.
pub fn schedule(card: &mut Card, outcome: Outcome, today: Date) {
    match outcome {
        Outcome::Correct => {
            card.due_date = today.add_days(card.day_multiplier);
            card.day_multiplier = card.day_multiplier.saturating_mul(2);
        }
        Outcome::Incorrect => {
            card.day_multiplier = (card.day_multiplier / 2).max(MIN_DAY_MULTIPLIER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn card(day_multiplier: u32, due: &str) -> Fallible<Card> {
        Ok(Card {
            front: "f".to_string(),
            back: "b".to_string(),
            day_multiplier,
            due_date: due.parse()?,
        })
    }

    #[test]
    fn test_correct_uses_pre_update_multiplier() -> Fallible<()> {
        let today: Date = "2024-03-01".parse()?;
        let mut c = card(2, "2024-02-20")?;
        schedule(&mut c, Outcome::Correct, today);
        assert_eq!(c.due_date.to_string(), "2024-03-03");
        assert_eq!(c.day_multiplier, 4);

        schedule(&mut c, Outcome::Correct, today);
        assert_eq!(c.due_date.to_string(), "2024-03-05");
        assert_eq!(c.day_multiplier, 8);
        Ok(())
    }

    #[test]
    fn test_incorrect_halves_and_keeps_due_date() -> Fallible<()> {
        let today: Date = "2024-03-01".parse()?;
        let mut c = card(16, "2024-02-20")?;
        schedule(&mut c, Outcome::Incorrect, today);
        assert_eq!(c.day_multiplier, 8);
        assert_eq!(c.due_date.to_string(), "2024-02-20");
        Ok(())
    }

    #[test]
    fn test_incorrect_floors_at_two() -> Fallible<()> {
        let today: Date = "2024-03-01".parse()?;
        for start in [2, 3, 4, 5] {
            let mut c = card(start, "2024-02-20")?;
            schedule(&mut c, Outcome::Incorrect, today);
            assert_eq!(c.day_multiplier, (start / 2).max(2));
            assert!(c.day_multiplier >= MIN_DAY_MULTIPLIER);
        }
        Ok(())
    }

    #[test]
    fn test_monotonicity() -> Fallible<()> {
        let today: Date = "2024-03-01".parse()?;
        for start in 2..200 {
            let mut up = card(start, "2024-01-01")?;
            schedule(&mut up, Outcome::Correct, today);
            assert!(up.day_multiplier > start);
            assert_eq!(up.due_date, today.add_days(start));

            let mut down = card(start, "2024-01-01")?;
            schedule(&mut down, Outcome::Incorrect, today);
            assert!(down.day_multiplier <= start);
            assert!(down.day_multiplier >= MIN_DAY_MULTIPLIER);
            assert_eq!(down.due_date.to_string(), "2024-01-01");
        }
        Ok(())
    }

    #[test]
    fn test_outcome_from_bool() {
        assert_eq!(Outcome::from(true), Outcome::Correct);
        assert_eq!(Outcome::from(false), Outcome::Incorrect);
    }
}
