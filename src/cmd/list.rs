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

use termsrs_core::deck::list_decks;
use termsrs_core::error::Fallible;
use termsrs_core::error::fail;

pub fn print_decks(deck_dir: Option<&Path>) -> Fallible<()> {
    print!("{}", deck_listing(deck_dir)?);
    Ok(())
}

fn deck_listing(deck_dir: Option<&Path>) -> Fallible<String> {
    let Some(dir) = deck_dir else {
        return fail("cannot locate the deck directory, pass --deck-dir.");
    };
    let mut out = String::from("List of decks:\n");
    for name in list_decks(dir)? {
        out.push_str(&name);
        out.push('\n');
    }
    Ok(out)
}
