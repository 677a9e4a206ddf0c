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

use std::path::PathBuf;

use clap::Parser;
use termsrs_core::error::Fallible;
use termsrs_core::error::fail;

use crate::cmd::list::print_decks;
use crate::cmd::review::review_deck;

const LONG_ABOUT: &str = "\
termsrs first tries to open the deck in the deck directory without the .srs ending.
Example: `termsrs spanish_vocab` will try to open spanish_vocab.srs in ~/.config/termsrs/.

If not found, it will treat it as a path and will try to open the file, which means
that you can also supply a valid path directly.
Example: `termsrs ~/Documents/latin_declinations.srs`";

#[derive(Parser)]
#[command(version, about, long_about = LONG_ABOUT)]
struct Command {
    /// Name of the deck to review, or a path to a deck file.
    #[arg(required_unless_present = "list")]
    deck: Option<String>,
    /// List the decks in the deck directory.
    #[arg(short, long)]
    list: bool,
    /// Directory holding `<name>.srs` decks. By default, ~/.config/termsrs is used.
    #[arg(long, env = "TERMSRS_DIR")]
    deck_dir: Option<PathBuf>,
}

/// The deck directory used when none is given.
fn default_deck_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("termsrs"))
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let deck_dir: Option<PathBuf> = cli.deck_dir.or_else(default_deck_dir);
    if cli.list {
        return print_decks(deck_dir.as_deref());
    }
    match cli.deck {
        Some(deck) => review_deck(&deck, deck_dir.as_deref()),
        None => fail("no deck given."),
    }
}
