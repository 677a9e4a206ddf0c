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

use std::io::Write;
use std::io::stdout;
use std::path::Path;

use crossterm::cursor::Hide;
use crossterm::cursor::MoveTo;
use crossterm::cursor::MoveToNextLine;
use crossterm::cursor::Show;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::read;
use crossterm::execute;
use crossterm::queue;
use crossterm::style::Color;
use crossterm::style::Print;
use crossterm::style::Stylize;
use crossterm::terminal::Clear;
use crossterm::terminal::ClearType;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use termsrs_core::deck::Deck;
use termsrs_core::error::Fallible;
use termsrs_core::rng::TinyRng;
use termsrs_core::session::Session;
use termsrs_core::types::date::Date;

/// Minimum inner width of the card panel.
const PANEL_WIDTH: usize = 25;

const BORDER_COLOR: Color = Color::AnsiValue(69);

/// Review the deck called `name`, then write the results back.
pub fn review_deck(name: &str, deck_dir: Option<&Path>) -> Fallible<()> {
    let today = Date::today();
    let mut rng = TinyRng::from_clock();
    let deck = Deck::load(name, deck_dir, today, &mut rng)?;
    if deck.is_empty() {
        println!("no cards to review in deck");
        return Ok(());
    }
    log::debug!(
        "Reviewing {} cards from {}.",
        deck.size(),
        deck.source_path().display()
    );
    let mut session = Session::new(deck, today, rng);
    let result = run_terminal(&mut session);
    session.into_deck().flush()?;
    result?;
    println!("Done!");
    Ok(())
}

/// Run the session in the alternate screen, restoring the terminal
/// afterwards whether or not the session loop failed.
fn run_terminal(session: &mut Session) -> Fallible<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    let result = execute!(out, EnterAlternateScreen, Hide).and_then(|_| run_loop(&mut out, session));
    let restored = execute!(out, Show, LeaveAlternateScreen).and_then(|_| disable_raw_mode());
    result?;
    restored?;
    Ok(())
}

fn run_loop(out: &mut impl Write, session: &mut Session) -> std::io::Result<()> {
    while !session.is_terminated() {
        draw(out, session)?;
        match read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(session, key),
            _ => {}
        }
    }
    Ok(())
}

/// Map a keystroke onto a session event.
fn handle_key(session: &mut Session, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.quit();
        }
        KeyCode::Char('q') => {
            session.quit();
        }
        KeyCode::Char(' ') => {
            session.reveal();
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            session.answer(true);
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            session.answer(false);
        }
        _ => {}
    }
}

/// The text of one frame of the review screen.
struct Frame {
    heading: &'static str,
    panel: [String; 3],
    progress: String,
    helper: &'static str,
}

fn frame(session: &Session) -> Frame {
    let (heading, text, helper) = match session.current_card() {
        Some(card) if session.revealed() => (
            "Back",
            card.back.as_str(),
            "Press Y if you got it correct, N if not",
        ),
        Some(card) => (
            "Front",
            card.front.as_str(),
            "Press spacebar to reveal the card",
        ),
        None => ("", "", ""),
    };
    Frame {
        heading,
        panel: panel(text),
        progress: format!(
            "SOLVED: {}/{}  {:.0}%",
            session.solved(),
            session.size(),
            session.progress()
        ),
        helper,
    }
}

/// A bordered box with `text` centered inside it.
fn panel(text: &str) -> [String; 3] {
    let len = text.chars().count();
    let width = PANEL_WIDTH.max(len + 2);
    let left = (width - len) / 2;
    let right = width - len - left;
    let bar = "─".repeat(width);
    [
        format!("┌{bar}┐"),
        format!("│{}{text}{}│", " ".repeat(left), " ".repeat(right)),
        format!("└{bar}┘"),
    ]
}

fn draw(out: &mut impl Write, session: &Session) -> std::io::Result<()> {
    let frame = frame(session);
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 1),
        Print(frame.heading),
        MoveToNextLine(2)
    )?;
    for line in &frame.panel {
        queue!(out, Print(line.as_str().with(BORDER_COLOR)), MoveToNextLine(1))?;
    }
    queue!(
        out,
        MoveToNextLine(1),
        Print(&frame.progress),
        MoveToNextLine(2),
        Print(frame.helper)
    )?;
    out.flush()
}
