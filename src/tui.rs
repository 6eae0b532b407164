use std::env;

use skim_tuikit::prelude::{Attr, Color, Effect, Event, Key, Term, TermHeight};
use tracing::debug;

use crate::{
    error::{Error, Result},
    model::AliasEntry,
    selector::{LineStyle, Phase, Selector, SelectorEvent},
};

/// Run the selector on the terminal until the user confirms or cancels.
/// The terminal is restored before returning.
pub fn select(aliases: &[AliasEntry]) -> Result<Option<String>> {
    let term: Term<()> = Term::with_height(TermHeight::Percent(60)).map_err(terminal_err)?;
    let colors = env::var("NO_COLOR").is_err();
    let mut selector = Selector::new(aliases);

    loop {
        draw(&term, &selector, colors)?;

        let key = match term.poll_event().map_err(terminal_err)? {
            Event::Key(key) => key,
            _ => continue, // resize and friends just redraw
        };
        let Some(event) = map_key(key) else { continue };
        selector = selector.step(event);

        match selector.phase() {
            Phase::Editing => {}
            Phase::Confirmed(alias) => {
                debug!(?alias, "selector confirmed");
                return Ok(alias.clone());
            }
            Phase::Cancelled => {
                debug!("selector cancelled");
                return Ok(None);
            }
        }
    }
}

pub fn map_key(key: Key) -> Option<SelectorEvent> {
    let event = match key {
        Key::Ctrl('c') | Key::ESC => SelectorEvent::Cancel,
        Key::Ctrl('w') => SelectorEvent::ClearSearch,
        Key::Up | Key::Ctrl('p') => SelectorEvent::Up,
        Key::Down | Key::Ctrl('n') => SelectorEvent::Down,
        Key::Enter => SelectorEvent::Confirm,
        Key::Backspace => SelectorEvent::Backspace,
        Key::Char('?') => SelectorEvent::ToggleHelp,
        Key::Char(c) if !c.is_control() => SelectorEvent::Insert(c),
        _ => return None,
    };
    Some(event)
}

fn draw(term: &Term<()>, selector: &Selector<'_>, colors: bool) -> Result<()> {
    term.clear().map_err(terminal_err)?;
    for (row, line) in selector.render().iter().enumerate() {
        term.print_with_attr(row, 0, &line.text, attr_for(line.style, colors))
            .map_err(terminal_err)?;
    }
    let (row, col) = selector.cursor();
    term.set_cursor(row, col).map_err(terminal_err)?;
    term.show_cursor(true).map_err(terminal_err)?;
    term.present().map_err(terminal_err)?;
    Ok(())
}

fn attr_for(style: LineStyle, colors: bool) -> Attr {
    let plain = Attr {
        fg: Color::Default,
        bg: Color::Default,
        effect: Effect::empty(),
    };
    match (style, colors) {
        (LineStyle::Title, _) => Attr {
            effect: Effect::BOLD,
            ..plain
        },
        (LineStyle::Selected, true) => Attr {
            fg: Color::AnsiValue(255),
            bg: Color::AnsiValue(56),
            effect: Effect::BOLD,
        },
        (LineStyle::Selected, false) => Attr {
            effect: Effect::REVERSE,
            ..plain
        },
        (LineStyle::Faint, _) => Attr {
            effect: Effect::DIM,
            ..plain
        },
        (LineStyle::Logo | LineStyle::Prompt, true) => Attr {
            fg: Color::AnsiValue(56),
            ..plain
        },
        (LineStyle::Logo | LineStyle::Prompt, false) | (LineStyle::Plain, _) => plain,
    }
}

fn terminal_err(e: impl std::fmt::Display) -> Error {
    Error::Terminal(e.to_string())
}
