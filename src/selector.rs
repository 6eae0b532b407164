//! Interactive alias selector as a pure state machine.
//!
//! [`Selector::step`] folds one [`SelectorEvent`] into the state and
//! [`Selector::render`] turns the state into lines of text. The terminal
//! driver in [`crate::tui`] only translates keys and paints lines.

use crate::model::AliasEntry;

/// At most this many matches are shown and navigable.
pub const MAX_RESULTS: usize = 10;

const LOGO: &[&str] = &[
    r" _ __ ___  _ __   ___ _ __",
    r"| '__/ _ \| '_ \ / _ \ '_ \",
    r"| | | (_) | |_) |  __/ | | |",
    r"|_|  \___/| .__/ \___|_| |_|",
    r"          |_|",
];

// logo, blank, question, blank, prompt
const PROMPT_ROW: usize = LOGO.len() + 3;

const QUESTION: &str = "Which project do you want to open?";

const SHORT_HELP: &[&str] = &["?         show key bindings", "ctrl+c    quit"];

const FULL_HELP: &[&str] = &[
    "?         hide key bindings",
    "ctrl+n/↓  move selection down",
    "ctrl+p/↑  move selection up",
    "ctrl+w    clear search string",
    "enter     open selection",
    "ctrl+c    quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    Insert(char),
    Backspace,
    ClearSearch,
    Up,
    Down,
    ToggleHelp,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Editing,
    /// `None` when confirmed with no matches.
    Confirmed(Option<String>),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Logo,
    Title,
    Prompt,
    Selected,
    Faint,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

impl Line {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Selector<'a> {
    aliases: &'a [AliasEntry],
    query: String,
    results: Vec<&'a AliasEntry>,
    highlighted: usize,
    help_shown: bool,
    phase: Phase,
}

/// Entries whose alias or path contains `query`, in registry order, capped
/// at [`MAX_RESULTS`].
pub fn filter<'a>(aliases: &'a [AliasEntry], query: &str) -> Vec<&'a AliasEntry> {
    aliases
        .iter()
        .filter(|e| e.matches(query))
        .take(MAX_RESULTS)
        .collect()
}

impl<'a> Selector<'a> {
    pub fn new(aliases: &'a [AliasEntry]) -> Self {
        Self {
            aliases,
            query: String::new(),
            results: filter(aliases, ""),
            highlighted: 0,
            help_shown: false,
            phase: Phase::Editing,
        }
    }

    #[cfg(test)]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[cfg(test)]
    pub fn results(&self) -> &[&'a AliasEntry] {
        &self.results
    }

    #[cfg(test)]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    #[cfg(test)]
    pub fn help_shown(&self) -> bool {
        self.help_shown
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Apply one event. Events after confirm/cancel are ignored.
    pub fn step(mut self, event: SelectorEvent) -> Self {
        if self.phase != Phase::Editing {
            return self;
        }

        match event {
            SelectorEvent::Insert(c) => {
                self.query.push(c);
                self.refilter();
            }
            SelectorEvent::Backspace => {
                self.query.pop();
                self.refilter();
            }
            SelectorEvent::ClearSearch => {
                self.query.clear();
                self.refilter();
            }
            SelectorEvent::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
            SelectorEvent::Down => {
                let last = self.results.len().min(MAX_RESULTS).saturating_sub(1);
                if self.highlighted < last {
                    self.highlighted += 1;
                }
            }
            SelectorEvent::ToggleHelp => self.help_shown = !self.help_shown,
            SelectorEvent::Confirm => {
                let chosen = self
                    .results
                    .get(self.highlighted)
                    .map(|e| e.alias.clone());
                self.phase = Phase::Confirmed(chosen);
            }
            SelectorEvent::Cancel => self.phase = Phase::Cancelled,
        }
        self
    }

    fn refilter(&mut self) {
        self.results = filter(self.aliases, &self.query);
        self.highlighted = 0;
    }

    /// Column where the text cursor belongs on the prompt line.
    pub fn cursor(&self) -> (usize, usize) {
        (PROMPT_ROW, 2 + self.query.chars().count())
    }

    pub fn render(&self) -> Vec<Line> {
        // Column widths come from the whole registry so the box doesn't
        // jump around while filtering.
        let alias_w = self
            .aliases
            .iter()
            .map(|e| e.alias.chars().count())
            .max()
            .unwrap_or(0);
        let path_w = self
            .aliases
            .iter()
            .map(|e| e.path.to_string_lossy().chars().count())
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines: Vec<Line> = LOGO
            .iter()
            .map(|l| Line::new(*l, LineStyle::Logo))
            .collect();
        lines.extend([
            Line::new("", LineStyle::Plain),
            Line::new(QUESTION, LineStyle::Title),
            Line::new("", LineStyle::Plain),
            Line::new(format!("> {}", self.query), LineStyle::Prompt),
            Line::new("", LineStyle::Plain),
        ]);

        for (i, e) in self.results.iter().enumerate() {
            let text = format!(
                "  {:<alias_w$}  {:<path_w$} ",
                e.alias,
                e.path.to_string_lossy()
            );
            let style = if i == self.highlighted {
                LineStyle::Selected
            } else {
                LineStyle::Faint
            };
            lines.push(Line::new(text, style));
        }

        lines.push(Line::new("", LineStyle::Plain));
        let help = if self.help_shown { FULL_HELP } else { SHORT_HELP };
        lines.extend(help.iter().map(|h| Line::new(*h, LineStyle::Faint)));
        lines
    }

    #[cfg(test)]
    pub fn render_text(&self) -> String {
        self.render()
            .into_iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
