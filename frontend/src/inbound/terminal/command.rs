//! Line commands understood by the terminal shell.

use crate::domain::Location;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A known route, e.g. `/problems`.
    Navigate(Location),
    /// A line that looked like a route but matched none.
    UnknownRoute(String),
    /// `/quit` or `/exit`. Bare words are always input so any handle can be
    /// submitted.
    Quit,
    /// Anything else, with the line ending stripped and nothing else touched.
    Input(String),
}

impl Command {
    /// Classify `line`.
    ///
    /// # Examples
    /// ```
    /// use recommender_frontend::domain::Location;
    /// use recommender_frontend::inbound::terminal::Command;
    ///
    /// assert_eq!(Command::parse("/history"), Command::Navigate(Location::History));
    /// assert_eq!(Command::parse("/quit"), Command::Quit);
    /// assert_eq!(Command::parse("quit"), Command::Input("quit".to_owned()));
    /// assert_eq!(Command::parse(" tourist"), Command::Input(" tourist".to_owned()));
    /// ```
    pub fn parse(line: &str) -> Self {
        let raw = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') {
            return Self::Input(raw.to_owned());
        }
        if matches!(trimmed, "/quit" | "/exit") {
            return Self::Quit;
        }
        Location::from_path(trimmed)
            .map_or_else(|| Self::UnknownRoute(trimmed.to_owned()), Self::Navigate)
    }
}
