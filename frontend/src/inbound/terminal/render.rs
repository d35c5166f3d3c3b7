//! Plain-text rendering of page views and shell notices.

use std::io::{self, Write};

use crate::domain::Location;
use crate::domain::pages::{PageView, ViewLine};

/// Write the navigation bar followed by `view`.
pub(super) fn page<W: Write>(out: &mut W, current: Location, view: &PageView) -> io::Result<()> {
    nav_bar(out, current)?;
    if let Some(heading) = &view.heading {
        writeln!(out, "{heading}")?;
    }
    for line in &view.lines {
        match line {
            ViewLine::Text(text) | ViewLine::Error(text) => writeln!(out, "{text}")?,
            ViewLine::Item(item) => writeln!(out, "  {item}")?,
        }
    }
    out.flush()
}

fn nav_bar<W: Write>(out: &mut W, current: Location) -> io::Result<()> {
    let links = Location::ALL
        .iter()
        .map(|location| {
            let link = format!("{} {}", location.label(), location.path());
            if *location == current {
                format!("[{link}]")
            } else {
                link
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{links}")
}

pub(super) fn unknown_route<W: Write>(out: &mut W, path: &str) -> io::Result<()> {
    writeln!(out, "Unknown route `{path}`.")?;
    hint(out)
}

pub(super) fn hint<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Type a route (/, /problems, /history) or `/quit`.")?;
    out.flush()
}

pub(super) fn busy<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Still loading. Type a route to leave this page.")?;
    out.flush()
}
