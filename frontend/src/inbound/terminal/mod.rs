//! Line-oriented terminal shell driving the page controllers.
//!
//! The shell owns the session: one [`IdentityStore`], one [`Navigator`], and
//! whichever page controller is mounted for the current location. Each
//! location change drops the previous controller (cancelling anything it
//! still had in flight) and mounts a fresh one.

mod command;
mod render;

pub use command::Command;

use std::future::Future;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

use crate::domain::pages::{
    EntryController, HistoryController, PageController, RecommendationsController, SubmitOutcome,
};
use crate::domain::{IdentityStore, Location, Navigator, RecommendationClient, RouteAccess};

/// Errors that end a shell session.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// What the session does once the current page is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    /// The navigator already moved; mount whatever it points at.
    Remount,
    /// Move to this location.
    Navigate(Location),
    /// End the session.
    Quit,
}

/// Input that pre-empts a pending fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Navigate(Location),
    Quit,
}

impl From<Interrupt> for Next {
    fn from(value: Interrupt) -> Self {
        match value {
            Interrupt::Navigate(location) => Self::Navigate(location),
            Interrupt::Quit => Self::Quit,
        }
    }
}

enum Raced<T> {
    Finished(T),
    Interrupted(Interrupt),
}

/// Interactive session over line input and text output.
pub struct TerminalShell<W> {
    client: RecommendationClient,
    identity: IdentityStore,
    navigator: Navigator,
    output: W,
}

impl<W: Write> TerminalShell<W> {
    /// Start a session at the Entry page.
    pub fn new(client: RecommendationClient, identity: IdentityStore, output: W) -> Self {
        Self::starting_at(Location::Entry, client, identity, output)
    }

    /// Start a session at `location`, as opening that route directly would.
    pub fn starting_at(
        location: Location,
        client: RecommendationClient,
        identity: IdentityStore,
        output: W,
    ) -> Self {
        Self {
            navigator: Navigator::starting_at(location, identity.clone()),
            client,
            identity,
            output,
        }
    }

    /// Session navigator.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Consume the shell and return its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the session until `/quit`, `/exit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] when reading input or writing output fails.
    pub async fn run<R>(&mut self, input: R) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            let next = match self.navigator.current() {
                Location::Entry => self.entry_page(&mut lines).await?,
                Location::Recommendations => {
                    let page = RecommendationsController::mount(self.client.clone(), &self.identity);
                    self.guarded_page(page, &mut lines).await?
                }
                Location::History => {
                    let page = HistoryController::mount(self.client.clone(), &self.identity);
                    self.guarded_page(page, &mut lines).await?
                }
            };
            match next {
                Next::Remount => {}
                Next::Navigate(location) => {
                    self.navigator.navigate(location);
                }
                Next::Quit => {
                    debug!("session ended");
                    return Ok(());
                }
            }
        }
    }

    async fn entry_page<R>(&mut self, lines: &mut Lines<R>) -> Result<Next, ShellError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut entry = EntryController::new(self.client.clone(), self.identity.clone());
        render::page(&mut self.output, Location::Entry, &entry.view())?;
        loop {
            let Some(line) = lines.next_line().await? else {
                return Ok(Next::Quit);
            };
            match Command::parse(&line) {
                Command::Quit => return Ok(Next::Quit),
                Command::Navigate(location) => return Ok(Next::Navigate(location)),
                Command::UnknownRoute(path) => render::unknown_route(&mut self.output, &path)?,
                Command::Input(text) => {
                    let submission = entry.submit(&text, &mut self.navigator);
                    match race_input(submission, lines, &mut self.output).await? {
                        Raced::Finished(SubmitOutcome::Accepted(_)) => return Ok(Next::Remount),
                        Raced::Finished(SubmitOutcome::Rejected(_) | SubmitOutcome::Cancelled) => {
                            render::page(&mut self.output, Location::Entry, &entry.view())?;
                        }
                        Raced::Interrupted(interrupt) => {
                            entry.unmount();
                            return Ok(interrupt.into());
                        }
                    }
                }
            }
        }
    }

    async fn guarded_page<P, R>(&mut self, mut page: P, lines: &mut Lines<R>) -> Result<Next, ShellError>
    where
        P: PageController,
        R: AsyncBufRead + Unpin,
    {
        let location = page.location();
        render::page(&mut self.output, location, &page.view())?;

        if matches!(self.navigator.guard(location), RouteAccess::NoIdentity) {
            debug!(%location, "no identity; page not loaded");
        } else {
            match race_input(page.load(), lines, &mut self.output).await? {
                Raced::Finished(outcome) => {
                    debug!(%location, ?outcome, "page load finished");
                    render::page(&mut self.output, location, &page.view())?;
                }
                Raced::Interrupted(interrupt) => {
                    page.unmount();
                    return Ok(interrupt.into());
                }
            }
        }

        loop {
            let Some(line) = lines.next_line().await? else {
                return Ok(Next::Quit);
            };
            match Command::parse(&line) {
                Command::Quit => return Ok(Next::Quit),
                Command::Navigate(target) => {
                    page.unmount();
                    return Ok(Next::Navigate(target));
                }
                Command::UnknownRoute(path) => render::unknown_route(&mut self.output, &path)?,
                Command::Input(_) => render::hint(&mut self.output)?,
            }
        }
    }
}

/// Drive `future` while still reading input. A route or `/quit` typed before
/// `future` resolves drops it and is returned instead. After end of input the
/// future is awaited to completion.
async fn race_input<F, R, W>(
    future: F,
    lines: &mut Lines<R>,
    output: &mut W,
) -> Result<Raced<F::Output>, ShellError>
where
    F: Future,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    tokio::pin!(future);
    let mut input_open = true;
    loop {
        tokio::select! {
            biased;
            value = &mut future => return Ok(Raced::Finished(value)),
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match Command::parse(&line) {
                    Command::Navigate(location) => {
                        debug!(%location, "navigation pre-empted pending fetch");
                        return Ok(Raced::Interrupted(Interrupt::Navigate(location)));
                    }
                    Command::Quit => return Ok(Raced::Interrupted(Interrupt::Quit)),
                    Command::UnknownRoute(path) => render::unknown_route(output, &path)?,
                    Command::Input(_) => render::busy(output)?,
                }
            }
        }
    }
}
