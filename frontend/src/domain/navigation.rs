//! Route table and identity guard.
//!
//! The navigator never blocks a transition. Guarded locations are still
//! reachable (a fresh start at `/problems` is allowed), but [`Navigator::guard`]
//! tells the page controller that no identity is present so it can render the
//! dead-end message instead of fetching.

use std::fmt;

use tracing::debug;

use crate::domain::{IdentityStore, UserHandle};

/// Named client locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Handle entry form (`/`).
    Entry,
    /// Problem recommendations (`/problems`).
    Recommendations,
    /// Submission history (`/history`).
    History,
}

impl Location {
    /// Every location in navigation-bar order.
    pub const ALL: [Self; 3] = [Self::Entry, Self::Recommendations, Self::History];

    /// Route path for this location.
    pub fn path(self) -> &'static str {
        match self {
            Self::Entry => "/",
            Self::Recommendations => "/problems",
            Self::History => "/history",
        }
    }

    /// Navigation-bar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Entry => "Home",
            Self::Recommendations => "Problem",
            Self::History => "History",
        }
    }

    /// Resolve a route path. A single trailing slash is tolerated.
    ///
    /// # Examples
    /// ```
    /// use recommender_frontend::domain::Location;
    ///
    /// assert_eq!(Location::from_path("/problems/"), Some(Location::Recommendations));
    /// assert_eq!(Location::from_path("/admin"), None);
    /// ```
    pub fn from_path(path: &str) -> Option<Self> {
        let normalised = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(stripped) => stripped,
        };
        Self::ALL
            .into_iter()
            .find(|location| location.path() == normalised)
    }

    /// Whether rendering this location needs a committed handle.
    pub fn requires_identity(self) -> bool {
        !matches!(self, Self::Entry)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of evaluating the identity guard for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// The location does not need an identity.
    Open,
    /// The location needs an identity and one is present.
    Granted(UserHandle),
    /// The location needs an identity and none is present.
    NoIdentity,
}

/// One recorded navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Location left.
    pub from: Location,
    /// Location entered.
    pub to: Location,
}

/// Tracks the current location and evaluates the identity guard.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Location,
    identity: IdentityStore,
    trail: Vec<Navigation>,
}

impl Navigator {
    /// Start a session at the Entry location.
    pub fn new(identity: IdentityStore) -> Self {
        Self::starting_at(Location::Entry, identity)
    }

    /// Start a session at an arbitrary location, as a fresh load of that
    /// route would.
    pub fn starting_at(location: Location, identity: IdentityStore) -> Self {
        Self {
            current: location,
            identity,
            trail: Vec::new(),
        }
    }

    /// Current location.
    pub fn current(&self) -> Location {
        self.current
    }

    /// Move to `to` and record the event. Moving to the current location is
    /// still recorded; it remounts the page.
    pub fn navigate(&mut self, to: Location) -> Navigation {
        let navigation = Navigation {
            from: self.current,
            to,
        };
        debug!(from = %navigation.from, to = %navigation.to, "navigating");
        self.current = to;
        self.trail.push(navigation);
        navigation
    }

    /// Evaluate the identity guard for `location`.
    pub fn guard(&self, location: Location) -> RouteAccess {
        if !location.requires_identity() {
            return RouteAccess::Open;
        }
        match self.identity.get() {
            Some(handle) => RouteAccess::Granted(handle),
            None => RouteAccess::NoIdentity,
        }
    }

    /// Every navigation performed so far, oldest first.
    pub fn trail(&self) -> &[Navigation] {
        &self.trail
    }
}
