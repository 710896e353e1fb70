//! Display state machine.
//!
//! Three regions (loading, error, result) are mutually exclusive: showing
//! one hides the other two. Before the first lookup nothing is shown.
//!
//! ```text
//! Hidden ──begin──▶ Loading ──complete(Ok)──▶ Result
//!                     ▲  └────complete(Err)──▶ Error
//!                     └──────── begin ────────────┘
//! ```
//!
//! [`WeatherService::search`](crate::WeatherService::search) and
//! [`use_my_location`](crate::WeatherService::use_my_location) hold the
//! display for the whole lookup, so through them requests never overlap.
//! To let lookups race, call [`WeatherDisplay::begin`] per request, run
//! [`lookup_city`](crate::WeatherService::lookup_city) or
//! [`lookup_here`](crate::WeatherService::lookup_here) concurrently (neither
//! touches the display), and hand each outcome to
//! [`WeatherDisplay::complete`]. Only the newest token is applied.

use crate::{error::LookupError, model::RenderedConditions};

/// Concrete output surface. Each call replaces whatever was visible.
pub trait Renderer {
    fn show_loading(&mut self);
    fn show_error(&mut self, message: &str);
    fn show_result(&mut self, rendering: &RenderedConditions);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Hidden,
    Loading,
    Error(String),
    Result(RenderedConditions),
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayState::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&RenderedConditions> {
        match self {
            DisplayState::Result(rendering) => Some(rendering),
            _ => None,
        }
    }
}

/// Identifies one lookup. Only the most recently issued token may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Owns the current [`DisplayState`] and mirrors every transition to a
/// [`Renderer`].
#[derive(Debug)]
pub struct WeatherDisplay<R> {
    renderer: R,
    state: DisplayState,
    latest: u64,
}

impl<R: Renderer> WeatherDisplay<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            state: DisplayState::Hidden,
            latest: 0,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Enter `Loading` and supersede any request still in flight.
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.state = DisplayState::Loading;
        self.renderer.show_loading();
        RequestToken(self.latest)
    }

    /// Finish the request identified by `token`.
    ///
    /// Returns `false` and leaves the display untouched when a newer request
    /// has started since `token` was issued.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<RenderedConditions, LookupError>,
    ) -> bool {
        if token.0 != self.latest || !self.state.is_loading() {
            tracing::debug!(token = token.0, latest = self.latest, "dropping stale lookup result");
            return false;
        }

        match outcome {
            Ok(rendering) => {
                self.renderer.show_result(&rendering);
                self.state = DisplayState::Result(rendering);
            }
            Err(err) => self.show_error(&err),
        }

        true
    }

    /// Report a failure detected before any request could start.
    pub fn fail_immediately(&mut self, err: LookupError) {
        // Invalidate anything still in flight.
        self.latest += 1;
        self.show_error(&err);
    }

    fn show_error(&mut self, err: &LookupError) {
        tracing::info!(error = %err, "lookup failed");
        let message = err.user_message();
        self.renderer.show_error(message);
        self.state = DisplayState::Error(message.to_string());
    }
}
