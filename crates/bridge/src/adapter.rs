//! Record adapter
//!
//! Classifies a [`LogEvent`] and drives the matching [`Session`] operation.
//! Decision order:
//!
//! 1. An attached error always routes to `log_exception`.
//! 2. A raw message starting with `ENTRY` or `RETURN` routes to
//!    `enter_method` / `leave_method` at the mapped level.
//! 3. Otherwise the mapped level picks one of the plain operations.
//!
//! Events failing the session's `is_on` check at their mapped level produce
//! nothing. Session failures and panics go to the [`ErrorHook`]; [`publish`]
//! and [`Handler::publish`] never return or unwind into the caller.

use std::panic::{self, AssertUnwindSafe};

use sift_protocol::Level;

use crate::error::{BridgeError, Result};
use crate::event::LogEvent;
use crate::hook::{ErrorHook, TracingErrorHook};
use crate::session::Session;
use crate::severity::map_level;
use crate::title::{DefaultTitleFormatter, ENTRY_TOKEN, RETURN_TOKEN, TitleFormatter};

/// Session operation an event is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Exception,
    EnterMethod(Level),
    LeaveMethod(Level),
    Debug,
    Verbose,
    Message,
    Warning,
    Error,
}

/// Pure routing decision for an event
pub fn classify(event: &LogEvent) -> Route {
    if event.error.is_some() {
        return Route::Exception;
    }

    let level = map_level(event.severity);

    if event.message.starts_with(ENTRY_TOKEN) {
        return Route::EnterMethod(level);
    }
    if event.message.starts_with(RETURN_TOKEN) {
        return Route::LeaveMethod(level);
    }

    match level {
        Level::Debug => Route::Debug,
        Level::Verbose => Route::Verbose,
        Level::Warning => Route::Warning,
        Level::Error => Route::Error,
        _ => Route::Message,
    }
}

/// Route one event to `session`, reporting failures to `hook`
///
/// A panicking session or title formatter is caught and reported with
/// [`FailureCode::Generic`](crate::hook::FailureCode::Generic).
pub fn publish<S>(
    session: &S,
    titles: &dyn TitleFormatter,
    hook: &dyn ErrorHook,
    event: &LogEvent,
) where
    S: Session + ?Sized,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| route(session, titles, event)));

    let err = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(err)) => err,
        Err(payload) => BridgeError::panicked(payload.as_ref()),
    };
    hook.report_failure(&err.to_string(), &err, err.code());
}

fn route<S>(session: &S, titles: &dyn TitleFormatter, event: &LogEvent) -> Result<()>
where
    S: Session + ?Sized,
{
    if !session.is_on(map_level(event.severity)) {
        return Ok(());
    }

    let title = titles.format(event);
    dispatch(session, classify(event), &title, event)
}

fn dispatch<S>(session: &S, route: Route, title: &str, event: &LogEvent) -> Result<()>
where
    S: Session + ?Sized,
{
    match route {
        Route::Exception => match &event.error {
            Some(error) => session.log_exception(title, error),
            None => session.log_error(title),
        },
        Route::EnterMethod(level) => session.enter_method(level, title),
        Route::LeaveMethod(level) => session.leave_method(level, title),
        Route::Debug => session.log_debug(title),
        Route::Verbose => session.log_verbose(title),
        Route::Message => session.log_message(title),
        Route::Warning => session.log_warning(title),
        Route::Error => session.log_error(title),
    }
}

/// Owns a session, a title formatter and an error hook
///
/// `publish` never fails and never unwinds into the caller.
pub struct Handler<S, T = DefaultTitleFormatter, H = TracingErrorHook> {
    session: S,
    titles: T,
    hook: H,
}

impl<S: Session> Handler<S> {
    /// Handler with the default title layout and rate-limited tracing hook
    pub fn new(session: S) -> Self {
        Self {
            session,
            titles: DefaultTitleFormatter,
            hook: TracingErrorHook::default(),
        }
    }
}

impl<S, T, H> Handler<S, T, H>
where
    S: Session,
    T: TitleFormatter,
    H: ErrorHook,
{
    /// Replace the title formatter
    #[must_use]
    pub fn with_title_formatter<T2: TitleFormatter>(self, titles: T2) -> Handler<S, T2, H> {
        Handler {
            session: self.session,
            titles,
            hook: self.hook,
        }
    }

    /// Replace the error hook
    #[must_use]
    pub fn with_error_hook<H2: ErrorHook>(self, hook: H2) -> Handler<S, T, H2> {
        Handler {
            session: self.session,
            titles: self.titles,
            hook,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn title_formatter(&self) -> &T {
        &self.titles
    }

    pub fn error_hook(&self) -> &H {
        &self.hook
    }

    /// Consume the handler, returning the session
    pub fn into_session(self) -> S {
        self.session
    }

    /// Publish one event
    pub fn publish(&self, event: &LogEvent) {
        publish(&self.session, &self.titles, &self.hook, event);
    }
}

#[cfg(test)]
#[path = "adapter_test.rs"]
mod adapter_test;
