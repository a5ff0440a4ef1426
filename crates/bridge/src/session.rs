//! Session contract
//!
//! A session owns enablement and turns adapter calls into packets. Every
//! operation may fail; the adapter routes failures to the error hook.

use std::sync::Arc;

use sift_protocol::Level;

use crate::error::Result;
use crate::event::EventError;

/// Operations the record adapter drives
pub trait Session {
    /// Whether an event at `level` would be logged
    fn is_on(&self, level: Level) -> bool;

    fn log_debug(&self, title: &str) -> Result<()>;

    fn log_verbose(&self, title: &str) -> Result<()>;

    fn log_message(&self, title: &str) -> Result<()>;

    fn log_warning(&self, title: &str) -> Result<()>;

    fn log_error(&self, title: &str) -> Result<()>;

    /// Log an error together with its report
    fn log_exception(&self, title: &str, error: &EventError) -> Result<()>;

    /// Mark entry into a method; nests until the matching leave
    fn enter_method(&self, level: Level, title: &str) -> Result<()>;

    /// Mark return from a method
    fn leave_method(&self, level: Level, title: &str) -> Result<()>;
}

impl<S: Session + ?Sized> Session for Arc<S> {
    fn is_on(&self, level: Level) -> bool {
        (**self).is_on(level)
    }

    fn log_debug(&self, title: &str) -> Result<()> {
        (**self).log_debug(title)
    }

    fn log_verbose(&self, title: &str) -> Result<()> {
        (**self).log_verbose(title)
    }

    fn log_message(&self, title: &str) -> Result<()> {
        (**self).log_message(title)
    }

    fn log_warning(&self, title: &str) -> Result<()> {
        (**self).log_warning(title)
    }

    fn log_error(&self, title: &str) -> Result<()> {
        (**self).log_error(title)
    }

    fn log_exception(&self, title: &str, error: &EventError) -> Result<()> {
        (**self).log_exception(title, error)
    }

    fn enter_method(&self, level: Level, title: &str) -> Result<()> {
        (**self).enter_method(level, title)
    }

    fn leave_method(&self, level: Level, title: &str) -> Result<()> {
        (**self).leave_method(level, title)
    }
}
