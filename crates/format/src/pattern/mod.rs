//! Pattern rendering
//!
//! [`PatternRenderer`] expands a log entry into one display line. The
//! bundled [`PatternParser`] understands literal text and `%variable%`
//! substitutions with optional width and options; it also owns the running
//! indentation level used to nest method enter/leave pairs.
//!
//! The indentation level is renderer state, not global state: each text
//! formatter owns exactly one renderer and advances it once per entry.

mod token;

use sift_protocol::{LogEntry, LogEntryType};

use token::{Token, tokenize};

pub use token::DEFAULT_TIMESTAMP_FORMAT;

/// Spaces emitted per indentation level in front of the title
pub const INDENT_WIDTH: usize = 3;

/// Expands log entries into display strings
pub trait PatternRenderer {
    /// Render `entry` against the current pattern
    ///
    /// Takes `&mut self` because rendering advances the indentation level.
    fn expand(&mut self, entry: &LogEntry) -> String;

    /// Current pattern string
    fn pattern(&self) -> &str;

    /// Replace the pattern
    fn set_pattern(&mut self, pattern: &str);

    /// Whether titles are indented by nesting depth
    fn indent(&self) -> bool;

    fn set_indent(&mut self, indent: bool);
}

/// Default `%variable%` renderer
#[derive(Debug, Clone, Default)]
pub struct PatternParser {
    pattern: String,
    tokens: Vec<Token>,
    indent: bool,
    indent_level: usize,
}

impl PatternParser {
    pub fn new(pattern: &str) -> Self {
        let mut parser = Self::default();
        parser.set_pattern(pattern);
        parser
    }

    /// Enable or disable title indentation
    #[inline]
    #[must_use]
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Current nesting depth
    #[inline]
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }
}

impl PatternRenderer for PatternParser {
    fn expand(&mut self, entry: &LogEntry) -> String {
        if self.tokens.is_empty() {
            return String::new();
        }

        let entry_type = entry.log_entry_type();

        if entry_type == LogEntryType::LeaveMethod {
            self.indent_level = self.indent_level.saturating_sub(1);
        }

        let mut line = String::with_capacity(self.pattern.len() + 64);
        for token in &self.tokens {
            if self.indent && token.indents() {
                line.extend(std::iter::repeat_n(' ', INDENT_WIDTH * self.indent_level));
            }
            push_padded(&mut line, &token.expand(entry), token.width());
        }

        if entry_type == LogEntryType::EnterMethod {
            self.indent_level += 1;
        }

        line
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn set_pattern(&mut self, pattern: &str) {
        self.pattern = pattern.trim().to_string();
        self.tokens = tokenize(&self.pattern);
    }

    fn indent(&self) -> bool {
        self.indent
    }

    fn set_indent(&mut self, indent: bool) {
        self.indent = indent;
    }
}

/// Append `value`, padded with spaces to `|width|` characters
///
/// Positive widths right-align, negative widths left-align. Values already
/// wider than the field are never truncated.
fn push_padded(out: &mut String, value: &str, width: i32) {
    let target = width.unsigned_abs() as usize;
    let len = value.chars().count();
    let pad = target.saturating_sub(len);

    if width > 0 {
        out.extend(std::iter::repeat_n(' ', pad));
        out.push_str(value);
    } else {
        out.push_str(value);
        out.extend(std::iter::repeat_n(' ', pad));
    }
}
