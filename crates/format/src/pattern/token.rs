//! Pattern tokens
//!
//! A pattern is split into literal runs and `%variable%` tokens. A variable
//! may carry a width (`%level,8%`, negative to left-align) and options
//! (`%timestamp{%H:%M}%`). Anything that does not name a known variable is
//! rendered literally.

use std::borrow::Cow;
use std::fmt::Write as FmtWrite;

use chrono::DateTime;
use chrono::format::{Item, StrftimeItems};
use sift_protocol::LogEntry;

/// Timestamp format used when no (valid) options are given
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Log entry field a variable token expands to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Variable {
    AppName,
    Session,
    HostName,
    Title,
    Timestamp,
    Level,
    Color,
    LogEntryType,
    ViewerId,
    Thread,
    Process,
}

impl Variable {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "%appname%" => Some(Self::AppName),
            "%session%" => Some(Self::Session),
            "%hostname%" => Some(Self::HostName),
            "%title%" => Some(Self::Title),
            "%timestamp%" => Some(Self::Timestamp),
            "%level%" => Some(Self::Level),
            "%color%" => Some(Self::Color),
            "%logentrytype%" => Some(Self::LogEntryType),
            "%viewerid%" => Some(Self::ViewerId),
            "%thread%" => Some(Self::Thread),
            "%process%" => Some(Self::Process),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Variable {
        variable: Variable,
        options: String,
        width: i32,
    },
}

impl Token {
    /// Classify one raw token produced by [`tokenize`]
    pub(crate) fn parse(raw: &str) -> Self {
        if raw.len() <= 2 || !raw.starts_with('%') || !raw.ends_with('%') {
            return Self::Literal(raw.to_string());
        }

        let mut name = raw.to_string();
        let mut options = String::new();

        // %name{options}%
        if name.as_bytes()[name.len() - 2] == b'}'
            && let Some(open) = name.find('{')
            && open < name.len() - 2
        {
            options = name[open + 1..name.len() - 2].to_string();
            name = format!("{}%", &name[..open]);
        }

        // %name,width%
        let mut width = 0;
        if let Some(comma) = name.find(',') {
            width = parse_width(&name[comma + 1..name.len() - 1]);
            name = format!("{}%", &name[..comma]);
        }

        match Variable::lookup(&name.to_ascii_lowercase()) {
            Some(variable) => Self::Variable {
                variable,
                options,
                width,
            },
            None => Self::Literal(raw.to_string()),
        }
    }

    /// Whether indentation is applied in front of this token
    #[inline]
    pub(crate) fn indents(&self) -> bool {
        matches!(
            self,
            Self::Variable {
                variable: Variable::Title,
                ..
            }
        )
    }

    #[inline]
    pub(crate) fn width(&self) -> i32 {
        match self {
            Self::Literal(_) => 0,
            Self::Variable { width, .. } => *width,
        }
    }

    /// Expand this token against a log entry
    pub(crate) fn expand<'a>(&'a self, entry: &'a LogEntry) -> Cow<'a, str> {
        let (variable, options) = match self {
            Self::Literal(text) => return Cow::Borrowed(text),
            Self::Variable {
                variable, options, ..
            } => (*variable, options.as_str()),
        };

        match variable {
            Variable::AppName => Cow::Borrowed(entry.app_name().unwrap_or_default()),
            Variable::Session => Cow::Borrowed(entry.session_name().unwrap_or_default()),
            Variable::HostName => Cow::Borrowed(entry.host_name().unwrap_or_default()),
            Variable::Title => Cow::Borrowed(entry.title().unwrap_or_default()),
            Variable::Timestamp => Cow::Owned(format_timestamp(entry.timestamp(), options)),
            Variable::Level => Cow::Borrowed(entry.level().as_str()),
            Variable::Color => Cow::Owned(format_color(entry)),
            Variable::LogEntryType => Cow::Borrowed(entry.log_entry_type().as_str()),
            Variable::ViewerId => Cow::Borrowed(entry.viewer_id().as_str()),
            Variable::Thread => Cow::Owned(entry.thread_id().to_string()),
            Variable::Process => Cow::Owned(entry.process_id().to_string()),
        }
    }
}

/// Split a pattern into raw literal and variable tokens
///
/// Inside a variable, a `%` between braces belongs to the options, so
/// `%timestamp{%H:%M}%` is a single token.
pub(crate) fn tokenize(pattern: &str) -> Vec<Token> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;

    while start < bytes.len() {
        let is_variable = bytes[start] == b'%';
        let mut pos = if is_variable { start + 1 } else { start };
        let mut in_options = false;

        while pos < bytes.len() {
            match bytes[pos] {
                b'{' if is_variable => in_options = true,
                b'}' if is_variable => in_options = false,
                b'%' if !in_options => {
                    if is_variable {
                        pos += 1;
                    }
                    break;
                }
                _ => {}
            }
            pos += 1;
        }

        tokens.push(Token::parse(&pattern[start..pos]));
        start = pos;
    }

    tokens
}

fn parse_width(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

/// Render a microsecond timestamp in UTC
///
/// Host local time is never consulted, so output is identical across hosts.
/// Falls back to [`DEFAULT_TIMESTAMP_FORMAT`] when `options` is empty or not
/// a valid strftime string.
fn format_timestamp(micros: i64, options: &str) -> String {
    let Some(time) = DateTime::from_timestamp_micros(micros) else {
        return String::new();
    };

    let format = if options.is_empty()
        || StrftimeItems::new(options).any(|item| matches!(item, Item::Error))
    {
        DEFAULT_TIMESTAMP_FORMAT
    } else {
        options
    };

    let mut out = String::with_capacity(32);
    let _ = write!(out, "{}", time.format(format));
    out
}

/// Render a color as `0x` followed by two hex digits per RGB channel,
/// low nibble first, or `<default>` when unset
fn format_color(entry: &LogEntry) -> String {
    let Some(color) = entry.color() else {
        return "<default>".to_string();
    };

    let mut out = String::with_capacity(8);
    out.push_str("0x");
    for channel in [color.r, color.g, color.b] {
        out.push(HEX_DIGITS[usize::from(channel & 0xf)] as char);
        out.push(HEX_DIGITS[usize::from(channel >> 4)] as char);
    }
    out
}
