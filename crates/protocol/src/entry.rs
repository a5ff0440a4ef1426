//! Log entry packets
//!
//! The packet produced for every plain message, warning, error, exception and
//! method enter/leave. This is the only kind the text formatter renders.

use bytes::Bytes;

use crate::clock::ClockResolution;
use crate::error::ProtocolError;
use crate::level::Level;
use crate::packet::{PacketHeader, data_size, string_size};

/// Fixed cost of a log entry in size accounting
const HEADER_SIZE: usize = 48;

/// What a log entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum LogEntryType {
    Separator = 0,
    EnterMethod = 1,
    LeaveMethod = 2,
    ResetCallstack = 3,
    Message = 100,
    Warning = 101,
    Error = 102,
    InternalError = 103,
    Comment = 104,
    VariableValue = 105,
    Checkpoint = 106,
    Debug = 107,
    Verbose = 108,
    Fatal = 109,
    Conditional = 110,
    Assert = 111,
    Text = 200,
    Binary = 201,
    Graphic = 202,
    Source = 203,
    Object = 204,
    WebContent = 205,
    System = 206,
    MemoryStatistic = 207,
    DatabaseResult = 208,
    DatabaseStructure = 209,
}

impl LogEntryType {
    /// Convert to raw value
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Display name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Separator => "Separator",
            Self::EnterMethod => "EnterMethod",
            Self::LeaveMethod => "LeaveMethod",
            Self::ResetCallstack => "ResetCallstack",
            Self::Message => "Message",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::InternalError => "InternalError",
            Self::Comment => "Comment",
            Self::VariableValue => "VariableValue",
            Self::Checkpoint => "Checkpoint",
            Self::Debug => "Debug",
            Self::Verbose => "Verbose",
            Self::Fatal => "Fatal",
            Self::Conditional => "Conditional",
            Self::Assert => "Assert",
            Self::Text => "Text",
            Self::Binary => "Binary",
            Self::Graphic => "Graphic",
            Self::Source => "Source",
            Self::Object => "Object",
            Self::WebContent => "WebContent",
            Self::System => "System",
            Self::MemoryStatistic => "MemoryStatistic",
            Self::DatabaseResult => "DatabaseResult",
            Self::DatabaseStructure => "DatabaseStructure",
        }
    }
}

impl TryFrom<i32> for LogEntryType {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<Self, ProtocolError> {
        use LogEntryType as T;
        Ok(match value {
            0 => T::Separator,
            1 => T::EnterMethod,
            2 => T::LeaveMethod,
            3 => T::ResetCallstack,
            100 => T::Message,
            101 => T::Warning,
            102 => T::Error,
            103 => T::InternalError,
            104 => T::Comment,
            105 => T::VariableValue,
            106 => T::Checkpoint,
            107 => T::Debug,
            108 => T::Verbose,
            109 => T::Fatal,
            110 => T::Conditional,
            111 => T::Assert,
            200 => T::Text,
            201 => T::Binary,
            202 => T::Graphic,
            203 => T::Source,
            204 => T::Object,
            205 => T::WebContent,
            206 => T::System,
            207 => T::MemoryStatistic,
            208 => T::DatabaseResult,
            209 => T::DatabaseStructure,
            other => {
                return Err(ProtocolError::invalid_discriminant("LogEntryType", other));
            }
        })
    }
}

impl std::fmt::Display for LogEntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which viewer the receiving console uses to display an entry's data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ViewerId {
    None = -1,
    Title = 0,
    Data = 1,
    List = 2,
    ValueList = 3,
    Inspector = 4,
    Table = 5,
    Web = 100,
    Binary = 200,
    HtmlSource = 300,
    JavaScriptSource = 301,
    VbScriptSource = 302,
    PerlSource = 303,
    SqlSource = 304,
    IniSource = 305,
    PythonSource = 306,
    XmlSource = 307,
    Bitmap = 400,
    Jpeg = 401,
    Icon = 402,
    Metafile = 403,
}

impl ViewerId {
    /// Convert to raw value
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Display name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Title => "Title",
            Self::Data => "Data",
            Self::List => "List",
            Self::ValueList => "ValueList",
            Self::Inspector => "Inspector",
            Self::Table => "Table",
            Self::Web => "Web",
            Self::Binary => "Binary",
            Self::HtmlSource => "HtmlSource",
            Self::JavaScriptSource => "JavaScriptSource",
            Self::VbScriptSource => "VbScriptSource",
            Self::PerlSource => "PerlSource",
            Self::SqlSource => "SqlSource",
            Self::IniSource => "IniSource",
            Self::PythonSource => "PythonSource",
            Self::XmlSource => "XmlSource",
            Self::Bitmap => "Bitmap",
            Self::Jpeg => "Jpeg",
            Self::Icon => "Icon",
            Self::Metafile => "Metafile",
        }
    }
}

impl TryFrom<i32> for ViewerId {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<Self, ProtocolError> {
        Ok(match value {
            -1 => Self::None,
            0 => Self::Title,
            1 => Self::Data,
            2 => Self::List,
            3 => Self::ValueList,
            4 => Self::Inspector,
            5 => Self::Table,
            100 => Self::Web,
            200 => Self::Binary,
            300 => Self::HtmlSource,
            301 => Self::JavaScriptSource,
            302 => Self::VbScriptSource,
            303 => Self::PerlSource,
            304 => Self::SqlSource,
            305 => Self::IniSource,
            306 => Self::PythonSource,
            307 => Self::XmlSource,
            400 => Self::Bitmap,
            401 => Self::Jpeg,
            402 => Self::Icon,
            403 => Self::Metafile,
            other => return Err(ProtocolError::invalid_discriminant("ViewerId", other)),
        })
    }
}

impl std::fmt::Display for ViewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RGBA background color of a log entry in the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color from RGB components
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Packed little-endian RGBA value (red in the low byte)
    #[inline]
    pub const fn to_rgba_u32(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }
}

/// A log entry packet
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub(crate) header: PacketHeader,
    log_entry_type: LogEntryType,
    viewer_id: ViewerId,
    title: Option<String>,
    session_name: Option<String>,
    app_name: Option<String>,
    host_name: Option<String>,
    color: Option<Color>,
    data: Option<Bytes>,
}

impl LogEntry {
    /// Create an entry owned by the calling thread and process
    pub fn new(log_entry_type: LogEntryType, viewer_id: ViewerId) -> Self {
        Self {
            header: PacketHeader::default(),
            log_entry_type,
            viewer_id,
            title: None,
            session_name: None,
            app_name: None,
            host_name: None,
            color: None,
            data: None,
        }
    }

    /// Memory cost of this entry
    pub fn size(&self) -> usize {
        HEADER_SIZE
            + string_size(self.app_name())
            + string_size(self.session_name())
            + string_size(self.title())
            + string_size(self.host_name())
            + data_size(self.data())
    }

    pub fn header(&self) -> &PacketHeader {
        &self.header
    }

    pub fn log_entry_type(&self) -> LogEntryType {
        self.log_entry_type
    }

    pub fn set_log_entry_type(&mut self, log_entry_type: LogEntryType) {
        self.log_entry_type = log_entry_type;
    }

    /// Set the entry type from a raw value
    ///
    /// # Errors
    ///
    /// Returns `InvalidDiscriminant` if `value` names no entry type; the
    /// entry is left unchanged.
    pub fn set_log_entry_type_raw(&mut self, value: i32) -> Result<(), ProtocolError> {
        self.log_entry_type = LogEntryType::try_from(value)?;
        Ok(())
    }

    pub fn viewer_id(&self) -> ViewerId {
        self.viewer_id
    }

    pub fn set_viewer_id(&mut self, viewer_id: ViewerId) {
        self.viewer_id = viewer_id;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn session_name(&self) -> Option<&str> {
        self.session_name.as_deref()
    }

    pub fn set_session_name(&mut self, name: impl Into<String>) {
        self.session_name = Some(name.into());
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    pub fn set_app_name(&mut self, name: impl Into<String>) {
        self.app_name = Some(name.into());
    }

    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    pub fn set_host_name(&mut self, name: impl Into<String>) {
        self.host_name = Some(name.into());
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn set_data(&mut self, data: impl Into<Bytes>) {
        self.data = Some(data.into());
    }

    pub fn level(&self) -> Level {
        self.header.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.header.level = level;
    }

    pub fn timestamp(&self) -> i64 {
        self.header.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.header.timestamp = timestamp;
    }

    pub fn thread_id(&self) -> i32 {
        self.header.thread_id
    }

    pub fn set_thread_id(&mut self, thread_id: i32) {
        self.header.thread_id = thread_id;
    }

    pub fn process_id(&self) -> i32 {
        self.header.process_id
    }

    pub fn set_process_id(&mut self, process_id: i32) {
        self.header.process_id = process_id;
    }
}

/// Builder for constructing a [`LogEntry`]
///
/// # Example
///
/// ```
/// use sift_protocol::{Level, LogEntryBuilder, LogEntryType, ViewerId};
///
/// let entry = LogEntryBuilder::new()
///     .log_entry_type(LogEntryType::Warning)
///     .viewer_id(ViewerId::Title)
///     .level(Level::Warning)
///     .title("disk almost full")
///     .timestamp_now()
///     .build()
///     .unwrap();
/// assert_eq!(entry.title(), Some("disk almost full"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogEntryBuilder {
    log_entry_type: Option<LogEntryType>,
    viewer_id: Option<ViewerId>,
    level: Level,
    timestamp: i64,
    resolution: ClockResolution,
    stamp_now: bool,
    title: Option<String>,
    session_name: Option<String>,
    app_name: Option<String>,
    host_name: Option<String>,
    color: Option<Color>,
    data: Option<Bytes>,
}

impl LogEntryBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn log_entry_type(mut self, log_entry_type: LogEntryType) -> Self {
        self.log_entry_type = Some(log_entry_type);
        self
    }

    #[inline]
    #[must_use]
    pub fn viewer_id(mut self, viewer_id: ViewerId) -> Self {
        self.viewer_id = Some(viewer_id);
        self
    }

    #[inline]
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the timestamp (microseconds since the Unix epoch)
    #[inline]
    #[must_use]
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self.stamp_now = false;
        self
    }

    /// Stamp the entry with the current time when built
    #[inline]
    #[must_use]
    pub fn timestamp_now(mut self) -> Self {
        self.stamp_now = true;
        self
    }

    /// Clock resolution used by [`timestamp_now`](Self::timestamp_now)
    #[inline]
    #[must_use]
    pub fn resolution(mut self, resolution: ClockResolution) -> Self {
        self.resolution = resolution;
        self
    }

    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn host_name(mut self, name: impl Into<String>) -> Self {
        self.host_name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    #[must_use]
    pub fn data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Build the entry
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if the entry type or viewer id was never set.
    pub fn build(self) -> Result<LogEntry, ProtocolError> {
        let log_entry_type = self
            .log_entry_type
            .ok_or(ProtocolError::missing_field("log_entry_type"))?;
        let viewer_id = self
            .viewer_id
            .ok_or(ProtocolError::missing_field("viewer_id"))?;

        let header = if self.stamp_now {
            PacketHeader::now(self.level, self.resolution)
        } else {
            PacketHeader {
                level: self.level,
                timestamp: self.timestamp,
                ..PacketHeader::default()
            }
        };

        Ok(LogEntry {
            header,
            log_entry_type,
            viewer_id,
            title: self.title,
            session_name: self.session_name,
            app_name: self.app_name,
            host_name: self.host_name,
            color: self.color,
            data: self.data,
        })
    }
}
