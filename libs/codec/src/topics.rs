//! # Topic Path Codec - Pub/Sub Routing Boundary Format
//!
//! ## Purpose
//! Routing metadata travels in the transport topic string as
//! `<src>/<envelope-type>/to/<dst>/<message-type>[/<extra>...]`. Topics may
//! not contain `.`, so a literal dot in any segment is escaped to `-`;
//! decoding applies the inverse split and unescape.
//!
//! The escape map collapses `-` and `.` into one character: a segment that
//! contained a literal `-` decodes as `.`. That is the boundary format as
//! deployed; round-trip identity holds for segments free of `-` and `/`.
//!
//! Decoding is lenient: a short topic yields empty strings for missing
//! trailing fields, the literal `to` segment is positional and not
//! validated, and extra trailing segments pass through in order.

/// Routing fields carried by one topic string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicPath {
    pub src: String,
    pub envelope_type: String,
    pub dst: String,
    pub message_type: String,
    pub extra: Vec<String>,
}

impl TopicPath {
    pub fn new(
        src: impl Into<String>,
        envelope_type: impl Into<String>,
        dst: impl Into<String>,
        message_type: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            envelope_type: envelope_type.into(),
            dst: dst.into(),
            message_type: message_type.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        self.extra = extra.into_iter().collect();
        self
    }

    /// Render the topic string, escaping `.` in every segment.
    pub fn encode(&self) -> String {
        let mut segments = vec![
            escape(&self.src),
            escape(&self.envelope_type),
            "to".to_string(),
            escape(&self.dst),
            escape(&self.message_type),
        ];
        segments.extend(self.extra.iter().map(|segment| escape(segment)));
        segments.join("/")
    }

    /// Inverse of [`TopicPath::encode`]. Never fails; missing trailing
    /// segments decode as empty strings.
    pub fn decode(topic: &str) -> Self {
        let segments: Vec<&str> = topic.split('/').collect();
        let field = |index: usize| segments.get(index).map_or(String::new(), |s| unescape(s));
        Self {
            src: field(0),
            envelope_type: field(1),
            // segments[2] is the literal "to"
            dst: field(3),
            message_type: field(4),
            extra: segments
                .get(5..)
                .unwrap_or_default()
                .iter()
                .map(|segment| unescape(segment))
                .collect(),
        }
    }
}

fn escape(segment: &str) -> String {
    segment.replace('.', "-")
}

fn unescape(segment: &str) -> String {
    segment.replace('-', ".")
}
