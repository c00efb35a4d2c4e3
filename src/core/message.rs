use std::fmt;

/// Escape a value for use inside a single-quoted service message attribute.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\'' => escaped.push_str("|'"),
            '|' => escaped.push_str("||"),
            '\n' => escaped.push_str("|n"),
            '\r' => escaped.push_str("|r"),
            '[' => escaped.push_str("|["),
            ']' => escaped.push_str("|]"),
            '\u{0085}' => escaped.push_str("|x"),
            '\u{2028}' => escaped.push_str("|l"),
            '\u{2029}' => escaped.push_str("|p"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A single `##teamcity[...]` line.
///
/// Attribute values are stored raw and escaped when the message is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMessage {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
}

impl ServiceMessage {
    pub fn new(name: &'static str) -> Self {
        Self { name, attributes: Vec::new() }
    }

    pub fn suite_started(name: &str) -> Self {
        Self::new("testSuiteStarted").attr("name", name)
    }

    pub fn suite_finished(name: &str) -> Self {
        Self::new("testSuiteFinished").attr("name", name)
    }

    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    /// Adds the attribute only when a value is present.
    pub fn optional_attr(self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }
}

impl fmt::Display for ServiceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "##teamcity[{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(f, " {}='{}'", key, escape(value))?;
        }
        f.write_str("]")
    }
}
