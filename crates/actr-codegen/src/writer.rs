//! Line-oriented text sink for generated scripts.
//!
//! pyactr chunk strings are whitespace-separated `key value` pairs; we
//! write them as `<tabs>key<TAB>value`, one per line.

/// Ordered key/value entries. Duplicate keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueList {
    entries: Vec<(String, String)>,
}

impl KeyValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates the generated script.
///
/// One writer is used for exactly one generation pass.
#[derive(Debug, Default)]
pub struct ScriptWriter {
    buf: String,
}

impl ScriptWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` followed by a newline.
    pub fn writeln(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    /// Write `text` as is.
    pub fn write(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write each entry on its own line, indented by `tabs` tab characters.
    pub fn tab_write(&mut self, tabs: usize, items: &KeyValueList) {
        for (key, value) in items.entries() {
            self.indent(tabs);
            self.buf.push_str(key);
            self.buf.push('\t');
            self.buf.push_str(value);
            self.buf.push('\n');
        }
    }

    fn indent(&mut self, tabs: usize) {
        for _ in 0..tabs {
            self.buf.push('\t');
        }
    }

    pub fn contents(&self) -> &str {
        &self.buf
    }

    pub fn into_contents(self) -> String {
        self.buf
    }
}
