// Minimal INI reader: `[section]` headers and `key=value` lines.
//
// Never fails. Lines that are blank, comments, malformed, or that appear
// before the first header are skipped. Header names lose one pair of quotes.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IniSection {
    pub name: String,
    fields: Vec<(String, String)>,
}

impl IniSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in first-seen order; a repeated key keeps its slot with the last value.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn set(&mut self, key: String, value: String) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn parse(text: &str) -> Self {
        let mut doc = IniDocument::default();
        let mut current: Option<usize> = None;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = section_header(line) {
                current = Some(doc.open_section(name));
                continue;
            }
            if let Some(idx) = current
                && let Some((key, value)) = parse_pair(line)
            {
                doc.sections[idx].set(key, value);
            }
        }
        doc
    }

    /// Reopening an existing name starts that section over.
    fn open_section(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => {
                self.sections[idx] = IniSection::new(name);
                idx
            }
            None => {
                self.sections.push(IniSection::new(name));
                self.sections.len() - 1
            }
        }
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &IniSection> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Renders headers and unquoted `key=value` lines.
    pub fn to_ini_string(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            let _ = writeln!(out, "[{}]", section.name);
            for (k, v) in section.fields() {
                let _ = writeln!(out, "{}={}", k, v);
            }
        }
        out
    }
}

/// `[name]` or `["name"]`; both spell the same section.
fn section_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    Some(unquote(inner.trim())).filter(|name| !name.is_empty())
}

/// Splits a `key=value` line on the first `=`, trims both sides and strips one
/// pair of matching surrounding quotes from the value. Empty keys are rejected.
pub fn parse_pair(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
