//! # Formatter
//!
//! Prints YAML documents according to the resolved [`StyleOptions`].
//! The destination path picks the output language; only YAML is supported.

use crate::error::{Result, ScaffoldError};
use crate::services::style::StyleOptions;
use serde_yaml::{Mapping, Value};
use std::path::Path;

const YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Formats `document` as text for the file at `destination`.
///
/// # Errors
/// Returns [`ScaffoldError::UnsupportedFile`] if the destination extension has
/// no formatter.
pub fn format(document: &Value, destination: &Path, options: &StyleOptions) -> Result<String> {
    let is_yaml = destination
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext));

    if !is_yaml {
        return Err(ScaffoldError::UnsupportedFile { path: destination.to_path_buf() });
    }

    Ok(YamlPrinter::new(options).print(document))
}

struct YamlPrinter<'a> {
    options: &'a StyleOptions,
    out: String,
}

impl<'a> YamlPrinter<'a> {
    const fn new(options: &'a StyleOptions) -> Self {
        Self { options, out: String::new() }
    }

    fn print(mut self, document: &Value) -> String {
        match document {
            Value::Mapping(map) if !map.is_empty() => self.mapping(map, 0, false),
            Value::Sequence(seq) if !seq.is_empty() => self.sequence(seq, 0, false),
            Value::Tagged(tagged) if is_block(&tagged.value) => {
                self.out.push_str(&tagged.tag.to_string());
                self.newline();
                self.block(&tagged.value, 0, false);
            },
            other => {
                let flow = self.flow(other);
                self.out.push_str(&flow);
                self.newline();
            },
        }
        self.out
    }

    fn newline(&mut self) {
        self.out.push_str(self.options.end_of_line.as_str());
    }

    fn indent(&mut self, width: usize) {
        self.out.extend(std::iter::repeat_n(' ', width));
    }

    /// Writes a non-empty block collection. With `inline`, the first line
    /// continues the current one (used after a sequence dash).
    fn block(&mut self, value: &Value, indent: usize, inline: bool) {
        match value {
            Value::Mapping(map) => self.mapping(map, indent, inline),
            Value::Sequence(seq) => self.sequence(seq, indent, inline),
            _ => {},
        }
    }

    fn mapping(&mut self, map: &Mapping, indent: usize, inline: bool) {
        for (i, (key, value)) in map.iter().enumerate() {
            if !(inline && i == 0) {
                self.indent(indent);
            }
            let key = self.key(key);
            self.out.push_str(&key);
            self.out.push(':');
            self.after_key(value, indent);
        }
    }

    fn after_key(&mut self, value: &Value, indent: usize) {
        let nested = indent + self.options.tab_width;
        match value {
            Value::Tagged(tagged) if is_block(&tagged.value) => {
                self.out.push(' ');
                self.out.push_str(&tagged.tag.to_string());
                self.newline();
                self.block(&tagged.value, nested, false);
            },
            v if is_block(v) => {
                self.newline();
                self.block(v, nested, false);
            },
            v => {
                self.out.push(' ');
                let flow = self.flow(v);
                self.out.push_str(&flow);
                self.newline();
            },
        }
    }

    fn sequence(&mut self, seq: &[Value], indent: usize, inline: bool) {
        for (i, item) in seq.iter().enumerate() {
            if !(inline && i == 0) {
                self.indent(indent);
            }
            self.out.push_str("- ");
            match item {
                Value::Tagged(tagged) if is_block(&tagged.value) => {
                    self.out.push_str(&tagged.tag.to_string());
                    self.newline();
                    self.block(&tagged.value, indent + 2, false);
                },
                v if is_block(v) => self.block(v, indent + 2, true),
                v => {
                    let flow = self.flow(v);
                    self.out.push_str(&flow);
                    self.newline();
                },
            }
        }
    }

    fn key(&self, key: &Value) -> String {
        match key {
            Value::String(s) => self.string(s, true),
            other => self.flow(other),
        }
    }

    /// Renders a value on a single line.
    fn flow(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => self.string(s, false),
            Value::Sequence(seq) if seq.is_empty() => "[]".to_owned(),
            Value::Sequence(seq) => {
                let items: Vec<String> = seq.iter().map(|v| self.flow_item(v)).collect();
                format!("[{}]", items.join(", "))
            },
            Value::Mapping(map) if map.is_empty() => "{}".to_owned(),
            Value::Mapping(map) => {
                let entries: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", self.flow_item(k), self.flow_item(v)))
                    .collect();
                if self.options.bracket_spacing {
                    format!("{{ {} }}", entries.join(", "))
                } else {
                    format!("{{{}}}", entries.join(", "))
                }
            },
            Value::Tagged(tagged) => format!("{} {}", tagged.tag, self.flow(&tagged.value)),
        }
    }

    fn flow_item(&self, value: &Value) -> String {
        match value {
            Value::String(s) => self.string(s, true),
            Value::Tagged(tagged) => format!("{} {}", tagged.tag, self.flow_item(&tagged.value)),
            other => self.flow(other),
        }
    }

    fn string(&self, s: &str, in_flow: bool) -> String {
        if is_plain_safe(s, in_flow) {
            s.to_owned()
        } else {
            quote(s, self.options.single_quote)
        }
    }
}

fn is_block(value: &Value) -> bool {
    match value {
        Value::Mapping(map) => !map.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        _ => false,
    }
}

/// Whether `s` can be written as a plain scalar and read back unchanged.
fn is_plain_safe(s: &str, in_flow: bool) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };

    if s.trim() != s || s.chars().any(needs_escape) {
        return false;
    }

    if matches!(
        first,
        '-' | '?' | ':' | ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"'
            | '%' | '@' | '`'
    ) {
        return false;
    }

    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return false;
    }

    if in_flow && s.contains([',', '[', ']', '{', '}']) {
        return false;
    }

    // Rejects strings that would resolve to another type (`true`, `null`, `1.5`, ...).
    matches!(serde_yaml::from_str::<Value>(s), Ok(Value::String(ref parsed)) if parsed == s)
}

fn quote(s: &str, prefer_single: bool) -> String {
    let singles = s.matches('\'').count();
    let doubles = s.matches('"').count();
    let needs_escapes = s.chars().any(needs_escape);

    let use_single =
        !needs_escapes && if prefer_single { singles <= doubles } else { doubles > singles };

    if use_single { format!("'{}'", s.replace('\'', "''")) } else { double_quote(s) }
}

/// Characters a YAML reader would treat as line breaks or reject outright.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{FEFF}' | '\u{FFFE}' | '\u{FFFF}')
}

fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            '\u{FEFF}' => out.push_str("\\uFEFF"),
            '\u{FFFE}' => out.push_str("\\uFFFE"),
            '\u{FFFF}' => out.push_str("\\uFFFF"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
