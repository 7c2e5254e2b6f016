// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Configurable pretty-printing of [`Json`] values back to text.
//!
//! Formatting is purely structural recursion over the tree and has no
//! dependency on the mapping engine. Object keys are emitted in
//! lexicographic order regardless of insertion order, so the output of one
//! document is stable across runs.

use crate::json::Json;

/// Indent step width. The formatter only supports this enumerated set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IndentWidth {
    Zero,
    One,
    Two,
    Three,
    #[default]
    Four,
    Six,
}

impl IndentWidth {
    pub fn width(self) -> usize {
        match self {
            IndentWidth::Zero => 0,
            IndentWidth::One => 1,
            IndentWidth::Two => 2,
            IndentWidth::Three => 3,
            IndentWidth::Four => 4,
            IndentWidth::Six => 6,
        }
    }
}

/// Formatting options for [`format`].
///
/// The default configuration is a four-space indent with array and object
/// items each on their own line, and neither container opening on a new
/// line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub indent: IndentWidth,
    /// Place each array item on its own line.
    pub array_item_per_line: bool,
    /// Start a nested array on a new line. Never applies to the root value.
    pub array_opens_on_new_line: bool,
    /// Place each object entry on its own line.
    pub object_item_per_line: bool,
    /// Start a nested object on a new line. Never applies to the root value.
    pub object_opens_on_new_line: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent: IndentWidth::Four,
            array_item_per_line: true,
            array_opens_on_new_line: false,
            object_item_per_line: true,
            object_opens_on_new_line: false,
        }
    }
}

impl FormatOptions {
    /// Everything on one line with no indentation. This is the canonical
    /// compact text form used by `Json`'s `Display` impl and by the
    /// deserializer's textual fallback.
    pub fn compact() -> FormatOptions {
        FormatOptions {
            indent: IndentWidth::Zero,
            array_item_per_line: false,
            array_opens_on_new_line: false,
            object_item_per_line: false,
            object_opens_on_new_line: false,
        }
    }
}

/// Renders a [`Json`] value as text under the given options.
pub fn format(json: &Json, options: &FormatOptions) -> String {
    let mut out = String::new();
    write_value(&mut out, json, 0, options);
    out
}

fn indent(out: &mut String, level: usize, options: &FormatOptions) {
    for _ in 0..level * options.indent.width() {
        out.push(' ');
    }
}

fn write_value(out: &mut String, json: &Json, level: usize, options: &FormatOptions) {
    match json {
        Json::Null => out.push_str("null"),
        Json::Boolean(true) => out.push_str("true"),
        Json::Boolean(false) => out.push_str("false"),
        Json::Number(n) => out.push_str(&n.to_string()),
        Json::String(s) => write_string(out, s),
        Json::Array(items) => write_array(out, items, level, options),
        Json::Object(map) => write_object(out, map, level, options),
    }
}

fn write_array(out: &mut String, items: &[Json], level: usize, options: &FormatOptions) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    // The root value never moves to a new line, no matter the options.
    if options.array_opens_on_new_line && level != 0 {
        out.push('\n');
        indent(out, level, options);
    }
    out.push('[');
    let per_line = options.array_item_per_line;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if per_line {
            out.push('\n');
            indent(out, level + 1, options);
        } else if i > 0 {
            out.push(' ');
        }
        write_value(out, item, level + 1, options);
    }
    if per_line {
        out.push('\n');
        indent(out, level, options);
    }
    out.push(']');
}

fn write_object(
    out: &mut String,
    map: &indexmap::IndexMap<String, Json>,
    level: usize,
    options: &FormatOptions,
) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    if options.object_opens_on_new_line && level != 0 {
        out.push('\n');
        indent(out, level, options);
    }
    out.push('{');
    let per_line = options.object_item_per_line;
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if per_line {
            out.push('\n');
            indent(out, level + 1, options);
        } else if i > 0 {
            out.push(' ');
        }
        write_string(out, key);
        out.push_str(": ");
        write_value(out, &map[key.as_str()], level + 1, options);
    }
    if per_line {
        out.push('\n');
        indent(out, level, options);
    }
    out.push('}');
}

/// Writes a quoted, escaped JSON string literal.
fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
