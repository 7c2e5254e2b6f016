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

//! Single-pass recursive-descent JSON parser.
//!
//! The parser walks a text buffer with a byte cursor and a line counter; the
//! line counter exists purely for diagnostics. Dispatch happens on the first
//! non-whitespace byte of each value. Numeric literals that overflow `i64`
//! or `f64` fall back to arbitrary-precision representations, so the grammar
//! accepted here is a superset of strict JSON numbers. After the root value
//! only trailing whitespace is allowed.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::error::Error;
use crate::json::{Json, JsonNumber};

/// Parses a string of JSON text into a [`Json`] tree.
pub fn parse(text: &str) -> Result<Json, Error> {
    let mut parser = Parser {
        src: text,
        bytes: text.as_bytes(),
        pos: 0,
        line: 1,
    };
    parser.skip_whitespace();
    let root = parser.value()?;
    parser.skip_whitespace();
    if parser.pos < parser.bytes.len() {
        return Err(parser.error("expecting end of input after the root value"));
    }
    Ok(root)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn error<S: Into<String>>(&self, message: S) -> Error {
        Error::parse(self.pos, self.line, message.into())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Parses one value. The cursor must sit on its first byte.
    fn value(&mut self) -> Result<Json, Error> {
        match self.peek() {
            Some(b'{') => self.object(),
            Some(b'[') => self.array(),
            Some(b'"') => Ok(Json::String(self.string()?)),
            Some(b't') => self.literal("true", Json::Boolean(true)),
            Some(b'f') => self.literal("false", Json::Boolean(false)),
            Some(b'n') => self.literal("null", Json::Null),
            Some(b) if b == b'-' || b.is_ascii_digit() => self.number(),
            Some(b) => Err(self.error(format!(
                "expecting '{{', '[', boolean, number, string or null, got '{}'",
                b as char
            ))),
            None => Err(self.error("expecting a value, got end of input")),
        }
    }

    fn object(&mut self) -> Result<Json, Error> {
        self.pos += 1; // opening brace
        self.skip_whitespace();
        // Immediately-empty form, before the general entry loop.
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Json::Object(IndexMap::new()));
        }
        let mut entries = IndexMap::new();
        loop {
            self.skip_whitespace();
            let key = self.string()?;
            self.skip_whitespace();
            match self.peek() {
                Some(b':') => self.pos += 1,
                Some(b) => {
                    return Err(self.error(format!("expecting ':', got '{}'", b as char)));
                }
                None => return Err(self.error("expecting ':', got end of input")),
            }
            self.skip_whitespace();
            let value = self.value()?;
            entries.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Json::Object(entries));
                }
                Some(b) => {
                    return Err(self.error(format!("expecting ',' or '}}', got '{}'", b as char)));
                }
                None => return Err(self.error("expecting ',' or '}', got end of input")),
            }
        }
    }

    fn array(&mut self) -> Result<Json, Error> {
        self.pos += 1; // opening bracket
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Json::Array(Vec::new()));
        }
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            items.push(self.value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Json::Array(items));
                }
                Some(b) => {
                    return Err(self.error(format!("expecting ',' or ']', got '{}'", b as char)));
                }
                None => return Err(self.error("expecting ',' or ']', got end of input")),
            }
        }
    }

    /// Reads a quoted string, unescaping as it goes. The cursor must sit on
    /// the opening quote.
    fn string(&mut self) -> Result<String, Error> {
        match self.peek() {
            Some(b'"') => {}
            Some(b) => {
                return Err(self.error(format!("expecting a string, got '{}'", b as char)));
            }
            None => return Err(self.error("expecting a string, got end of input")),
        }
        self.pos += 1;
        let mut out = String::new();
        let mut segment_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.error("missing closing '\"' for string")),
                Some(b'"') => {
                    out.push_str(&self.src[segment_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\n') | Some(b'\r') => {
                    return Err(self.error("raw newline inside string"));
                }
                Some(b'\\') => {
                    out.push_str(&self.src[segment_start..self.pos]);
                    self.pos += 1;
                    self.escape(&mut out)?;
                    segment_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Decodes one escape sequence; the cursor sits just past the backslash.
    fn escape(&mut self, out: &mut String) -> Result<(), Error> {
        let b = self
            .peek()
            .ok_or_else(|| self.error("unfinished escape sequence at end of input"))?;
        self.pos += 1;
        match b {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let first = self.hex_code_unit()?;
                let c = match first {
                    0xD800..=0xDBFF => {
                        // High surrogate: a low surrogate escape must follow.
                        if self.peek() != Some(b'\\') || self.bytes.get(self.pos + 1) != Some(&b'u')
                        {
                            return Err(self.error("unpaired surrogate in \\u escape"));
                        }
                        self.pos += 2;
                        let second = self.hex_code_unit()?;
                        if !(0xDC00..=0xDFFF).contains(&second) {
                            return Err(self.error("invalid low surrogate in \\u escape"));
                        }
                        let combined =
                            0x10000 + ((first as u32 - 0xD800) << 10) + (second as u32 - 0xDC00);
                        char::from_u32(combined)
                            .ok_or_else(|| self.error("invalid surrogate pair in \\u escape"))?
                    }
                    0xDC00..=0xDFFF => {
                        return Err(self.error("unpaired surrogate in \\u escape"));
                    }
                    code => char::from_u32(code as u32)
                        .ok_or_else(|| self.error("invalid \\u escape"))?,
                };
                out.push(c);
            }
            other => {
                return Err(self.error(format!(
                    "invalid escape sequence '\\{}'",
                    other as char
                )));
            }
        }
        Ok(())
    }

    /// Reads the four hex digits of a `\u` escape as a UTF-16 code unit.
    fn hex_code_unit(&mut self) -> Result<u16, Error> {
        let digits = self
            .src
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| self.error("expecting four hex digits after \\u"))?;
        let code = u16::from_str_radix(digits, 16).map_err(|_| {
            self.error(format!(
                "expecting four hex digits after \\u, got \"{}\"",
                digits
            ))
        })?;
        self.pos += 4;
        Ok(code)
    }

    fn literal(&mut self, expected: &'static str, value: Json) -> Result<Json, Error> {
        if self.src[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            Ok(value)
        } else {
            let got: String = self.src[self.pos..].chars().take(expected.len()).collect();
            Err(self.error(format!("expecting \"{}\", got \"{}\"", expected, got)))
        }
    }

    /// Parses a numeric literal: the maximal run of number characters, then
    /// an `i64`/`f64` parse with an arbitrary-precision fallback.
    fn number(&mut self) -> Result<Json, Error> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' | b'e' | b'E' | b'.' | b'+' | b'-' => self.pos += 1,
                _ => break,
            }
        }
        let literal = &self.src[start..self.pos];
        let number = if literal.contains(['.', 'e', 'E']) {
            match f64::from_str(literal) {
                Ok(f) if f.is_finite() => JsonNumber::Float(f),
                // Overflowed or failed the f64 parse: arbitrary precision.
                _ => BigDecimal::from_str(literal)
                    .map(JsonNumber::BigDecimal)
                    .map_err(|_| {
                        self.error(format!("expecting a number, got \"{}\"", literal))
                    })?,
            }
        } else {
            match i64::from_str(literal) {
                Ok(v) => JsonNumber::Int(v),
                Err(_) => BigInt::from_str(literal)
                    .map(JsonNumber::BigInt)
                    .map_err(|_| {
                        self.error(format!("expecting a number, got \"{}\"", literal))
                    })?,
            }
        };
        Ok(Json::Number(number))
    }
}
