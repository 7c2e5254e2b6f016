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

//! The JSON tree value model.
//!
//! [`Json`] is the tagged-union representation of a JSON document that every
//! other component of this crate operates on. Values are immutable once
//! constructed: the API hands out shared views only. Object nodes keep their
//! insertion order for output fidelity, but two objects compare equal
//! regardless of key order; array order always matters.

use std::fmt;

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::error::Error;
use crate::format::{self, FormatOptions};

/// The shape of a [`Json`] value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A JSON numeric literal, preserving the representation the parser (or
/// constructor) actually used. `Int(1)` and `Float(1.0)` are distinct values
/// and do not compare equal.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonNumber {
    Int(i64),
    Float(f64),
    /// Integer literal that does not fit an `i64`.
    BigInt(BigInt),
    /// Decimal literal that overflows an `f64`.
    BigDecimal(BigDecimal),
}

impl JsonNumber {
    /// Converts to `i64`, truncating a fractional part the way the narrowing
    /// deserializer does. Returns `None` when an arbitrary-precision value
    /// cannot be represented.
    pub fn to_i64(&self) -> Option<i64> {
        use num_traits::ToPrimitive;
        match self {
            JsonNumber::Int(v) => Some(*v),
            JsonNumber::Float(f) if f.is_finite() => Some(*f as i64),
            JsonNumber::Float(_) => None,
            JsonNumber::BigInt(b) => b.to_i64(),
            JsonNumber::BigDecimal(d) => d.to_i64(),
        }
    }

    /// Converts to `f64`, possibly losing precision.
    pub fn to_f64(&self) -> Option<f64> {
        use num_traits::ToPrimitive;
        match self {
            JsonNumber::Int(v) => Some(*v as f64),
            JsonNumber::Float(f) => Some(*f),
            JsonNumber::BigInt(b) => b.to_f64(),
            JsonNumber::BigDecimal(d) => d.to_f64(),
        }
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Int(v) => write!(f, "{}", v),
            JsonNumber::Float(x) => {
                if !x.is_finite() {
                    // Non-finite floats have no JSON literal. They cannot come
                    // from the parser, only from user accessors.
                    return f.write_str("null");
                }
                let s = x.to_string();
                if s.contains('.') || s.contains('e') || s.contains('E') {
                    f.write_str(&s)
                } else {
                    // Keep the floating representation observable so a
                    // format/parse round trip stays structurally equal.
                    write!(f, "{}.0", s)
                }
            }
            JsonNumber::BigInt(b) => write!(f, "{}", b),
            JsonNumber::BigDecimal(d) => write!(f, "{}", d),
        }
    }
}

impl From<i64> for JsonNumber {
    fn from(v: i64) -> Self {
        JsonNumber::Int(v)
    }
}

impl From<f64> for JsonNumber {
    fn from(v: f64) -> Self {
        JsonNumber::Float(v)
    }
}

/// A JSON document node.
#[derive(Clone, Debug, PartialEq)]
pub enum Json {
    Null,
    Boolean(bool),
    Number(JsonNumber),
    String(String),
    Array(Vec<Json>),
    Object(IndexMap<String, Json>),
}

impl Json {
    /// Returns which [`JsonKind`] this value is.
    pub fn kind(&self) -> JsonKind {
        match self {
            Json::Null => JsonKind::Null,
            Json::Boolean(_) => JsonKind::Boolean,
            Json::Number(_) => JsonKind::Number,
            Json::String(_) => JsonKind::String,
            Json::Array(_) => JsonKind::Array,
            Json::Object(_) => JsonKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Json::Null)
    }

    /// Views this value as an object, failing with a conversion error when
    /// the variant does not match.
    pub fn as_object(&self) -> Result<&IndexMap<String, Json>, Error> {
        match self {
            Json::Object(map) => Ok(map),
            other => Err(conversion_mismatch(other.kind(), JsonKind::Object)),
        }
    }

    /// Views this value as an array.
    pub fn as_array(&self) -> Result<&[Json], Error> {
        match self {
            Json::Array(items) => Ok(items),
            other => Err(conversion_mismatch(other.kind(), JsonKind::Array)),
        }
    }

    /// Views this value as a boolean.
    pub fn as_bool(&self) -> Result<bool, Error> {
        match self {
            Json::Boolean(b) => Ok(*b),
            other => Err(conversion_mismatch(other.kind(), JsonKind::Boolean)),
        }
    }

    /// Views this value as a number.
    pub fn as_number(&self) -> Result<&JsonNumber, Error> {
        match self {
            Json::Number(n) => Ok(n),
            other => Err(conversion_mismatch(other.kind(), JsonKind::Number)),
        }
    }

    /// Views this value as a string.
    pub fn as_str(&self) -> Result<&str, Error> {
        match self {
            Json::String(s) => Ok(s),
            other => Err(conversion_mismatch(other.kind(), JsonKind::String)),
        }
    }

    /// Looks up a key in an object node. Returns `None` both for a missing
    /// key and for a non-object node.
    pub fn get(&self, key: &str) -> Option<&Json> {
        match self {
            Json::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Looks up an index in an array node. Returns `None` both for an
    /// out-of-bounds index and for a non-array node.
    pub fn at(&self, index: usize) -> Option<&Json> {
        match self {
            Json::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Builds an object node from key-value pairs. Later duplicates of a key
    /// replace earlier ones.
    pub fn object<K, I>(entries: I) -> Json
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Json)>,
    {
        Json::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect::<IndexMap<String, Json>>(),
        )
    }

    /// Builds an array node from items.
    pub fn array<I: IntoIterator<Item = Json>>(items: I) -> Json {
        Json::Array(items.into_iter().collect())
    }
}

fn conversion_mismatch(actual: JsonKind, wanted: JsonKind) -> Error {
    Error::conversion(format!(
        "cannot view JSON {} as JSON {}",
        actual, wanted
    ))
}

impl fmt::Display for Json {
    /// The canonical compact text form of this value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format(self, &FormatOptions::compact()))
    }
}

impl From<bool> for Json {
    fn from(v: bool) -> Self {
        Json::Boolean(v)
    }
}

impl From<i64> for Json {
    fn from(v: i64) -> Self {
        Json::Number(JsonNumber::Int(v))
    }
}

impl From<f64> for Json {
    fn from(v: f64) -> Self {
        Json::Number(JsonNumber::Float(v))
    }
}

impl From<JsonNumber> for Json {
    fn from(n: JsonNumber) -> Self {
        Json::Number(n)
    }
}

impl From<&str> for Json {
    fn from(s: &str) -> Self {
        Json::String(s.to_string())
    }
}

impl From<String> for Json {
    fn from(s: String) -> Self {
        Json::String(s)
    }
}

impl From<Vec<Json>> for Json {
    fn from(items: Vec<Json>) -> Self {
        Json::Array(items)
    }
}

impl From<IndexMap<String, Json>> for Json {
    fn from(map: IndexMap<String, Json>) -> Self {
        Json::Object(map)
    }
}
