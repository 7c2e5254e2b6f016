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

//! The dynamic object-side value representation.
//!
//! The mapping engine moves data between the JSON tree and Rust values whose
//! concrete types are chosen at runtime (polymorphic resolution, generic
//! substitution). [`Value`] is the closed dynamic layer that carries those
//! values: primitives and strings directly, sequences and maps structurally,
//! registered class instances behind [`Instance`], and raw trees untouched.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::error::Error;
use crate::json::Json;

/// A dynamically-typed value on the object side of the mapping.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    BigInt(BigInt),
    BigDecimal(BigDecimal),
    Char(char),
    Str(String),
    /// Homogeneous sequence.
    Seq(Vec<Value>),
    /// String-keyed map; serializes to an object node.
    Map(IndexMap<String, Value>),
    /// A JSON tree carried through unchanged.
    Tree(Json),
    /// An instance of a registered type.
    Object(Instance),
}

impl Value {
    /// Wraps an instance of a registered type.
    pub fn object<T: Any>(value: T) -> Value {
        Value::Object(Instance::new(value))
    }

    pub fn seq<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Seq(items.into_iter().collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::BigInt(_) => "bigint",
            Value::BigDecimal(_) => "bigdecimal",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
            Value::Tree(_) => "json",
            Value::Object(_) => "object",
        }
    }

    pub fn into_bool(self) -> Result<bool, Error> {
        match self {
            Value::Bool(b) => Ok(b),
            other => Err(extract_mismatch(&other, "bool")),
        }
    }

    pub fn into_i64(self) -> Result<i64, Error> {
        match self {
            Value::Int(v) => Ok(v),
            other => Err(extract_mismatch(&other, "int")),
        }
    }

    pub fn into_f64(self) -> Result<f64, Error> {
        match self {
            Value::Float(f) => Ok(f),
            Value::Int(v) => Ok(v as f64),
            other => Err(extract_mismatch(&other, "float")),
        }
    }

    pub fn into_bigint(self) -> Result<BigInt, Error> {
        match self {
            Value::BigInt(b) => Ok(b),
            Value::Int(v) => Ok(BigInt::from(v)),
            other => Err(extract_mismatch(&other, "bigint")),
        }
    }

    pub fn into_bigdecimal(self) -> Result<BigDecimal, Error> {
        match self {
            Value::BigDecimal(d) => Ok(d),
            Value::Int(v) => Ok(BigDecimal::from(v)),
            other => Err(extract_mismatch(&other, "bigdecimal")),
        }
    }

    pub fn into_char(self) -> Result<char, Error> {
        match self {
            Value::Char(c) => Ok(c),
            other => Err(extract_mismatch(&other, "char")),
        }
    }

    pub fn into_string(self) -> Result<String, Error> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(extract_mismatch(&other, "string")),
        }
    }

    pub fn into_seq(self) -> Result<Vec<Value>, Error> {
        match self {
            Value::Seq(items) => Ok(items),
            other => Err(extract_mismatch(&other, "sequence")),
        }
    }

    pub fn into_map(self) -> Result<IndexMap<String, Value>, Error> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(extract_mismatch(&other, "map")),
        }
    }

    pub fn into_tree(self) -> Result<Json, Error> {
        match self {
            Value::Tree(json) => Ok(json),
            other => Err(extract_mismatch(&other, "json")),
        }
    }

    /// Unwraps an instance of a registered type back into `T`.
    pub fn into_object<T: Any + Clone>(self) -> Result<T, Error> {
        match self {
            Value::Object(instance) => instance.downcast::<T>(),
            other => Err(extract_mismatch(&other, "object")),
        }
    }
}

fn extract_mismatch(actual: &Value, wanted: &str) -> Error {
    Error::deserialization(format!(
        "expected a {} value, got {}",
        wanted,
        actual.kind_name()
    ))
}

/// A shared, type-erased instance of a registered type.
#[derive(Clone)]
pub struct Instance {
    inner: Rc<dyn Any>,
    type_name: &'static str,
}

impl Instance {
    pub fn new<T: Any>(value: T) -> Instance {
        Instance {
            inner: Rc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn from_box(value: Box<dyn Any>, type_name: &'static str) -> Instance {
        Instance {
            inner: Rc::from(value),
            type_name,
        }
    }

    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        &*self.inner
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Takes the concrete value out, cloning when the instance is shared.
    pub fn downcast<T: Any + Clone>(self) -> Result<T, Error> {
        let type_name = self.type_name;
        match self.inner.downcast::<T>() {
            Ok(rc) => Ok(Rc::try_unwrap(rc).unwrap_or_else(|shared| (*shared).clone())),
            Err(_) => Err(Error::deserialization(format!(
                "instance of {} cannot be viewed as {}",
                type_name,
                std::any::type_name::<T>()
            ))),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance<{}>", self.type_name)
    }
}

/// Prepared positional arguments handed to a constructor, factory or setter.
///
/// Each slot has already been deserialized against the declared parameter
/// type, so the `take_*` extractors are plain unwraps with descriptive
/// errors, not conversions.
pub struct Args {
    slots: Vec<Option<Value>>,
}

impl Args {
    pub(crate) fn new(values: Vec<Value>) -> Args {
        Args {
            slots: values.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Takes the raw value at a position. Each position can be taken once.
    pub fn take(&mut self, index: usize) -> Result<Value, Error> {
        match self.slots.get_mut(index) {
            Some(slot) => slot.take().ok_or_else(|| {
                Error::deserialization(format!("argument {} was already taken", index))
            }),
            None => Err(Error::deserialization(format!(
                "argument index {} out of range for {} prepared arguments",
                index,
                self.slots.len()
            ))),
        }
    }

    pub fn take_bool(&mut self, index: usize) -> Result<bool, Error> {
        self.take(index)?.into_bool()
    }

    pub fn take_i32(&mut self, index: usize) -> Result<i32, Error> {
        Ok(self.take(index)?.into_i64()? as i32)
    }

    pub fn take_i64(&mut self, index: usize) -> Result<i64, Error> {
        self.take(index)?.into_i64()
    }

    pub fn take_f64(&mut self, index: usize) -> Result<f64, Error> {
        self.take(index)?.into_f64()
    }

    pub fn take_char(&mut self, index: usize) -> Result<char, Error> {
        self.take(index)?.into_char()
    }

    pub fn take_string(&mut self, index: usize) -> Result<String, Error> {
        self.take(index)?.into_string()
    }

    pub fn take_seq(&mut self, index: usize) -> Result<Vec<Value>, Error> {
        self.take(index)?.into_seq()
    }

    pub fn take_tree(&mut self, index: usize) -> Result<Json, Error> {
        self.take(index)?.into_tree()
    }

    pub fn take_object<T: Any + Clone>(&mut self, index: usize) -> Result<T, Error> {
        self.take(index)?.into_object::<T>()
    }

    /// Takes a slot that may legitimately hold null, as `None`.
    pub fn take_optional(&mut self, index: usize) -> Result<Option<Value>, Error> {
        let value = self.take(index)?;
        Ok(if value.is_null() { None } else { Some(value) })
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInt(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::BigDecimal(v)
    }
}

impl From<Json> for Value {
    fn from(v: Json) -> Self {
        Value::Tree(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
