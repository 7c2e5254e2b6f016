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

use std::any::Any;
use std::sync::Arc;

use crate::deserializer;
use crate::error::Error;
use crate::format::{self, FormatOptions};
use crate::json::Json;
use crate::parser;
use crate::schema::{SchemaRegistry, TypeSpec};
use crate::serializer;
use crate::types::{ResolvedType, TypeRef};
use crate::value::Value;

/// The main jsonbind instance.
///
/// `JsonBind` owns the schema registry and exposes the four public
/// operations of the engine: parsing, formatting, serialization and
/// deserialization. Registration happens up front through
/// [`TypeSpec`] builders; descriptors are then compiled lazily and cached
/// for the life of this instance.
///
/// # Examples
///
/// ```
/// use jsonbind_core::JsonBind;
/// use jsonbind_core::schema::TypeSpec;
/// use jsonbind_core::types::{ResolvedType, TypeRef};
/// use jsonbind_core::value::Value;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Circle {
///     radius: f64,
/// }
///
/// let mut binder = JsonBind::default();
/// binder
///     .register(
///         TypeSpec::<Circle>::object()
///             .key_member("radius", "radius", |c: &Circle| Value::from(c.radius))
///             .key_param("radius", TypeRef::F64)
///             .constructor(|mut args| {
///                 Ok(Circle {
///                     radius: args.take_f64(0)?,
///                 })
///             }),
///     )
///     .unwrap();
///
/// let json = binder.parse("{\"radius\": 2.0}").unwrap();
/// let value = binder.deserialize(&json, &ResolvedType::of::<Circle>()).unwrap();
/// let circle: Circle = value.into_object().unwrap();
/// assert_eq!(circle, Circle { radius: 2.0 });
/// ```
pub struct JsonBind {
    registry: SchemaRegistry,
}

impl Default for JsonBind {
    fn default() -> Self {
        JsonBind {
            registry: SchemaRegistry::new(),
        }
    }
}

impl JsonBind {
    /// Registers a type's binding declarations.
    pub fn register<T: Any>(&mut self, spec: TypeSpec<T>) -> Result<(), Error> {
        self.registry.register(spec)
    }

    /// Registers a unit-variant enumeration mapped to JSON strings.
    ///
    /// Serialization writes the declared variant name. Deserialization
    /// matches the incoming string against variant names after normalizing
    /// both sides: case-insensitive, with `_`, `-` and spaces stripped. An
    /// unmatched string is a deserialization error.
    pub fn register_enum<T>(&mut self, variants: &[(&str, T)]) -> Result<(), Error>
    where
        T: Any + Clone + PartialEq + Send + Sync,
    {
        let table: Arc<Vec<(String, T)>> = Arc::new(
            variants
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        );
        let names = Arc::clone(&table);
        let spec = TypeSpec::<T>::string()
            .entire_member("variant_name", move |value: &T| {
                names
                    .iter()
                    .find(|(_, candidate)| candidate == value)
                    .map(|(name, _)| Value::Str(name.clone()))
                    .unwrap_or(Value::Null)
            })
            .entire_param(TypeRef::Str)
            .constructor(move |mut args| {
                let raw = args.take_string(0)?;
                let wanted = normalize_variant(&raw);
                table
                    .iter()
                    .find(|(name, _)| *name == raw || normalize_variant(name) == wanted)
                    .map(|(_, value)| value.clone())
                    .ok_or_else(|| {
                        Error::deserialization(format!(
                            "no enum variant matches the JSON string \"{}\"",
                            raw
                        ))
                    })
            });
        self.register(spec)
    }

    /// Parses JSON text into a tree value.
    pub fn parse(&self, text: &str) -> Result<Json, Error> {
        parser::parse(text)
    }

    /// Renders a tree value as text.
    pub fn format(&self, json: &Json, options: &FormatOptions) -> String {
        format::format(json, options)
    }

    /// Converts a dynamic value into a tree value. Total: member-level
    /// failures degrade to null nodes instead of propagating.
    pub fn serialize(&self, value: &Value) -> Json {
        serializer::serialize(value, &self.registry)
    }

    /// Serializes a value and renders the resulting tree as text.
    pub fn to_text(&self, value: &Value, options: &FormatOptions) -> String {
        self.format(&self.serialize(value), options)
    }

    /// Converts a tree value into a dynamic value of the given concrete
    /// target type.
    pub fn deserialize(&self, json: &Json, target: &ResolvedType) -> Result<Value, Error> {
        deserializer::deserialize(json, target, &self.registry)
    }

    /// Parses JSON text and deserializes the resulting tree in one step.
    pub fn from_text(&self, text: &str, target: &ResolvedType) -> Result<Value, Error> {
        let json = self.parse(text)?;
        self.deserialize(&json, target)
    }
}

fn normalize_variant(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
