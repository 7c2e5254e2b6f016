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

//! # jsonbind Core
//!
//! This is the core implementation of the jsonbind mapping engine. It
//! converts between Rust values and a self-describing JSON tree under
//! declarative, externally supplied binding metadata.
//!
//! ## Architecture
//!
//! The core library is organized into several key modules:
//!
//! - **`json`**: the JSON tree value model
//! - **`parser`**: recursive-descent text parsing with positioned diagnostics
//! - **`format`**: configurable pretty-printing back to text
//! - **`schema`**: binding declarations, their registry, and compiled
//!   per-type descriptors
//! - **`serializer`**: object-to-tree conversion
//! - **`deserializer`**: tree-to-object conversion, with generic parameter
//!   substitution and polymorphic resolution
//! - **`types`**: concrete and declared type descriptions
//! - **`value`**: the dynamic object-side value representation
//! - **`error`**: error handling and result types
//!
//! ## Key Concepts
//!
//! Every mappable type registers a [`schema::TypeSpec`]: which members feed
//! which positions of the tree (named keys, numeric indices, or the whole
//! node), which constructor or factory rebuilds an instance, and — for
//! abstract types — a resolver that picks the concrete variant from the
//! tree shape alone. The registry compiles each type's declarations,
//! including everything inherited through its declared supertypes, into an
//! immutable descriptor exactly once.
//!
//! Deserialization targets are described by [`types::ResolvedType`], a
//! tagged description of a concrete type with every generic parameter
//! bound; the declared-type language [`types::TypeRef`] adds formal
//! parameters, which the engine substitutes lexically on its way down
//! through nested containers.
//!
//! ## Usage
//!
//! This crate is typically used through the higher-level `jsonbind` crate.
//! The central entry point is [`JsonBind`]:
//!
//! ```
//! use jsonbind_core::JsonBind;
//!
//! let binder = JsonBind::default();
//! let json = binder.parse("{\"a\": [1, 2]}").unwrap();
//! assert_eq!(json.get("a").unwrap().at(1), Some(&binder.parse("2").unwrap()));
//! ```

pub mod deserializer;
pub mod error;
pub mod format;
pub mod json;
mod jsonbind;
pub mod parser;
pub mod schema;
pub mod serializer;
pub mod types;
pub mod value;

pub use crate::error::Error;
pub use crate::format::{FormatOptions, IndentWidth};
pub use crate::json::{Json, JsonKind, JsonNumber};
pub use crate::jsonbind::JsonBind;
pub use crate::parser::parse;
pub use crate::schema::{Param, Position, SchemaRegistry, TypeSpec};
pub use crate::types::{ResolvedType, TypeKey, TypeRef};
pub use crate::value::{Args, Instance, Value};
