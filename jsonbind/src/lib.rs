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

//! # jsonbind
//!
//! jsonbind converts between Rust values and a self-describing JSON tree
//! under a declarative mapping: each type registers which of its members
//! feed which positions of the tree, which constructor rebuilds an
//! instance, and — for open types — a resolver that picks the concrete
//! variant from the tree shape alone.
//!
//! ## Key Features
//!
//! - **Tree value model**: a tagged JSON document representation with
//!   order-preserving objects and arbitrary-precision numbers
//! - **Positioned diagnostics**: the parser reports byte offset and line on
//!   every syntax error
//! - **Declarative bindings**: mapping metadata is registered up front and
//!   compiled once per type, including everything inherited through
//!   declared supertypes
//! - **Polymorphic dispatch**: abstract types resolve their concrete
//!   variant from the tree itself, with no type tags in the document
//! - **Generic substitution**: parameterized containers deserialize their
//!   elements against fully resolved concrete types
//!
//! ## Example
//!
//! ```
//! use jsonbind::{JsonBind, ResolvedType, TypeRef, TypeSpec, Value};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! let mut binder = JsonBind::default();
//! binder
//!     .register(
//!         TypeSpec::<User>::object()
//!             .key_member("name", "name", |u: &User| Value::from(u.name.clone()))
//!             .key_member("age", "age", |u: &User| Value::from(u.age))
//!             .key_param("name", TypeRef::Str)
//!             .key_param("age", TypeRef::I64)
//!             .constructor(|mut args| {
//!                 Ok(User {
//!                     name: args.take_string(0)?,
//!                     age: args.take_i64(1)?,
//!                 })
//!             }),
//!     )
//!     .unwrap();
//!
//! let user = User { name: "Alice".to_string(), age: 30 };
//! let json = binder.serialize(&Value::object(user.clone()));
//! let back: User = binder
//!     .deserialize(&json, &ResolvedType::of::<User>())
//!     .unwrap()
//!     .into_object()
//!     .unwrap();
//! assert_eq!(back, user);
//! ```

pub use jsonbind_core::{
    parse, Args, Error, FormatOptions, IndentWidth, Instance, Json, JsonBind, JsonKind,
    JsonNumber, Param, Position, ResolvedType, SchemaRegistry, TypeKey, TypeRef, TypeSpec, Value,
};

pub use jsonbind_core::deserializer;
pub use jsonbind_core::format;
pub use jsonbind_core::json;
pub use jsonbind_core::parser;
pub use jsonbind_core::schema;
pub use jsonbind_core::serializer;
pub use jsonbind_core::types;
pub use jsonbind_core::value;
