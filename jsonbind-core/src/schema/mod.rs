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

//! Binding declarations and their compiled form.
//!
//! Types declare how they map to and from the JSON tree through a
//! [`TypeSpec`] builder registered with a [`SchemaRegistry`]. The registry
//! compiles each type's declarations, together with everything inherited
//! from its supertypes, into an immutable binding descriptor the first time
//! the type is used, and caches the result (or the configuration failure)
//! for the life of the registry.

pub mod descriptor;
pub mod registry;
pub mod spec;
pub mod substitution;

pub use registry::SchemaRegistry;
pub use spec::{Param, Position, TypeSpec};
