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

//! The type registry: binding declarations in, compiled descriptors out.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::error::Error;
use crate::json::JsonKind;
use crate::schema::descriptor::{self, BindingDescriptor};
use crate::schema::spec::{CtorFn, MemberDecl, Param, ResolverFn, SetterDecl, SuperRef, TypeSpec};
use crate::types::TypeKey;

/// A registered type: the type-erased form of a [`TypeSpec`], plus the lazy
/// descriptor slot.
pub(crate) struct RegisteredType {
    pub(crate) key: TypeKey,
    pub(crate) owner_kind: JsonKind,
    pub(crate) is_abstract: bool,
    pub(crate) type_params: Vec<String>,
    pub(crate) supers: Vec<SuperRef>,
    pub(crate) members: Vec<MemberDecl>,
    pub(crate) params: Vec<Param>,
    pub(crate) constructor: Option<CtorFn>,
    pub(crate) constructor_count: usize,
    pub(crate) factory_params: Option<Vec<String>>,
    pub(crate) setters: Vec<SetterDecl>,
    pub(crate) resolver: Option<ResolverFn>,
    descriptor: OnceLock<Result<Arc<BindingDescriptor>, Error>>,
}

/// Registry of binding declarations, keyed by the Rust type's identity.
///
/// Descriptors are built lazily, once per type, and cached for the life of
/// the registry. Concurrent first-time builds of the same descriptor are
/// serialized by the per-entry `OnceLock`; after population, reads are
/// lock-free since descriptors are immutable. A configuration failure is
/// cached the same way and replayed on every later use of that type.
pub struct SchemaRegistry {
    types: RwLock<HashMap<TypeId, Arc<RegisteredType>>>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        SchemaRegistry {
            types: RwLock::new(HashMap::new()),
        }
    }
}

impl SchemaRegistry {
    pub fn new() -> SchemaRegistry {
        SchemaRegistry::default()
    }

    /// Registers a type's binding declarations. Registering the same Rust
    /// type twice is an error.
    pub fn register<T: Any>(&mut self, spec: TypeSpec<T>) -> Result<(), Error> {
        let key = TypeKey::of::<T>();
        let entry = RegisteredType {
            key,
            owner_kind: spec.owner_kind,
            is_abstract: spec.is_abstract,
            type_params: spec.type_params,
            supers: spec.supers,
            members: spec.members,
            params: spec.params,
            constructor: spec.constructor,
            constructor_count: spec.constructor_count,
            factory_params: spec.factory_params,
            setters: spec.setters,
            resolver: spec.resolver,
            descriptor: OnceLock::new(),
        };
        let mut types = self.types.write().expect("schema registry lock poisoned");
        if types.contains_key(&key.id()) {
            return Err(Error::invalid_configuration(format!(
                "type {} is already registered",
                key
            )));
        }
        log::debug!("registered bindings for {}", key);
        types.insert(key.id(), Arc::new(entry));
        Ok(())
    }

    pub(crate) fn entry(&self, id: TypeId) -> Option<Arc<RegisteredType>> {
        self.types
            .read()
            .expect("schema registry lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Returns the compiled descriptor for a registered type, building it on
    /// first use. `None` when the type was never registered.
    pub(crate) fn descriptor(
        &self,
        id: TypeId,
    ) -> Option<Result<Arc<BindingDescriptor>, Error>> {
        let entry = self.entry(id)?;
        let result = entry
            .descriptor
            .get_or_init(|| descriptor::build(self, &entry).map(Arc::new))
            .clone();
        Some(result)
    }
}
