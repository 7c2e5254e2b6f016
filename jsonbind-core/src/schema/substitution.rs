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

//! Generic parameter substitution.
//!
//! Resolution is purely lexical: a formal parameter used inside a declared
//! type is replaced by its current binding before that declaration is
//! processed. Two operations exist: [`Substitution::resolve`] turns a
//! declared [`TypeRef`] into a concrete [`ResolvedType`] at deserialization
//! time, and [`rebind`] rewrites an inherited declaration from a supertype's
//! formals into the subtype's own formals at descriptor build time.

use std::collections::HashMap;

use crate::error::Error;
use crate::types::{ResolvedType, TypeRef};

/// The bindings of one type's formal parameters to concrete types at the
/// current deserialization point.
pub(crate) struct Substitution {
    bindings: HashMap<String, ResolvedType>,
}

impl Substitution {
    pub(crate) fn new(formals: &[String], args: &[ResolvedType]) -> Substitution {
        Substitution {
            bindings: formals
                .iter()
                .cloned()
                .zip(args.iter().cloned())
                .collect(),
        }
    }

    /// Replaces every formal parameter in `ty` by its bound concrete type.
    /// An unknown parameter name means the declaration escaped build-time
    /// validation, so it reports as a configuration error.
    pub(crate) fn resolve(&self, ty: &TypeRef) -> Result<ResolvedType, Error> {
        match ty {
            TypeRef::Var(name) => self.bindings.get(name).cloned().ok_or_else(|| {
                Error::invalid_configuration(format!(
                    "declared type references unknown type parameter \"{}\"",
                    name
                ))
            }),
            TypeRef::Class { key, args } => Ok(ResolvedType::Class {
                key: *key,
                args: args
                    .iter()
                    .map(|a| self.resolve(a))
                    .collect::<Result<Vec<_>, Error>>()?,
            }),
            TypeRef::List(e) => Ok(ResolvedType::List(Box::new(self.resolve(e)?))),
            TypeRef::Set(e) => Ok(ResolvedType::Set(Box::new(self.resolve(e)?))),
            TypeRef::Map(k, v) => Ok(ResolvedType::Map(
                Box::new(self.resolve(k)?),
                Box::new(self.resolve(v)?),
            )),
            TypeRef::Bool => Ok(ResolvedType::Bool),
            TypeRef::I8 => Ok(ResolvedType::I8),
            TypeRef::I16 => Ok(ResolvedType::I16),
            TypeRef::I32 => Ok(ResolvedType::I32),
            TypeRef::I64 => Ok(ResolvedType::I64),
            TypeRef::F32 => Ok(ResolvedType::F32),
            TypeRef::F64 => Ok(ResolvedType::F64),
            TypeRef::BigInt => Ok(ResolvedType::BigInt),
            TypeRef::BigDecimal => Ok(ResolvedType::BigDecimal),
            TypeRef::Char => Ok(ResolvedType::Char),
            TypeRef::Str => Ok(ResolvedType::Str),
            TypeRef::Tree => Ok(ResolvedType::Tree),
        }
    }
}

/// Rewrites a declared type from one type's formals into another's, through
/// the instantiation map built while walking a supertype edge. Unknown
/// parameter names are configuration errors surfaced at descriptor build.
pub(crate) fn rebind(ty: &TypeRef, map: &HashMap<String, TypeRef>) -> Result<TypeRef, Error> {
    match ty {
        TypeRef::Var(name) => map.get(name).cloned().ok_or_else(|| {
            Error::invalid_configuration(format!(
                "declared type references unknown type parameter \"{}\"",
                name
            ))
        }),
        TypeRef::Class { key, args } => Ok(TypeRef::Class {
            key: *key,
            args: args
                .iter()
                .map(|a| rebind(a, map))
                .collect::<Result<Vec<_>, Error>>()?,
        }),
        TypeRef::List(e) => Ok(TypeRef::List(Box::new(rebind(e, map)?))),
        TypeRef::Set(e) => Ok(TypeRef::Set(Box::new(rebind(e, map)?))),
        TypeRef::Map(k, v) => Ok(TypeRef::Map(
            Box::new(rebind(k, map)?),
            Box::new(rebind(v, map)?),
        )),
        other => Ok(other.clone()),
    }
}
