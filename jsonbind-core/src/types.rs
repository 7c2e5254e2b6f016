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

//! Type descriptions used by the mapping engine.
//!
//! [`ResolvedType`] is a fully concrete description of a deserialization
//! target: the tagged form of "the real type, with every generic parameter
//! bound". It cannot express a type variable, so the deserialization entry
//! point never sees an unresolved parameter. [`TypeRef`] is the declared-type
//! language used inside binding declarations; it is [`ResolvedType`] plus
//! [`TypeRef::Var`] for the owning type's formal parameters.

use std::any::{Any, TypeId};
use std::fmt;

/// Identity of a registered Rust type: its `TypeId` plus a human-readable
/// name for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: Any>() -> TypeKey {
        TypeKey {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A concrete deserialization target with all generic parameters bound.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedType {
    /// A registered type, with one argument per declared formal parameter.
    Class {
        key: TypeKey,
        args: Vec<ResolvedType>,
    },
    /// Ordered homogeneous sequence.
    List(Box<ResolvedType>),
    /// Unordered set target. Deserialization support is explicitly absent.
    Set(Box<ResolvedType>),
    /// Associative map target. Deserialization support is explicitly absent.
    Map(Box<ResolvedType>, Box<ResolvedType>),
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    BigInt,
    BigDecimal,
    Char,
    Str,
    /// The JSON tree itself: identity passthrough.
    Tree,
}

impl ResolvedType {
    /// A registered non-generic type.
    pub fn of<T: Any>() -> ResolvedType {
        ResolvedType::Class {
            key: TypeKey::of::<T>(),
            args: Vec::new(),
        }
    }

    /// A registered generic type applied to concrete arguments.
    pub fn generic<T: Any>(args: Vec<ResolvedType>) -> ResolvedType {
        ResolvedType::Class {
            key: TypeKey::of::<T>(),
            args,
        }
    }

    pub fn list(element: ResolvedType) -> ResolvedType {
        ResolvedType::List(Box::new(element))
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Class { key, args } => {
                write!(f, "{}", key)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", a)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            ResolvedType::List(e) => write!(f, "list<{}>", e),
            ResolvedType::Set(e) => write!(f, "set<{}>", e),
            ResolvedType::Map(k, v) => write!(f, "map<{}, {}>", k, v),
            ResolvedType::Bool => f.write_str("bool"),
            ResolvedType::I8 => f.write_str("i8"),
            ResolvedType::I16 => f.write_str("i16"),
            ResolvedType::I32 => f.write_str("i32"),
            ResolvedType::I64 => f.write_str("i64"),
            ResolvedType::F32 => f.write_str("f32"),
            ResolvedType::F64 => f.write_str("f64"),
            ResolvedType::BigInt => f.write_str("bigint"),
            ResolvedType::BigDecimal => f.write_str("bigdecimal"),
            ResolvedType::Char => f.write_str("char"),
            ResolvedType::Str => f.write_str("string"),
            ResolvedType::Tree => f.write_str("json"),
        }
    }
}

/// A declared type inside a binding declaration: a [`ResolvedType`] shape
/// that may also mention the owning type's formal parameters by name.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeRef {
    /// A formal generic parameter of the declaring type.
    Var(String),
    Class {
        key: TypeKey,
        args: Vec<TypeRef>,
    },
    List(Box<TypeRef>),
    Set(Box<TypeRef>),
    Map(Box<TypeRef>, Box<TypeRef>),
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    BigInt,
    BigDecimal,
    Char,
    Str,
    Tree,
}

impl TypeRef {
    pub fn var<S: Into<String>>(name: S) -> TypeRef {
        TypeRef::Var(name.into())
    }

    pub fn of<T: Any>() -> TypeRef {
        TypeRef::Class {
            key: TypeKey::of::<T>(),
            args: Vec::new(),
        }
    }

    pub fn generic<T: Any>(args: Vec<TypeRef>) -> TypeRef {
        TypeRef::Class {
            key: TypeKey::of::<T>(),
            args,
        }
    }

    pub fn list(element: TypeRef) -> TypeRef {
        TypeRef::List(Box::new(element))
    }
}

impl From<ResolvedType> for TypeRef {
    /// Lifts a concrete type description into the declared-type language.
    fn from(ty: ResolvedType) -> TypeRef {
        match ty {
            ResolvedType::Class { key, args } => TypeRef::Class {
                key,
                args: args.into_iter().map(TypeRef::from).collect(),
            },
            ResolvedType::List(e) => TypeRef::List(Box::new((*e).into())),
            ResolvedType::Set(e) => TypeRef::Set(Box::new((*e).into())),
            ResolvedType::Map(k, v) => {
                TypeRef::Map(Box::new((*k).into()), Box::new((*v).into()))
            }
            ResolvedType::Bool => TypeRef::Bool,
            ResolvedType::I8 => TypeRef::I8,
            ResolvedType::I16 => TypeRef::I16,
            ResolvedType::I32 => TypeRef::I32,
            ResolvedType::I64 => TypeRef::I64,
            ResolvedType::F32 => TypeRef::F32,
            ResolvedType::F64 => TypeRef::F64,
            ResolvedType::BigInt => TypeRef::BigInt,
            ResolvedType::BigDecimal => TypeRef::BigDecimal,
            ResolvedType::Char => TypeRef::Char,
            ResolvedType::Str => TypeRef::Str,
            ResolvedType::Tree => TypeRef::Tree,
        }
    }
}
