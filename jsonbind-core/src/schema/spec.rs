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

//! The [`TypeSpec`] builder: how a type declares its bindings.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::Error;
use crate::json::{Json, JsonKind};
use crate::types::{ResolvedType, TypeKey, TypeRef};
use crate::value::{Args, Value};

/// Where a bound value lives within a JSON node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Position {
    /// A named entry of an object node.
    Key(String),
    /// A slot of an array node.
    Index(usize),
    /// The node itself.
    Entire,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Key(k) => write!(f, "key \"{}\"", k),
            Position::Index(i) => write!(f, "index {}", i),
            Position::Entire => f.write_str("the whole node"),
        }
    }
}

/// A declared constructor/factory/setter parameter: a tree position plus the
/// declared type of the value extracted there. The declared type may mention
/// the owning type's formal parameters.
#[derive(Clone)]
pub struct Param {
    pub(crate) position: Position,
    pub(crate) ty: TypeRef,
}

impl Param {
    pub fn key<S: Into<String>>(key: S, ty: TypeRef) -> Param {
        Param {
            position: Position::Key(key.into()),
            ty,
        }
    }

    pub fn index(index: usize, ty: TypeRef) -> Param {
        Param {
            position: Position::Index(index),
            ty,
        }
    }

    pub fn entire(ty: TypeRef) -> Param {
        Param {
            position: Position::Entire,
            ty,
        }
    }
}

pub(crate) type AccessorFn = Arc<dyn Fn(&dyn Any) -> Value + Send + Sync>;
pub(crate) type CtorFn = Arc<dyn Fn(Args) -> Result<Box<dyn Any>, Error> + Send + Sync>;
pub(crate) type SetterFn = Arc<dyn Fn(&mut dyn Any, Args) -> Result<(), Error> + Send + Sync>;
pub(crate) type ResolverFn = Arc<dyn Fn(&Json) -> Result<ResolvedType, Error> + Send + Sync>;
pub(crate) type UpcastFn =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync>;
pub(crate) type UpcastMutFn =
    Arc<dyn for<'a> Fn(&'a mut dyn Any) -> Option<&'a mut dyn Any> + Send + Sync>;

/// A member binding as declared: named for override matching, positioned
/// unless it only overrides an inherited accessor.
pub(crate) struct MemberDecl {
    pub(crate) name: String,
    pub(crate) position: Option<Position>,
    pub(crate) accessor: AccessorFn,
}

/// A post-construction target as declared.
pub(crate) struct SetterDecl {
    pub(crate) name: String,
    pub(crate) params: Vec<Param>,
    pub(crate) apply: SetterFn,
}

/// A supertype edge: the supertype, the type arguments this type applies it
/// to (written in terms of this type's own formal parameters), and the
/// projections that view an instance of this type as the supertype so that
/// inherited accessors and setters can run against it.
pub(crate) struct SuperRef {
    pub(crate) key: TypeKey,
    pub(crate) args: Vec<TypeRef>,
    pub(crate) upcast: UpcastFn,
    pub(crate) upcast_mut: UpcastMutFn,
}

/// Declarative binding metadata for one type, built with method chaining and
/// handed to [`SchemaRegistry::register`](crate::schema::SchemaRegistry::register).
///
/// ```
/// use jsonbind_core::schema::TypeSpec;
/// use jsonbind_core::types::TypeRef;
/// use jsonbind_core::value::Value;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// let spec = TypeSpec::<Point>::object()
///     .key_member("x", "x", |p: &Point| Value::from(p.x))
///     .key_member("y", "y", |p: &Point| Value::from(p.y))
///     .key_param("x", TypeRef::F64)
///     .key_param("y", TypeRef::F64)
///     .constructor(|mut args| {
///         Ok(Point {
///             x: args.take_f64(0)?,
///             y: args.take_f64(1)?,
///         })
///     });
/// ```
pub struct TypeSpec<T> {
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
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> TypeSpec<T> {
    fn with_kind(owner_kind: JsonKind, is_abstract: bool) -> TypeSpec<T> {
        TypeSpec {
            owner_kind,
            is_abstract,
            type_params: Vec::new(),
            supers: Vec::new(),
            members: Vec::new(),
            params: Vec::new(),
            constructor: None,
            constructor_count: 0,
            factory_params: None,
            setters: Vec::new(),
            resolver: None,
            _marker: PhantomData,
        }
    }

    /// A concrete type mapped to an object node.
    pub fn object() -> TypeSpec<T> {
        Self::with_kind(JsonKind::Object, false)
    }

    /// A concrete type mapped to an array node.
    pub fn array() -> TypeSpec<T> {
        Self::with_kind(JsonKind::Array, false)
    }

    /// A concrete type mapped to a boolean node.
    pub fn boolean() -> TypeSpec<T> {
        Self::with_kind(JsonKind::Boolean, false)
    }

    /// A concrete type mapped to a number node.
    pub fn number() -> TypeSpec<T> {
        Self::with_kind(JsonKind::Number, false)
    }

    /// A concrete type mapped to a string node.
    pub fn string() -> TypeSpec<T> {
        Self::with_kind(JsonKind::String, false)
    }

    /// An abstract/open type: deserialization goes through a resolver that
    /// picks the concrete type from the tree node alone.
    pub fn abstract_of(owner_kind: JsonKind) -> TypeSpec<T> {
        Self::with_kind(owner_kind, true)
    }

    /// Shorthand for the common object-shaped abstract type.
    pub fn abstract_object() -> TypeSpec<T> {
        Self::abstract_of(JsonKind::Object)
    }

    /// Declares this type's formal generic parameters, by name. Parameters
    /// exist only at the schema level; instances carry whatever the
    /// constructor built.
    pub fn type_params(mut self, names: &[&str]) -> Self {
        self.type_params = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Declares a supertype, applying it to the given type arguments (which
    /// may mention this type's own formal parameters). Member and setter
    /// bindings of the supertype are inherited, bottom-up; their accessors
    /// reach the embedded supertype view through `AsRef`/`AsMut`.
    pub fn extends<S: Any>(mut self, args: Vec<TypeRef>) -> Self
    where
        T: AsRef<S> + AsMut<S>,
    {
        let upcast: UpcastFn = Arc::new(|any: &dyn Any| {
            any.downcast_ref::<T>().map(|value| {
                let parent: &S = value.as_ref();
                parent as &dyn Any
            })
        });
        let upcast_mut: UpcastMutFn = Arc::new(|any: &mut dyn Any| {
            any.downcast_mut::<T>().map(|value| {
                let parent: &mut S = value.as_mut();
                parent as &mut dyn Any
            })
        });
        self.supers.push(SuperRef {
            key: TypeKey::of::<S>(),
            args,
            upcast,
            upcast_mut,
        });
        self
    }

    fn push_member<F>(mut self, name: &str, position: Option<Position>, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let erased: AccessorFn = Arc::new(move |any: &dyn Any| match any.downcast_ref::<T>() {
            Some(value) => accessor(value),
            None => Value::Null,
        });
        self.members.push(MemberDecl {
            name: name.to_string(),
            position,
            accessor: erased,
        });
        self
    }

    /// Binds a member to a key of the object node. `name` identifies the
    /// accessor for override matching across the hierarchy.
    pub fn key_member<F>(self, name: &str, key: &str, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let position = Position::Key(key.to_string());
        self.push_member(name, Some(position), accessor)
    }

    /// Binds a member to a slot of the array node.
    pub fn index_member<F>(self, name: &str, index: usize, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.push_member(name, Some(Position::Index(index)), accessor)
    }

    /// Binds a member to the whole node.
    pub fn entire_member<F>(self, name: &str, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.push_member(name, Some(Position::Entire), accessor)
    }

    /// Overrides an inherited member's accessor while keeping its inherited
    /// tree position. Fails at descriptor build when nothing up the
    /// hierarchy declares a member with this name.
    pub fn override_member<F>(self, name: &str, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.push_member(name, None, accessor)
    }

    /// Appends a constructor parameter bound to a key of the object node.
    pub fn key_param<S: Into<String>>(mut self, key: S, ty: TypeRef) -> Self {
        self.params.push(Param::key(key, ty));
        self
    }

    /// Appends a constructor parameter bound to a slot of the array node.
    pub fn index_param(mut self, index: usize, ty: TypeRef) -> Self {
        self.params.push(Param::index(index, ty));
        self
    }

    /// Appends a constructor parameter bound to the whole node.
    pub fn entire_param(mut self, ty: TypeRef) -> Self {
        self.params.push(Param::entire(ty));
        self
    }

    /// Declares the deserialization entry point. Exactly one constructor or
    /// factory must be declared on a concrete type; a second declaration is
    /// an `InvalidConfiguration` at descriptor build.
    pub fn constructor<F>(mut self, build: F) -> Self
    where
        F: Fn(Args) -> Result<T, Error> + Send + Sync + 'static,
    {
        self.constructor_count += 1;
        self.constructor = Some(Arc::new(move |args| {
            build(args).map(|value| Box::new(value) as Box<dyn Any>)
        }));
        self
    }

    /// Declares a factory as the deserialization entry point. The factory's
    /// declared type-parameter arity must match the owning type's generic
    /// arity; this is checked at descriptor build.
    pub fn factory<F>(mut self, declared_params: &[&str], build: F) -> Self
    where
        F: Fn(Args) -> Result<T, Error> + Send + Sync + 'static,
    {
        self.factory_params = Some(declared_params.iter().map(|n| n.to_string()).collect());
        self.constructor(build)
    }

    /// Declares a post-construction target: invoked on the freshly built
    /// instance with arguments prepared exactly like constructor arguments.
    /// `name` identifies the target for override matching.
    pub fn setter<F>(mut self, name: &str, params: Vec<Param>, apply: F) -> Self
    where
        F: Fn(&mut T, Args) -> Result<(), Error> + Send + Sync + 'static,
    {
        let erased: SetterFn = Arc::new(move |any: &mut dyn Any, args| {
            match any.downcast_mut::<T>() {
                Some(value) => apply(value, args),
                None => Err(Error::deserialization(
                    "instance type mismatch in post-construction target",
                )),
            }
        });
        self.setters.push(SetterDecl {
            name: name.to_string(),
            params,
            apply: erased,
        });
        self
    }

    /// Declares the resolver of an abstract/open type: given the tree node,
    /// it names the concrete type to instantiate. When a resolver was
    /// already declared, the first one is kept; declaring more than one is a
    /// configuration hazard, not an error.
    pub fn resolver<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&Json) -> Result<ResolvedType, Error> + Send + Sync + 'static,
    {
        if self.resolver.is_some() {
            log::warn!(
                "type {} declares more than one resolver; keeping the first",
                std::any::type_name::<T>()
            );
        } else {
            self.resolver = Some(Arc::new(resolve));
        }
        self
    }
}
