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

//! Compiled per-type binding descriptors.
//!
//! A [`BindingDescriptor`] is the resolved table the serializer and
//! deserializer actually run against: the type's own declarations overlaid
//! on everything inherited through its supertype edges, validated once.
//! Descriptors are immutable and shared; all configuration failures surface
//! here, not on every serialize/deserialize call.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::Error;
use crate::json::JsonKind;
use crate::schema::registry::{RegisteredType, SchemaRegistry};
use crate::schema::spec::{
    AccessorFn, CtorFn, Position, ResolverFn, SetterFn, UpcastFn, UpcastMutFn,
};
use crate::schema::substitution::rebind;
use crate::types::{TypeKey, TypeRef};
use crate::value::Value;

/// A resolved member binding: accessor plus final tree position.
pub(crate) struct MemberBinding {
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) accessor: AccessorFn,
}

/// A resolved parameter binding: tree position plus declared type, rewritten
/// into the descriptor owner's formal parameters.
pub(crate) struct ParamBinding {
    pub(crate) position: Position,
    pub(crate) ty: TypeRef,
}

pub(crate) struct ConstructorBinding {
    pub(crate) params: Vec<ParamBinding>,
    pub(crate) build: CtorFn,
}

pub(crate) struct SetterBinding {
    pub(crate) name: String,
    pub(crate) params: Vec<ParamBinding>,
    pub(crate) apply: SetterFn,
}

/// Compiled, immutable binding metadata for one type.
pub(crate) struct BindingDescriptor {
    pub(crate) key: TypeKey,
    pub(crate) owner_kind: JsonKind,
    pub(crate) is_abstract: bool,
    pub(crate) type_params: Vec<String>,
    pub(crate) members: Vec<MemberBinding>,
    pub(crate) constructor: Option<ConstructorBinding>,
    pub(crate) setters: Vec<SetterBinding>,
    pub(crate) resolver: Option<ResolverFn>,
}

/// Builds the descriptor for `leaf`, walking its supertype edges depth-first
/// so that supertype declarations land before the type's own, then applying
/// override-by-name overlay semantics.
pub(crate) fn build(
    registry: &SchemaRegistry,
    leaf: &RegisteredType,
) -> Result<BindingDescriptor, Error> {
    if leaf.owner_kind == JsonKind::Null {
        return Err(Error::invalid_configuration(format!(
            "type {} cannot be bound to the null shape",
            leaf.key
        )));
    }

    let identity: HashMap<String, TypeRef> = leaf
        .type_params
        .iter()
        .map(|p| (p.clone(), TypeRef::Var(p.clone())))
        .collect();

    let mut collector = Collector {
        registry,
        members: Vec::new(),
        setters: Vec::new(),
        ref_path: Vec::new(),
        mut_path: Vec::new(),
    };
    let mut visiting = Vec::new();
    collector.collect(leaf, &identity, &mut visiting)?;
    let Collector {
        mut members,
        setters,
        ..
    } = collector;

    validate_member_positions(leaf, &members)?;
    for setter in &setters {
        validate_param_positions(leaf, &setter.params)?;
    }

    // Two comparators give deterministic serialization order: keys sort
    // lexicographically, indices numerically. Whole-node members come first
    // and keep their collection order.
    members.sort_by(|a, b| compare_positions(&a.position, &b.position));

    let constructor = if leaf.is_abstract {
        if leaf.resolver.is_none() {
            return Err(Error::invalid_configuration(format!(
                "abstract type {} declares no resolver; deserialization cannot pick a concrete type",
                leaf.key
            )));
        }
        if leaf.constructor.is_some() {
            return Err(Error::invalid_configuration(format!(
                "abstract type {} declares a constructor; only concrete types may",
                leaf.key
            )));
        }
        None
    } else {
        if leaf.resolver.is_some() {
            return Err(Error::invalid_configuration(format!(
                "concrete type {} declares a resolver; only abstract types may",
                leaf.key
            )));
        }
        if leaf.constructor_count > 1 {
            return Err(Error::invalid_configuration(format!(
                "type {} declares {} constructors; exactly one must be the deserialization entry point",
                leaf.key, leaf.constructor_count
            )));
        }
        let build_fn = leaf.constructor.clone().ok_or_else(|| {
            Error::invalid_configuration(format!(
                "unable to locate a constructor or factory to instantiate type {}",
                leaf.key
            ))
        })?;
        if let Some(factory_params) = &leaf.factory_params {
            if factory_params.len() != leaf.type_params.len() {
                return Err(Error::invalid_configuration(format!(
                    "factory for {} declares {} type parameters but the type declares {}",
                    leaf.key,
                    factory_params.len(),
                    leaf.type_params.len()
                )));
            }
        }
        let params = leaf
            .params
            .iter()
            .map(|p| {
                Ok(ParamBinding {
                    position: p.position.clone(),
                    ty: rebind(&p.ty, &identity)?,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        validate_param_positions(leaf, &params)?;
        Some(ConstructorBinding {
            params,
            build: build_fn,
        })
    };

    log::debug!("built binding descriptor for {}", leaf.key);
    Ok(BindingDescriptor {
        key: leaf.key,
        owner_kind: leaf.owner_kind,
        is_abstract: leaf.is_abstract,
        type_params: leaf.type_params.clone(),
        members,
        constructor,
        setters,
        resolver: leaf.resolver.clone(),
    })
}

struct Collector<'a> {
    registry: &'a SchemaRegistry,
    members: Vec<MemberBinding>,
    setters: Vec<SetterBinding>,
    /// Upcast projections from the leaf instance down to the node currently
    /// being collected; empty while collecting the leaf itself.
    ref_path: Vec<UpcastFn>,
    mut_path: Vec<UpcastMutFn>,
}

impl<'a> Collector<'a> {
    /// Depth-first, bottom-up: each supertype's declarations are collected
    /// before the declaring type's own, which then overlay by name. `inst`
    /// maps the current node's formal parameters to declared types written
    /// in the leaf's formals.
    fn collect(
        &mut self,
        node: &RegisteredType,
        inst: &HashMap<String, TypeRef>,
        visiting: &mut Vec<TypeId>,
    ) -> Result<(), Error> {
        if visiting.contains(&node.key.id()) {
            return Err(Error::invalid_configuration(format!(
                "supertype cycle through {}",
                node.key
            )));
        }
        visiting.push(node.key.id());

        for sup in &node.supers {
            let sup_entry = self.registry.entry(sup.key.id()).ok_or_else(|| {
                Error::invalid_configuration(format!(
                    "{} declares unregistered supertype {}",
                    node.key, sup.key
                ))
            })?;
            if sup.args.len() != sup_entry.type_params.len() {
                return Err(Error::invalid_configuration(format!(
                    "{} applies supertype {} to {} type arguments, expected {}",
                    node.key,
                    sup.key,
                    sup.args.len(),
                    sup_entry.type_params.len()
                )));
            }
            let mut sup_inst = HashMap::new();
            for (formal, arg) in sup_entry.type_params.iter().zip(&sup.args) {
                sup_inst.insert(formal.clone(), rebind(arg, inst)?);
            }
            self.ref_path.push(sup.upcast.clone());
            self.mut_path.push(sup.upcast_mut.clone());
            self.collect(&sup_entry, &sup_inst, visiting)?;
            self.ref_path.pop();
            self.mut_path.pop();
        }

        for decl in &node.members {
            let accessor = project_accessor(&decl.accessor, &self.ref_path);
            match self.members.iter().position(|m| m.name == decl.name) {
                Some(index) => {
                    // Same accessor name as something inherited: the
                    // override's position wins when declared, otherwise the
                    // inherited position is kept with the new accessor.
                    let inherited = self.members.remove(index);
                    self.members.push(MemberBinding {
                        name: decl.name.clone(),
                        position: decl.position.clone().unwrap_or(inherited.position),
                        accessor,
                    });
                }
                None => {
                    let position = decl.position.clone().ok_or_else(|| {
                        Error::invalid_configuration(format!(
                            "member \"{}\" in {} declares no tree position and overrides nothing",
                            decl.name, node.key
                        ))
                    })?;
                    self.members.push(MemberBinding {
                        name: decl.name.clone(),
                        position,
                        accessor,
                    });
                }
            }
        }

        for decl in &node.setters {
            let params = decl
                .params
                .iter()
                .map(|p| {
                    Ok(ParamBinding {
                        position: p.position.clone(),
                        ty: rebind(&p.ty, inst)?,
                    })
                })
                .collect::<Result<Vec<_>, Error>>()?;
            if let Some(index) = self.setters.iter().position(|s| s.name == decl.name) {
                self.setters.remove(index);
            }
            self.setters.push(SetterBinding {
                name: decl.name.clone(),
                params,
                apply: project_setter(&decl.apply, &self.mut_path),
            });
        }

        visiting.pop();
        Ok(())
    }
}

/// Composes an accessor declared on a supertype with the upcast projections
/// leading to it, so it can run against the leaf instance. A projection that
/// does not apply degrades to null, in keeping with best-effort
/// serialization.
fn project_accessor(accessor: &AccessorFn, path: &[UpcastFn]) -> AccessorFn {
    if path.is_empty() {
        return accessor.clone();
    }
    let path: Vec<UpcastFn> = path.to_vec();
    let accessor = accessor.clone();
    Arc::new(move |any: &dyn std::any::Any| -> Value {
        let mut current: &dyn std::any::Any = any;
        for step in &path {
            match step(current) {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }
        accessor(current)
    })
}

/// Composes a setter declared on a supertype with the mutable upcast
/// projections leading to it.
fn project_setter(apply: &SetterFn, path: &[UpcastMutFn]) -> SetterFn {
    if path.is_empty() {
        return apply.clone();
    }
    let path: Vec<UpcastMutFn> = path.to_vec();
    let apply = apply.clone();
    Arc::new(move |any: &mut dyn std::any::Any, args| {
        let mut current: &mut dyn std::any::Any = any;
        for step in &path {
            current = step(current).ok_or_else(|| {
                Error::deserialization(
                    "instance cannot be viewed as the supertype that declared this target",
                )
            })?;
        }
        apply(current, args)
    })
}

fn compare_positions(a: &Position, b: &Position) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Position::Entire, Position::Entire) => Ordering::Equal,
        (Position::Entire, _) => Ordering::Less,
        (_, Position::Entire) => Ordering::Greater,
        (Position::Key(x), Position::Key(y)) => x.cmp(y),
        (Position::Key(_), Position::Index(_)) => Ordering::Less,
        (Position::Index(_), Position::Key(_)) => Ordering::Greater,
        (Position::Index(x), Position::Index(y)) => x.cmp(y),
    }
}

fn validate_member_positions(
    leaf: &RegisteredType,
    members: &[MemberBinding],
) -> Result<(), Error> {
    let mut keys = HashSet::new();
    let mut indices = HashSet::new();
    for member in members {
        match &member.position {
            Position::Key(key) => {
                if leaf.owner_kind != JsonKind::Object {
                    return Err(Error::invalid_configuration(format!(
                        "member \"{}\" in {} binds to {} but the type maps to a JSON {}",
                        member.name, leaf.key, member.position, leaf.owner_kind
                    )));
                }
                if !keys.insert(key.clone()) {
                    return Err(Error::invalid_configuration(format!(
                        "{} binds the same key \"{}\" more than once, which is ambiguous",
                        leaf.key, key
                    )));
                }
            }
            Position::Index(index) => {
                if leaf.owner_kind != JsonKind::Array {
                    return Err(Error::invalid_configuration(format!(
                        "member \"{}\" in {} binds to {} but the type maps to a JSON {}",
                        member.name, leaf.key, member.position, leaf.owner_kind
                    )));
                }
                if !indices.insert(*index) {
                    return Err(Error::invalid_configuration(format!(
                        "{} binds the same array index {} more than once, which is ambiguous",
                        leaf.key, index
                    )));
                }
            }
            Position::Entire => {}
        }
    }
    Ok(())
}

fn validate_param_positions(leaf: &RegisteredType, params: &[ParamBinding]) -> Result<(), Error> {
    for param in params {
        let compatible = match &param.position {
            Position::Key(_) => leaf.owner_kind == JsonKind::Object,
            Position::Index(_) => leaf.owner_kind == JsonKind::Array,
            Position::Entire => true,
        };
        if !compatible {
            return Err(Error::invalid_configuration(format!(
                "a parameter of {} binds to {} but the type maps to a JSON {}",
                leaf.key, param.position, leaf.owner_kind
            )));
        }
    }
    Ok(())
}
