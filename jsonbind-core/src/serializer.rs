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

//! Object-to-tree conversion.
//!
//! Serialization is total and best-effort: a member that cannot be produced
//! becomes `null` rather than aborting the surrounding object. This is
//! deliberately asymmetric with deserialization, which fails fast.

use indexmap::IndexMap;

use crate::json::{Json, JsonKind, JsonNumber};
use crate::schema::descriptor::{BindingDescriptor, MemberBinding};
use crate::schema::spec::Position;
use crate::schema::SchemaRegistry;
use crate::value::{Instance, Value};

/// Converts a dynamic value into a JSON tree using the registered bindings.
pub fn serialize(value: &Value, registry: &SchemaRegistry) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Boolean(*b),
        Value::Int(v) => Json::Number(JsonNumber::Int(*v)),
        Value::Float(f) => Json::Number(JsonNumber::Float(*f)),
        Value::BigInt(b) => Json::Number(JsonNumber::BigInt(b.clone())),
        Value::BigDecimal(d) => Json::Number(JsonNumber::BigDecimal(d.clone())),
        Value::Char(c) => Json::String(c.to_string()),
        Value::Str(s) => Json::String(s.clone()),
        Value::Seq(items) => Json::Array(items.iter().map(|v| serialize(v, registry)).collect()),
        Value::Map(map) => Json::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), serialize(v, registry)))
                .collect(),
        ),
        // A tree value passes through unchanged.
        Value::Tree(json) => json.clone(),
        Value::Object(instance) => serialize_instance(instance, registry),
    }
}

fn serialize_instance(instance: &Instance, registry: &SchemaRegistry) -> Json {
    let descriptor = match registry.descriptor(instance.type_id()) {
        Some(Ok(descriptor)) => descriptor,
        Some(Err(err)) => {
            log::warn!(
                "serializing {} as null: {}",
                instance.type_name(),
                err
            );
            return Json::Null;
        }
        None => {
            log::warn!(
                "serializing unregistered type {} as null",
                instance.type_name()
            );
            return Json::Null;
        }
    };
    match descriptor.owner_kind {
        JsonKind::Object => serialize_object(instance, &descriptor, registry),
        JsonKind::Array => serialize_array(instance, &descriptor, registry),
        kind => serialize_scalar(instance, &descriptor, kind, registry),
    }
}

/// Runs a whole-node member's accessor; the serialized result replaces the
/// node when its shape matches the owner kind.
fn whole_node_replacement(
    instance: &Instance,
    member: &MemberBinding,
    owner_kind: JsonKind,
    registry: &SchemaRegistry,
) -> Option<Json> {
    let serialized = serialize(&(member.accessor)(instance.as_any()), registry);
    if serialized.kind() == owner_kind {
        Some(serialized)
    } else {
        None
    }
}

fn serialize_object(
    instance: &Instance,
    descriptor: &BindingDescriptor,
    registry: &SchemaRegistry,
) -> Json {
    let mut entries = IndexMap::new();
    for member in &descriptor.members {
        match &member.position {
            Position::Entire => {
                if let Some(replacement) =
                    whole_node_replacement(instance, member, JsonKind::Object, registry)
                {
                    return replacement;
                }
            }
            Position::Key(key) => {
                let serialized = serialize(&(member.accessor)(instance.as_any()), registry);
                entries.insert(key.clone(), serialized);
            }
            Position::Index(_) => {}
        }
    }
    Json::Object(entries)
}

fn serialize_array(
    instance: &Instance,
    descriptor: &BindingDescriptor,
    registry: &SchemaRegistry,
) -> Json {
    let mut slots: Vec<(usize, Json)> = Vec::new();
    for member in &descriptor.members {
        match &member.position {
            Position::Entire => {
                if let Some(replacement) =
                    whole_node_replacement(instance, member, JsonKind::Array, registry)
                {
                    return replacement;
                }
            }
            Position::Index(index) => {
                let serialized = serialize(&(member.accessor)(instance.as_any()), registry);
                slots.push((*index, serialized));
            }
            Position::Key(_) => {}
        }
    }
    // Dense array of length max(index) + 1; unfilled slots become null.
    let length = slots.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
    let mut items = vec![Json::Null; length];
    for (index, item) in slots {
        items[index] = item;
    }
    Json::Array(items)
}

fn serialize_scalar(
    instance: &Instance,
    descriptor: &BindingDescriptor,
    owner_kind: JsonKind,
    registry: &SchemaRegistry,
) -> Json {
    // First whole-node member whose result has the declared shape wins;
    // when none produces one, the value degrades to null.
    for member in &descriptor.members {
        if member.position == Position::Entire {
            if let Some(node) = whole_node_replacement(instance, member, owner_kind, registry) {
                return node;
            }
        }
    }
    Json::Null
}
