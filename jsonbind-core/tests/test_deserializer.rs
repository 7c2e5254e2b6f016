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

use jsonbind_core::{parse, Error, Json, JsonBind, Param, ResolvedType, TypeRef, TypeSpec, Value};

#[derive(Clone, PartialEq, Debug)]
struct Point {
    x: f64,
    y: f64,
}

fn register_point(binder: &mut JsonBind) {
    binder
        .register(
            TypeSpec::<Point>::object()
                .key_member("x", "x", |p: &Point| Value::from(p.x))
                .key_member("y", "y", |p: &Point| Value::from(p.y))
                .key_param("x", TypeRef::F64)
                .key_param("y", TypeRef::F64)
                .constructor(|mut args| {
                    Ok(Point {
                        x: args.take_f64(0)?,
                        y: args.take_f64(1)?,
                    })
                }),
        )
        .unwrap();
}

#[test]
fn test_null_deserializes_to_null_for_any_target() {
    let mut binder = JsonBind::default();
    register_point(&mut binder);
    for target in [
        ResolvedType::of::<Point>(),
        ResolvedType::I64,
        ResolvedType::Str,
        ResolvedType::list(ResolvedType::Bool),
    ] {
        let value = binder.deserialize(&Json::Null, &target).unwrap();
        assert!(value.is_null());
    }
}

#[test]
fn test_constructor_with_key_parameters() {
    let mut binder = JsonBind::default();
    register_point(&mut binder);
    let json = parse("{\"x\": 1.0, \"y\": 2}").unwrap();
    let point: Point = binder
        .deserialize(&json, &ResolvedType::of::<Point>())
        .unwrap()
        .into_object()
        .unwrap();
    // The integer node narrows into the declared float parameter.
    assert_eq!(point, Point { x: 1.0, y: 2.0 });
}

#[test]
fn test_missing_key_is_an_error_naming_the_key() {
    let mut binder = JsonBind::default();
    register_point(&mut binder);
    let json = parse("{\"x\": 1.0}").unwrap();
    let err = binder
        .deserialize(&json, &ResolvedType::of::<Point>())
        .unwrap_err();
    match err {
        Error::Deserialization(message) => assert!(message.contains("\"y\"")),
        other => panic!("expected a deserialization error, got {:?}", other),
    }
}

#[test]
fn test_shape_mismatch_is_an_error() {
    let mut binder = JsonBind::default();
    register_point(&mut binder);
    let json = parse("[1, 2]").unwrap();
    assert!(matches!(
        binder.deserialize(&json, &ResolvedType::of::<Point>()),
        Err(Error::Deserialization(_))
    ));
}

#[test]
fn test_index_out_of_bounds_is_an_error_naming_the_index() {
    #[derive(Clone)]
    struct WrappedBool(bool);
    let mut binder = JsonBind::default();
    binder
        .register(
            TypeSpec::<WrappedBool>::array()
                .index_member("flag", 3, |w: &WrappedBool| Value::from(w.0))
                .index_param(3, TypeRef::Bool)
                .constructor(|mut args| Ok(WrappedBool(args.take_bool(0)?))),
        )
        .unwrap();
    let err = binder
        .deserialize(
            &parse("[true]").unwrap(),
            &ResolvedType::of::<WrappedBool>(),
        )
        .unwrap_err();
    match err {
        Error::Deserialization(message) => assert!(message.contains("index 3")),
        other => panic!("expected a deserialization error, got {:?}", other),
    }
}

#[test]
fn test_primitive_targets() {
    let binder = JsonBind::default();
    let int = binder
        .deserialize(&parse("41").unwrap(), &ResolvedType::I64)
        .unwrap();
    assert!(matches!(int, Value::Int(41)));

    let float = binder
        .deserialize(&parse("2.5").unwrap(), &ResolvedType::F64)
        .unwrap();
    assert!(matches!(float, Value::Float(f) if f == 2.5));

    let flag = binder
        .deserialize(&parse("true").unwrap(), &ResolvedType::Bool)
        .unwrap();
    assert!(matches!(flag, Value::Bool(true)));

    assert!(matches!(
        binder.deserialize(&parse("1").unwrap(), &ResolvedType::Bool),
        Err(Error::Deserialization(_))
    ));
}

#[test]
fn test_integer_narrowing_truncates_like_a_cast() {
    let binder = JsonBind::default();
    let wide = i64::from(i32::MAX) + 1;
    let narrowed = binder
        .deserialize(&Json::from(wide), &ResolvedType::I32)
        .unwrap();
    assert!(matches!(narrowed, Value::Int(v) if v == (wide as i32) as i64));

    // Fractions truncate toward zero.
    let from_float = binder
        .deserialize(&parse("3.9").unwrap(), &ResolvedType::I64)
        .unwrap();
    assert!(matches!(from_float, Value::Int(3)));
}

#[test]
fn test_big_number_targets() {
    let binder = JsonBind::default();
    let big = "123456789012345678901234567890";
    let value = binder
        .deserialize(&parse(big).unwrap(), &ResolvedType::BigInt)
        .unwrap();
    match value {
        Value::BigInt(b) => assert_eq!(b.to_string(), big),
        other => panic!("expected a big integer, got {:?}", other),
    }
    // A big integer no longer fits a fixed-width target.
    assert!(matches!(
        binder.deserialize(&parse(big).unwrap(), &ResolvedType::I64),
        Err(Error::Deserialization(_))
    ));
}

#[test]
fn test_char_target() {
    let binder = JsonBind::default();
    let c = binder
        .deserialize(&parse("\"hello\"").unwrap(), &ResolvedType::Char)
        .unwrap();
    assert!(matches!(c, Value::Char('h')));
    assert!(matches!(
        binder.deserialize(&parse("\"\"").unwrap(), &ResolvedType::Char),
        Err(Error::Deserialization(_))
    ));
}

#[test]
fn test_string_target_falls_back_to_canonical_text() {
    let binder = JsonBind::default();
    let exact = binder
        .deserialize(&parse("\"direct\"").unwrap(), &ResolvedType::Str)
        .unwrap();
    assert!(matches!(exact, Value::Str(s) if s == "direct"));

    let fallback = binder
        .deserialize(&parse("{\"a\": 1}").unwrap(), &ResolvedType::Str)
        .unwrap();
    assert!(matches!(fallback, Value::Str(s) if s == "{\"a\": 1}"));
}

#[test]
fn test_list_target() {
    let binder = JsonBind::default();
    let value = binder
        .deserialize(
            &parse("[1, 2, 3]").unwrap(),
            &ResolvedType::list(ResolvedType::I64),
        )
        .unwrap();
    let items = value.into_seq().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|v| matches!(v, Value::Int(_))));

    assert!(matches!(
        binder.deserialize(
            &parse("{}").unwrap(),
            &ResolvedType::list(ResolvedType::I64)
        ),
        Err(Error::Deserialization(_))
    ));
}

#[test]
fn test_map_and_set_targets_yield_null() {
    let binder = JsonBind::default();
    let map_target = ResolvedType::Map(
        Box::new(ResolvedType::Str),
        Box::new(ResolvedType::I64),
    );
    let value = binder
        .deserialize(&parse("{\"a\": 1}").unwrap(), &map_target)
        .unwrap();
    assert!(value.is_null());

    let set_target = ResolvedType::Set(Box::new(ResolvedType::I64));
    let value = binder
        .deserialize(&parse("[1, 2]").unwrap(), &set_target)
        .unwrap();
    assert!(value.is_null());
}

#[test]
fn test_whole_node_parameter() {
    #[derive(Clone)]
    struct Raw {
        tree: Json,
    }
    let mut binder = JsonBind::default();
    binder
        .register(
            TypeSpec::<Raw>::object()
                .entire_member("tree", |r: &Raw| Value::Tree(r.tree.clone()))
                .entire_param(TypeRef::Tree)
                .constructor(|mut args| Ok(Raw { tree: args.take_tree(0)? })),
        )
        .unwrap();
    let json = parse("{\"keep\": [1, 2]}").unwrap();
    let raw: Raw = binder
        .deserialize(&json, &ResolvedType::of::<Raw>())
        .unwrap()
        .into_object()
        .unwrap();
    assert_eq!(raw.tree, json);
}

#[test]
fn test_post_construction_setter() {
    #[derive(Clone, PartialEq, Debug)]
    struct Counter {
        base: i64,
        bonus: i64,
    }
    let mut binder = JsonBind::default();
    binder
        .register(
            TypeSpec::<Counter>::object()
                .key_member("base", "base", |c: &Counter| Value::from(c.base))
                .key_member("bonus", "bonus", |c: &Counter| Value::from(c.bonus))
                .key_param("base", TypeRef::I64)
                .constructor(|mut args| {
                    Ok(Counter {
                        base: args.take_i64(0)?,
                        bonus: 0,
                    })
                })
                .setter(
                    "set_bonus",
                    vec![Param::key("bonus", TypeRef::I64)],
                    |counter: &mut Counter, mut args| {
                        counter.bonus = args.take_i64(0)?;
                        Ok(())
                    },
                ),
        )
        .unwrap();
    let json = parse("{\"base\": 1, \"bonus\": 5}").unwrap();
    let counter: Counter = binder
        .deserialize(&json, &ResolvedType::of::<Counter>())
        .unwrap()
        .into_object()
        .unwrap();
    assert_eq!(counter, Counter { base: 1, bonus: 5 });
}

#[test]
fn test_unregistered_class_target_yields_null() {
    #[derive(Clone)]
    struct Never;
    let binder = JsonBind::default();
    let value = binder
        .deserialize(&parse("{}").unwrap(), &ResolvedType::of::<Never>())
        .unwrap();
    assert!(value.is_null());
}

#[test]
fn test_from_text() {
    let mut binder = JsonBind::default();
    register_point(&mut binder);
    let point: Point = binder
        .from_text("{\"x\": 3.0, \"y\": 4.0}", &ResolvedType::of::<Point>())
        .unwrap()
        .into_object()
        .unwrap();
    assert_eq!(point, Point { x: 3.0, y: 4.0 });
}

#[test]
fn test_enum_deserialization_matches_normalized_names() {
    #[derive(Clone, PartialEq, Debug)]
    enum Color {
        Red,
        DarkBlue,
    }
    let mut binder = JsonBind::default();
    binder
        .register_enum(&[("red", Color::Red), ("dark_blue", Color::DarkBlue)])
        .unwrap();
    for text in ["\"dark_blue\"", "\"DARK-BLUE\"", "\"Dark Blue\""] {
        let color: Color = binder
            .from_text(text, &ResolvedType::of::<Color>())
            .unwrap()
            .into_object()
            .unwrap();
        assert_eq!(color, Color::DarkBlue);
    }
    assert!(matches!(
        binder.from_text("\"chartreuse\"", &ResolvedType::of::<Color>()),
        Err(Error::Deserialization(_))
    ));
}
