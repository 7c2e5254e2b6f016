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

//! Full round trips through the engine: object -> tree -> text -> tree ->
//! object, with nesting, lists and generics in one model.

use jsonbind_core::{parse, FormatOptions, JsonBind, ResolvedType, TypeRef, TypeSpec, Value};

#[derive(Clone, PartialEq, Debug)]
struct Pose {
    x: f64,
    y: f64,
    heading: f64,
}

#[derive(Clone, PartialEq, Debug)]
struct Waypoint {
    pose: Pose,
    speed: f64,
    stop: bool,
}

#[derive(Clone, Debug)]
struct Trajectory {
    name: String,
    waypoints: Vec<Value>,
}

fn register_model(binder: &mut JsonBind) {
    binder
        .register(
            TypeSpec::<Pose>::object()
                .key_member("x", "x", |p: &Pose| Value::from(p.x))
                .key_member("y", "y", |p: &Pose| Value::from(p.y))
                .key_member("heading", "heading", |p: &Pose| Value::from(p.heading))
                .key_param("x", TypeRef::F64)
                .key_param("y", TypeRef::F64)
                .key_param("heading", TypeRef::F64)
                .constructor(|mut args| {
                    Ok(Pose {
                        x: args.take_f64(0)?,
                        y: args.take_f64(1)?,
                        heading: args.take_f64(2)?,
                    })
                }),
        )
        .unwrap();
    binder
        .register(
            TypeSpec::<Waypoint>::object()
                .key_member("pose", "pose", |w: &Waypoint| Value::object(w.pose.clone()))
                .key_member("speed", "speed", |w: &Waypoint| Value::from(w.speed))
                .key_member("stop", "stop", |w: &Waypoint| Value::from(w.stop))
                .key_param("pose", TypeRef::of::<Pose>())
                .key_param("speed", TypeRef::F64)
                .key_param("stop", TypeRef::Bool)
                .constructor(|mut args| {
                    Ok(Waypoint {
                        pose: args.take_object(0)?,
                        speed: args.take_f64(1)?,
                        stop: args.take_bool(2)?,
                    })
                }),
        )
        .unwrap();
    binder
        .register(
            TypeSpec::<Trajectory>::object()
                .key_member("name", "name", |t: &Trajectory| Value::from(t.name.clone()))
                .key_member("waypoints", "waypoints", |t: &Trajectory| {
                    Value::Seq(t.waypoints.clone())
                })
                .key_param("name", TypeRef::Str)
                .key_param("waypoints", TypeRef::list(TypeRef::of::<Waypoint>()))
                .constructor(|mut args| {
                    Ok(Trajectory {
                        name: args.take_string(0)?,
                        waypoints: args.take_seq(1)?,
                    })
                }),
        )
        .unwrap();
}

fn sample() -> Trajectory {
    Trajectory {
        name: "loop".to_string(),
        waypoints: vec![
            Value::object(Waypoint {
                pose: Pose {
                    x: 0.0,
                    y: 0.0,
                    heading: 0.0,
                },
                speed: 1.5,
                stop: false,
            }),
            Value::object(Waypoint {
                pose: Pose {
                    x: 2.0,
                    y: -1.0,
                    heading: 3.5,
                },
                speed: 0.5,
                stop: true,
            }),
        ],
    }
}

fn waypoints_of(trajectory: &Trajectory) -> Vec<Waypoint> {
    trajectory
        .waypoints
        .iter()
        .map(|v| v.clone().into_object::<Waypoint>().unwrap())
        .collect()
}

#[test]
fn test_tree_round_trip() {
    let mut binder = JsonBind::default();
    register_model(&mut binder);
    let original = sample();

    let json = binder.serialize(&Value::object(original.clone()));
    let back: Trajectory = binder
        .deserialize(&json, &ResolvedType::of::<Trajectory>())
        .unwrap()
        .into_object()
        .unwrap();

    assert_eq!(back.name, original.name);
    assert_eq!(waypoints_of(&back), waypoints_of(&original));
    // Serializing the reconstructed value reproduces the same tree.
    assert_eq!(binder.serialize(&Value::object(back)), json);
}

#[test]
fn test_text_round_trip() {
    let mut binder = JsonBind::default();
    register_model(&mut binder);
    let original = sample();

    for options in [FormatOptions::default(), FormatOptions::compact()] {
        let text = binder.to_text(&Value::object(original.clone()), &options);
        let back: Trajectory = binder
            .from_text(&text, &ResolvedType::of::<Trajectory>())
            .unwrap()
            .into_object()
            .unwrap();
        assert_eq!(back.name, original.name);
        assert_eq!(waypoints_of(&back), waypoints_of(&original));
    }
}

#[test]
fn test_parse_format_idempotence_on_a_serialized_model() {
    let mut binder = JsonBind::default();
    register_model(&mut binder);
    let json = binder.serialize(&Value::object(sample()));
    let text = binder.format(&json, &FormatOptions::default());
    assert_eq!(parse(&text).unwrap(), json);
}
