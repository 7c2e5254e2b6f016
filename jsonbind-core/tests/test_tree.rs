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

use jsonbind_core::{parse, Error, Json, JsonKind};

#[test]
fn test_kind_of_each_variant() {
    assert_eq!(parse("null").unwrap().kind(), JsonKind::Null);
    assert_eq!(parse("true").unwrap().kind(), JsonKind::Boolean);
    assert_eq!(parse("1").unwrap().kind(), JsonKind::Number);
    assert_eq!(parse("\"s\"").unwrap().kind(), JsonKind::String);
    assert_eq!(parse("[]").unwrap().kind(), JsonKind::Array);
    assert_eq!(parse("{}").unwrap().kind(), JsonKind::Object);
}

#[test]
fn test_conversion_accessors_fail_on_mismatch() {
    let string = parse("\"s\"").unwrap();
    assert!(matches!(string.as_array(), Err(Error::Conversion(_))));
    assert!(matches!(string.as_object(), Err(Error::Conversion(_))));
    assert!(matches!(string.as_bool(), Err(Error::Conversion(_))));
    assert!(matches!(string.as_number(), Err(Error::Conversion(_))));
    assert_eq!(string.as_str().unwrap(), "s");

    let array = parse("[1]").unwrap();
    assert!(matches!(array.as_str(), Err(Error::Conversion(_))));
    assert_eq!(array.as_array().unwrap().len(), 1);
}

#[test]
fn test_object_equality_ignores_key_order() {
    let a = parse("{\"x\": 1, \"y\": 2}").unwrap();
    let b = parse("{\"y\": 2, \"x\": 1}").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_array_equality_respects_order() {
    let a = parse("[1, 2]").unwrap();
    let b = parse("[2, 1]").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_number_equality_is_representation_sensitive() {
    assert_ne!(parse("1").unwrap(), parse("1.0").unwrap());
    assert_eq!(parse("1.5").unwrap(), parse("1.5").unwrap());
}

#[test]
fn test_lookup_helpers() {
    let json = parse("{\"items\": [10, 20]}").unwrap();
    assert_eq!(json.get("items").unwrap().at(1), Some(&Json::from(20i64)));
    assert_eq!(json.get("absent"), None);
    assert_eq!(json.at(0), None);
    assert_eq!(json.get("items").unwrap().at(9), None);
}

#[test]
fn test_iteration_preserves_insertion_order() {
    let json = parse("{\"z\": 1, \"a\": 2, \"m\": 3}").unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_display_is_the_compact_form() {
    let json = parse("{\"a\":[1,2]}").unwrap();
    assert_eq!(json.to_string(), "{\"a\": [1, 2]}");
}
