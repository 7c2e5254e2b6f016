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

use jsonbind_core::{parse, Error, Json, JsonKind, JsonNumber};

#[test]
fn test_empty_object() {
    let json = parse("{}").unwrap();
    assert_eq!(json.kind(), JsonKind::Object);
    assert!(json.as_object().unwrap().is_empty());
}

#[test]
fn test_empty_array() {
    let json = parse("[]").unwrap();
    assert_eq!(json.kind(), JsonKind::Array);
    assert!(json.as_array().unwrap().is_empty());
}

#[test]
fn test_object_entries() {
    let json = parse("{\"a\":1,\"b\":2}").unwrap();
    assert_eq!(json.get("a"), Some(&Json::from(1i64)));
    assert_eq!(json.get("b"), Some(&Json::from(2i64)));
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[test]
fn test_nested_document() {
    let json = parse(
        "{ \"people\": [ {\"name\": \"Justin\", \"age\": 16}, {\"name\": \"Joe\", \"age\": 23} ], \
         \"ok\": true, \"missing\": null }",
    )
    .unwrap();
    let people = json.get("people").unwrap().as_array().unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[1].get("name").unwrap().as_str().unwrap(), "Joe");
    assert!(json.get("ok").unwrap().as_bool().unwrap());
    assert!(json.get("missing").unwrap().is_null());
}

#[test]
fn test_literals() {
    assert_eq!(parse("true").unwrap(), Json::Boolean(true));
    assert_eq!(parse("false").unwrap(), Json::Boolean(false));
    assert_eq!(parse("null").unwrap(), Json::Null);
    assert!(matches!(parse("trun"), Err(Error::Parse { .. })));
    assert!(matches!(parse("nul"), Err(Error::Parse { .. })));
}

#[test]
fn test_numbers() {
    assert_eq!(parse("12").unwrap(), Json::Number(JsonNumber::Int(12)));
    assert_eq!(parse("-7").unwrap(), Json::Number(JsonNumber::Int(-7)));
    assert_eq!(parse("-4.5").unwrap(), Json::Number(JsonNumber::Float(-4.5)));
    // An exponent takes the floating-point path even without a decimal point.
    assert_eq!(parse("1e3").unwrap(), Json::Number(JsonNumber::Float(1000.0)));
}

#[test]
fn test_number_overflow_falls_back_to_arbitrary_precision() {
    let big = "123456789012345678901234567890";
    match parse(big).unwrap() {
        Json::Number(JsonNumber::BigInt(b)) => assert_eq!(b.to_string(), big),
        other => panic!("expected a big integer, got {:?}", other),
    }
    match parse("1e999").unwrap() {
        Json::Number(JsonNumber::BigDecimal(_)) => {}
        other => panic!("expected a big decimal, got {:?}", other),
    }
}

#[test]
fn test_malformed_numbers() {
    assert!(matches!(parse("1.2.3"), Err(Error::Parse { .. })));
    assert!(matches!(parse("--1"), Err(Error::Parse { .. })));
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        parse(r#""tab\there\nand \"quotes\" and \\ and \/""#).unwrap(),
        Json::from("tab\there\nand \"quotes\" and \\ and /")
    );
    assert_eq!(parse(r#""A""#).unwrap(), Json::from("A"));
    // A surrogate pair combines into one character.
    assert_eq!(parse(r#""\ud83d\ude00""#).unwrap(), Json::from("\u{1F600}"));
    // Raw multi-byte characters pass through untouched.
    assert_eq!(parse(r#""héllo 😀""#).unwrap(), Json::from("héllo 😀"));
}

#[test]
fn test_invalid_escapes() {
    assert!(matches!(parse(r#""\q""#), Err(Error::Parse { .. })));
    assert!(matches!(parse(r#""\ud83d""#), Err(Error::Parse { .. })));
    assert!(matches!(parse(r#""\uzzzz""#), Err(Error::Parse { .. })));
}

#[test]
fn test_unterminated_string() {
    assert!(matches!(parse("\"abc"), Err(Error::Parse { .. })));
}

#[test]
fn test_raw_newline_inside_string() {
    assert!(matches!(parse("\"a\nb\""), Err(Error::Parse { .. })));
}

#[test]
fn test_missing_close_brace() {
    assert!(matches!(parse("{\"a\":1"), Err(Error::Parse { .. })));
}

#[test]
fn test_missing_colon_and_comma() {
    assert!(matches!(parse("{\"a\" 1}"), Err(Error::Parse { .. })));
    assert!(matches!(parse("[1 2]"), Err(Error::Parse { .. })));
    assert!(matches!(parse("{\"a\":1 \"b\":2}"), Err(Error::Parse { .. })));
}

#[test]
fn test_error_reports_line_number() {
    let err = parse("{\n    \"a\": nul\n}").unwrap_err();
    match err {
        Error::Parse { line, offset, .. } => {
            assert_eq!(line, 2);
            assert!(offset > 0);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_trailing_content_rejected() {
    assert!(matches!(parse("{} extra"), Err(Error::Parse { .. })));
    assert!(matches!(parse("1 2"), Err(Error::Parse { .. })));
}

#[test]
fn test_trailing_whitespace_accepted() {
    assert_eq!(parse("  {}  \n\t ").unwrap().kind(), JsonKind::Object);
}

#[test]
fn test_duplicate_keys_keep_the_last() {
    let json = parse("{\"a\":1,\"a\":2}").unwrap();
    assert_eq!(json.get("a"), Some(&Json::from(2i64)));
    assert_eq!(json.as_object().unwrap().len(), 1);
}
