// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, parse_access_types, parse_direction, parse_entity_id};
use accessmap_domain::{AccessType, AccessTypes, Direction};

#[test]
fn test_parse_direction_is_case_insensitive() {
    assert_eq!(parse_direction("in").unwrap(), Direction::In);
    assert_eq!(parse_direction(" OUT ").unwrap(), Direction::Out);
}

#[test]
fn test_parse_direction_rejects_unknown() {
    let result: Result<Direction, ApiError> = parse_direction("SIDEWAYS");

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "direction"
    ));
}

#[test]
fn test_parse_access_types() {
    let flags: AccessTypes = parse_access_types(&["vip", "STAGE", "vip"]).unwrap();

    assert_eq!(
        flags,
        AccessTypes::from_enabled(&[AccessType::Vip, AccessType::Stage])
    );
}

#[test]
fn test_parse_empty_access_types_enables_none() {
    let flags: AccessTypes = parse_access_types::<&str>(&[]).unwrap();

    assert_eq!(flags, AccessTypes::none());
}

#[test]
fn test_parse_access_types_rejects_unknown() {
    let result: Result<AccessTypes, ApiError> = parse_access_types(&["GENERAL", "PRESS"]);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref message, .. }) if message.contains("PRESS")
    ));
}

#[test]
fn test_parse_entity_id_rejects_blank() {
    assert!(parse_entity_id("  ").is_err());
    assert_eq!(parse_entity_id(" zone#1 ").unwrap().value(), "zone#1");
}
