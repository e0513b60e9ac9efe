// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Operation tag marking a document as a configured zones definition.
pub const ZONES_DEFINITION: &str = "zonesDefinition";

/// Capacity assigned to every new gate.
pub const DEFAULT_GATE_CAPACITY: u32 = 1000;

/// Capacity of the venue seeded for a new event.
pub const DEFAULT_VENUE_CAPACITY: u32 = 500;

/// Name of the gate seeded for a new event.
pub const DEFAULT_GATE_NAME: &str = "Main Gate";

/// Name of the venue seeded for a new event.
pub const DEFAULT_VENUE_NAME: &str = "Main Venue";

/// Role of a gate entry checkpoint when none is given.
pub const DEFAULT_GATE_ROLE: &str = "STEWARD-CHECKIN";

/// Role of a zone checkpoint when none is given.
pub const DEFAULT_CHECKPOINT_ROLE: &str = "STEWARD-ZONEIN";

/// Device roles offered for gate checkpoints.
pub const GATE_DEVICE_ROLES: [&str; 2] = ["STEWARD-CHECKIN", "STEWARD-CHECKOUT"];

/// Device roles offered for zone and subzone checkpoints.
pub const ZONE_DEVICE_ROLES: [&str; 2] = ["STEWARD-ZONEIN", "STEWARD-ZONEOUT"];
