// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    apply_ok, create, create_gate_command, create_subzone_command, create_test_checkpoint,
    create_test_topology, create_venue_command, create_zone_command,
};
use crate::{Command, CoreError, IgnoreReason, Outcome, Topology, TransitionResult, apply};
use accessmap_domain::{
    AccessType, AccessTypes, Checkpoint, CheckpointId, Direction, DomainError, Entity, EntityId,
    EntityKind, IdGenerator, Placement,
};
use std::collections::HashSet;

#[test]
fn test_create_gate_scenario() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();

    let transition: TransitionResult = apply_ok(&topology, create_gate_command("Main Gate"), &mut ids);

    let new_topology: Topology = transition.new_topology;
    assert_eq!(new_topology.len(), 1);
    let gate: &Entity = new_topology.entity(&transition.change.entity_id).unwrap();
    assert_eq!(gate.kind(), EntityKind::Gate);
    assert!(gate.id().value().starts_with("gate#"));
    assert_eq!(gate.max_capacity, 1000);
    assert_eq!(gate.access_types, AccessTypes::all());
    assert_eq!(gate.parent_id(), None);

    assert_eq!(gate.checkpoints().len(), 1);
    let entry: &Checkpoint = gate.checkpoints().values().next().unwrap();
    assert_eq!(entry.name, "Main Gate Entry");
    assert_eq!(entry.direction, Direction::In);
    assert_eq!(entry.role, "STEWARD-CHECKIN");
    assert!(entry.share_link.ends_with("/gate/main-gate"));
    assert!(entry.qr_share_link.ends_with("/qr/gate/main-gate"));
}

#[test]
fn test_create_gate_uses_given_device_binding() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();
    let command: Command = Command::CreateGate {
        name: String::from("North Gate"),
        device_imei: Some(String::from("356938035643809")),
        device_role: Some(String::from("STEWARD-CHECKOUT")),
    };

    let (new_topology, gate_id): (Topology, EntityId) = create(&topology, command, &mut ids);

    let entry: &Checkpoint = new_topology.checkpoints_of(&gate_id)[0];
    assert_eq!(entry.role, "STEWARD-CHECKOUT");
    assert_eq!(entry.device_imei.as_deref(), Some("356938035643809"));
}

#[test]
fn test_create_gate_blank_role_falls_back_to_default() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();
    let command: Command = Command::CreateGate {
        name: String::from("North Gate"),
        device_imei: None,
        device_role: Some(String::from("  ")),
    };

    let (new_topology, gate_id): (Topology, EntityId) = create(&topology, command, &mut ids);

    assert_eq!(new_topology.checkpoints_of(&gate_id)[0].role, "STEWARD-CHECKIN");
}

#[test]
fn test_create_gate_with_empty_name_fails() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();

    let result: Result<TransitionResult, CoreError> =
        apply(&topology, create_gate_command(""), &mut ids);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidName(_)))
    ));
}

#[test]
fn test_create_zone_and_venue_differ_only_in_kind() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();
    let flags: AccessTypes = AccessTypes::from_enabled(&[AccessType::Vip]);

    let (topology, zone_id): (Topology, EntityId) = create(
        &topology,
        Command::CreateZone {
            name: String::from("Pit"),
            max_capacity: 300,
            access_types: flags,
        },
        &mut ids,
    );
    let (topology, venue_id): (Topology, EntityId) = create(
        &topology,
        Command::CreateVenue {
            name: String::from("Pit"),
            max_capacity: 300,
            access_types: flags,
        },
        &mut ids,
    );

    let zone: &Entity = topology.entity(&zone_id).unwrap();
    let venue: &Entity = topology.entity(&venue_id).unwrap();
    assert_eq!(zone.kind(), EntityKind::Zone);
    assert_eq!(venue.kind(), EntityKind::Venue);
    assert!(zone_id.value().starts_with("zone#"));
    assert!(venue_id.value().starts_with("venue#"));
    for entity in [zone, venue] {
        assert_eq!(entity.max_capacity, 300);
        assert_eq!(entity.current_occupancy, 0);
        assert_eq!(entity.access_types, flags);
        assert!(entity.checkpoints().is_empty());
        assert_eq!(entity.parent_id(), None);
    }
}

#[test]
fn test_created_ids_are_unique_and_kinds_match() {
    let mut topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();
    let (with_venue, venue_id): (Topology, EntityId) =
        create(&topology, create_venue_command("Hall", 200), &mut ids);
    topology = with_venue;

    let mut expected: Vec<(EntityId, EntityKind)> = vec![(venue_id.clone(), EntityKind::Venue)];
    for i in 0..20 {
        let (command, kind): (Command, EntityKind) = match i % 4 {
            0 => (create_gate_command(&format!("Gate {i}")), EntityKind::Gate),
            1 => (create_zone_command(&format!("Zone {i}"), 10), EntityKind::Zone),
            2 => (create_venue_command(&format!("Venue {i}"), 10), EntityKind::Venue),
            _ => (
                create_subzone_command(&venue_id, &format!("Sub {i}"), 10),
                EntityKind::Subzone,
            ),
        };
        let (next, id): (Topology, EntityId) = create(&topology, command, &mut ids);
        topology = next;
        expected.push((id, kind));
    }

    let unique: HashSet<&EntityId> = topology.entities().iter().map(Entity::id).collect();
    assert_eq!(unique.len(), expected.len());
    for (id, kind) in &expected {
        assert_eq!(topology.entity(id).unwrap().kind(), *kind);
    }
}

#[test]
fn test_create_fails_when_identifiers_are_exhausted() {
    let mut topology: Topology = create_test_topology();
    let last_id: EntityId = EntityId::new(&format!("zone#{}", u64::MAX));
    topology.upsert_entity(Entity::new(
        last_id.clone(),
        "Last",
        Placement::Zone,
        10,
        AccessTypes::none(),
    ));
    let mut ids: IdGenerator = IdGenerator::new();
    ids.observe(last_id.value());

    let result: Result<TransitionResult, CoreError> =
        apply(&topology, create_zone_command("Next", 10), &mut ids);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::IdentifiersExhausted {
            last_token: u64::MAX
        })
    );
    assert!(apply(&topology, create_gate_command("Gate"), &mut ids).is_err());
    assert!(apply(&topology, create_subzone_command(&last_id, "Sub", 5), &mut ids).is_err());
    assert_eq!(topology.len(), 1);
}

#[test]
fn test_create_subzone_records_parent_snapshot() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, hall_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_venue_command("Hall", 200),
        &mut ids,
    );

    let (topology, stage_id): (Topology, EntityId) = create(
        &topology,
        create_subzone_command(&hall_id, "Stage", 50),
        &mut ids,
    );

    let stage: &Entity = topology.entity(&stage_id).unwrap();
    assert_eq!(stage.kind(), EntityKind::Subzone);
    assert!(stage_id.value().starts_with("subzone#"));
    assert_eq!(stage.parent_id(), Some(&hall_id));
    assert_eq!(stage.parent_name(), Some("Hall"));
    assert_eq!(stage.max_capacity, 50);
}

#[test]
fn test_create_subzone_with_missing_parent_leaves_topology_unchanged() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, _hall_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_venue_command("Hall", 200),
        &mut ids,
    );
    let before: Topology = topology.clone();
    let missing: EntityId = EntityId::new("venue#404");

    let result: Result<TransitionResult, CoreError> = apply(
        &topology,
        create_subzone_command(&missing, "Stage", 50),
        &mut ids,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ParentNotFound(
            missing
        )))
    );
    assert_eq!(topology, before);
}

#[test]
fn test_create_subzone_under_gate_is_rejected() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, gate_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_gate_command("Main Gate"),
        &mut ids,
    );

    let result: Result<TransitionResult, CoreError> = apply(
        &topology,
        create_subzone_command(&gate_id, "Booth", 5),
        &mut ids,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidParent {
            parent_id: gate_id,
            kind: EntityKind::Gate,
        }))
    );
}

#[test]
fn test_create_subzone_under_subzone_is_rejected() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, zone_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_zone_command("Pit", 100),
        &mut ids,
    );
    let (topology, sub_id): (Topology, EntityId) =
        create(&topology, create_subzone_command(&zone_id, "Front", 20), &mut ids);

    let result: Result<TransitionResult, CoreError> = apply(
        &topology,
        create_subzone_command(&sub_id, "Barrier", 5),
        &mut ids,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidParent {
            kind: EntityKind::Subzone,
            ..
        }))
    ));
}

#[test]
fn test_add_checkpoint_then_replace_by_same_id() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, zone_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_zone_command("Pit", 100),
        &mut ids,
    );

    let first: TransitionResult = apply_ok(
        &topology,
        Command::AddCheckpoint {
            entity_id: zone_id.clone(),
            checkpoint: create_test_checkpoint("checkpoint#1", "Pit Door"),
        },
        &mut ids,
    );
    let checkpoints: Vec<&Checkpoint> = first.new_topology.checkpoints_of(&zone_id);
    assert_eq!(checkpoints.len(), 1);
    assert_eq!(checkpoints[0].checkpoint_id.value(), "checkpoint#1");

    let second: TransitionResult = apply_ok(
        &first.new_topology,
        Command::AddCheckpoint {
            entity_id: zone_id.clone(),
            checkpoint: create_test_checkpoint("checkpoint#1", "Pit Gate"),
        },
        &mut ids,
    );
    let checkpoints: Vec<&Checkpoint> = second.new_topology.checkpoints_of(&zone_id);
    assert_eq!(checkpoints.len(), 1);
    assert_eq!(checkpoints[0].name, "Pit Gate");
}

#[test]
fn test_add_checkpoint_to_missing_entity_fails() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();

    let result: Result<TransitionResult, CoreError> = apply(
        &topology,
        Command::AddCheckpoint {
            entity_id: EntityId::new("zone#404"),
            checkpoint: create_test_checkpoint("checkpoint#1", "Door"),
        },
        &mut ids,
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::EntityNotFound(
            EntityId::new("zone#404")
        )))
    );
}

#[test]
fn test_add_checkpoint_with_blank_name_fails() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, zone_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_zone_command("Pit", 100),
        &mut ids,
    );

    let result: Result<TransitionResult, CoreError> = apply(
        &topology,
        Command::AddCheckpoint {
            entity_id: zone_id,
            checkpoint: create_test_checkpoint("checkpoint#1", " "),
        },
        &mut ids,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidCheckpoint(_)))
    ));
}

#[test]
fn test_update_checkpoint_replaces_existing() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, gate_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_gate_command("Main Gate"),
        &mut ids,
    );
    let mut updated: Checkpoint = topology.checkpoints_of(&gate_id)[0].clone();
    updated.role = String::from("STEWARD-CHECKOUT");
    updated.direction = Direction::Out;

    let transition: TransitionResult = apply_ok(
        &topology,
        Command::UpdateCheckpoint {
            entity_id: gate_id.clone(),
            checkpoint: updated.clone(),
        },
        &mut ids,
    );

    assert_eq!(transition.outcome, Outcome::Applied);
    assert_eq!(transition.new_topology.checkpoints_of(&gate_id), vec![&updated]);
}

#[test]
fn test_update_missing_checkpoint_is_ignored() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, zone_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_zone_command("Pit", 100),
        &mut ids,
    );

    let transition: TransitionResult = apply_ok(
        &topology,
        Command::UpdateCheckpoint {
            entity_id: zone_id.clone(),
            checkpoint: create_test_checkpoint("checkpoint#9", "Ghost"),
        },
        &mut ids,
    );

    assert_eq!(
        transition.outcome,
        Outcome::Ignored(IgnoreReason::CheckpointNotFound {
            entity_id: zone_id,
            checkpoint_id: CheckpointId::new("checkpoint#9"),
        })
    );
    assert_eq!(transition.new_topology, topology);
}

#[test]
fn test_update_checkpoint_on_missing_entity_is_ignored() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();

    let transition: TransitionResult = apply_ok(
        &topology,
        Command::UpdateCheckpoint {
            entity_id: EntityId::new("zone#404"),
            checkpoint: create_test_checkpoint("checkpoint#1", "Door"),
        },
        &mut ids,
    );

    assert_eq!(
        transition.outcome,
        Outcome::Ignored(IgnoreReason::EntityNotFound(EntityId::new("zone#404")))
    );
    assert_eq!(transition.new_topology, topology);
}

#[test]
fn test_delete_checkpoint_removes_it() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, gate_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_gate_command("Main Gate"),
        &mut ids,
    );
    let entry_id: CheckpointId = topology.checkpoints_of(&gate_id)[0].checkpoint_id.clone();

    let transition: TransitionResult = apply_ok(
        &topology,
        Command::DeleteCheckpoint {
            entity_id: gate_id.clone(),
            checkpoint_id: entry_id.clone(),
        },
        &mut ids,
    );

    assert!(transition.outcome.is_applied());
    assert!(
        transition
            .new_topology
            .checkpoints_of(&gate_id)
            .iter()
            .all(|checkpoint| checkpoint.checkpoint_id != entry_id)
    );
    assert_eq!(transition.change.details, "Checkpoint \"Main Gate Entry\" deleted");
}

#[test]
fn test_delete_missing_checkpoint_is_a_noop() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, gate_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_gate_command("Main Gate"),
        &mut ids,
    );

    let transition: TransitionResult = apply_ok(
        &topology,
        Command::DeleteCheckpoint {
            entity_id: gate_id,
            checkpoint_id: CheckpointId::new("checkpoint#404"),
        },
        &mut ids,
    );

    assert!(!transition.outcome.is_applied());
    assert_eq!(transition.new_topology, topology);
}

#[test]
fn test_apply_never_mutates_input() {
    let mut ids: IdGenerator = IdGenerator::new();
    let topology: Topology = create_test_topology();

    let transition: TransitionResult = apply_ok(&topology, create_gate_command("Main Gate"), &mut ids);

    assert!(topology.is_empty());
    assert_eq!(transition.new_topology.len(), 1);
}

#[test]
fn test_record_occupancy_respects_update_policy() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, zone_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_zone_command("Pit", 100),
        &mut ids,
    );

    let recorded: TransitionResult = apply_ok(
        &topology,
        Command::RecordOccupancy {
            entity_id: zone_id.clone(),
            occupancy: 120,
        },
        &mut ids,
    );
    let zone: &Entity = recorded.new_topology.entity(&zone_id).unwrap();
    assert_eq!(zone.current_occupancy, 120);
    assert!(zone.is_over_capacity());

    let disabled: TransitionResult = apply_ok(
        &recorded.new_topology,
        Command::SetUpdatePolicy {
            entity_id: zone_id.clone(),
            enabled: false,
        },
        &mut ids,
    );
    assert!(!disabled.new_topology.entity(&zone_id).unwrap().update_policy);

    let ignored: TransitionResult = apply_ok(
        &disabled.new_topology,
        Command::RecordOccupancy {
            entity_id: zone_id.clone(),
            occupancy: 10,
        },
        &mut ids,
    );
    assert_eq!(
        ignored.outcome,
        Outcome::Ignored(IgnoreReason::UpdatePolicyDisabled(zone_id.clone()))
    );
    assert_eq!(
        ignored.new_topology.entity(&zone_id).unwrap().current_occupancy,
        120
    );
}

#[test]
fn test_delete_parent_orphans_subzones() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, hall_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_venue_command("Hall", 200),
        &mut ids,
    );
    let (topology, stage_id): (Topology, EntityId) = create(
        &topology,
        create_subzone_command(&hall_id, "Stage", 50),
        &mut ids,
    );

    let transition: TransitionResult = apply_ok(
        &topology,
        Command::DeleteEntity {
            entity_id: hall_id.clone(),
        },
        &mut ids,
    );

    let new_topology: Topology = transition.new_topology;
    assert!(!new_topology.contains(&hall_id));
    let stage: &Entity = new_topology.entity(&stage_id).unwrap();
    assert_eq!(stage.parent_id(), Some(&hall_id));
    assert_eq!(new_topology.orphaned_subzones(), vec![stage]);
    assert_eq!(transition.change.details, "VENUE \"Hall\" deleted");
}

#[test]
fn test_delete_missing_entity_is_ignored() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();

    let transition: TransitionResult = apply_ok(
        &topology,
        Command::DeleteEntity {
            entity_id: EntityId::new("zone#404"),
        },
        &mut ids,
    );

    assert_eq!(
        transition.outcome,
        Outcome::Ignored(IgnoreReason::EntityNotFound(EntityId::new("zone#404")))
    );
}

#[test]
fn test_change_record_names_command() {
    let topology: Topology = create_test_topology();
    let mut ids: IdGenerator = IdGenerator::new();

    let transition: TransitionResult = apply_ok(&topology, create_venue_command("Hall", 200), &mut ids);

    assert_eq!(transition.change.action, "CreateVenue");
    assert_eq!(transition.change.details, "Venue \"Hall\" created");
}

#[test]
fn test_validate_entity_exists() {
    let mut ids: IdGenerator = IdGenerator::new();
    let (topology, zone_id): (Topology, EntityId) = create(
        &create_test_topology(),
        create_zone_command("Pit", 100),
        &mut ids,
    );

    assert_eq!(
        crate::validate_entity_exists(&topology, &zone_id).unwrap().name,
        "Pit"
    );
    assert_eq!(
        crate::validate_entity_exists(&topology, &EntityId::new("zone#404")),
        Err(DomainError::EntityNotFound(EntityId::new("zone#404")))
    );
}
