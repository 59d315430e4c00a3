use crate::commands::{CombatCommand, OrderTarget};
use crate::constants::*;
use crate::definitions::*;
use crate::enums::*;
use crate::events::CombatEvent;
use crate::facing::Facing;
use crate::types::*;

// ---- Facings ----

#[test]
fn test_facing_cardinal_trig() {
    assert_eq!(Facing::NORTH.sin(), 0);
    assert_eq!(Facing::NORTH.cos(), TRIG_SCALE);
    assert_eq!(Facing::EAST.sin(), TRIG_SCALE);
    assert_eq!(Facing::EAST.cos(), 0);
    assert_eq!(Facing::SOUTH.sin(), 0);
    assert_eq!(Facing::SOUTH.cos(), -TRIG_SCALE);
    assert_eq!(Facing::WEST.sin(), -TRIG_SCALE);
    assert_eq!(Facing::WEST.cos(), 0);
}

#[test]
fn test_facing_trig_is_odd_and_bounded() {
    for f in 0..=255u8 {
        let facing = Facing(f);
        let mirrored = Facing(0u8.wrapping_sub(f));
        assert_eq!(facing.sin(), -mirrored.sin(), "sin should be odd at {f}");
        assert_eq!(facing.cos(), mirrored.cos(), "cos should be even at {f}");
        assert!(facing.sin().abs() <= TRIG_SCALE);
    }
}

#[test]
fn test_facing_towards_cardinals() {
    let current = Facing(17);
    assert_eq!(Facing::towards(WVec::new(0, 500, 0), current), Facing::NORTH);
    assert_eq!(Facing::towards(WVec::new(500, 0, 0), current), Facing::EAST);
    assert_eq!(Facing::towards(WVec::new(0, -500, 0), current), Facing::SOUTH);
    assert_eq!(Facing::towards(WVec::new(-500, 0, 0), current), Facing::WEST);
    assert_eq!(Facing::towards(WVec::new(500, 500, 0), current), Facing(32));
}

#[test]
fn test_facing_towards_zero_keeps_current() {
    let current = Facing(99);
    assert_eq!(Facing::towards(WVec::new(0, 0, 700), current), current);
}

#[test]
fn test_tick_towards_takes_short_way() {
    // 250 -> 6 is 12 steps clockwise through north.
    let f = Facing(250).tick_towards(Facing(6), 4);
    assert_eq!(f, Facing(254));
    let f = Facing(6).tick_towards(Facing(250), 4);
    assert_eq!(f, Facing(2));
}

#[test]
fn test_tick_towards_snaps_when_close() {
    assert_eq!(Facing(10).tick_towards(Facing(12), 5), Facing(12));
    assert_eq!(Facing(12).tick_towards(Facing(12), 0), Facing(12));
}

#[test]
fn test_within_tolerance_wraps() {
    assert!(Facing(254).within_tolerance(Facing(2), 4));
    assert!(!Facing(250).within_tolerance(Facing(2), 4));
    assert_eq!(Facing(0).angle_to(Facing(128)), 128);
}

#[test]
fn test_quantize_facing() {
    assert_eq!(Facing(3).quantize(32), Facing(0));
    assert_eq!(Facing(5).quantize(32), Facing(8));
    assert_eq!(Facing(253).quantize(32), Facing(0));
    assert_eq!(Facing(77).quantize(0), Facing(77));
}

// ---- Coordinates ----

#[test]
fn test_position_cell_and_center() {
    let pos = WPos::new(2 * CELL_SIZE + 10, -5, 0);
    assert_eq!(pos.cell(), CPos::new(2, -1));
    let center = CPos::new(3, 4).center();
    assert_eq!(center, WPos::new(3 * CELL_SIZE + 512, 4 * CELL_SIZE + 512, 0));
    assert_eq!(center.cell(), CPos::new(3, 4));
}

#[test]
fn test_distance_is_integer_euclidean() {
    let a = WPos::new(0, 0, 0);
    let b = WPos::new(3, 4, 0);
    assert_eq!(a.distance_to(b), WDist(5));
    assert_eq!(WVec::new(3, 4, 12).length(), 13);
    assert_eq!(isqrt(-4), 0);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..TICK_RATE {
        time.advance();
    }
    assert_eq!(time.tick, TICK_RATE as u64);
}

// ---- Definitions ----

#[test]
fn test_weapon_definition_defaults() {
    let json = r#"{
        "range": 5120,
        "rof": 40,
        "warheads": [{ "damage": 50 }]
    }"#;
    let weapon: WeaponDefinition = serde_json::from_str(json).unwrap();
    assert_eq!(weapon.burst, 1);
    assert_eq!(weapon.burst_delay, DEFAULT_BURST_DELAY);
    assert_eq!(weapon.min_range, WDist::ZERO);
    assert!(weapon.valid_targets.contains("Ground"));
    assert!(!weapon.underwater);
    assert_eq!(weapon.projectile, ProjectileKind::Instant);

    let warhead = &weapon.warheads[0];
    assert_eq!(warhead.spread, WDist(1));
    assert_eq!(warhead.damage_model, DamageModel::Normal);
    assert_eq!(warhead.delay, 0);
}

#[test]
fn test_effectiveness_defaults_to_full() {
    let json = r#"{ "damage": 40, "effectiveness": { "Heavy": 25, "Concrete": 0 } }"#;
    let warhead: WarheadDefinition = serde_json::from_str(json).unwrap();
    assert_eq!(warhead.effectiveness_against(ArmorClass::Heavy), 25);
    assert_eq!(warhead.effectiveness_against(ArmorClass::Concrete), 0);
    assert_eq!(
        warhead.effectiveness_against(ArmorClass::Light),
        DEFAULT_EFFECTIVENESS
    );
}

#[test]
fn test_impact_keys_prefer_water_variant() {
    let json = r#"{
        "damage": 40,
        "explosion": "small_frag",
        "water_explosion": "small_splash",
        "impact_sound": "kaboom12"
    }"#;
    let warhead: WarheadDefinition = serde_json::from_str(json).unwrap();
    assert_eq!(warhead.explosion_for(false), Some("small_frag"));
    assert_eq!(warhead.explosion_for(true), Some("small_splash"));
    // No water sound configured: ground sound plays on water too.
    assert_eq!(warhead.impact_sound_for(true), Some("kaboom12"));
}

#[test]
fn test_armament_spec_parses_barrels() {
    let json = r#"{
        "weapon": "90mm",
        "turret": 0,
        "barrels": [
            { "offset": [400, 60, 0] },
            { "offset": [400, -60, 0], "yaw": 4 }
        ],
        "recoil": 85
    }"#;
    let spec: ArmamentSpec = serde_json::from_str(json).unwrap();
    assert_eq!(spec.name, "primary");
    assert_eq!(spec.barrels.len(), 2);
    assert_eq!(spec.barrels[1].offset, WVec::new(400, -60, 0));
    assert_eq!(spec.barrels[1].yaw, Facing(4));
    assert_eq!(spec.recoil, WDist(85));
    assert_eq!(spec.recoil_recovery, None);
}

// ---- Commands / events ----

/// Tagged unions survive a serde round trip.
#[test]
fn test_command_and_event_serde() {
    let command = CombatCommand::Attack {
        actor: ActorId(7),
        target: OrderTarget::Cell {
            cell: CPos::new(4, 9),
        },
    };
    let json = serde_json::to_string(&command).unwrap();
    let back: CombatCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(command, back);

    let event = CombatEvent::ActivityRequested {
        actor: ActorId(3),
        activity: RequestedActivity::MoveIntoRange {
            target: WPos::new(1, 2, 0),
            min_range: WDist(0),
            max_range: WDist(4096),
        },
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: CombatEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);
}
