//! Combat engine: the deterministic lockstep core.
//!
//! `CombatEngine` owns the hecs ECS world, the shared random source, the
//! weapon catalog and the map. It processes queued combat orders, runs all
//! systems in a fixed order and returns the events each tick produced.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use salvo_attack::AttackRefusal;
use salvo_core::commands::CombatCommand;
use salvo_core::constants::DEFAULT_RECOIL_RECOVERY;
use salvo_core::enums::RequestedActivity;
use salvo_core::events::CombatEvent;
use salvo_core::{ActorId, Facing, Result, SimTime, WDist, WPos};
use salvo_terrain::MapGrid;

use crate::catalog::WeaponCatalog;
use crate::components::Attacker;
use crate::impact::ImpactQueue;
use crate::modifiers::Multiplier;
use crate::projectile::ProjectileArgs;
use crate::systems;
use crate::systems::armament::Launch;
use crate::systems::attack::Snapshot;
use crate::target::{actor_id, entity_of, Target};
use crate::world_setup::{self, CombatantSpec};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Recoil recovered per tick by armaments that do not set their own.
    pub default_recoil_recovery: WDist,
    /// Emit the state hash in the per-tick debug event.
    pub log_state_hash: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            default_recoil_recovery: WDist(DEFAULT_RECOIL_RECOVERY),
            log_state_hash: true,
        }
    }
}

/// The combat engine. Owns the ECS world and all sim state.
pub struct CombatEngine {
    world: World,
    map: MapGrid,
    catalog: WeaponCatalog,
    config: SimConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<CombatCommand>,
    despawn_buffer: Vec<Entity>,
    launches: Vec<Launch>,
    impacts: ImpactQueue,
    /// Ballistic shots handed to the projectile collaborator.
    launched: Vec<ProjectileArgs>,
    events: Vec<CombatEvent>,
}

impl CombatEngine {
    /// Create an engine. Fails if a weapon needs a map layer that is missing.
    pub fn new(config: SimConfig, catalog: WeaponCatalog, map: MapGrid) -> Result<Self> {
        catalog.validate_against(&map)?;
        info!(
            seed = config.seed,
            weapons = catalog.len(),
            width = map.width(),
            height = map.height(),
            "combat engine started"
        );
        Ok(Self {
            world: World::new(),
            map,
            catalog,
            config,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            launches: Vec::new(),
            impacts: ImpactQueue::new(),
            launched: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Spawn a combatant from its spec.
    pub fn spawn(&mut self, spec: &CombatantSpec) -> Result<ActorId> {
        let entity = world_setup::spawn_combatant(
            &mut self.world,
            &self.catalog,
            spec,
            self.config.default_recoil_recovery,
        )?;
        Ok(actor_id(entity))
    }

    /// Queue a combat order for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: CombatCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = CombatCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the events it produced.
    pub fn tick(&mut self) -> Vec<CombatEvent> {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        if self.config.log_state_hash {
            debug!(tick = self.time.tick, state_hash = self.state_hash(), "tick");
        } else {
            debug!(tick = self.time.tick, "tick");
        }
        std::mem::take(&mut self.events)
    }

    /// Projectile collaborator callback: the shot reached `args.destination`.
    /// Its warheads are resolved in the next end-of-frame queue.
    pub fn detonate(&mut self, args: ProjectileArgs) {
        self.impacts.push(args);
    }

    /// Detonate every warhead of `weapon` at `position`, e.g. a death explosion.
    pub fn explode_at(&mut self, attacker: ActorId, weapon: &str, position: WPos) -> Result<()> {
        let weapon = self.catalog.get(weapon)?;
        let Some(firer) = entity_of(attacker) else {
            warn!(?attacker, "explosion from unknown actor ignored");
            return Ok(());
        };
        self.impacts.push(ProjectileArgs {
            weapon,
            firer,
            target: Target::Position(position),
            source: position,
            facing: Facing::default(),
            barrel: 0,
            destination: position,
            firepower: Multiplier::IDENTITY,
        });
        Ok(())
    }

    /// Whether `actor` could fire at its current target right now.
    pub fn can_attack(&self, actor: ActorId) -> bool {
        self.refusal(actor).is_none()
    }

    /// Why `actor` cannot fire at its current target right now, if it cannot.
    /// Actors that cannot attack at all report `NoTarget`.
    pub fn refusal(&self, actor: ActorId) -> Option<AttackRefusal> {
        let snapshot = self
            .entity(actor)
            .and_then(|entity| Snapshot::gather(&self.world, &self.map, entity));
        match snapshot {
            Some(snapshot) => snapshot.decide().refusal,
            None => Some(AttackRefusal::NoTarget),
        }
    }

    /// Consistency hash of all simulation state.
    pub fn state_hash(&self) -> u64 {
        systems::hash::state_hash(&self.world, self.time, &self.impacts)
    }

    /// Ballistic shots released since the last call.
    pub fn take_launched_projectiles(&mut self) -> Vec<ProjectileArgs> {
        std::mem::take(&mut self.launched)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the ECS world, for collaborators that
    /// move actors or change their modifiers between ticks.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn map(&self) -> &MapGrid {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapGrid {
        &mut self.map
    }

    pub fn catalog(&self) -> &WeaponCatalog {
        &self.catalog
    }

    pub fn impacts(&self) -> &ImpactQueue {
        &self.impacts
    }

    /// The live entity behind an actor id.
    pub fn entity(&self, actor: ActorId) -> Option<Entity> {
        entity_of(actor).filter(|e| self.world.contains(*e))
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single combat order.
    fn handle_command(&mut self, command: CombatCommand) {
        match command {
            CombatCommand::Attack { actor, target } => {
                let target = Target::from_order(target, &self.world);
                let Some(attacker) = self.attacker_mut(actor) else {
                    return;
                };
                attacker.target = target;
                attacker.state.reset_request();
            }
            CombatCommand::Stop { actor } => {
                let Some(attacker) = self.attacker_mut(actor) else {
                    return;
                };
                attacker.target = Target::Invalid;
                if attacker.state.request(RequestedActivity::Idle) {
                    self.events.push(CombatEvent::ActivityRequested {
                        actor,
                        activity: RequestedActivity::Idle,
                    });
                }
            }
        }
    }

    fn attacker_mut(&mut self, actor: ActorId) -> Option<&mut Attacker> {
        let attacker = entity_of(actor)
            .and_then(|entity| self.world.query_one_mut::<&mut Attacker>(entity).ok());
        if attacker.is_none() {
            warn!(?actor, "order for unknown attacker ignored");
        }
        attacker
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Armament countdowns, recoil and shots whose launch delay ran out
        systems::armament::run(&mut self.world, &mut self.launches);
        self.release_launches();
        // 2. Turret rotation
        systems::turret::run(&mut self.world);
        // 3. Charge recharge and fire holds
        systems::recharge::run(&mut self.world);
        // 4. Firing-mode evaluation and trigger pulls
        systems::attack::run(
            &mut self.world,
            &self.map,
            &mut self.rng,
            &mut self.launches,
            &mut self.events,
        );
        self.release_launches();
        // 5. End-of-frame impacts and delayed warheads
        self.impacts
            .run_frame_end(&mut self.world, &mut self.map, &mut self.events);
        // 6. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    fn release_launches(&mut self) {
        if self.launches.is_empty() {
            return;
        }
        trace!(count = self.launches.len(), "releasing shots");
        systems::armament::release(
            &self.world,
            &mut self.launches,
            &mut self.impacts,
            &mut self.launched,
            &mut self.events,
        );
    }
}

impl std::fmt::Debug for CombatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEngine")
            .field("tick", &self.time.tick)
            .field("entities", &self.world.len())
            .field("weapons", &self.catalog.len())
            .finish()
    }
}
