//! The fixed-order simulation tick
//!
//! One tick advances input, motion, gravity, integration, collision
//! resolution, and the respawn check, in that strict order, for every
//! dynamic body. All state is owned here and passed explicitly; there are no
//! ambient globals. The multiplayer relay reads a snapshot after the tick
//! completes and never participates in collision.

use log::{debug, info};
use thiserror::Error;

use hop_engine::collision::{resolve_body, CollisionWorld, ConfigError};
use hop_engine::ecs::Entity;
use hop_engine::level::{build_collision_world, LevelData, LevelError};
use hop_engine::motion::{apply_gravity, apply_input, integrate, InputState};
use hop_engine::prelude::{clamp_dt, DynamicBody, Vec3};

use crate::config::GameConfig;
use crate::snapshot::PlayerSnapshot;
use crate::world::GameWorld;

/// Errors produced while constructing a simulation
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Tuning failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The level could not be ingested
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// The whole client-local game state
pub struct Simulation {
    pub(crate) world: GameWorld,
    collision: CollisionWorld,
    config: GameConfig,
    player: Entity,
    ticks: u64,
}

impl Simulation {
    /// Build a simulation from a parsed level and validated tuning.
    pub fn new(level: &LevelData, config: GameConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let collision = build_collision_world(level, &config.collision)?;

        let mut world = GameWorld::new();
        let spawn = Vec3::new(level.spawn[0], level.spawn[1], level.spawn[2]);
        let player = world.spawn_player(spawn, config.player_radius);
        for npc in &level.npcs {
            world.spawn_npc(npc);
        }

        info!(
            "simulation ready: {} entities ({} dynamic), {} collision triangles",
            world.entity_count(),
            world.dynamic_entities().len(),
            collision.triangle_count()
        );

        Ok(Self {
            world,
            collision,
            config,
            player,
            ticks: 0,
        })
    }

    /// Advance the world by one tick.
    ///
    /// `raw_dt` is clamped to the engine's upper bound so a stalled frame
    /// cannot produce an integration step the solver was not tuned for.
    pub fn tick(&mut self, input: &InputState, raw_dt: f32) {
        let dt = clamp_dt(raw_dt);
        let player = self.player;

        let GameWorld {
            transforms,
            movements,
            bodies,
            ..
        } = &mut self.world;

        for (entity, body) in bodies.iter_mut() {
            let Some(transform) = transforms.get_mut(entity) else {
                continue;
            };
            let Some(movement) = movements.get_mut(entity) else {
                continue;
            };

            if entity == player {
                apply_input(input, &self.config.motion, transform, movement, body);
            }
            apply_gravity(&self.config.motion, movement, body, dt);
            integrate(transform, movement, dt);
            resolve_body(
                &self.collision,
                &self.config.collision,
                body,
                &mut transform.position,
                &mut movement.velocity,
            );
        }

        self.respawn_fallen();
        self.ticks += 1;
    }

    /// Reset any body that fell past the kill plane back to its spawn point.
    fn respawn_fallen(&mut self) {
        let kill_y = self.config.kill_plane_y;
        let fallen: Vec<Entity> = self
            .world
            .transforms
            .iter()
            .filter(|(_, t)| t.position.y < kill_y)
            .map(|(entity, _)| entity)
            .collect();

        for entity in fallen {
            let spawn = self
                .world
                .players
                .get(entity)
                .map(|p| p.spawn_point)
                .or_else(|| self.world.npcs.get(entity).map(|n| n.spawn_point));
            let Some(spawn) = spawn else {
                continue;
            };
            if let Some(transform) = self.world.transforms.get_mut(entity) {
                transform.position = spawn;
            }
            if let Some(movement) = self.world.movements.get_mut(entity) {
                movement.stop();
            }
            if let Some(body) = self.world.bodies.get_mut(entity) {
                body.reset();
            }
            debug!("respawned entity at {spawn:?}");
        }
    }

    /// Snapshot of the player for the relay.
    pub fn player_snapshot(&self) -> PlayerSnapshot {
        let transform = self
            .world
            .transforms
            .get(self.player)
            .expect("player transform always exists");
        PlayerSnapshot::capture(transform)
    }

    /// Current player position
    pub fn player_position(&self) -> Vec3 {
        self.world
            .transforms
            .get(self.player)
            .expect("player transform always exists")
            .position
    }

    /// Current player collision state
    pub fn player_body(&self) -> &DynamicBody {
        self.world
            .bodies
            .get(self.player)
            .expect("player body always exists")
    }

    /// Ticks simulated so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hop_engine::assets::parse_obj_str;
    use hop_engine::level::{parse_level, ColliderData};

    const DT: f32 = 0.016;

    fn platform_level() -> LevelData {
        parse_level(
            r#"{
                "name": "platform",
                "spawn": [0.0, 5.0, 0.0],
                "colliders": [
                    { "type": "box", "pos": [0.0, 0.0, 0.0], "size": [4.0, 1.0, 4.0] }
                ]
            }"#,
        )
        .unwrap()
    }

    /// Level containing a single large ramp rising toward +Z at the given
    /// angle, authored as an OBJ export.
    fn ramp_level(angle_deg: f32) -> LevelData {
        let t = angle_deg.to_radians().tan();
        let obj = format!(
            "v -5 {lo} -5\nv 5 {lo} -5\nv 0 {hi} 5\nf 1 3 2\n",
            lo = -5.0 * t,
            hi = 5.0 * t
        );
        let mesh = parse_obj_str(&obj).unwrap();
        LevelData {
            name: format!("ramp {angle_deg}"),
            spawn: [0.0, 0.6, 0.0],
            colliders: vec![ColliderData::Mesh {
                pos: [0.0, 0.0, 0.0],
                rot: [0.0, 0.0, 0.0],
                scale: [1.0, 1.0, 1.0],
                vertices: mesh.vertices.iter().map(|v| [v.x, v.y, v.z]).collect(),
                faces: mesh.faces.clone(),
            }],
            npcs: Vec::new(),
        }
    }

    #[test]
    fn test_box_platform_landing_scenario() {
        let level = platform_level();
        let mut sim = Simulation::new(&level, GameConfig::default()).unwrap();
        // Falling hard onto the platform.
        sim.world
            .movements
            .get_mut(sim.player)
            .unwrap()
            .velocity = Vec3::new(0.0, -20.0, 0.0);

        let idle = InputState::idle(0.0);
        for _ in 0..120 {
            sim.tick(&idle, DT);
        }

        let tolerance = GameConfig::default().collision.grounding_tolerance;
        assert!(sim.player_body().grounded);
        // Rest height = box top (0.5) + radius (0.4).
        assert_relative_eq!(sim.player_position().y, 0.9, epsilon = tolerance + 1e-4);
        assert_relative_eq!(sim.player_position().x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ramp_at_44_degrees_stays_grounded_while_traversing() {
        let level = ramp_level(44.0);
        let mut sim = Simulation::new(&level, GameConfig::default()).unwrap();

        let idle = InputState::idle(0.0);
        for _ in 0..5 {
            sim.tick(&idle, DT);
        }
        assert!(sim.player_body().grounded, "must settle onto the 44-degree ramp");

        // Walk uphill (+Z at yaw 0); grounding must hold the whole way.
        let uphill = InputState {
            move_z: 1.0,
            ..InputState::idle(0.0)
        };
        for _ in 0..20 {
            sim.tick(&uphill, DT);
            assert!(sim.player_body().grounded);
            assert!(sim.player_body().steep_slope.is_none());
        }
        assert!(sim.player_position().z > 1.0, "player should have moved uphill");
    }

    #[test]
    fn test_ramp_at_46_degrees_is_steep_and_slides() {
        let level = ramp_level(46.0);
        let mut sim = Simulation::new(&level, GameConfig::default()).unwrap();

        let idle = InputState::idle(0.0);
        for _ in 0..30 {
            sim.tick(&idle, DT);
            assert!(!sim.player_body().grounded, "46 degrees must never ground");
        }

        let steep = sim
            .player_body()
            .steep_slope
            .expect("steep slope must be tracked");
        assert_relative_eq!(steep.y, 46.0_f32.to_radians().cos(), epsilon = 1e-3);
        // Slide acceleration pushes downhill, which is -Z on this ramp.
        assert!(sim.player_position().z < 0.0);
    }

    #[test]
    fn test_kill_plane_respawns_player() {
        let level = parse_level(
            r#"{ "name": "void", "spawn": [0.0, 2.0, 0.0], "colliders": [] }"#,
        )
        .unwrap();
        let mut sim = Simulation::new(&level, GameConfig::default()).unwrap();

        let idle = InputState::idle(0.0);
        let mut respawned = false;
        for tick in 0..400 {
            sim.tick(&idle, DT);
            let y = sim.player_position().y;
            assert!(y >= GameConfig::default().kill_plane_y - 2.0);
            if tick > 60 && y > 0.0 {
                respawned = true;
            }
        }
        assert!(respawned, "player must cycle back to the spawn point");
    }

    #[test]
    fn test_dt_is_clamped() {
        let level = parse_level(
            r#"{ "name": "void", "spawn": [0.0, 100.0, 0.0], "colliders": [] }"#,
        )
        .unwrap();
        let mut sim = Simulation::new(&level, GameConfig::default()).unwrap();

        // A one-second stall must not produce a one-second Euler step.
        sim.tick(&InputState::idle(0.0), 1.0);
        let fallen = 100.0 - sim.player_position().y;
        let max_step = GameConfig::default().motion.gravity
            * hop_engine::prelude::MAX_TICK_SECONDS
            * hop_engine::prelude::MAX_TICK_SECONDS;
        assert!(fallen <= max_step + 1e-4, "fell {fallen} in one clamped tick");
    }

    #[test]
    fn test_npcs_share_the_body_pipeline() {
        let level = parse_level(
            r#"{
                "name": "npc test",
                "spawn": [0.0, 1.0, 0.0],
                "colliders": [
                    { "type": "box", "pos": [0.0, -0.5, 0.0], "size": [20.0, 1.0, 20.0] }
                ],
                "npcs": [ { "pos": [3.0, 2.0, 3.0], "name": "porter" } ]
            }"#,
        )
        .unwrap();
        let mut sim = Simulation::new(&level, GameConfig::default()).unwrap();
        assert_eq!(sim.world.entity_count(), 2);

        let idle = InputState::idle(0.0);
        for _ in 0..120 {
            sim.tick(&idle, DT);
        }

        let (npc, _) = sim.world.npcs.iter().next().unwrap();
        let body = sim.world.bodies.get(npc).unwrap();
        let transform = sim.world.transforms.get(npc).unwrap();
        assert!(body.grounded);
        // Ground plane top is at y = 0; NPC radius defaults to 0.4.
        assert_relative_eq!(transform.position.y, 0.4, epsilon = 0.011);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let level = parse_level(
            r#"{
                "name": "broken",
                "spawn": [0.0, 0.0, 0.0],
                "colliders": [
                    {
                        "type": "mesh",
                        "pos": [0.0, 0.0, 0.0],
                        "vertices": [[0, 0, 0], [1, 0, 0], [0, 0, 1]],
                        "faces": [[0, 1, 7]]
                    }
                ]
            }"#,
        )
        .unwrap();
        let result = Simulation::new(&level, GameConfig::default());
        assert!(matches!(result, Err(SimulationError::Level(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let level = platform_level();
        let config = GameConfig {
            player_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::new(&level, config),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_jump_from_platform() {
        let level = platform_level();
        let mut sim = Simulation::new(&level, GameConfig::default()).unwrap();

        let idle = InputState::idle(0.0);
        for _ in 0..120 {
            sim.tick(&idle, DT);
        }
        assert!(sim.player_body().grounded);
        let rest_y = sim.player_position().y;

        let jump = InputState {
            jump: true,
            ..InputState::idle(0.0)
        };
        sim.tick(&jump, DT);
        assert!(!sim.player_body().grounded);

        // A few ticks later the player is clearly above the rest height.
        for _ in 0..10 {
            sim.tick(&idle, DT);
        }
        assert!(sim.player_position().y > rest_y + 0.5);
    }
}
