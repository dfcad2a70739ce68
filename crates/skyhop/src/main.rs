//! Skyhop, a 3rd-person 3D platformer on hop_engine
//!
//! Headless driver: loads the playground level, runs a scripted ten-second
//! session at a fixed 60 Hz, and prints the final relay snapshot. Rendering,
//! input devices, and the relay connection are external collaborators that
//! plug in around this loop.

use std::fs;

use log::info;

use hop_engine::level::parse_level;
use hop_engine::motion::InputState;

use skyhop::config::GameConfig;
use skyhop::simulation::Simulation;

const DT: f32 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    hop_engine::foundation::logging::init();

    let config = match fs::read_to_string("skyhop.toml") {
        Ok(text) => GameConfig::from_toml_str(&text)?,
        Err(_) => GameConfig::default(),
    };

    let level = parse_level(include_str!("../levels/playground.json"))?;
    let mut sim = Simulation::new(&level, config)?;

    // Scripted session: run forward, hop every two seconds.
    for tick in 0..600u32 {
        let input = InputState {
            move_z: 1.0,
            yaw_deg: 0.0,
            jump: tick % 120 == 0,
            ..Default::default()
        };
        sim.tick(&input, DT);

        if tick % 60 == 59 {
            let position = sim.player_position();
            info!(
                "t={:>2}s pos=({:6.2}, {:5.2}, {:6.2}) grounded={}",
                (tick + 1) / 60,
                position.x,
                position.y,
                position.z,
                sim.player_body().grounded
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&sim.player_snapshot())?);
    Ok(())
}
