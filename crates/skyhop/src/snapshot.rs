//! Relay-facing state snapshot
//!
//! The multiplayer relay is a thin message forwarder that reads one of these
//! per player after the tick completes. Movement stays fully client-local;
//! nothing here feeds back into collision.

use serde::{Deserialize, Serialize};

use hop_engine::prelude::{TransformComponent, Vec3};

/// Position and facing of one player, serialized for the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// World position
    pub position: [f32; 3],
    /// Facing yaw in degrees
    pub yaw: f32,
}

impl PlayerSnapshot {
    /// Capture a transform's position and yaw.
    pub fn capture(transform: &TransformComponent) -> Self {
        Self {
            position: [
                transform.position.x,
                transform.position.y,
                transform.position.z,
            ],
            yaw: transform.yaw(),
        }
    }

    /// The captured position as a vector.
    pub fn position_vec(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_reads_transform() {
        let mut transform = TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0));
        transform.rotation.y = 135.0;

        let snapshot = PlayerSnapshot::capture(&transform);
        assert_eq!(snapshot.position, [1.0, 2.0, 3.0]);
        assert_eq!(snapshot.yaw, 135.0);
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let snapshot = PlayerSnapshot {
            position: [0.5, 0.9, -2.0],
            yaw: 90.0,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: PlayerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
