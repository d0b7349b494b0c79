//! Particle records
//!
//! A particle is one non-empty occupant of a grid cell. Its position mirrors
//! the cell it occupies; the grid owns the spatial index and the world keeps
//! both in sync.

use crate::{Kind, Rgba};

/// Stable identity of a particle for its whole lifetime.
///
/// Two particles of the same kind, color and state are still different
/// particles; neighbor scans and registry removal compare ids, never values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

impl ParticleId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Burn state carried by fire particles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireState {
    /// Ticks burned so far (dousing with water adds 20)
    pub lifetime: u32,
    /// Burns out once `lifetime` reaches this
    pub max_lifetime: u32,
    /// Percent chance per tick to rise
    pub chance_to_rise: i32,
}

/// Condensation parameters carried by steam particles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SteamState {
    /// Percent chance near the top (per-mille when crowded) to rain or strike
    pub chance_to_rain: i32,
}

/// Kind-specific transient state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParticleState {
    #[default]
    Inert,
    Fire(FireState),
    Steam(SteamState),
}

/// A single material particle on the grid
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub x: i32,
    pub y: i32,
    pub kind: Kind,
    pub color: Rgba,
    pub state: ParticleState,
}

impl Particle {
    pub fn new(id: ParticleId, x: i32, y: i32, kind: Kind, color: Rgba) -> Self {
        Self {
            id,
            x,
            y,
            kind,
            color,
            state: ParticleState::Inert,
        }
    }

    pub fn with_state(mut self, state: ParticleState) -> Self {
        self.state = state;
        self
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn fire_state(&self) -> Option<&FireState> {
        match &self.state {
            ParticleState::Fire(fire) => Some(fire),
            _ => None,
        }
    }

    pub fn fire_state_mut(&mut self) -> Option<&mut FireState> {
        match &mut self.state {
            ParticleState::Fire(fire) => Some(fire),
            _ => None,
        }
    }

    pub fn steam_state(&self) -> Option<&SteamState> {
        match &self.state {
            ParticleState::Steam(steam) => Some(steam),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_particle_is_inert() {
        let particle = Particle::new(ParticleId::from_raw(7), 3, 4, Kind::Sand, [1, 2, 3, 255]);
        assert_eq!(particle.position(), (3, 4));
        assert_eq!(particle.state, ParticleState::Inert);
        assert_eq!(particle.id.raw(), 7);
    }

    #[test]
    fn test_fire_state_access() {
        let mut particle = Particle::new(ParticleId::from_raw(1), 0, 0, Kind::Fire, [0; 4])
            .with_state(ParticleState::Fire(FireState {
                lifetime: 0,
                max_lifetime: 30,
                chance_to_rise: 60,
            }));

        particle.fire_state_mut().unwrap().lifetime += 5;
        assert!(matches!(
            particle.state,
            ParticleState::Fire(FireState { lifetime: 5, .. })
        ));
        assert!(particle.steam_state().is_none());
    }

    #[test]
    fn test_identity_differs_for_equal_values() {
        let a = Particle::new(ParticleId::from_raw(1), 0, 0, Kind::Wood, [99, 60, 3, 255]);
        let mut b = a.clone();
        b.id = ParticleId::from_raw(2);
        assert_ne!(a, b);
        assert_ne!(a.id, b.id);
    }
}
