//! Particle registry - ordered secondary index of every live particle
//!
//! Insertion order is creation order. Removal is O(1) amortized: the id
//! leaves the lookup table immediately and its slot in the order list is
//! compacted away once enough dead slots pile up.

use ahash::HashMap;

use crate::simulation::{Particle, ParticleId};

/// Dead order slots tolerated before compaction is considered
const COMPACT_THRESHOLD: usize = 64;

#[derive(Default)]
pub struct ParticleRegistry {
    particles: HashMap<ParticleId, Particle>,
    order: Vec<ParticleId>,
    dead_slots: usize,
}

impl ParticleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly created particle
    pub fn insert(&mut self, particle: Particle) {
        let id = particle.id;
        let previous = self.particles.insert(id, particle);
        debug_assert!(previous.is_none(), "particle {id:?} registered twice");
        self.order.push(id);
    }

    /// Remove a particle, returning it if it was registered
    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let removed = self.particles.remove(&id)?;
        self.dead_slots += 1;
        if self.dead_slots > COMPACT_THRESHOLD && self.dead_slots * 2 > self.order.len() {
            self.compact();
        }
        Some(removed)
    }

    fn compact(&mut self) {
        let particles = &self.particles;
        self.order.retain(|id| particles.contains_key(id));
        self.dead_slots = 0;
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(&id)
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.particles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.order.clear();
        self.dead_slots = 0;
    }

    /// Live ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|id| self.particles.contains_key(id))
    }

    /// Live particles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.order.iter().filter_map(|id| self.particles.get(id))
    }
}
