use crate::global_variables::*;
use std::f64::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: [Float; D],

    pub radius: Float,
}

impl Particle {
    pub fn new(position: [Float; D], radius: Float) -> Self {
        Self { position, radius }
    }

    pub fn volume(&self) -> Float {
        sphere_volume(self.radius)
    }

    /// Half-open containment of the centre: `min <= x < max` on every axis.
    pub fn is_inside(&self, min: &[Float; D], max: &[Float; D]) -> bool {
        let x = &self.position;
        x[0] >= min[0]
            && x[1] >= min[1]
            && x[2] >= min[2]
            && x[0] < max[0]
            && x[1] < max[1]
            && x[2] < max[2]
    }

    pub fn overlaps_box(&self, min: &[Float; D], max: &[Float; D]) -> bool {
        let distance_2 = (0..D)
            .map(|a| {
                let closest = self.position[a].clamp(min[a], max[a]);
                (self.position[a] - closest).powi(2)
            })
            .sum::<Float>();
        distance_2 < self.radius * self.radius
    }
}

pub fn sphere_volume(radius: Float) -> Float {
    4.0 / 3.0 * PI * radius * radius * radius
}

/// Particle positions and radii as handed over by the host simulation,
/// together with the external force accumulator the drag hook writes into.
#[derive(Clone, Debug, Default)]
pub struct ParticleAssembly {
    pub particles: Vec<Particle>,

    pub forces: Vec<[Float; D]>,
}

impl ParticleAssembly {
    pub fn new(particles: Vec<Particle>) -> Self {
        let forces = vec![[0.0; D]; particles.len()];
        Self { particles, forces }
    }

    pub fn np(&self) -> usize {
        self.particles.len()
    }

    pub fn reset_forces(&mut self) {
        self.fit_forces();
        self.forces.iter_mut().for_each(|force| *force = [0.0; D]);
    }

    /// One accumulator per particle: missing ones start at zero and extra
    /// ones are dropped.
    pub fn fit_forces(&mut self) {
        self.forces.resize(self.particles.len(), [0.0; D]);
    }

    /// Replaces positions and radii; accumulators are resized and zeroed.
    pub fn refresh(&mut self, particles: Vec<Particle>) {
        self.forces = vec![[0.0; D]; particles.len()];
        self.particles = particles;
    }

    pub fn min_position(&self) -> Option<[Float; D]> {
        self.particles.iter().map(|p| p.position).reduce(|a, b| {
            [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])]
        })
    }

    pub fn max_position(&self) -> Option<[Float; D]> {
        self.particles.iter().map(|p| p.position).reduce(|a, b| {
            [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])]
        })
    }
}
