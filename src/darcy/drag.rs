use super::*;
use crate::particles::ParticleAssembly;

/// What a drag model sees for one particle: the cell owning the particle
/// centre and the fluid state of that cell.
#[derive(Clone, Copy, Debug)]
pub struct DragInput<'a> {
    pub cell: [usize; D],
    pub fluid_velocity: [Float; D],
    pub porosity: Float,
    pub viscosity: Float,
    pub particle: &'a Particle,
}

pub trait DragModel: Sync {
    fn drag_force(&self, input: &DragInput) -> [Float; D];
}

/// Transfers no force to the particles.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDrag;

impl DragModel for NoDrag {
    fn drag_force(&self, _input: &DragInput) -> [Float; D] {
        [0.0; D]
    }
}

impl DarcySolver {
    /// Adds the drag of every cell onto the particles whose centres lie in it.
    /// A particle belongs to at most one cell, so every force accumulator has
    /// a single writer. Particles outside the grid receive nothing.
    pub fn fluid_drag<M: DragModel>(&self, assembly: &mut ParticleAssembly, model: &M) {
        let grid = self.grid;
        let velocity = &self.velocity;
        let porosity = &self.porosity;
        let viscosity = self.viscosity;
        assembly.fit_forces();
        let ParticleAssembly { particles, forces } = assembly;
        forces
            .par_iter_mut()
            .zip(particles.par_iter())
            .for_each(|(force, particle)| {
                if let Some(cell) = grid.locate(&particle.position) {
                    let [x, y, z] = cell;
                    let cell_index = grid.idx(x, y, z);
                    let drag = model.drag_force(&DragInput {
                        cell,
                        fluid_velocity: velocity[cell_index],
                        porosity: porosity[cell_index],
                        viscosity,
                        particle,
                    });
                    for axis in 0..D {
                        force[axis] += drag[axis];
                    }
                }
            });
    }
}
