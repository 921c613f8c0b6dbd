use super::*;

impl DarcySolver {
    /// Darcy flux `q = -K/nu * dH` and pore velocity `v = q/n`. Porosity is
    /// recomputed from the particles on every call.
    pub fn find_velocities(&mut self, particles: &[Particle]) {
        self.find_porosities(particles);
        let nu = self.viscosity;
        self.velocity
            .par_iter_mut()
            .zip(self.gradient.par_iter())
            .zip(self.conductivity.par_iter())
            .zip(self.porosity.par_iter())
            .for_each(|(((v, dh), &k), &n)| {
                let q = [-k / nu * dh[0], -k / nu * dh[1], -k / nu * dh[2]];
                *v = [q[0] / n, q[1] / n, q[2] / n];
            });
    }
}
