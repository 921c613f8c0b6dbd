use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PorosityMethod {
    /// Every particle is tested against every cell.
    #[default]
    FullScan,
    /// Particles are bucketed by cell once per pass; same values as
    /// `FullScan`.
    Binned,
    /// `precision³` sub-cell centres are tested for solid occupancy, so
    /// spheres are clipped to the cell. Deviates from the volume
    /// subtraction used by the other two methods.
    Sampled { precision: usize },
}

impl PorosityMethod {
    pub fn parse(method: &str) -> DarcyResult<Self> {
        let words = method.split_whitespace().collect::<Vec<&str>>();
        match words[..] {
            ["full_scan"] => Ok(PorosityMethod::FullScan),
            ["binned"] => Ok(PorosityMethod::Binned),
            ["sampled"] => Ok(PorosityMethod::Sampled {
                precision: SAMPLED_POROSITY_PRECISION,
            }),
            ["sampled", precision] => match precision.parse::<usize>() {
                Ok(precision) if precision > 0 => Ok(PorosityMethod::Sampled { precision }),
                _ => Err(DarcyError::invalid_parameter("porosity_method", method)),
            },
            _ => Err(DarcyError::invalid_parameter("porosity_method", method)),
        }
    }
}

/// Particle indices bucketed by the cell their centre falls into. Centres
/// outside the grid are clamped into the nearest boundary bucket.
pub struct CellBins {
    grid: Grid,
    bins: Vec<Vec<usize>>,
}

impl CellBins {
    pub fn new(grid: &Grid, particles: &[Particle]) -> Self {
        let mut bins = vec![Vec::new(); grid.number_of_cells()];
        for (particle_index, particle) in particles.iter().enumerate() {
            let [x, y, z] = Self::bin_of(grid, &particle.position);
            bins[grid.idx(x, y, z)].push(particle_index);
        }
        Self { grid: *grid, bins }
    }

    fn bin_of(grid: &Grid, position: &[Float; D]) -> [usize; D] {
        let counts = grid.counts();
        let spacing = grid.spacing();
        let mut bin = [0; D];
        for axis in 0..D {
            let i = ((position[axis] - grid.origin[axis]) / spacing[axis]).floor();
            bin[axis] = if i > 0.0 {
                (i as usize).min(counts[axis] - 1)
            } else {
                0
            };
        }
        bin
    }

    /// Particles of the bucket of `(x, y, z)` and its 26 neighbours, in
    /// ascending particle order.
    pub fn candidates(&self, x: usize, y: usize, z: usize) -> Vec<usize> {
        let grid = &self.grid;
        let mut candidates = Vec::new();
        for k in z.saturating_sub(1)..=(z + 1).min(grid.nz - 1) {
            for j in y.saturating_sub(1)..=(y + 1).min(grid.ny - 1) {
                for i in x.saturating_sub(1)..=(x + 1).min(grid.nx - 1) {
                    candidates.extend_from_slice(&self.bins[grid.idx(i, j, k)]);
                }
            }
        }
        candidates.sort_unstable();
        candidates
    }
}

impl Grid {
    fn void_fraction<'a, I>(&self, x: usize, y: usize, z: usize, particles: I) -> Float
    where
        I: IntoIterator<Item = &'a Particle>,
    {
        let x_min = self.cell_min_boundary(x, y, z);
        let x_max = self.cell_max_boundary(x, y, z);
        let cell_volume = self.cell_volume();
        let mut void_volume = cell_volume;
        for particle in particles {
            if particle.is_inside(&x_min, &x_max) {
                void_volume -= particle.volume();
            }
        }
        (void_volume / cell_volume).max(0.0).min(1.0)
    }

    pub fn porosity_full_scan(&self, x: usize, y: usize, z: usize, particles: &[Particle]) -> Float {
        self.void_fraction(x, y, z, particles)
    }

    pub fn porosity_binned(
        &self,
        x: usize,
        y: usize,
        z: usize,
        particles: &[Particle],
        bins: &CellBins,
    ) -> Float {
        self.void_fraction(
            x,
            y,
            z,
            bins.candidates(x, y, z).into_iter().map(|i| &particles[i]),
        )
    }

    pub fn porosity_sampled(
        &self,
        x: usize,
        y: usize,
        z: usize,
        particles: &[Particle],
        precision: usize,
    ) -> Float {
        let x_min = self.cell_min_boundary(x, y, z);
        let x_max = self.cell_max_boundary(x, y, z);
        let overlapping = particles
            .iter()
            .filter(|particle| particle.overlaps_box(&x_min, &x_max))
            .collect::<Vec<&Particle>>();
        if overlapping.is_empty() {
            return 1.0;
        }
        let precision = precision.max(1);
        let spacing = self.spacing().map(|d| d / (precision as Float));
        let mut solid = 0usize;
        for k in 0..precision {
            for j in 0..precision {
                for i in 0..precision {
                    let center = [
                        x_min[0] + (i as Float + 0.5) * spacing[0],
                        x_min[1] + (j as Float + 0.5) * spacing[1],
                        x_min[2] + (k as Float + 0.5) * spacing[2],
                    ];
                    let inside_particle = overlapping.iter().any(|particle| {
                        let distance_2 = (0..D)
                            .map(|a| (center[a] - particle.position[a]).powi(2))
                            .sum::<Float>();
                        distance_2 < particle.radius * particle.radius
                    });
                    if inside_particle {
                        solid += 1;
                    }
                }
            }
        }
        1.0 - (solid as Float) / ((precision * precision * precision) as Float)
    }
}

impl DarcySolver {
    /// Porosity of one cell, cached into the porosity field. Particles are
    /// only read.
    pub fn cell_porosity(&mut self, x: usize, y: usize, z: usize, particles: &[Particle]) -> Float {
        let n = match self.porosity_method {
            PorosityMethod::FullScan | PorosityMethod::Binned => {
                self.grid.porosity_full_scan(x, y, z, particles)
            }
            PorosityMethod::Sampled { precision } => {
                self.grid.porosity_sampled(x, y, z, particles, precision)
            }
        };
        let cell_index = self.idx(x, y, z);
        self.porosity[cell_index] = n;
        n
    }

    /// Recomputes the porosity of every cell from the current particles.
    pub fn find_porosities(&mut self, particles: &[Particle]) {
        let grid = self.grid;
        match self.porosity_method {
            PorosityMethod::FullScan => {
                self.porosity
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(cell_index, n)| {
                        let [x, y, z] = grid.coordinates(cell_index);
                        *n = grid.porosity_full_scan(x, y, z, particles);
                    });
            }
            PorosityMethod::Binned => {
                let bins = CellBins::new(&grid, particles);
                self.porosity
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(cell_index, n)| {
                        let [x, y, z] = grid.coordinates(cell_index);
                        *n = grid.porosity_binned(x, y, z, particles, &bins);
                    });
            }
            PorosityMethod::Sampled { precision } => {
                self.porosity
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(cell_index, n)| {
                        let [x, y, z] = grid.coordinates(cell_index);
                        *n = grid.porosity_sampled(x, y, z, particles, precision);
                    });
            }
        }
    }

    /// Indices of the particles whose centres lie inside cell `(x, y, z)`.
    pub fn particles_in_cell(&self, x: usize, y: usize, z: usize, particles: &[Particle]) -> Vec<usize> {
        let x_min = self.grid.cell_min_boundary(x, y, z);
        let x_max = self.grid.cell_max_boundary(x, y, z);
        particles
            .iter()
            .enumerate()
            .filter(|(_, particle)| particle.is_inside(&x_min, &x_max))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::unit_solver;
    use super::*;
    use crate::particles::sphere_volume;
    use approx::assert_relative_eq;

    fn packed_particles() -> Vec<Particle> {
        let mut particles = Vec::new();
        for i in 0..200 {
            let t = i as Float;
            let position = [
                (t * 0.731).rem_euclid(4.0),
                (t * 1.379).rem_euclid(4.0),
                (t * 2.113).rem_euclid(4.0),
            ];
            particles.push(Particle::new(position, 0.05 + 0.4 * ((t * 0.37).sin().abs())));
        }
        particles.push(Particle::new([1.0, 1.0, 1.0], 0.2));
        particles.push(Particle::new([4.0, 0.5, 0.5], 0.2));
        particles.push(Particle::new([-0.5, 0.5, 0.5], 0.2));
        particles
    }

    #[test]
    fn empty_cells_are_fully_porous() {
        let mut solver = unit_solver(4);
        solver.find_porosities(&[]);
        assert!(solver.porosity().iter().all(|&n| n == 1.0));
    }

    #[test]
    fn one_particle_lowers_only_its_cell() {
        let mut solver = unit_solver(4);
        let particles = [Particle::new([1.5, 2.5, 0.5], 0.3)];
        solver.find_porosities(&particles);
        let grid = solver.grid;
        for (i, &n) in solver.porosity().iter().enumerate() {
            if i == grid.idx(1, 2, 0) {
                assert_relative_eq!(n, 1.0 - sphere_volume(0.3), epsilon = 1e-12);
                assert_relative_eq!(n, 0.8869, epsilon = 1e-4);
            } else {
                assert_eq!(n, 1.0);
            }
        }
    }

    #[test]
    fn straddling_particles_subtract_their_full_volume() {
        let mut solver = unit_solver(4);
        let particles = [Particle::new([1.0, 0.5, 0.5], 0.4)];
        let n = solver.cell_porosity(1, 0, 0, &particles);
        assert_relative_eq!(n, 1.0 - sphere_volume(0.4), epsilon = 1e-12);
        assert_eq!(solver.cell_porosity(0, 0, 0, &particles), 1.0);
        assert_eq!(solver.porosity()[solver.idx(1, 0, 0)], n);
    }

    #[test]
    fn overfull_cells_clamp_to_zero() {
        let mut solver = unit_solver(4);
        let particles = vec![Particle::new([0.5, 0.5, 0.5], 0.9); 3];
        assert_eq!(solver.cell_porosity(0, 0, 0, &particles), 0.0);
        for method in [
            PorosityMethod::FullScan,
            PorosityMethod::Binned,
            PorosityMethod::Sampled { precision: 4 },
        ] {
            solver.porosity_method = method;
            solver.find_porosities(&packed_particles());
            assert!(solver.porosity().iter().all(|&n| (0.0..=1.0).contains(&n)));
        }
    }

    #[test]
    fn binned_porosity_matches_full_scan_exactly() {
        let particles = packed_particles();
        let mut full = unit_solver(4);
        let mut binned = unit_solver(4);
        binned.porosity_method = PorosityMethod::Binned;
        full.find_porosities(&particles);
        binned.find_porosities(&particles);
        assert_eq!(full.porosity(), binned.porosity());
    }

    #[test]
    fn repeated_queries_are_deterministic_and_read_only() {
        let particles = packed_particles();
        let before = particles.clone();
        let mut solver = unit_solver(4);
        let first = solver.cell_porosity(1, 1, 1, &particles);
        let second = solver.cell_porosity(1, 1, 1, &particles);
        assert_eq!(first, second);
        assert_eq!(particles, before);
    }

    #[test]
    fn sampled_porosity_clips_to_the_cell() {
        let mut solver = unit_solver(4);
        solver.porosity_method = PorosityMethod::Sampled { precision: 20 };
        let centered = [Particle::new([1.5, 1.5, 1.5], 0.3)];
        let n = solver.cell_porosity(1, 1, 1, &centered);
        assert_relative_eq!(n, 1.0 - sphere_volume(0.3), epsilon = 1e-2);
        let straddling = [Particle::new([2.0, 1.5, 1.5], 0.3)];
        let left = solver.cell_porosity(1, 1, 1, &straddling);
        let right = solver.cell_porosity(2, 1, 1, &straddling);
        assert_relative_eq!(left, right, epsilon = 1e-12);
        assert_relative_eq!(left, 1.0 - 0.5 * sphere_volume(0.3), epsilon = 1e-2);
        let engulfing = [Particle::new([1.5, 1.5, 1.5], 2.0)];
        assert_eq!(solver.cell_porosity(1, 1, 1, &engulfing), 0.0);
    }

    #[test]
    fn particles_in_cell_uses_the_half_open_box() {
        let solver = unit_solver(4);
        let particles = [
            Particle::new([1.0, 1.0, 1.0], 0.1),
            Particle::new([2.0, 1.5, 1.5], 0.1),
            Particle::new([1.99, 1.5, 1.5], 0.1),
        ];
        assert_eq!(solver.particles_in_cell(1, 1, 1, &particles), vec![0, 2]);
        assert_eq!(solver.particles_in_cell(2, 1, 1, &particles), vec![1]);
    }

    #[test]
    fn porosity_method_parsing() {
        assert_eq!(PorosityMethod::parse("binned").unwrap(), PorosityMethod::Binned);
        assert_eq!(
            PorosityMethod::parse("sampled 6").unwrap(),
            PorosityMethod::Sampled { precision: 6 }
        );
        assert!(PorosityMethod::parse("sampled 0").is_err());
        assert!(PorosityMethod::parse("exact").is_err());
    }
}
