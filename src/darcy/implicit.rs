use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterativeParameters {
    /// Weight of the neighbour average blended into each interior cell after
    /// convergence. Zero disables the smoothing.
    pub relaxation: Float,
    /// Weight of the new Jacobi estimate against the previous iterate.
    pub under_relaxation: Float,
    pub tolerance: Float,
    pub max_iter: usize,
    pub residual_check_interval: usize,
}

impl Default for IterativeParameters {
    fn default() -> Self {
        Self {
            relaxation: RELAXATION,
            under_relaxation: UNDER_RELAXATION,
            tolerance: TOLERANCE_PRESSURE,
            max_iter: MAX_ITER,
            residual_check_interval: RESIDUAL_CHECK_INTERVAL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceReport {
    pub iterations: usize,
    pub residual: Float,
}

impl DarcySolver {
    /// Backward Euler pressure step solved by under-relaxed Jacobi
    /// iterations. Boundary cells only receive the recharge, as in the
    /// explicit scheme. On success the pressure is replaced and gradients,
    /// boundary condition and velocities are recomputed from it; on
    /// non-convergence the pressure is left as it was.
    pub fn implicit_step(
        &mut self,
        dt: Float,
        particles: &[Particle],
        parameters: &IterativeParameters,
    ) -> DarcyResult<ConvergenceReport> {
        let grid = self.grid;
        let inverse_spacing_2 = grid.spacing().map(|d| 1.0 / (d * d));
        let diagonal_sum = 2.0 * inverse_spacing_2.iter().sum::<Float>();
        let theta = parameters.under_relaxation;
        let check_interval = parameters.residual_check_interval.max(1);
        let conductivity = &self.conductivity;

        let source = self
            .pressure
            .par_iter()
            .zip(self.recharge.par_iter())
            .map(|(&h, &w)| h + w * dt)
            .collect::<Vec<Float>>();
        let mut current = source.clone();
        let mut next = source.clone();
        let mut iterations = 0;
        let mut residual = Float::INFINITY;

        loop {
            if iterations >= parameters.max_iter {
                return Err(DarcyError::NonConvergence {
                    iterations,
                    residual,
                    tolerance: parameters.tolerance,
                });
            }

            next.par_iter_mut().enumerate().for_each(|(cell_index, h_next)| {
                let [x, y, z] = grid.coordinates(cell_index);
                if grid.is_boundary(x, y, z) {
                    *h_next = source[cell_index];
                    return;
                }
                let k = conductivity[cell_index];
                let neighbours = (current[grid.idx(x + 1, y, z)] + current[grid.idx(x - 1, y, z)])
                    * inverse_spacing_2[0]
                    + (current[grid.idx(x, y + 1, z)] + current[grid.idx(x, y - 1, z)])
                        * inverse_spacing_2[1]
                    + (current[grid.idx(x, y, z + 1)] + current[grid.idx(x, y, z - 1)])
                        * inverse_spacing_2[2];
                let jacobi =
                    (source[cell_index] + dt * k * neighbours) / (1.0 + dt * k * diagonal_sum);
                *h_next = (1.0 - theta) * current[cell_index] + theta * jacobi;
            });
            iterations += 1;

            let check = iterations % check_interval == 0 || iterations == parameters.max_iter;
            if check {
                residual = next
                    .par_iter()
                    .zip(current.par_iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<Float>()
                    .sqrt();
            }
            std::mem::swap(&mut current, &mut next);
            if check && residual <= parameters.tolerance {
                break;
            }
        }

        if parameters.relaxation > 0.0 {
            current = smooth(&grid, &current, parameters.relaxation);
        }
        self.pressure = current;
        self.find_gradients();
        self.boundary_condition();
        self.find_velocities(particles);
        Ok(ConvergenceReport {
            iterations,
            residual,
        })
    }
}

fn smooth(grid: &Grid, field: &[Float], gamma: Float) -> Vec<Float> {
    (0..field.len())
        .into_par_iter()
        .map(|cell_index| {
            let [x, y, z] = grid.coordinates(cell_index);
            if grid.is_boundary(x, y, z) {
                return field[cell_index];
            }
            let mean = (field[grid.idx(x + 1, y, z)]
                + field[grid.idx(x - 1, y, z)]
                + field[grid.idx(x, y + 1, z)]
                + field[grid.idx(x, y - 1, z)]
                + field[grid.idx(x, y, z + 1)]
                + field[grid.idx(x, y, z - 1)])
                / 6.0;
            (1.0 - gamma) * field[cell_index] + gamma * mean
        })
        .collect()
}
