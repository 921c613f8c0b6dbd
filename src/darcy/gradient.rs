use super::*;

impl DarcySolver {
    /// Second order central difference of the pressure along each axis,
    /// interior cells only. Boundary cells keep whatever they held.
    pub fn find_gradients(&mut self) {
        let grid = self.grid;
        let dx2 = grid.dx * grid.dx;
        let dy2 = grid.dy * grid.dy;
        let dz2 = grid.dz * grid.dz;
        let pressure = &self.pressure;
        self.gradient
            .par_iter_mut()
            .enumerate()
            .for_each(|(cell_index, gradient)| {
                let [x, y, z] = grid.coordinates(cell_index);
                if grid.is_boundary(x, y, z) {
                    return;
                }
                let h = pressure[cell_index];
                *gradient = [
                    (pressure[grid.idx(x + 1, y, z)] - 2.0 * h + pressure[grid.idx(x - 1, y, z)])
                        / dx2,
                    (pressure[grid.idx(x, y + 1, z)] - 2.0 * h + pressure[grid.idx(x, y - 1, z)])
                        / dy2,
                    (pressure[grid.idx(x, y, z + 1)] - 2.0 * h + pressure[grid.idx(x, y, z - 1)])
                        / dz2,
                ];
            });
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::unit_solver;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_ramp_has_zero_second_difference() {
        let mut solver = unit_solver(5);
        let grid = solver.grid;
        for i in 0..grid.number_of_cells() {
            let [x, y, _] = grid.coordinates(i);
            solver.pressure_mut()[i] = 10.0 - 2.0 * (x as Float) + (y as Float);
        }
        solver.find_gradients();
        for dh in solver.gradient() {
            assert_eq!(*dh, [0.0; D]);
        }
    }

    #[test]
    fn quadratic_field_has_constant_interior_gradient() {
        let geometry = DomainGeometry {
            origin: [0.0; D],
            length: [2.5, 5.0, 5.0],
            num: [5, 5, 5],
        };
        let mut solver =
            DarcySolver::initialization(&geometry, &PhysicalParameters { viscosity: 1.0 }, 1.0)
                .unwrap();
        let grid = solver.grid;
        for i in 0..grid.number_of_cells() {
            let [x, _, z] = grid.coordinates(i);
            let px = (x as Float) * grid.dx;
            let pz = z as Float;
            solver.pressure_mut()[i] = px * px + 3.0 * pz * pz;
        }
        solver.find_gradients();
        for z in 1..grid.nz - 1 {
            for y in 1..grid.ny - 1 {
                for x in 1..grid.nx - 1 {
                    let dh = solver.gradient()[grid.idx(x, y, z)];
                    assert_relative_eq!(dh[0], 2.0, epsilon = 1e-10);
                    assert_relative_eq!(dh[1], 0.0, epsilon = 1e-10);
                    assert_relative_eq!(dh[2], 6.0, epsilon = 1e-10);
                }
            }
        }
    }

    #[test]
    fn boundary_layer_is_left_untouched() {
        let mut solver = unit_solver(4);
        solver.gradient.fill([7.0; D]);
        let grid = solver.grid;
        for i in 0..grid.number_of_cells() {
            solver.pressure_mut()[i] = i as Float;
        }
        solver.find_gradients();
        assert_eq!(solver.gradient()[grid.idx(0, 1, 1)], [7.0; D]);
        assert_eq!(solver.gradient()[grid.idx(3, 3, 3)], [7.0; D]);
        assert_eq!(solver.gradient()[grid.idx(1, 1, 1)], [0.0; D]);
    }
}
