use super::*;

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub enum BoundaryFace {
    East,
    West,
    North,
    South,
    Top,
    Bottom,
}

pub const BOUNDARY_FACES: [BoundaryFace; 6] = [
    BoundaryFace::West,
    BoundaryFace::East,
    BoundaryFace::South,
    BoundaryFace::North,
    BoundaryFace::Bottom,
    BoundaryFace::Top,
];

impl BoundaryFace {
    pub fn contains(&self, grid: &Grid, index: [usize; D]) -> bool {
        let (axis, plane) = self.plane(grid);
        index[axis] == plane
    }

    /// Normal axis of the face and the index of its cell plane along it.
    pub fn plane(&self, grid: &Grid) -> (usize, usize) {
        match self {
            BoundaryFace::West => (0, 0),
            BoundaryFace::East => (0, grid.nx - 1),
            BoundaryFace::South => (1, 0),
            BoundaryFace::North => (1, grid.ny - 1),
            BoundaryFace::Bottom => (2, 0),
            BoundaryFace::Top => (2, grid.nz - 1),
        }
    }
}

impl DarcySolver {
    /// Zero-flux (Neumann) condition on all six faces. Edges and corners are
    /// written once per face they belong to.
    pub fn boundary_condition(&mut self) {
        for boundary_face in BOUNDARY_FACES {
            self.neumann_zero(boundary_face);
        }
    }

    /// Zeroes the gradient on one face plane only.
    pub fn neumann_zero(&mut self, boundary_face: BoundaryFace) {
        let grid = self.grid;
        let row = grid.nx;
        let slab = grid.nx * grid.ny;
        match boundary_face.plane(&grid) {
            (0, i) => self
                .gradient
                .par_chunks_mut(row)
                .for_each(|cells| cells[i] = [0.0; D]),
            (1, j) => self
                .gradient
                .par_chunks_mut(slab)
                .for_each(|cells| cells[j * row..(j + 1) * row].fill([0.0; D])),
            (_, k) => self.gradient[k * slab..(k + 1) * slab]
                .par_iter_mut()
                .for_each(|gradient| *gradient = [0.0; D]),
        }
    }
}
