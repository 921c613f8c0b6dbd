use super::*;
use crate::post::PostResult;

/// Smallest value of a field, `+inf` for an empty one.
pub fn min_value(values: &[Float]) -> Float {
    values.par_iter().cloned().reduce(|| Float::INFINITY, Float::min)
}

/// Largest value of a field, `-inf` for an empty one.
pub fn max_value(values: &[Float]) -> Float {
    values
        .par_iter()
        .cloned()
        .reduce(|| Float::NEG_INFINITY, Float::max)
}

pub fn mean_value(values: &[Float]) -> Float {
    if values.is_empty() {
        return 0.0;
    }
    values.par_iter().sum::<Float>() / (values.len() as Float)
}

fn magnitude(v: &[Float; D]) -> Float {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

pub fn compute_pressure_extrema(solver: &DarcySolver) -> Vec<PostResult> {
    let pressure_min_result: PostResult = PostResult::new(
        "pressure_min".to_string(),
        "minimum pressure".to_string(),
        min_value(&solver.pressure),
        None,
    );
    let pressure_max_result: PostResult = PostResult::new(
        "pressure_max".to_string(),
        "maximum pressure".to_string(),
        max_value(&solver.pressure),
        None,
    );
    let pressure_mean_result: PostResult = PostResult::new(
        "pressure_mean".to_string(),
        "mean pressure".to_string(),
        mean_value(&solver.pressure),
        None,
    );
    vec![pressure_min_result, pressure_max_result, pressure_mean_result]
}

pub fn compute_mean_porosity(solver: &DarcySolver) -> Vec<PostResult> {
    let porosity_result: PostResult = PostResult::new(
        "mean_porosity".to_string(),
        "mean porosity".to_string(),
        mean_value(&solver.porosity),
        None,
    );
    let porosity_min_result: PostResult = PostResult::new(
        "min_porosity".to_string(),
        "minimum porosity".to_string(),
        min_value(&solver.porosity),
        None,
    );
    vec![porosity_result, porosity_min_result]
}

/// Mean porosity of every z-slice, bottom to top.
pub fn compute_porosity_profile(solver: &DarcySolver) -> Vec<PostResult> {
    let grid = solver.grid;
    let slice = grid.nx * grid.ny;
    solver
        .porosity
        .par_chunks(slice)
        .enumerate()
        .map(|(z, values)| {
            PostResult::new(
                format!("porosity_z{z:03}"),
                format!("mean porosity at z = {:.4e}", grid.cell_center(0, 0, z)[2]),
                mean_value(values),
                None,
            )
        })
        .collect()
}

pub fn compute_mean_pressures_x(solver: &DarcySolver) -> Vec<PostResult> {
    let grid = solver.grid;
    let pressure_x_mean = |x: usize| {
        let values = (0..grid.nz)
            .flat_map(|z| (0..grid.ny).map(move |y| (y, z)))
            .map(|(y, z)| solver.pressure[grid.idx(x, y, z)])
            .collect::<Vec<Float>>();
        mean_value(&values)
    };
    let pressure_inlet_mean_result: PostResult = PostResult::new(
        "pressure_inlet".to_string(),
        "pressure inlet mean".to_string(),
        pressure_x_mean(0),
        None,
    );
    let pressure_outlet_mean_result: PostResult = PostResult::new(
        "pressure_outlet".to_string(),
        "pressure outlet mean".to_string(),
        pressure_x_mean(grid.nx - 1),
        None,
    );
    vec![pressure_inlet_mean_result, pressure_outlet_mean_result]
}

pub fn compute_mean_velocities(solver: &DarcySolver) -> Vec<PostResult> {
    let number_of_cells = solver.grid.number_of_cells() as Float;
    let component_mean = |axis: usize| {
        solver
            .velocity
            .par_iter()
            .map(|v| v[axis])
            .sum::<Float>()
            / number_of_cells
    };
    let u_mean = solver.velocity.par_iter().map(magnitude).sum::<Float>() / number_of_cells;
    let u_result: PostResult = PostResult::new(
        "mean_velocity".to_string(),
        "mean velocity (magnitude)".to_string(),
        u_mean,
        None,
    );
    let ux_result: PostResult = PostResult::new(
        "mean_velocity_x".to_string(),
        "mean velocity (x)".to_string(),
        component_mean(0),
        None,
    );
    let uy_result: PostResult = PostResult::new(
        "mean_velocity_y".to_string(),
        "mean velocity (y)".to_string(),
        component_mean(1),
        None,
    );
    let uz_result: PostResult = PostResult::new(
        "mean_velocity_z".to_string(),
        "mean velocity (z)".to_string(),
        component_mean(2),
        None,
    );
    vec![u_result, ux_result, uy_result, uz_result]
}

pub fn compute_max_velocity(solver: &DarcySolver) -> Vec<PostResult> {
    let max_velocity = solver
        .velocity
        .par_iter()
        .map(magnitude)
        .reduce_with(|a, b| a.max(b))
        .unwrap_or(0.0);
    let max_velocity_result: PostResult = PostResult::new(
        "max_velocity".to_string(),
        "maximum velocity".to_string(),
        max_velocity,
        None,
    );
    vec![max_velocity_result]
}
