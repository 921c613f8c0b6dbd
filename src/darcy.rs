pub mod bc;
pub mod drag;
pub mod gradient;
pub mod implicit;
pub mod io;
pub mod porosity;
pub mod post;
pub mod velocity;

pub use bc::{BoundaryFace, BOUNDARY_FACES};
pub use drag::{DragInput, DragModel, NoDrag};
pub use implicit::{ConvergenceReport, IterativeParameters};
pub use io::{ScalarField, VectorField};
pub use porosity::{CellBins, PorosityMethod};

use crate::error::{DarcyError, DarcyResult};
use crate::global_variables::*;
use crate::io::WriteDataMode;
use crate::particles::Particle;
use crate::Residuals;
use colored::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::thread::JoinHandle;
use std::time::Instant;

/// Host-side world description: origin, extent and the number of
/// neighbour-search cells along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainGeometry {
    pub origin: [Float; D],
    pub length: [Float; D],
    pub num: [usize; D],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalParameters {
    pub viscosity: Float,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeParameters {
    pub dt: Float,
    pub current: Float,
    pub total: Float,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverMode {
    Explicit,
    Implicit,
}

impl SolverMode {
    pub fn parse(mode: &str) -> DarcyResult<Self> {
        match mode.trim() {
            "explicit" => Ok(SolverMode::Explicit),
            "implicit" => Ok(SolverMode::Implicit),
            _ => Err(DarcyError::invalid_parameter("solver", mode)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub dx: Float,
    pub dy: Float,
    pub dz: Float,
    pub origin: [Float; D],
}

impl Grid {
    pub fn new(geometry: &DomainGeometry, cellsizemultiplier: Float) -> DarcyResult<Self> {
        if !(cellsizemultiplier > 0.0) || !cellsizemultiplier.is_finite() {
            return Err(DarcyError::InvalidGrid {
                message: format!("the cell size multiplier must be positive, but is {cellsizemultiplier}"),
            });
        }
        let mut counts = [0; D];
        for axis in 0..D {
            if !(geometry.length[axis] > 0.0) {
                return Err(DarcyError::InvalidGrid {
                    message: format!(
                        "the domain length along axis {axis} must be positive, but is {}",
                        geometry.length[axis]
                    ),
                });
            }
            counts[axis] = ((geometry.num[axis] as Float) * cellsizemultiplier).floor() as usize;
            if counts[axis] == 0 {
                return Err(DarcyError::InvalidGrid {
                    message: format!("no fluid cells along axis {axis}"),
                });
            }
        }
        let [nx, ny, nz] = counts;
        Ok(Self {
            nx,
            ny,
            nz,
            dx: geometry.length[0] / (nx as Float),
            dy: geometry.length[1] / (ny as Float),
            dz: geometry.length[2] / (nz as Float),
            origin: geometry.origin,
        })
    }

    /// Linear cell index, x fastest. Coordinates are only checked in debug builds.
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < self.nx && y < self.ny && z < self.nz,
            "cell ({x}, {y}, {z}) outside a {}x{}x{} grid",
            self.nx,
            self.ny,
            self.nz
        );
        x + self.nx * y + self.nx * self.ny * z
    }

    #[inline]
    pub fn coordinates(&self, index: usize) -> [usize; D] {
        let x = index % self.nx;
        let y = (index / self.nx) % self.ny;
        let z = index / (self.nx * self.ny);
        [x, y, z]
    }

    pub fn number_of_cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn counts(&self) -> [usize; D] {
        [self.nx, self.ny, self.nz]
    }

    pub fn spacing(&self) -> [Float; D] {
        [self.dx, self.dy, self.dz]
    }

    #[inline]
    fn axis_min(&self, axis: usize, i: usize) -> Float {
        self.origin[axis] + (i as Float) * self.spacing()[axis]
    }

    pub fn cell_min_boundary(&self, x: usize, y: usize, z: usize) -> [Float; D] {
        [self.axis_min(0, x), self.axis_min(1, y), self.axis_min(2, z)]
    }

    pub fn cell_max_boundary(&self, x: usize, y: usize, z: usize) -> [Float; D] {
        [
            self.axis_min(0, x + 1),
            self.axis_min(1, y + 1),
            self.axis_min(2, z + 1),
        ]
    }

    pub fn cell_center(&self, x: usize, y: usize, z: usize) -> [Float; D] {
        [
            self.origin[0] + (x as Float + 0.5) * self.dx,
            self.origin[1] + (y as Float + 0.5) * self.dy,
            self.origin[2] + (z as Float + 0.5) * self.dz,
        ]
    }

    pub fn cell_volume(&self) -> Float {
        self.dx * self.dy * self.dz
    }

    pub fn is_boundary(&self, x: usize, y: usize, z: usize) -> bool {
        x == 0 || y == 0 || z == 0 || x == self.nx - 1 || y == self.ny - 1 || z == self.nz - 1
    }

    /// Cell whose half-open box holds `position`, using the same bounds as
    /// the porosity box test.
    pub fn locate(&self, position: &[Float; D]) -> Option<[usize; D]> {
        let counts = self.counts();
        let spacing = self.spacing();
        let mut cell = [0; D];
        for axis in 0..D {
            let p = position[axis];
            if !p.is_finite() {
                return None;
            }
            let guess = ((p - self.origin[axis]) / spacing[axis])
                .floor()
                .clamp(-1.0, counts[axis] as Float) as i64;
            cell[axis] = (guess - 1..=guess + 1)
                .filter(|&i| i >= 0 && (i as usize) < counts[axis])
                .map(|i| i as usize)
                .find(|&i| p >= self.axis_min(axis, i) && p < self.axis_min(axis, i + 1))?;
        }
        Some(cell)
    }
}

/// Owned per-cell fields of one Darcy solver instance.
pub struct DarcySolver {
    pub grid: Grid,
    pub viscosity: Float,
    pub porosity_method: PorosityMethod,
    pub(crate) pressure: Vec<Float>,
    pub(crate) gradient: Vec<[Float; D]>,
    pub(crate) conductivity: Vec<Float>,
    pub(crate) storativity: Vec<Float>,
    pub(crate) recharge: Vec<Float>,
    pub(crate) porosity: Vec<Float>,
    pub(crate) velocity: Vec<[Float; D]>,
}

impl DarcySolver {
    pub fn initialization(
        geometry: &DomainGeometry,
        physical: &PhysicalParameters,
        cellsizemultiplier: Float,
    ) -> DarcyResult<Self> {
        if !(physical.viscosity > 0.0) {
            return Err(DarcyError::Configuration {
                viscosity: physical.viscosity,
            });
        }
        let grid = Grid::new(geometry, cellsizemultiplier)?;
        let ncells = grid.number_of_cells();
        let mut solver = Self {
            grid,
            viscosity: physical.viscosity,
            porosity_method: PorosityMethod::default(),
            pressure: vec![0.0; ncells],
            gradient: vec![[0.0; D]; ncells],
            conductivity: vec![0.0; ncells],
            storativity: vec![0.0; ncells],
            recharge: vec![0.0; ncells],
            porosity: vec![1.0; ncells],
            velocity: vec![[0.0; D]; ncells],
        };
        solver.initialize_values();
        Ok(solver)
    }

    fn initialize_values(&mut self) {
        self.conductivity.fill(DEFAULT_CONDUCTIVITY);
        self.storativity.fill(DEFAULT_STORATIVITY);
        self.recharge.fill(DEFAULT_RECHARGE);
    }

    /// Releases every field. Nothing is written.
    pub fn teardown(self) {}

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        self.grid.idx(x, y, z)
    }

    pub fn pressure(&self) -> &[Float] {
        &self.pressure
    }

    pub fn pressure_mut(&mut self) -> &mut [Float] {
        &mut self.pressure
    }

    pub fn set_pressure(&mut self, x: usize, y: usize, z: usize, value: Float) {
        let i = self.idx(x, y, z);
        self.pressure[i] = value;
    }

    pub fn gradient(&self) -> &[[Float; D]] {
        &self.gradient
    }

    pub fn conductivity(&self) -> &[Float] {
        &self.conductivity
    }

    pub fn conductivity_mut(&mut self) -> &mut [Float] {
        &mut self.conductivity
    }

    pub fn storativity(&self) -> &[Float] {
        &self.storativity
    }

    pub fn storativity_mut(&mut self) -> &mut [Float] {
        &mut self.storativity
    }

    pub fn recharge(&self) -> &[Float] {
        &self.recharge
    }

    pub fn recharge_mut(&mut self) -> &mut [Float] {
        &mut self.recharge
    }

    pub fn porosity(&self) -> &[Float] {
        &self.porosity
    }

    pub fn velocity(&self) -> &[[Float; D]] {
        &self.velocity
    }

    /// Forward Euler: gradients, zero-flux faces, pressure update, velocities.
    pub fn explicit_step(&mut self, dt: Float, particles: &[Particle]) {
        self.find_gradients();
        self.boundary_condition();
        self.update_pressure(dt);
        self.find_velocities(particles);
    }

    pub fn update_pressure(&mut self, dt: Float) {
        self.pressure
            .par_iter_mut()
            .zip(self.recharge.par_iter())
            .zip(self.conductivity.par_iter())
            .zip(self.gradient.par_iter())
            .for_each(|(((h, &w), &k), dh)| {
                *h += w * dt + k * dt * (dh[0] + dh[1] + dh[2]);
            });
        debug_assert!(
            self.pressure.iter().all(|h| h.is_finite()),
            "non-finite pressure after an explicit step of dt = {dt}"
        );
    }

    pub fn step(
        &mut self,
        mode: SolverMode,
        dt: Float,
        particles: &[Particle],
        parameters: &IterativeParameters,
    ) -> DarcyResult<Option<ConvergenceReport>> {
        match mode {
            SolverMode::Explicit => {
                self.explicit_step(dt, particles);
                Ok(None)
            }
            SolverMode::Implicit => self.implicit_step(dt, particles, parameters).map(Some),
        }
    }

    /// Largest forward Euler step for which the diffusion stencil stays
    /// stable. Never enforced.
    pub fn stable_time_step(&self) -> Float {
        let k_max = self
            .conductivity
            .par_iter()
            .cloned()
            .reduce(|| 0.0, Float::max);
        let inverse_spacing_2 = self
            .grid
            .spacing()
            .iter()
            .map(|d| 1.0 / (d * d))
            .sum::<Float>();
        1.0 / (2.0 * k_max * inverse_spacing_2)
    }

    pub fn generate_snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            grid: self.grid,
            pressure: self.pressure.clone(),
            porosity: self.porosity.clone(),
            velocity: self.velocity.clone(),
        }
    }

    pub fn compute_residuals(&self, old: &FieldSnapshot) -> Residuals {
        let pressure = self
            .pressure
            .par_iter()
            .zip(old.pressure.par_iter())
            .map(|(h, old_h)| (h - old_h).powi(2))
            .sum::<Float>()
            .sqrt();
        let velocity = (0..D)
            .map(|axis| {
                self.velocity
                    .par_iter()
                    .zip(old.velocity.par_iter())
                    .map(|(v, old_v)| (v[axis] - old_v[axis]).powi(2))
                    .sum::<Float>()
                    .sqrt()
            })
            .collect();
        Residuals { pressure, velocity }
    }
}

/// Copy of the output fields, detached from the solver so it can be written
/// from another thread.
#[derive(Clone, Debug)]
pub struct FieldSnapshot {
    pub grid: Grid,
    pub pressure: Vec<Float>,
    pub porosity: Vec<Float>,
    pub velocity: Vec<[Float; D]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InitialPressure {
    Uniform(Float),
    LinearX { west: Float, east: Float },
}

impl InitialPressure {
    pub fn parse(value: &str) -> DarcyResult<Self> {
        let words = value.split_whitespace().collect::<Vec<&str>>();
        let number = |word: &str| {
            word.parse::<Float>()
                .map_err(|_| DarcyError::invalid_parameter("initial_pressure", value))
        };
        match words[..] {
            ["uniform", h] => Ok(InitialPressure::Uniform(number(h)?)),
            ["linear_x", west, east] => Ok(InitialPressure::LinearX {
                west: number(west)?,
                east: number(east)?,
            }),
            _ => Err(DarcyError::invalid_parameter("initial_pressure", value)),
        }
    }

    pub fn apply(&self, solver: &mut DarcySolver) {
        let grid = solver.grid;
        let initial = *self;
        solver
            .pressure
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, h)| {
                let [x, _, _] = grid.coordinates(i);
                *h = match initial {
                    InitialPressure::Uniform(value) => value,
                    InitialPressure::LinearX { west, east } => {
                        if grid.nx > 1 {
                            west + (east - west) * (x as Float) / ((grid.nx - 1) as Float)
                        } else {
                            west
                        }
                    }
                };
            });
    }
}

#[derive(Clone)]
pub struct Simulation {
    pub case_name: String,
    pub time_step: usize,
    pub simulation_time: Instant,
    pub time: TimeParameters,
    pub solver_mode: SolverMode,
    pub iterative: IterativeParameters,
    pub dem_steps_per_fluid_step: usize,
    pub fluid_steps: usize,
    pub conv_log_interval: usize,
    pub write_data_mode: WriteDataMode,
}

impl Simulation {
    pub fn next_step(&mut self) {
        self.time_step += 1;
        self.time.current += self.time.dt;
    }

    pub fn stop_condition(&self) -> bool {
        self.time.current >= self.time.total - 0.5 * self.time.dt
    }

    /// The fluid advances once every `dem_steps_per_fluid_step` particle steps.
    pub fn is_fluid_step(&self) -> bool {
        self.time_step % self.dem_steps_per_fluid_step == 0
    }

    pub fn fluid_time_step(&self) -> Float {
        self.time.dt * (self.dem_steps_per_fluid_step as Float)
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            case_name: String::from(CASE_NAME),
            time_step: 0,
            simulation_time: Instant::now(),
            time: TimeParameters {
                dt: 1e-3,
                current: 0.0,
                total: 1.0,
            },
            solver_mode: SolverMode::Explicit,
            iterative: IterativeParameters::default(),
            dem_steps_per_fluid_step: DEM_STEPS_PER_FLUID_STEP,
            fluid_steps: 0,
            conv_log_interval: CONV_LOG_INTERVAL,
            write_data_mode: WriteDataMode::Frequency(100),
        }
    }

    /// Case setup on top of the built-in defaults. `dt` and `total_time` are
    /// required.
    pub fn from_setup(parameters: HashMap<String, String>) -> DarcyResult<Self> {
        use crate::io::{parse_parameter, parse_parameter_or, CASE_SETUP_FILE};
        let mut simulation = Simulation::new();
        if let Some(case_name) = parameters.get("case_name") {
            simulation.case_name = case_name.clone();
        }
        let dt = parse_parameter::<Float>(&parameters, "dt", CASE_SETUP_FILE)?;
        if !(dt > 0.0) {
            return Err(DarcyError::invalid_parameter("dt", &dt.to_string()));
        }
        simulation.time.dt = dt;
        simulation.time.total = parse_parameter(&parameters, "total_time", CASE_SETUP_FILE)?;
        if let Some(mode) = parameters.get("solver") {
            simulation.solver_mode = SolverMode::parse(mode)?;
        }
        let defaults = simulation.iterative;
        simulation.iterative = IterativeParameters {
            relaxation: parse_parameter_or(&parameters, "relaxation", defaults.relaxation)?,
            under_relaxation: parse_parameter_or(
                &parameters,
                "under_relaxation",
                defaults.under_relaxation,
            )?,
            tolerance: parse_parameter_or(&parameters, "tolerance", defaults.tolerance)?,
            max_iter: parse_parameter_or(&parameters, "max_iter", defaults.max_iter)?,
            residual_check_interval: parse_parameter_or(
                &parameters,
                "residual_check_interval",
                defaults.residual_check_interval,
            )?,
        };
        simulation.dem_steps_per_fluid_step = parse_positive_count(
            &parameters,
            "dem_steps_per_fluid_step",
            simulation.dem_steps_per_fluid_step,
        )?;
        simulation.conv_log_interval =
            parse_positive_count(&parameters, "conv_log_interval", simulation.conv_log_interval)?;
        if let Some(mode) = parameters.get("write_data_mode") {
            simulation.write_data_mode = WriteDataMode::parse(mode)?;
        }
        Ok(simulation)
    }
}

fn parse_positive_count(
    parameters: &HashMap<String, String>,
    key: &str,
    default: usize,
) -> DarcyResult<usize> {
    let count = crate::io::parse_parameter_or(parameters, key, default)?;
    if count == 0 {
        return Err(DarcyError::invalid_parameter(key, "0"));
    }
    Ok(count)
}

fn join_write_data(handle: Option<JoinHandle<DarcyResult<()>>>) -> DarcyResult<()> {
    match handle {
        Some(handle) => match handle.join() {
            Ok(result) => result,
            Err(_) => Err(DarcyError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "the data writer thread panicked",
            ))),
        },
        None => Ok(()),
    }
}

pub fn run() -> DarcyResult<()> {
    let mut handle_write_data = None;

    let mut simulation = Simulation::build_case_setup()?;

    let (mut solver, mut assembly) = DarcySolver::build_case_conditions()?;

    solver.find_porosities(&assembly.particles);
    simulation.write_post_processing_from_each_n_steps(
        &solver,
        1,
        post::compute_porosity_profile,
        "porosity_profile.dat",
    )?;

    while !simulation.stop_condition() {
        let old_snapshot = solver.generate_snapshot();

        if simulation.is_fluid_step() {
            let report = solver.step(
                simulation.solver_mode,
                simulation.fluid_time_step(),
                &assembly.particles,
                &simulation.iterative,
            )?;
            if let Some(report) = report {
                simulation.write_convergence_log(&report)?;
            }
            assembly.reset_forces();
            solver.fluid_drag(&mut assembly, &NoDrag);
            simulation.fluid_steps += 1;
        }

        let residuals = solver.compute_residuals(&old_snapshot);

        if simulation.write_data_mode.should_write(simulation.time_step) {
            join_write_data(handle_write_data.take())?;
            let snapshot = solver.generate_snapshot();
            let simulation_clone = simulation.clone();
            handle_write_data = Some(std::thread::spawn(move || {
                simulation_clone.write_data_from_steps(&snapshot)
            }));
        }

        simulation.write_post_processing_from_each_n_steps(
            &solver,
            1,
            post::compute_pressure_extrema,
            "pressure_extrema.dat",
        )?;

        simulation.write_post_processing_from_each_n_steps(
            &solver,
            1,
            post::compute_mean_pressures_x,
            "mean_pressures_x.dat",
        )?;

        simulation.write_post_processing_from_each_n_steps(
            &solver,
            1,
            post::compute_mean_porosity,
            "mean_porosity.dat",
        )?;

        simulation.write_post_processing_from_each_n_steps(
            &solver,
            1,
            post::compute_mean_velocities,
            "mean_velocities.dat",
        )?;

        simulation.write_post_processing_from_each_n_steps(
            &solver,
            1,
            post::compute_max_velocity,
            "max_velocity.dat",
        )?;

        simulation.print_residuals(&residuals);
        simulation.write_residuals(&residuals)?;

        simulation.next_step();
    }

    join_write_data(handle_write_data)?;

    let snapshot = solver.generate_snapshot();
    simulation.write_data_from_steps(&snapshot)?;
    simulation.write_vtk_from_steps(&snapshot)?;
    simulation.write_final_fields(&solver)?;
    solver.teardown();
    Ok(())
}

pub fn run_benchmark() -> DarcyResult<()> {
    let mut handle_write_data = None;

    let bcs_time = Instant::now();
    let mut simulation = Simulation::build_case_setup()?;
    let bcs_duration = bcs_time.elapsed();

    let bcc_time = Instant::now();
    let (mut solver, mut assembly) = DarcySolver::build_case_conditions()?;
    let bcc_duration = bcc_time.elapsed();

    while !simulation.stop_condition() {
        let loop_time = Instant::now();

        let gs_time = Instant::now();
        let old_snapshot = solver.generate_snapshot();
        let gs_duration = gs_time.elapsed();

        let mut fg_duration = Default::default();
        let mut bc_duration = Default::default();
        let mut up_duration = Default::default();
        let mut fv_duration = Default::default();
        let mut fd_duration = Default::default();
        if simulation.is_fluid_step() {
            let dt = simulation.fluid_time_step();
            match simulation.solver_mode {
                SolverMode::Explicit => {
                    let fg_time = Instant::now();
                    solver.find_gradients();
                    fg_duration = fg_time.elapsed();

                    let bc_time = Instant::now();
                    solver.boundary_condition();
                    bc_duration = bc_time.elapsed();

                    let up_time = Instant::now();
                    solver.update_pressure(dt);
                    up_duration = up_time.elapsed();

                    let fv_time = Instant::now();
                    solver.find_velocities(&assembly.particles);
                    fv_duration = fv_time.elapsed();
                }
                SolverMode::Implicit => {
                    let up_time = Instant::now();
                    let report =
                        solver.implicit_step(dt, &assembly.particles, &simulation.iterative)?;
                    up_duration = up_time.elapsed();
                    simulation.write_convergence_log(&report)?;
                }
            }

            let fd_time = Instant::now();
            assembly.reset_forces();
            solver.fluid_drag(&mut assembly, &NoDrag);
            fd_duration = fd_time.elapsed();
            simulation.fluid_steps += 1;
        }

        let cr_time = Instant::now();
        let residuals = solver.compute_residuals(&old_snapshot);
        let cr_duration = cr_time.elapsed();

        let wr_time = Instant::now();
        if simulation.write_data_mode.should_write(simulation.time_step) {
            join_write_data(handle_write_data.take())?;
            let snapshot = solver.generate_snapshot();
            let simulation_clone = simulation.clone();
            handle_write_data = Some(std::thread::spawn(move || {
                simulation_clone.write_data_from_steps(&snapshot)
            }));
        }
        let wr_duration = wr_time.elapsed();

        let pp_time = Instant::now();
        simulation.write_post_processing_from_each_n_steps(
            &solver,
            1,
            post::compute_pressure_extrema,
            "pressure_extrema.dat",
        )?;
        let pp_duration = pp_time.elapsed();

        let pr_time = Instant::now();
        simulation.print_residuals(&residuals);
        simulation.write_residuals(&residuals)?;
        let pr_duration = pr_time.elapsed();

        let loop_duration = loop_time.elapsed();

        let elapsed_times = [
            ("bcs", bcs_duration),
            ("bcc", bcc_duration),
            ("gs", gs_duration),
            ("fg", fg_duration),
            ("bc", bc_duration),
            ("up", up_duration),
            ("fv", fv_duration),
            ("fd", fd_duration),
            ("cr", cr_duration),
            ("wr", wr_duration),
            ("pp", pp_duration),
            ("pr", pr_duration),
            ("loop", loop_duration),
        ];

        crate::io::write_inside_loop_elapsed_time(&elapsed_times, &simulation.time_step)?;

        simulation.next_step();
    }

    join_write_data(handle_write_data)?;
    solver.teardown();
    Ok(())
}

/// Builds the case, computes the initial porosity and reports it without
/// stepping.
pub fn check() -> DarcyResult<()> {
    crate::io::create_case_directories()?;
    let (mut solver, assembly) = DarcySolver::build_case_conditions()?;
    solver.find_porosities(&assembly.particles);
    let post_results = post::compute_mean_porosity(&solver)
        .into_iter()
        .chain(post::compute_pressure_extrema(&solver))
        .chain(post::compute_mean_pressures_x(&solver));
    for post_result in post_results {
        println!(
            "{:>24}: {:>16.8e}",
            post_result.caption().cyan().bold(),
            post_result.value
        );
    }
    println!(
        "{:>24}: {:>16.8e} s\n",
        "stable time step".cyan().bold(),
        solver.stable_time_step()
    );
    solver.teardown();
    Ok(())
}
