use super::*;
use crate::io::{
    parse_parameter, parse_parameter_or, parse_vector, CASE_CONDITIONS_FILE, CASE_SETUP_FILE,
    CONVERGENCE_LOG_FILE, DATA_PATH, POROSITY_FILE, POST_PROCESSING_PATH, PRE_PROCESSING_PATH,
    PRESSURE_FILE, RESIDUALS_FILE, RESIDUALS_GRAPH_FILE, VELOCITY_FILE, VTK_PATH,
};
use crate::particles::ParticleAssembly;
use crate::post::PostResult;
use colored::*;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const FINAL_FIELDS_FILE: &'static str = "final_fields.dat";

pub(crate) const DEFAULT_CASE_SETUP: &'static str = r#"case_name                        = Darcy Case

dt                               = 1e-3
total_time                       = 1.0

solver                           = explicit
relaxation                       = 0.0
under_relaxation                 = 1.0
tolerance                        = 1e-3
max_iter                         = 10000
residual_check_interval          = 10
conv_log_interval                = 10

dem_steps_per_fluid_step         = 1

write_data_mode                  = frequency 100
"#;

pub(crate) const DEFAULT_CASE_CONDITIONS: &'static str = r#"origin                           = 0.0 0.0 0.0
length                           = 1.0 1.0 1.0
grid_num                         = 10 10 10
cell_size_multiplier             = 1.0

viscosity                        = 8.9e-4

conductivity                     = 1.5
storativity                      = 7.5e-3
recharge                         = 0.0

initial_pressure                 = linear_x 1.0 0.0

porosity_method                  = full_scan
particles                        = false
"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarField {
    Pressure,
    Conductivity,
    Storativity,
    Recharge,
    Porosity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorField {
    Gradient,
    Velocity,
}

impl DarcySolver {
    pub fn scalar_field(&self, field: ScalarField) -> &[Float] {
        match field {
            ScalarField::Pressure => &self.pressure,
            ScalarField::Conductivity => &self.conductivity,
            ScalarField::Storativity => &self.storativity,
            ScalarField::Recharge => &self.recharge,
            ScalarField::Porosity => &self.porosity,
        }
    }

    pub fn vector_field(&self, field: VectorField) -> &[[Float; D]] {
        match field {
            VectorField::Gradient => &self.gradient,
            VectorField::Velocity => &self.velocity,
        }
    }

    pub fn write_scalar_field<W: Write>(
        &self,
        sink: &mut W,
        field: ScalarField,
        description: Option<&str>,
    ) -> io::Result<()> {
        write_scalar_array(sink, &self.grid, self.scalar_field(field), description)
    }

    pub fn write_vector_field<W: Write>(
        &self,
        sink: &mut W,
        field: VectorField,
        description: Option<&str>,
    ) -> io::Result<()> {
        write_vector_array(sink, &self.grid, self.vector_field(field), description)
    }
}

/// One block per z-slice, one row per y, x increasing along the row.
pub fn write_scalar_array<W: Write>(
    sink: &mut W,
    grid: &Grid,
    values: &[Float],
    description: Option<&str>,
) -> io::Result<()> {
    if let Some(description) = description {
        write!(sink, "\n{description}:\n")?;
    }
    for z in 0..grid.nz {
        for y in 0..grid.ny {
            for x in 0..grid.nx {
                write!(sink, "{:.6}\t", values[grid.idx(x, y, z)])?;
            }
            writeln!(sink)?;
        }
        writeln!(sink)?;
    }
    Ok(())
}

pub fn write_vector_array<W: Write>(
    sink: &mut W,
    grid: &Grid,
    values: &[[Float; D]],
    description: Option<&str>,
) -> io::Result<()> {
    if let Some(description) = description {
        write!(sink, "\n{description}:\n")?;
    }
    for z in 0..grid.nz {
        for y in 0..grid.ny {
            for x in 0..grid.nx {
                let v = &values[grid.idx(x, y, z)];
                write!(sink, "{:.6},{:.6},{:.6}\t", v[0], v[1], v[2])?;
            }
            writeln!(sink)?;
        }
        writeln!(sink)?;
    }
    Ok(())
}

impl Simulation {
    pub fn build_case_setup() -> DarcyResult<Simulation> {
        crate::io::create_case_directories()?;
        let case_setup_path = Path::new(PRE_PROCESSING_PATH).join(CASE_SETUP_FILE);
        let case_setup_path_str = case_setup_path.display().to_string();
        if case_setup_path.exists() {
            println!(
                "Reading the case setup file: {}.\n",
                case_setup_path_str.yellow().bold()
            );
        } else {
            let mut file = File::create(&case_setup_path)?;
            println!(
                "Creating the default case setup file: {}.\n",
                case_setup_path_str.yellow().bold()
            );
            write!(file, "{}", DEFAULT_CASE_SETUP)?;
        }
        let parameters = crate::io::read_case_setup()?;
        let simulation = Simulation::from_setup(parameters)?;
        simulation.create_script_for_residuals_graph()?;
        Ok(simulation)
    }

    pub fn print_residuals(&self, residuals: &Residuals) {
        if self.time_step % 100 == 0 {
            let duration = self.simulation_time.elapsed().as_secs_f64();
            println!("\n{} {:.2} s.", "Elapsed time:".cyan().bold(), duration);
            println!(
                "\n{:>8} {:>16} {:>16} {:>16} {:>16}\n",
                "step".cyan().bold(),
                "pressure".cyan().bold(),
                "velocity_x".cyan().bold(),
                "velocity_y".cyan().bold(),
                "velocity_z".cyan().bold()
            );
        }
        println!(
            "{:>8} {:>16.8e} {:>16.8e} {:>16.8e} {:>16.8e}",
            self.time_step,
            residuals.pressure,
            residuals.velocity[0],
            residuals.velocity[1],
            residuals.velocity[2]
        );
    }

    pub fn write_residuals(&self, residuals: &Residuals) -> DarcyResult<()> {
        let path = Path::new(DATA_PATH).join(RESIDUALS_FILE);
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if self.time_step == 0 {
            writeln!(
                file,
                "{:>8} {:>16} {:>16} {:>16} {:>16}",
                "step", "pressure", "velocity_x", "velocity_y", "velocity_z"
            )?;
        }
        writeln!(
            file,
            "{:>8} {:>16.8e} {:>16.8e} {:>16.8e} {:>16.8e}",
            self.time_step,
            residuals.pressure,
            residuals.velocity[0],
            residuals.velocity[1],
            residuals.velocity[2],
        )?;
        Ok(())
    }

    /// Appends the iteration count of an implicit step every
    /// `conv_log_interval` fluid steps.
    /// Whether the current fluid step lands on the convergence log interval.
    pub fn logs_convergence(&self) -> bool {
        self.fluid_steps % self.conv_log_interval == 0
    }

    pub fn write_convergence_log(&self, report: &ConvergenceReport) -> DarcyResult<()> {
        if !self.logs_convergence() {
            return Ok(());
        }
        let path = Path::new(DATA_PATH).join(CONVERGENCE_LOG_FILE);
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if self.fluid_steps == 0 {
            writeln!(file, "{:>8} {:>16} {:>16}", "step", "iterations", "residual")?;
        }
        writeln!(
            file,
            "{:>8} {:>16} {:>16.8e}",
            self.time_step, report.iterations, report.residual
        )?;
        Ok(())
    }

    pub fn write_post_processing_from_each_n_steps<F>(
        &self,
        solver: &DarcySolver,
        n: usize,
        function: F,
        file_name: &str,
    ) -> DarcyResult<()>
    where
        F: Fn(&DarcySolver) -> Vec<PostResult>,
    {
        if self.time_step % n == 0 {
            let post_results = &function(solver);
            let path = Path::new(POST_PROCESSING_PATH).join(file_name);
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            if self.time_step == 0 {
                write!(file, "{:>8}", "step")?;
                for post_result in post_results {
                    write!(file, " {:>16}", post_result.name)?;
                }
                writeln!(file)?;
            }
            write!(file, "{:>8}", self.time_step)?;
            for post_result in post_results {
                write!(file, " {:>16.8e}", post_result.value)?;
            }
            writeln!(file)?;
        }
        Ok(())
    }

    fn create_script_for_residuals_graph(&self) -> io::Result<()> {
        let path = Path::new(POST_PROCESSING_PATH).join(RESIDUALS_GRAPH_FILE);
        let mut file = File::create(&path)?;
        println!(
            "Creating the residuals graph script file: {}.\n",
            path.display().to_string().yellow().bold()
        );
        writeln!(
            file,
            r#"set title "{case_name}"
    set ylabel "Residuals"
    set xlabel "Steps"
    set grid
    set logscale y
    set yrange [{min_tolerance}:]
    set ytics format "%L"
    set mxtics 5
    set terminal push
    set terminal pngcairo font "courier"
    set output "fig_{case_name_prefix}_residuals.png"
    plot "../data/residuals.dat" u 1:2 t "pressure" w l,\
    "" u 1:3 t "velocity (x)" w l,\
    "" u 1:4 t "velocity (y)" w l,\
    "" u 1:5 t "velocity (z)" w l
    set terminal pdfcairo font "courier"
    set output "fig_{case_name_prefix}_residuals.pdf"
    replot
    set terminal pop
    set output"#,
            case_name = self.case_name,
            min_tolerance = self.iterative.tolerance,
            case_name_prefix = self.case_name_prefix(),
        )?;
        Ok(())
    }

    fn case_name_prefix(&self) -> String {
        self.case_name.replace(" ", "_").to_lowercase()
    }

    pub fn write_data_from_steps(&self, snapshot: &FieldSnapshot) -> DarcyResult<()> {
        let step_path = Path::new(DATA_PATH).join(self.time_step.to_string());
        fs::create_dir_all(&step_path)?;
        for (file_name, values) in [
            (PRESSURE_FILE, &snapshot.pressure),
            (POROSITY_FILE, &snapshot.porosity),
        ] {
            println!(
                "\nWriting {} for time step {}.\n",
                file_name.yellow().bold(),
                self.time_step.to_string().yellow().bold()
            );
            let name = file_name.trim_end_matches(".dat");
            write_scalar_column(&snapshot.grid, values, name, step_path.join(file_name))?;
        }
        println!(
            "\nWriting {} for time step {}.\n",
            VELOCITY_FILE.yellow().bold(),
            self.time_step.to_string().yellow().bold()
        );
        write_velocity(snapshot, step_path.join(VELOCITY_FILE))?;
        Ok(())
    }

    pub fn write_vtk_from_steps(&self, snapshot: &FieldSnapshot) -> DarcyResult<()> {
        let path_str = format!("{}_results_{:08}.vtk", self.case_name_prefix(), self.time_step);
        let path = Path::new(VTK_PATH).join(&path_str);
        println!(
            "\nWriting {} for time step {}.\n",
            path_str.yellow().bold(),
            self.time_step.to_string().yellow().bold()
        );
        write_vtk(snapshot, path)?;
        Ok(())
    }

    /// End-of-run dump of pressure, velocity and porosity in the diagnostics
    /// layout.
    pub fn write_final_fields(&self, solver: &DarcySolver) -> DarcyResult<()> {
        let path = Path::new(DATA_PATH).join(FINAL_FIELDS_FILE);
        println!(
            "\nWriting the final fields: {}.\n",
            path.display().to_string().yellow().bold()
        );
        let mut file = BufWriter::new(File::create(path)?);
        solver.write_scalar_field(&mut file, ScalarField::Pressure, Some("pressure"))?;
        solver.write_vector_field(&mut file, VectorField::Velocity, Some("velocity"))?;
        solver.write_scalar_field(&mut file, ScalarField::Porosity, Some("porosity"))?;
        file.flush()?;
        Ok(())
    }
}

impl DarcySolver {
    pub fn build_case_conditions() -> DarcyResult<(DarcySolver, ParticleAssembly)> {
        let case_conditions_path = Path::new(PRE_PROCESSING_PATH).join(CASE_CONDITIONS_FILE);
        let case_conditions_path_str = case_conditions_path.display().to_string();
        if case_conditions_path.exists() {
            println!(
                "Reading the case conditions file: {}.\n",
                case_conditions_path_str.yellow().bold()
            );
        } else {
            let mut file = File::create(&case_conditions_path)?;
            println!(
                "Creating the default case conditions file: {}.\n",
                case_conditions_path_str.yellow().bold()
            );
            write!(file, "{}", DEFAULT_CASE_CONDITIONS)?;
        }
        let conditions = crate::io::read_case_conditions()?;
        let solver = DarcySolver::from_conditions(&conditions)?;
        let particles = if parse_parameter_or(&conditions, "particles", false)? {
            crate::io::read_particles()?
        } else {
            Vec::new()
        };
        let grid = solver.grid;
        println!(
            "{} {} x {} x {} cells of {:.4e} x {:.4e} x {:.4e}.\n",
            "Fluid grid:".cyan().bold(),
            grid.nx,
            grid.ny,
            grid.nz,
            grid.dx,
            grid.dy,
            grid.dz
        );
        let assembly = ParticleAssembly::new(particles);
        println!("{} {}.\n", "Particles:".cyan().bold(), assembly.np());
        if let (Some(min), Some(max)) = (assembly.min_position(), assembly.max_position()) {
            println!(
                "{} [{:.4e}, {:.4e}, {:.4e}] to [{:.4e}, {:.4e}, {:.4e}].\n",
                "Particle centres span:".cyan().bold(),
                min[0],
                min[1],
                min[2],
                max[0],
                max[1],
                max[2]
            );
        }
        Ok((solver, assembly))
    }

    pub fn from_conditions(conditions: &HashMap<String, String>) -> DarcyResult<DarcySolver> {
        let file = CASE_CONDITIONS_FILE;
        let geometry = DomainGeometry {
            origin: parse_vector(conditions, "origin", file)?,
            length: parse_vector(conditions, "length", file)?,
            num: parse_vector(conditions, "grid_num", file)?,
        };
        let physical = PhysicalParameters {
            viscosity: parse_parameter(conditions, "viscosity", file)?,
        };
        let cellsizemultiplier =
            parse_parameter_or(conditions, "cell_size_multiplier", CELL_SIZE_MULTIPLIER)?;
        let mut solver = DarcySolver::initialization(&geometry, &physical, cellsizemultiplier)?;
        let conductivity = parse_parameter_or(conditions, "conductivity", DEFAULT_CONDUCTIVITY)?;
        let storativity = parse_parameter_or(conditions, "storativity", DEFAULT_STORATIVITY)?;
        let recharge = parse_parameter_or(conditions, "recharge", DEFAULT_RECHARGE)?;
        solver.conductivity.fill(conductivity);
        solver.storativity.fill(storativity);
        solver.recharge.fill(recharge);
        if let Some(method) = conditions.get("porosity_method") {
            solver.porosity_method = PorosityMethod::parse(method)?;
        }
        let initial_pressure = match conditions.get("initial_pressure") {
            Some(value) => InitialPressure::parse(value)?,
            None => InitialPressure::Uniform(0.0),
        };
        initial_pressure.apply(&mut solver);
        Ok(solver)
    }
}

fn write_scalar_column<P>(grid: &Grid, values: &[Float], name: &str, path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{:>16}", name)?;
    for k in 0..grid.nz {
        for j in 0..grid.ny {
            for i in 0..grid.nx {
                writeln!(file, "{:>16.8e}", values[grid.idx(i, j, k)])?;
            }
        }
    }
    file.flush()
}

fn write_velocity<P>(snapshot: &FieldSnapshot, path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let grid = &snapshot.grid;
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(
        file,
        "{:>16} {:>16} {:>16}",
        "velocity_x", "velocity_y", "velocity_z"
    )?;
    for k in 0..grid.nz {
        for j in 0..grid.ny {
            for i in 0..grid.nx {
                let velocity = &snapshot.velocity[grid.idx(i, j, k)];
                writeln!(
                    file,
                    "{velocity_x:>16.8e} {velocity_y:>16.8e} {velocity_z:>16.8e}",
                    velocity_x = velocity[0],
                    velocity_y = velocity[1],
                    velocity_z = velocity[2],
                )?;
            }
        }
    }
    file.flush()
}

/// ASCII structured grid with one point per cell centre.
fn write_vtk<P>(snapshot: &FieldSnapshot, path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let grid = &snapshot.grid;
    let number_of_points = grid.number_of_cells();
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "# vtk DataFile Version 3.0")?;
    writeln!(file, "Darcy flow simulation data")?;
    writeln!(file, "ASCII")?;
    writeln!(file, "DATASET STRUCTURED_GRID")?;
    writeln!(file, "DIMENSIONS {} {} {}", grid.nx, grid.ny, grid.nz)?;
    writeln!(file, "POINTS {} float", number_of_points)?;
    for k in 0..grid.nz {
        for j in 0..grid.ny {
            for i in 0..grid.nx {
                let center = grid.cell_center(i, j, k);
                writeln!(
                    file,
                    "{:>.4e} {:>.4e} {:>.4e}",
                    center[0], center[1], center[2]
                )?;
            }
        }
    }
    writeln!(file, "POINT_DATA {}", number_of_points)?;
    for (name, values) in [("pressure", &snapshot.pressure), ("porosity", &snapshot.porosity)] {
        writeln!(file, "SCALARS {} float 1", name)?;
        writeln!(file, "LOOKUP_TABLE default")?;
        for k in 0..grid.nz {
            for j in 0..grid.ny {
                for i in 0..grid.nx {
                    writeln!(file, "{:>.8e}", values[grid.idx(i, j, k)])?;
                }
            }
        }
    }
    writeln!(file, "VECTORS velocity float")?;
    for k in 0..grid.nz {
        for j in 0..grid.ny {
            for i in 0..grid.nx {
                let velocity = &snapshot.velocity[grid.idx(i, j, k)];
                writeln!(
                    file,
                    "{:>.8e} {:>.8e} {:>.8e}",
                    velocity[0], velocity[1], velocity[2]
                )?;
            }
        }
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::super::tests::unit_solver;
    use super::*;
    use crate::io::extract_parameters;
    use approx::assert_relative_eq;

    fn small_solver() -> DarcySolver {
        let geometry = DomainGeometry {
            origin: [0.0; D],
            length: [2.0, 2.0, 2.0],
            num: [2, 2, 2],
        };
        DarcySolver::initialization(&geometry, &PhysicalParameters { viscosity: 1.0 }, 1.0)
            .unwrap()
    }

    #[test]
    fn scalar_dump_is_sliced_by_z_then_y() {
        let mut solver = small_solver();
        for (i, h) in solver.pressure_mut().iter_mut().enumerate() {
            *h = i as Float;
        }
        let mut sink = Vec::new();
        solver
            .write_scalar_field(&mut sink, ScalarField::Pressure, None)
            .unwrap();
        let expected = "0.000000\t1.000000\t\n2.000000\t3.000000\t\n\n\
                        4.000000\t5.000000\t\n6.000000\t7.000000\t\n\n";
        assert_eq!(String::from_utf8(sink).unwrap(), expected);
    }

    #[test]
    fn vector_dump_with_description() {
        let mut solver = small_solver();
        solver.velocity.fill([0.5, -1.0, 0.25]);
        let mut sink = Vec::new();
        solver
            .write_vector_field(&mut sink, VectorField::Velocity, Some("velocity"))
            .unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.starts_with("\nvelocity:\n0.500000,-1.000000,0.250000\t0.500000"));
        assert_eq!(text.lines().count(), 2 + 2 * 3);
        assert!(text.ends_with("\t\n\n"));
    }

    #[test]
    fn field_selectors_return_the_matching_arrays() {
        let mut solver = unit_solver(3);
        solver.recharge_mut().fill(0.5);
        assert!(solver
            .scalar_field(ScalarField::Recharge)
            .iter()
            .all(|&w| w == 0.5));
        assert_eq!(
            solver.scalar_field(ScalarField::Storativity),
            solver.storativity()
        );
        assert_eq!(solver.vector_field(VectorField::Gradient), solver.gradient());
    }

    #[test]
    fn default_case_conditions_build_a_solver() {
        let solver = DarcySolver::from_conditions(&extract_parameters(DEFAULT_CASE_CONDITIONS))
            .unwrap();
        assert_eq!(solver.grid.counts(), [10, 10, 10]);
        assert_relative_eq!(solver.grid.dx, 0.1);
        assert_relative_eq!(solver.viscosity, 8.9e-4);
        assert_eq!(solver.porosity_method, PorosityMethod::FullScan);
        assert_relative_eq!(solver.pressure()[solver.idx(0, 3, 3)], 1.0);
        assert_relative_eq!(solver.pressure()[solver.idx(9, 3, 3)], 0.0);
    }

    #[test]
    fn case_conditions_report_bad_values() {
        let zero_viscosity = DEFAULT_CASE_CONDITIONS.replace("8.9e-4", "0.0");
        let result = DarcySolver::from_conditions(&extract_parameters(&zero_viscosity));
        assert!(matches!(result, Err(DarcyError::Configuration { .. })));
        let missing = extract_parameters("origin = 0 0 0\nlength = 1 1 1\n");
        let result = DarcySolver::from_conditions(&missing);
        assert!(matches!(result, Err(DarcyError::MissingParameter { .. })));
        let binned = DEFAULT_CASE_CONDITIONS.replace("full_scan", "binned");
        let solver = DarcySolver::from_conditions(&extract_parameters(&binned)).unwrap();
        assert_eq!(solver.porosity_method, PorosityMethod::Binned);
    }

    #[test]
    fn default_case_setup_matches_the_built_in_defaults() {
        let simulation = Simulation::from_setup(extract_parameters(DEFAULT_CASE_SETUP)).unwrap();
        let defaults = Simulation::new();
        assert_eq!(simulation.case_name, defaults.case_name);
        assert_eq!(simulation.time, defaults.time);
        assert_eq!(simulation.solver_mode, defaults.solver_mode);
        assert_eq!(simulation.iterative, defaults.iterative);
        assert_eq!(
            simulation.dem_steps_per_fluid_step,
            defaults.dem_steps_per_fluid_step
        );
        assert_eq!(simulation.conv_log_interval, defaults.conv_log_interval);
        assert_eq!(simulation.write_data_mode, defaults.write_data_mode);
        assert_eq!(simulation.case_name_prefix(), "darcy_case");
    }
}
