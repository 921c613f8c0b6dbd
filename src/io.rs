use crate::error::{DarcyError, DarcyResult};
use crate::global_variables::*;
use crate::particles::Particle;
use colored::*;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DATA_PATH: &'static str = "./data";

pub const PRE_PROCESSING_PATH: &'static str = "./pre_processing";

pub const CASE_SETUP_FILE: &'static str = "case_setup.jou";

pub const CASE_CONDITIONS_FILE: &'static str = "case_conditions.jou";

pub const PARTICLES_FILE: &'static str = "particles.dat";

pub const POST_PROCESSING_PATH: &'static str = "./post_processing";

pub const VTK_PATH: &'static str = "./post_processing/vtk_files";

pub const PRESSURE_FILE: &'static str = "pressure.dat";

pub const POROSITY_FILE: &'static str = "porosity.dat";

pub const VELOCITY_FILE: &'static str = "velocity.dat";

pub const RESIDUALS_FILE: &'static str = "residuals.dat";

pub const CONVERGENCE_LOG_FILE: &'static str = "conv.log";

pub const RESIDUALS_GRAPH_FILE: &'static str = "gr_residuals.gp";

#[derive(Clone, Debug, PartialEq)]
pub enum WriteDataMode {
    Frequency(usize),

    ListOfSteps(Vec<usize>),
}

impl WriteDataMode {
    pub fn parse(mode: &str) -> DarcyResult<Self> {
        let mut words = mode.split_whitespace();
        match words.next() {
            Some("frequency") => {
                let frequency = words
                    .next()
                    .and_then(|x| x.parse::<usize>().ok())
                    .filter(|&x| x > 0)
                    .ok_or_else(|| DarcyError::invalid_parameter("write_data_mode", mode))?;
                Ok(WriteDataMode::Frequency(frequency))
            }
            Some("list") => {
                let list = words
                    .map(|x| x.parse::<usize>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| DarcyError::invalid_parameter("write_data_mode", mode))?;
                Ok(WriteDataMode::ListOfSteps(list))
            }
            _ => Err(DarcyError::invalid_parameter("write_data_mode", mode)),
        }
    }

    pub fn should_write(&self, time_step: usize) -> bool {
        match self {
            WriteDataMode::Frequency(n) => time_step % n == 0,
            WriteDataMode::ListOfSteps(list) => time_step == 0 || list.contains(&time_step),
        }
    }
}

pub fn create_case_directories() -> io::Result<()> {
    let list_of_paths = [
        DATA_PATH,
        PRE_PROCESSING_PATH,
        POST_PROCESSING_PATH,
        VTK_PATH,
    ];
    for path_str in list_of_paths {
        let path = Path::new(path_str);
        if !path.exists() {
            println!("Creating the {} path.\n", path_str.yellow().bold());
            fs::create_dir_all(path)?;
        } else {
            println!("The {} path already exists.\n", path_str.yellow().bold());
        }
    }
    Ok(())
}

pub fn read_case_setup() -> io::Result<HashMap<String, String>> {
    let path = Path::new(PRE_PROCESSING_PATH).join(CASE_SETUP_FILE);
    read_parameters_file(path)
}

pub fn read_case_conditions() -> io::Result<HashMap<String, String>> {
    let path = Path::new(PRE_PROCESSING_PATH).join(CASE_CONDITIONS_FILE);
    read_parameters_file(path)
}

fn read_parameters_file<P: AsRef<Path>>(path: P) -> io::Result<HashMap<String, String>> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(extract_parameters(&contents))
}

pub fn extract_parameters(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.starts_with("#"))
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.splitn(2, "=");
            let key = parts.next().unwrap_or("").trim().to_string();
            let value = parts.next().unwrap_or("").trim().to_string();
            (key, value)
        })
        .collect::<HashMap<String, String>>()
}

pub fn parse_parameter<T: FromStr>(
    parameters: &HashMap<String, String>,
    key: &str,
    file: &str,
) -> DarcyResult<T> {
    let value = parameters
        .get(key)
        .ok_or_else(|| DarcyError::MissingParameter {
            key: key.to_string(),
            file: file.to_string(),
        })?;
    value
        .parse::<T>()
        .map_err(|_| DarcyError::invalid_parameter(key, value))
}

pub fn parse_parameter_or<T: FromStr>(
    parameters: &HashMap<String, String>,
    key: &str,
    default: T,
) -> DarcyResult<T> {
    match parameters.get(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| DarcyError::invalid_parameter(key, value)),
        None => Ok(default),
    }
}

/// Parses a whitespace separated triple such as `0.0 0.0 1.0` or `10 10 20`.
pub fn parse_vector<T: FromStr>(
    parameters: &HashMap<String, String>,
    key: &str,
    file: &str,
) -> DarcyResult<[T; D]> {
    let value = parameters
        .get(key)
        .ok_or_else(|| DarcyError::MissingParameter {
            key: key.to_string(),
            file: file.to_string(),
        })?;
    let components = value
        .split_whitespace()
        .map(|x| x.parse::<T>())
        .collect::<Result<Vec<T>, _>>()
        .map_err(|_| DarcyError::invalid_parameter(key, value))?;
    components
        .try_into()
        .map_err(|_| DarcyError::invalid_parameter(key, value))
}

pub fn read_particles() -> DarcyResult<Vec<Particle>> {
    let path = Path::new(PRE_PROCESSING_PATH).join(PARTICLES_FILE);
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    parse_particles(&contents)
}

/// One `x y z r` line per particle, `#` starts a comment line.
pub fn parse_particles(contents: &str) -> DarcyResult<Vec<Particle>> {
    contents
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.starts_with("#"))
        .filter(|line| !line.is_empty())
        .map(|line| {
            let values = line
                .split_whitespace()
                .map(|x| x.parse::<Float>())
                .collect::<Result<Vec<Float>, _>>()
                .map_err(|_| DarcyError::invalid_parameter(PARTICLES_FILE, line))?;
            match values[..] {
                [x, y, z, r] if r >= 0.0 => Ok(Particle::new([x, y, z], r)),
                _ => Err(DarcyError::invalid_parameter(PARTICLES_FILE, line)),
            }
        })
        .collect()
}

pub fn write_inside_loop_elapsed_time(
    elapsed_times: &[(&str, Duration)],
    time_step: &usize,
) -> io::Result<()> {
    let path = Path::new(POST_PROCESSING_PATH).join("benchmark_elapsed_time.dat");
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if *time_step == 0 {
        write!(file, "{:>8}", "step")?;
        for (key, _) in elapsed_times {
            write!(file, " {:>16}", key)?;
        }
        writeln!(file)?;
    }
    write!(file, "{:>8}", time_step)?;
    for (_, value) in elapsed_times {
        write!(file, " {:>16.8e}", value.as_secs_f64())?;
    }
    writeln!(file)?;
    Ok(())
}
