use clap::{arg, command, value_parser, Command};
use colored::*;
use darcy_flow::darcy;
use rayon::ThreadPoolBuilder;

fn main() {
    let matches = command!()
        .arg(
            arg!(
                -n --number_of_threads <NUMBER_OF_THREADS> "Sets the number of threads: 1, 2, 4, 8, 16 or 32"
            )
            .required(true)
            .value_parser(value_parser!(usize)),
        )
        .subcommand(
            Command::new("run")
                .about("Runs the simulation")
                .arg(
                    arg!(
                        -b --benchmark "Runs the benchmark"
                    )
                    .required(false),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Builds the case and reports the grid and the initial porosity")
        )
        .get_matches();

    if let Some(&num_threads) = matches.get_one::<usize>("number_of_threads") {
        if let Err(e) = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            eprintln!("{} {e}.", "Error while building the thread pool:".red().bold());
            std::process::exit(1);
        }
    }

    let result = match matches.subcommand() {
        Some(("run", sub_matches)) => match sub_matches.get_flag("benchmark") {
            false => darcy::run(),
            true => darcy::run_benchmark(),
        },
        Some(("check", _)) => darcy::check(),
        _ => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("{} {e}.", "Error:".red().bold());
        std::process::exit(1);
    }
}
