use approx::assert_relative_eq;
use darcy_flow::darcy::{
    DarcySolver, DomainGeometry, Grid, InitialPressure, IterativeParameters, PhysicalParameters,
    PorosityMethod, SolverMode,
};
use darcy_flow::particles::{sphere_volume, Particle, ParticleAssembly};
use darcy_flow::{DarcyError, Float, D};
use std::fs;
use std::process::Command;

fn cube(n: usize) -> DomainGeometry {
    DomainGeometry {
        origin: [0.0; D],
        length: [n as Float; D],
        num: [n; D],
    }
}

fn solver(n: usize) -> DarcySolver {
    DarcySolver::initialization(&cube(n), &PhysicalParameters { viscosity: 1.0 }, 1.0).unwrap()
}

/// Deterministic pseudo-random particles, some overlapping cell faces and
/// some packed densely enough to overfill a cell.
fn scattered_particles(count: usize, extent: Float) -> Vec<Particle> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((state >> 11) as Float) / ((1u64 << 53) as Float)
    };
    (0..count)
        .map(|_| {
            let position = [next() * extent, next() * extent, next() * extent];
            Particle::new(position, 0.1 + 0.6 * next())
        })
        .collect()
}

#[test]
fn empty_domain_is_fully_porous() {
    let mut solver = solver(4);
    solver.find_porosities(&[]);
    assert!(solver.porosity().iter().all(|&n| n == 1.0));
}

#[test]
fn single_particle_porosity() {
    let mut solver = solver(4);
    let particles = [Particle::new([1.5, 2.5, 0.5], 0.3)];
    solver.find_porosities(&particles);
    let inside = solver.idx(1, 2, 0);
    for (i, &n) in solver.porosity().iter().enumerate() {
        if i == inside {
            assert_relative_eq!(n, 0.8869, epsilon = 1e-4);
            assert_relative_eq!(n, 1.0 - sphere_volume(0.3), epsilon = 1e-14);
        } else {
            assert_eq!(n, 1.0);
        }
    }
}

#[test]
fn linear_ramp_is_steady_under_the_explicit_scheme() {
    let mut solver = solver(5);
    InitialPressure::LinearX {
        west: 4.0,
        east: 0.0,
    }
    .apply(&mut solver);
    let before = solver.pressure().to_vec();
    solver.explicit_step(0.01, &[]);
    assert_eq!(solver.pressure(), &before[..]);
}

#[test]
fn zero_viscosity_is_rejected() {
    let result = DarcySolver::initialization(&cube(4), &PhysicalParameters { viscosity: 0.0 }, 1.0);
    match result {
        Err(DarcyError::Configuration { viscosity }) => assert_eq!(viscosity, 0.0),
        _ => panic!("expected a configuration error"),
    }
}

#[test]
fn check_command_exits_with_status_one_on_zero_viscosity() {
    let case_path = std::env::temp_dir().join(format!("darcy_flow_check_{}", std::process::id()));
    let pre_processing_path = case_path.join("pre_processing");
    fs::create_dir_all(&pre_processing_path).unwrap();
    fs::write(
        pre_processing_path.join("case_conditions.jou"),
        "origin = 0 0 0\nlength = 1 1 1\ngrid_num = 4 4 4\nviscosity = 0.0\n",
    )
    .unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_darcy_flow"))
        .args(["-n", "1", "check"])
        .current_dir(&case_path)
        .output()
        .unwrap();
    fs::remove_dir_all(&case_path).unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("viscosity"));
}

#[test]
fn implicit_run_logs_convergence_every_interval() {
    let case_path = std::env::temp_dir().join(format!("darcy_flow_conv_log_{}", std::process::id()));
    let pre_processing_path = case_path.join("pre_processing");
    fs::create_dir_all(&pre_processing_path).unwrap();
    fs::write(
        pre_processing_path.join("case_setup.jou"),
        "dt = 0.01\ntotal_time = 0.08\nsolver = implicit\ntolerance = 1e-8\n\
         residual_check_interval = 1\ndem_steps_per_fluid_step = 2\n\
         conv_log_interval = 2\nwrite_data_mode = frequency 100\n",
    )
    .unwrap();
    fs::write(
        pre_processing_path.join("case_conditions.jou"),
        "origin = 0 0 0\nlength = 1 1 1\ngrid_num = 4 4 4\nviscosity = 1.0\n\
         initial_pressure = linear_x 1.0 0.0\n",
    )
    .unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_darcy_flow"))
        .args(["-n", "1", "run"])
        .current_dir(&case_path)
        .output()
        .unwrap();
    let log = fs::read_to_string(case_path.join("data").join("conv.log"));
    let inlet_outlet =
        fs::read_to_string(case_path.join("post_processing").join("mean_pressures_x.dat"));
    fs::remove_dir_all(&case_path).unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let log = log.unwrap();
    let headers = log.lines().filter(|line| line.contains("iterations")).count();
    assert_eq!(headers, 1);
    let steps = log
        .lines()
        .skip(1)
        .map(|line| line.split_whitespace().next().unwrap().parse::<usize>().unwrap())
        .collect::<Vec<usize>>();
    // Fluid steps land on DEM steps 0, 2, 4 and 6; every second one is logged.
    assert_eq!(steps, vec![0, 4]);
    let inlet_outlet = inlet_outlet.unwrap();
    let mut rows = inlet_outlet.lines();
    let header = rows.next().unwrap();
    assert!(header.contains("pressure_inlet") && header.contains("pressure_outlet"));
    assert_eq!(rows.count(), 8);
}

#[test]
fn idx_enumerates_every_cell_once() {
    let geometry = DomainGeometry {
        origin: [0.0; D],
        length: [1.0, 1.0, 1.0],
        num: [3, 5, 2],
    };
    let grid = Grid::new(&geometry, 1.0).unwrap();
    let mut indices = Vec::new();
    for z in 0..grid.nz {
        for y in 0..grid.ny {
            for x in 0..grid.nx {
                indices.push(grid.idx(x, y, z));
            }
        }
    }
    assert_eq!(indices, (0..grid.number_of_cells()).collect::<Vec<usize>>());
}

#[test]
fn boundary_gradients_are_zero_after_a_step() {
    let mut solver = solver(6);
    for (i, h) in solver.pressure_mut().iter_mut().enumerate() {
        *h = ((i * 7919) % 13) as Float;
    }
    solver.explicit_step(1e-3, &[]);
    let grid = solver.grid;
    for (i, dh) in solver.gradient().iter().enumerate() {
        let [x, y, z] = grid.coordinates(i);
        if grid.is_boundary(x, y, z) {
            assert_eq!(*dh, [0.0; D]);
        }
    }
    assert!(solver.gradient().iter().any(|dh| *dh != [0.0; D]));
}

#[test]
fn porosity_stays_within_unit_bounds() {
    for method in [
        PorosityMethod::FullScan,
        PorosityMethod::Binned,
        PorosityMethod::Sampled { precision: 4 },
    ] {
        let mut solver = solver(5);
        solver.porosity_method = method;
        solver.find_porosities(&scattered_particles(400, 5.0));
        assert!(solver.porosity().iter().all(|&n| (0.0..=1.0).contains(&n)));
        assert!(solver.porosity().iter().any(|&n| n < 1.0));
    }
}

#[test]
fn uniform_pressure_only_gains_recharge() {
    let mut solver = solver(4);
    solver.pressure_mut().fill(-1.5);
    solver.recharge_mut().fill(3.0);
    solver.explicit_step(0.2, &[]);
    assert!(solver.gradient().iter().all(|dh| *dh == [0.0; D]));
    for &h in solver.pressure() {
        assert_relative_eq!(h, -1.5 + 0.6, epsilon = 1e-14);
    }
}

#[test]
fn porosity_queries_do_not_touch_particles() {
    let particles = scattered_particles(100, 4.0);
    let copy = particles.clone();
    let mut solver = solver(4);
    solver.find_porosities(&particles);
    let first = solver.porosity().to_vec();
    solver.find_porosities(&particles);
    assert_eq!(solver.porosity(), &first[..]);
    assert_eq!(particles, copy);
    solver.porosity_method = PorosityMethod::Binned;
    solver.find_porosities(&particles);
    assert_eq!(solver.porosity(), &first[..]);
}

#[test]
fn implicit_and_explicit_modes_through_step() {
    let mut explicit = solver(6);
    let mut implicit = solver(6);
    for solver in [&mut explicit, &mut implicit] {
        solver.set_pressure(3, 3, 3, 2.0);
    }
    let parameters = IterativeParameters {
        tolerance: 1e-12,
        residual_check_interval: 1,
        ..IterativeParameters::default()
    };
    let none = explicit
        .step(SolverMode::Explicit, 1e-3, &[], &parameters)
        .unwrap();
    assert!(none.is_none());
    let report = implicit
        .step(SolverMode::Implicit, 1e-3, &[], &parameters)
        .unwrap()
        .unwrap();
    assert!(report.iterations > 1);
    for (a, b) in explicit.pressure().iter().zip(implicit.pressure()) {
        assert!((a - b).abs() < 1e-3);
    }
}

#[test]
fn coupling_round_with_particles() {
    let mut solver = solver(4);
    InitialPressure::parse("linear_x 3.0 0.0")
        .unwrap()
        .apply(&mut solver);
    let mut assembly = ParticleAssembly::new(vec![
        Particle::new([1.5, 1.5, 1.5], 0.3),
        Particle::new([2.5, 1.5, 1.5], 0.2),
    ]);
    // Curvature at x = 1 so the interior cells carry a gradient.
    solver.set_pressure(1, 1, 1, 3.0);
    solver.explicit_step(1e-3, &assembly.particles);
    solver.fluid_drag(&mut assembly, &darcy_flow::darcy::NoDrag);
    assert_eq!(assembly.forces, vec![[0.0; D]; 2]);
    let cell = solver.idx(1, 1, 1);
    assert_relative_eq!(solver.porosity()[cell], 1.0 - sphere_volume(0.3));
    let expected_vx = -1.5 * solver.gradient()[cell][0] / solver.porosity()[cell];
    assert_relative_eq!(solver.velocity()[cell][0], expected_vx);
}
