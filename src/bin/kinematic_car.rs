//! Kinematic car planning
//!
//! Plans a control sequence for a car on a bounded plane and prints the
//! solution as a sequence of poses.
//!
//! Usage:
//!   cargo run --bin kinematic_car
//!   cargo run --bin kinematic_car -- --config configs/kinematic_car.toml --plot img/kinematic_car.png

use clap::Parser;

use rust_kinoplan::control_planning::{format_poses, PlanningConfig, TurnAndDrive};
use rust_kinoplan::utils::{PathStyle, Visualizer, colors};
use rust_kinoplan::{Path2D, PlanningResult};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default problem
    #[arg(short, long)]
    config: Option<String>,

    /// Save a PNG plot of the solution to this path
    #[arg(short, long)]
    plot: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = plan(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn plan(args: &Args) -> PlanningResult<()> {
    let config = match &args.config {
        Some(path) => PlanningConfig::from_file(path)?,
        None => PlanningConfig::default(),
    };

    let problem = config.build_problem()?;
    let mut steering = TurnAndDrive::new(config.steering());

    match problem.solve(&mut steering, config.time_budget)? {
        Ok(path) => {
            let poses = path.interpolate(problem.propagator(), problem.start(), config.interpolation_step)?;
            println!("Found solution:");
            println!("{}", format_poses(&poses));

            if let Some(file) = &args.plot {
                let mut vis = Visualizer::new();
                vis.set_title("Kinematic Car Planning");
                vis.plot_bounds(problem.space());
                vis.plot_goal_region(problem.goal().position(), problem.goal_tolerance());
                vis.plot_path(&Path2D::from_poses(&poses), &PathStyle::new(colors::PATH, "Solution"));
                vis.plot_start(&problem.start());
                vis.plot_goal(&problem.goal());
                vis.save_png(file, 800, 600)?;
                println!("Plot saved to: {}", file);
            }
        }
        Err(failure) => println!("{}", failure),
    }
    Ok(())
}
