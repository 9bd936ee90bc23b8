//! Headless block-world driver
//!
//! Builds a world, applies voxel edits, and runs a scripted number of ticks.

use std::path::PathBuf;
use std::process::ExitCode;

use blockworld::{BlockType, MovementIntent, Settings, SettingsError, Simulation, VoxelCode};
use clap::{Parser, ValueEnum};

/// Headless block-world simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML settings file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Direction the avatar walks every tick
    #[arg(long, value_enum, default_value_t = Walk::Stand)]
    walk: Walk,

    /// Press jump every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    jump_every: u64,

    /// Remove the voxel at X,Y,Z before the first tick (repeatable)
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_voxel)]
    dig: Vec<[i32; 3]>,

    /// Place a voxel at X,Y,Z before the first tick (repeatable)
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_voxel)]
    place: Vec<[i32; 3]>,

    /// Material code used by --place
    #[arg(long, default_value_t = BlockType::Stone.code())]
    material: VoxelCode,

    /// Log a telemetry line every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Walk {
    #[value(name = "none")]
    Stand,
    Forward,
    Backward,
    Left,
    Right,
}

impl Walk {
    fn intent(self) -> MovementIntent {
        let mut intent = MovementIntent::IDLE;
        match self {
            Walk::Stand => {}
            Walk::Forward => intent.forward = true,
            Walk::Backward => intent.backward = true,
            Walk::Left => intent.left = true,
            Walk::Right => intent.right = true,
        }
        intent
    }
}

fn parse_voxel(s: &str) -> Result<[i32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got '{s}'"));
    };
    let parse = |v: &str| {
        v.parse::<i32>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    Ok([parse(*x)?, parse(*y)?, parse(*z)?])
}

fn run(args: &Args) -> Result<(), SettingsError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut sim = Simulation::new(&settings);

    let edits = args
        .dig
        .iter()
        .map(|pos| (pos, BlockType::Air.code()))
        .chain(args.place.iter().map(|pos| (pos, args.material)));
    for (&[x, y, z], code) in edits {
        if !sim.edit_voxel(x, y, z, code) {
            tracing::warn!("Edit at ({}, {}, {}) is outside the world", x, y, z);
        }
    }

    if !(args.dt.is_finite() && args.dt > 0.0) {
        tracing::warn!("dt={} is not a usable tick length, ticks will be skipped", args.dt);
    }

    let walk = args.walk.intent();
    for tick in 0..args.ticks {
        let jump = args.jump_every > 0 && tick % args.jump_every == 0;
        sim.tick(walk.with_jump(jump), args.dt);

        if args.report_every > 0 && (tick + 1) % args.report_every == 0 {
            tracing::info!("{}", sim.stats());
        }
    }

    tracing::info!("Finished: {}", sim.stats());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::info!("Starting block-world simulation...");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_voxel_coordinates() {
        assert_eq!(parse_voxel("1,2,3"), Ok([1, 2, 3]));
        assert_eq!(parse_voxel(" -4, 0 ,7"), Ok([-4, 0, 7]));
        assert!(parse_voxel("1,2").is_err());
        assert!(parse_voxel("1,2,x").is_err());
    }

    #[test]
    fn cli_accepts_repeated_edits() {
        let args = Args::try_parse_from([
            "blockworld",
            "--dig",
            "1,2,3",
            "--dig",
            "4,5,6",
            "--walk",
            "left",
        ])
        .unwrap();
        assert_eq!(args.dig, vec![[1, 2, 3], [4, 5, 6]]);
        assert_eq!(args.walk.intent().direction().x, -1.0);
        assert!(Args::try_parse_from(["blockworld", "--place", "1,2"]).is_err());
    }
}
