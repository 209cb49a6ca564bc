use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use solver::{Run, RunParams, StepOutcome, StopReason};

mod vtk;

/// Physical plate size in meters.
const PLATE_WIDTH: f64 = 9.0;
const PLATE_HEIGHT: f64 = 9.0;

/// Laplace (Jacobi) plate solver with ParaView-ready outputs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid points in x (columns)
    #[arg(long, default_value_t = 181)]
    nx: usize,

    /// Grid points in y (rows)
    #[arg(long, default_value_t = 181)]
    ny: usize,

    /// Convergence tolerance on delta
    #[arg(long, default_value_t = 1e-3)]
    tol: f64,

    /// Safety cap on sweeps
    #[arg(long = "max-iters", default_value_t = 20_000)]
    max_iters: u32,

    /// Write a snapshot every N sweeps
    #[arg(long = "output-every", default_value_t = 20)]
    output_every: u32,

    /// Output directory
    #[arg(long, default_value = "out_vtk")]
    out: PathBuf,

    /// Write CSV snapshots too
    #[arg(long = "also-csv")]
    also_csv: bool,

    /// Hot square size as a fraction of the domain
    #[arg(long = "hot-fraction", default_value_t = 1.0 / 3.0)]
    hot_fraction: f64,

    /// Skip snapshot writing entirely
    #[arg(long = "no-vtk")]
    no_vtk: bool,

    /// Write legacy STRUCTURED_POINTS .vtk files instead of XML .vti
    #[arg(long)]
    legacy: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let params = RunParams {
        nx: args.nx,
        ny: args.ny,
        hot_fraction: args.hot_fraction,
        tolerance: args.tol,
        max_sweeps: args.max_iters,
        ..RunParams::default()
    };
    let mut run = Run::new(params)?;

    let dx = PLATE_WIDTH / (args.nx.max(2) - 1) as f64;
    let dy = PLATE_HEIGHT / (args.ny.max(2) - 1) as f64;
    let output_every = args.output_every.max(1);

    if !args.no_vtk || args.also_csv {
        std::fs::create_dir_all(&args.out)
            .with_context(|| format!("could not create output directory {}", args.out.display()))?;
    }

    let mut entries: Vec<(String, u32)> = Vec::new();
    write_snapshot(&args, &run, dx, dy, &mut entries)?;

    let reason = loop {
        match run.step() {
            StepOutcome::Running => {
                if run.sweep_count() % output_every == 0 {
                    write_snapshot(&args, &run, dx, dy, &mut entries)?;
                    println!(
                        "[iter {:6}] delta={:.6e}",
                        run.sweep_count(),
                        run.last_delta()
                    );
                }
            }
            StepOutcome::Finished(reason) => {
                write_snapshot(&args, &run, dx, dy, &mut entries)?;
                break reason;
            }
        }
    };

    if !args.no_vtk && !entries.is_empty() {
        let pvd_path = args.out.join("series.pvd");
        let file = File::create(&pvd_path)
            .with_context(|| format!("could not create {}", pvd_path.display()))?;
        let mut writer = BufWriter::new(file);
        vtk::write_collection(&mut writer, &entries)?;
        writer.flush()?;
        println!("Open in ParaView: {} (time series)", pvd_path.display());
    }

    match reason {
        StopReason::Converged => {
            println!(
                "Done. Final iter={}, delta={:.6e}",
                run.sweep_count(),
                run.last_delta()
            );
        }
        StopReason::MaxSweepsReached => {
            println!(
                "Stopped at sweep cap {} without converging, delta={:.6e}",
                run.sweep_count(),
                run.last_delta()
            );
        }
    }

    Ok(())
}

fn write_snapshot(
    args: &Args,
    run: &Run,
    dx: f64,
    dy: f64,
    entries: &mut Vec<(String, u32)>,
) -> Result<()> {
    let sweep = run.sweep_count();

    if !args.no_vtk {
        let ext = if args.legacy { "vtk" } else { "vti" };
        let name = format!("step_{sweep:05}.{ext}");
        let path = args.out.join(&name);
        let file =
            File::create(&path).with_context(|| format!("could not create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        if args.legacy {
            vtk::write_legacy(&mut writer, run.field(), dx, dy, "Temperature")?;
        } else {
            vtk::write_image_data(&mut writer, run.field(), dx, dy, "Temperature")?;
        }
        writer.flush()?;
        entries.push((name, sweep));
    }

    if args.also_csv {
        let path = args.out.join(format!("step_{sweep:05}.csv"));
        let file =
            File::create(&path).with_context(|| format!("could not create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        vtk::write_csv(&mut writer, run.field())?;
        writer.flush()?;
    }

    Ok(())
}
