mod io;
mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use meshweld::mesh_gen::{cube_3d, explode, jitter, square_2d};
use meshweld::{DuplicatedVertexRemoval, ProximityBackend, WeldCfg};
use provenance::{build_report, write_sidecar, Provenance};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "meshweld")]
#[command(about = "Remove duplicated vertices from indexed meshes")]
struct Cmd {
    /// Optional free-form tag; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    /// Emit debug-level events (includes per-run library diagnostics)
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Weld points within a tolerance and rewrite element indices
    Weld {
        /// Headerless CSV, one point per row (N × D)
        #[arg(long)]
        points: PathBuf,
        /// Headerless CSV, one element per row (M × K), 0-based indices
        #[arg(long)]
        elements: PathBuf,
        #[arg(long, default_value_t = meshweld::cfg::DEFAULT_TOLERANCE)]
        tol: f64,
        /// auto | grid | kdtree | brute-force
        #[arg(long, default_value = "auto")]
        backend: ProximityBackend,
        /// Optional single-column CSV of integer importance levels
        #[arg(long)]
        importance: Option<PathBuf>,
        #[arg(long)]
        out_points: PathBuf,
        #[arg(long)]
        out_elements: PathBuf,
        /// Optional single-column CSV of the old → new index map
        #[arg(long)]
        out_map: Option<PathBuf>,
    },
    /// Write a fixture mesh (optionally exploded into a jittered soup)
    Generate {
        #[arg(long, value_enum)]
        kind: Fixture,
        /// One vertex copy per element corner
        #[arg(long)]
        soup: bool,
        #[arg(long, default_value_t = 0.0)]
        jitter: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out_points: PathBuf,
        #[arg(long)]
        out_elements: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Fixture {
    Square,
    Cube,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Weld {
            points,
            elements,
            tol,
            backend,
            importance,
            out_points,
            out_elements,
            out_map,
        } => weld(
            WeldArgs {
                points,
                elements,
                cfg: WeldCfg {
                    tolerance: tol,
                    backend,
                },
                importance,
                out_points,
                out_elements,
                out_map,
            },
            cmd.tag,
        ),
        Action::Generate {
            kind,
            soup,
            jitter,
            seed,
            out_points,
            out_elements,
        } => generate(kind, soup, jitter, seed, out_points, out_elements, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

struct WeldArgs {
    points: PathBuf,
    elements: PathBuf,
    cfg: WeldCfg,
    importance: Option<PathBuf>,
    out_points: PathBuf,
    out_elements: PathBuf,
    out_map: Option<PathBuf>,
}

fn weld(args: WeldArgs, tag: Option<String>) -> Result<()> {
    tracing::info!(
        points = %args.points.display(),
        elements = %args.elements.display(),
        tolerance = args.cfg.tolerance,
        backend = args.cfg.backend.name(),
        tag = ?tag,
        "weld"
    );
    let points = io::read_points_csv(&args.points)?;
    let elements = io::read_elements_csv(&args.elements)?;
    tracing::info!(
        rows = points.nrows(),
        dim = points.ncols(),
        elements = elements.nrows(),
        arity = elements.ncols(),
        "input_shape"
    );
    let mut remover = DuplicatedVertexRemoval::new(points, elements)
        .context("validating input mesh")?;
    if let Some(path) = &args.importance {
        remover.set_importance_levels(io::read_importance_csv(path)?)?;
    }
    let stats = remover.run_with(&args.cfg)?;
    tracing::info!(
        points_in = stats.points_in,
        points_out = stats.points_out,
        removed = stats.removed(),
        pairs = stats.proximity_pairs,
        "welded"
    );

    io::write_points_csv(&args.out_points, remover.points()?)?;
    io::write_elements_csv(&args.out_elements, remover.elements()?)?;
    if let Some(path) = &args.out_map {
        io::write_index_map_csv(path, remover.index_map()?.as_slice())?;
    }

    let mut prov = Provenance::new(
        "weld",
        tag,
        json!({
            "tolerance": args.cfg.tolerance,
            "backend": args.cfg.backend.resolve(remover.input_points().ncols()).name(),
            "importance": args.importance.is_some(),
            "dim": remover.input_points().ncols(),
            "arity": remover.input_elements().ncols(),
        }),
    )
    .input(&args.points)
    .input(&args.elements)
    .output(&args.out_points)
    .output(&args.out_elements)
    .with_stats(json!({
        "points_in": stats.points_in,
        "points_out": stats.points_out,
        "removed": stats.removed(),
        "proximity_pairs": stats.proximity_pairs,
    }));
    if let Some(path) = &args.importance {
        prov = prov.input(path);
    }
    if let Some(path) = &args.out_map {
        prov = prov.output(path);
    }
    write_sidecar(&args.out_points, &prov)?;
    Ok(())
}

fn generate(
    kind: Fixture,
    soup: bool,
    amplitude: f64,
    seed: u64,
    out_points: PathBuf,
    out_elements: PathBuf,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(kind = ?kind, soup, jitter = amplitude, seed, "generate");
    if !amplitude.is_finite() || amplitude < 0.0 {
        bail!("--jitter must be a finite non-negative number, got {amplitude}");
    }
    let (mut points, mut elements) = match kind {
        Fixture::Square => square_2d(),
        Fixture::Cube => cube_3d(),
    };
    if soup {
        (points, elements) = explode(&points, &elements);
    }
    let points = jitter(&points, amplitude, seed);
    io::write_points_csv(&out_points, &points)?;
    io::write_elements_csv(&out_elements, &elements)?;

    let prov = Provenance::new(
        "generate",
        tag,
        json!({
            "kind": format!("{kind:?}").to_lowercase(),
            "soup": soup,
            "jitter": amplitude,
            "seed": seed,
        }),
    )
    .output(&out_points)
    .output(&out_elements)
    .with_stats(json!({ "points": points.nrows(), "elements": elements.nrows() }));
    write_sidecar(&out_points, &prov)?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&build_report(tag))?);
    Ok(())
}
