//! svgmesh CLI - vector path to mesh and lookup-table tool.
//!
//! Usage: svgmesh <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Inputs are path lists: one SVG path-data string per line, `#` for comments.
//! Run `svgmesh --help` for available commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use svgmesh::io;
use svgmesh::mesh::{FanMesh, FanMeshOptions, Winding};
use svgmesh::path::{Center, NormalizeOptions, ScaleAxis};
use svgmesh::pipeline::{build_laser_mesh, PipelineOptions};
use svgmesh::scene::{flatten_scene, scene_bounds, tessellate_scene, TessellationOptions};
use svgmesh::spline::{ArclengthLut, LutOptions, Spline};

#[derive(Parser)]
#[command(name = "svgmesh")]
#[command(author, version, about = "Vector path to mesh CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display path statistics
    Info {
        /// Input path list
        input: PathBuf,
    },

    /// Build a fan mesh from a path list
    Mesh {
        /// Input path list
        input: PathBuf,

        /// Output mesh file (.obj, .ply or .stl)
        output: PathBuf,

        /// Target resolution used to pick the tessellation tolerance
        #[arg(short, long, default_value = "400")]
        resolution: f64,

        /// Resolution multiplier
        #[arg(short, long, default_value = "1")]
        multiplier: f64,

        /// Fixed tessellation tolerance (overrides --resolution)
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Height of the normalized art
        #[arg(short = 's', long, default_value = "100")]
        target_size: f64,

        /// Depth of the path vertices
        #[arg(short, long, default_value = "100")]
        depth: f64,

        /// Point moved to the origin
        #[arg(short, long, value_enum, default_value = "bounds")]
        center: CenterMode,

        /// Keep the source y axis direction
        #[arg(long)]
        no_flip: bool,

        /// Emit clockwise triangles
        #[arg(long)]
        clockwise: bool,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Build an arclength lookup table and spline map
    Lut {
        /// Input path list
        input: PathBuf,

        /// Output spline map (.csv, anything else is raw f32)
        output: PathBuf,

        /// Arclength accuracy
        #[arg(short, long, default_value = "1e-6")]
        accuracy: f64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CenterMode {
    /// Keep source coordinates
    None,
    /// Mean of all points
    Centroid,
    /// Centre of the bounding box
    Bounds,
}

impl From<CenterMode> for Center {
    fn from(mode: CenterMode) -> Self {
        match mode {
            CenterMode::None => Center::None,
            CenterMode::Centroid => Center::Centroid,
            CenterMode::Bounds => Center::BoundsCenter,
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Mesh {
            input,
            output,
            resolution,
            multiplier,
            tolerance,
            target_size,
            depth,
            center,
            no_flip,
            clockwise,
            sequential,
        } => {
            let normalize = NormalizeOptions::default()
                .with_center(center.into())
                .with_flip_y(!no_flip)
                .with_target_size(target_size, ScaleAxis::Y);
            let winding = if clockwise {
                Winding::Clockwise
            } else {
                Winding::CounterClockwise
            };
            let mut options = PipelineOptions::default()
                .with_target_resolution(resolution)
                .with_multiplier(multiplier)
                .with_parallel(!sequential)
                .with_normalize(normalize)
                .with_mesh(FanMeshOptions::default().with_depth(depth).with_winding(winding));
            if let Some(tolerance) = tolerance {
                options = options.with_tolerance(tolerance);
            }
            cmd_mesh(&input, &output, &options)?;
        }

        Commands::Lut {
            input,
            output,
            accuracy,
        } => {
            cmd_lut(&input, &output, accuracy)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let scene = io::read_path_list(input)?;
    let contours = flatten_scene(&scene);

    println!("File: {}", input.display());
    println!("Shapes: {}", scene.shapes.len());
    println!("Contours: {}", contours.len());

    let closed = contours.iter().filter(|c| c.is_closed()).count();
    println!("Closed contours: {}", closed);

    if let Some(bounds) = scene_bounds(&contours) {
        println!(
            "Bounding box: ({:.3}, {:.3}) to ({:.3}, {:.3})",
            bounds.x0, bounds.y0, bounds.x1, bounds.y1
        );
        println!("Dimensions: {:.3} x {:.3}", bounds.width(), bounds.height());

        let tessellation = TessellationOptions::for_bounds(bounds, 400.0, 1.0);
        let polylines = tessellate_scene(&contours, &tessellation)?;
        let points: usize = polylines.iter().map(|p| p.len()).sum();
        let strokes: usize = polylines.iter().map(|p| p.stroke_count()).sum();
        println!(
            "Tessellated (tolerance {:.4}): {} polylines, {} points, {} strokes",
            tessellation.tolerance,
            polylines.len(),
            points,
            strokes
        );
    }

    let splines: Vec<Spline> = scene.shapes.iter().flat_map(Spline::from_bez_path).collect();
    let segments: usize = splines.iter().map(|s| s.num_segments()).sum();
    println!("Bezier segments: {}", segments);
    if segments > 0 {
        match ArclengthLut::build(&splines, &LutOptions::default()) {
            Ok(lut) => println!("Total length: {:.6}", lut.total_length()),
            Err(e) => println!("Total length: unavailable ({})", e),
        }
    }

    Ok(())
}

fn cmd_mesh(
    input: &Path,
    output: &Path,
    options: &PipelineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let scene = io::read_path_list(input)?;
    log::info!("loaded {} shapes from {}", scene.shapes.len(), input.display());

    let mode = if options.parallel { "parallel" } else { "sequential" };
    println!("Building fan mesh ({})...", mode);

    let start = Instant::now();
    let mesh: FanMesh = build_laser_mesh(&scene, options)?;
    let elapsed = start.elapsed();

    println!(
        "Built: {} vertices, {} triangles, {} strips",
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.strips().len()
    );

    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_lut(input: &Path, output: &Path, accuracy: f64) -> Result<(), Box<dyn std::error::Error>> {
    let scene = io::read_path_list(input)?;
    let splines: Vec<Spline> = flatten_scene(&scene)
        .iter()
        .filter_map(|c| Spline::from_contour(&c.path).map(|s| s.transformed(c.transform)))
        .collect();
    log::info!("loaded {} splines from {}", splines.len(), input.display());

    let lut = ArclengthLut::build(&splines, &LutOptions::default().with_accuracy(accuracy))?;

    println!("Segments: {}", lut.len());
    println!("Total length: {:.6}", lut.total_length());
    println!("Keyframes (time, value, in, out):");
    for key in lut.curve().keys() {
        println!(
            "  {:.6} {:>6.2} {:>12.6} {:>12.6}",
            key.time, key.value, key.in_tangent, key.out_tangent
        );
    }

    let map = lut.spline_map();
    let is_csv = output
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        io::splinemap::save_csv(&map, output)?;
    } else {
        io::splinemap::save_raw(&map, output)?;
    }
    println!(
        "Saved: {} ({} x {} texels)",
        output.display(),
        svgmesh::spline::SplineMap::WIDTH,
        map.height()
    );

    Ok(())
}
