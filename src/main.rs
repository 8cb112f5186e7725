use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cutgen_layout::{CutArray, CutArrayGenerator, DiodeAntenna, Region, ShapeRequest, ShapeSet};
use cutgen_tech::{LayerId, TechnologyRegistry};
use std::path::PathBuf;
use tracing::info;

/// cutgen - contact and via array placement
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Technology file (defaults to the built-in technologies)
    #[arg(long, global = true)]
    tech_file: Option<PathBuf>,

    /// Technology name
    #[arg(short, long, global = true, default_value = cutgen_tech::builtin::SG13)]
    technology: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a cut array inside a region
    Plan {
        /// Cut layer (e.g. Cont, Via1)
        #[arg(short, long, default_value = "Cont")]
        layer: String,

        /// Region width (microns)
        #[arg(long)]
        width: f64,

        /// Region length (microns)
        #[arg(long)]
        length: f64,

        /// Region origin x
        #[arg(long, default_value_t = 0.0)]
        x: f64,

        /// Region origin y
        #[arg(long, default_value_t = 0.0)]
        y: f64,
    },

    /// Generate diode antenna shapes
    Antenna {
        /// Diffusion width (microns)
        #[arg(long, default_value_t = 0.78)]
        width: f64,

        /// Diffusion length (microns)
        #[arg(long, default_value_t = 0.78)]
        length: f64,

        /// Leave out the recognition layer
        #[arg(long)]
        no_recognition: bool,
    },

    /// List available technologies and their cut layers
    Techs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let registry = load_registry(cli.tech_file.as_ref())?;

    match cli.command {
        Commands::Plan {
            layer,
            width,
            length,
            x,
            y,
        } => {
            let generator = CutArrayGenerator::from_registry(&registry, &cli.technology)?;
            let region = Region::new(x, y, width, length);
            let array = generator
                .place(&LayerId::new(layer.as_str()), &region)
                .with_context(|| format!("Failed to place {} cuts in {}x{}", layer, width, length))?;
            info!("Placed {} cuts", array.placement.len());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&array)?);
            } else {
                print_array(&array);
            }
        }

        Commands::Antenna {
            width,
            length,
            no_recognition,
        } => {
            let technology = registry.get(&cli.technology)?;
            let shapes = DiodeAntenna::new(width, length)
                .with_recognition(!no_recognition)
                .build(technology)
                .context("Failed to generate diode antenna")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&shapes)?);
            } else {
                print_shapes(&shapes);
            }
        }

        Commands::Techs => {
            for technology in registry.iter() {
                println!(
                    "{} (grid {} um)",
                    technology.name, technology.grid.pitch
                );
                for (layer, rules) in &technology.layers {
                    let density = match (rules.spacing.thresholds(), rules.spacing.relaxed_spacing()) {
                        (Some((rows, cols)), Some(relaxed)) => {
                            format!(", {} from {}x{}", relaxed, rows, cols)
                        }
                        _ => String::new(),
                    };
                    println!(
                        "  {:<8} cut {} spacing {} overhang {}{}",
                        layer, rules.cut.cut_size, rules.cut.spacing, rules.cut.overhang, density
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_registry(path: Option<&PathBuf>) -> Result<TechnologyRegistry> {
    match path {
        Some(path) => cutgen_tech::from_path(path)
            .with_context(|| format!("Failed to load technology file {}", path.display())),
        None => Ok(TechnologyRegistry::builtin()),
    }
}

fn print_array(array: &CutArray) {
    let placement = &array.placement;
    println!(
        "{}: {} rows x {} columns, spacing {}{}",
        array.layer,
        placement.rows,
        placement.columns,
        placement.spacing,
        if array.decision.relaxed {
            " (density relaxed)"
        } else {
            ""
        }
    );
    println!(
        "bbox: ({:.4}, {:.4}) - ({:.4}, {:.4})",
        placement.bbox.x1, placement.bbox.y1, placement.bbox.x2, placement.bbox.y2
    );
    for origin in &placement.cuts {
        println!("  cut at ({:.4}, {:.4})", origin.x, origin.y);
    }
}

fn print_shapes(set: &ShapeSet) {
    println!("{}: {} shapes", set.name, set.shapes.len());
    for shape in &set.shapes {
        match shape {
            ShapeRequest::Label {
                layer,
                text,
                position,
            } => println!("  {:<12} label '{}' at ({:.4}, {:.4})", layer, text, position.x, position.y),
            other => {
                if let Some(rect) = other.rect() {
                    println!(
                        "  {:<12} ({:.4}, {:.4}) - ({:.4}, {:.4})",
                        other.layer(),
                        rect.x1,
                        rect.y1,
                        rect.x2,
                        rect.y2
                    );
                }
            }
        }
    }
}
