use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paint_quantize::DrawOrderPlanner;
use redrawer::models::{AppConfig, RunSettings};
use redrawer::rendering::png_io;
use redrawer::services::{CompilePipeline, JsonFileStore};

#[derive(Parser)]
#[command(name = "redrawer")]
#[command(about = "Compile images into per-color drawing instructions for paint programs")]
struct Cli {
    /// Config file (defaults to $CONFIG_FILE)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an image into the instruction store and print the draw order
    Compile {
        /// Input PNG image
        image: PathBuf,

        /// Instruction store file (overrides store_path from config)
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
    /// Print the draw order of an existing instruction store
    Order {
        /// Instruction store file (overrides store_path from config)
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
    /// Render the palette derived from an image as a swatch PNG
    Palette {
        /// Input PNG image
        image: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Swatch cell size in pixels
        #[arg(long, default_value_t = 32)]
        scale: usize,
    },
    /// Render the quantized image as a PNG
    Preview {
        /// Input PNG image
        image: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redrawer=info,paint_quantize=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_file = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let config = AppConfig::load_or_default(config_file.as_deref())?;
    let mut settings = config.resolve()?;

    match cli.command {
        Some(Commands::Compile { image, store }) => {
            if let Some(store) = store {
                settings.store_path = store;
            }
            run_compile_command(settings, &image)
        }
        Some(Commands::Order { store }) => {
            let store = store.unwrap_or(settings.store_path);
            run_order_command(&store)
        }
        Some(Commands::Palette {
            image,
            output,
            scale,
        }) => run_palette_command(settings, &image, &output, scale),
        Some(Commands::Preview { image, output }) => {
            run_preview_command(settings, &image, &output)
        }
        None => {
            run_status_command(config_file.as_deref(), &settings);
            Ok(())
        }
    }
}

/// Run the full pipeline and print keys in draw order
fn run_compile_command(settings: RunSettings, image: &Path) -> anyhow::Result<()> {
    let store_path = settings.store_path.clone();
    let report = CompilePipeline::new(settings).run_file(image)?;

    println!(
        "Compiled {} ({} colors, {} used, {} runs) -> {}",
        image.display(),
        report.summary.colors,
        report.summary.used_colors,
        report.summary.runs,
        store_path.display()
    );
    for planned in report.order.iter().filter(|p| p.runs > 0) {
        println!("{}\t{}", planned.coord, planned.runs);
    }
    Ok(())
}

/// Print the draw order of an existing store
fn run_order_command(store_path: &Path) -> anyhow::Result<()> {
    let store = JsonFileStore::open(store_path)?;
    let order = DrawOrderPlanner::new().plan_with_counts(&store)?;
    for planned in order {
        println!("{}\t{}", planned.coord, planned.runs);
    }
    Ok(())
}

/// Write the derived palette as a swatch image
fn run_palette_command(
    settings: RunSettings,
    image: &Path,
    output: &Path,
    scale: usize,
) -> anyhow::Result<()> {
    anyhow::ensure!(scale > 0, "swatch scale must be at least 1");

    let image = png_io::read_png(image)?;
    let palette = CompilePipeline::new(settings).build_palette(&image)?;
    let (width, height, rgb) = palette.swatch(scale);
    png_io::write_rgb_png(output, width as u32, height as u32, &rgb)?;

    print!("{palette}");
    println!("Rendered {} ({}x{})", output.display(), width, height);
    Ok(())
}

/// Write the quantized image
fn run_preview_command(settings: RunSettings, image: &Path, output: &Path) -> anyhow::Result<()> {
    let image = png_io::read_png(image)?;
    let (palette, grid) = CompilePipeline::new(settings).quantize(&image)?;
    let rgb = grid.to_rgb(&palette)?;
    png_io::write_rgb_png(output, grid.width() as u32, grid.height() as u32, &rgb)?;

    println!("Rendered {} ({}x{})", output.display(), grid.width(), grid.height());
    Ok(())
}

/// Show the effective configuration
fn run_status_command(config_file: Option<&Path>, settings: &RunSettings) {
    println!("Redrawer\n");

    let config_source = match config_file {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("  Config:           {config_source}");
    println!("  Metric:           {}", settings.metric);
    println!("  Distinctiveness:  {}", settings.distinctiveness);
    println!("  Candidate pool:   {}", settings.candidate_pool);
    println!("  Accent colors:    {}", settings.accent_count);
    println!("  Store:            {}", settings.store_path.display());

    println!("\nCommands:");
    println!("  redrawer compile <image>    Compile an image into drawing instructions");
    println!("  redrawer order              Print the draw order of the store");
    println!("  redrawer palette <image>    Render the derived palette to PNG");
    println!("  redrawer preview <image>    Render the quantized image to PNG");
    println!("\nRun 'redrawer --help' for more details.");
}
