use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use medpic_docx::{
    CropPreset, GenerationOptions, GenerationRequest, LengthUnit, Orientation, PageMargins,
    PaperSize, calculate_statistics, generate, load_images, save_artifact,
};
use medpic_layout::{FitStrategy, GridShape};

#[derive(Parser)]
#[command(name = "medpic", about = "MED PICTURES document generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Word document with a paginated image grid
    Generate {
        /// Project title
        #[arg(short, long)]
        title: String,

        /// Contractor name
        #[arg(short, long)]
        contractor: String,

        /// Image file(s), in document order - can specify multiple
        #[arg(short, long, required = true, num_args = 1..)]
        image: Vec<PathBuf>,

        /// Grid layout as ROWSxCOLS (e.g. 2x2, 3x2)
        #[arg(long, default_value = "2x2")]
        layout: String,

        /// Page orientation
        #[arg(long, default_value = "portrait", value_enum)]
        orientation: OrientationArg,

        /// Image fit strategy
        #[arg(long, default_value = "crop", value_enum)]
        fit: FitArg,

        /// Paper size
        #[arg(long, default_value = "letter", value_enum)]
        paper: PaperArg,

        /// Default picture width
        #[arg(long, default_value = "3.0")]
        image_width: f32,

        /// Default picture height
        #[arg(long, default_value = "2.5")]
        image_height: f32,

        /// Unit for lengths given on the command line
        #[arg(long, default_value = "in", value_enum)]
        unit: UnitArg,

        /// Page margin (uniform on all sides)
        #[arg(long, default_value = "1.0")]
        margin: f32,

        /// Per-image crop preset as FILE=PRESET (repeatable)
        #[arg(long = "preset", value_name = "FILE=PRESET")]
        preset: Vec<String>,

        /// Sequence number for repeat generations in one session
        #[arg(long, default_value = "0")]
        sequence: usize,

        /// Show statistics only, don't generate the document
        #[arg(long)]
        stats_only: bool,

        /// Output path (defaults to the derived filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the named crop presets
    Presets,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    /// Center-crop to the target aspect, then scale
    Crop,
    /// Shrink to fit and letterbox on a white canvas
    Pad,
    /// Match the target width, derive the height
    ScaleWidth,
    /// Match the target height, derive the width
    ScaleHeight,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    Legal,
    A4,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    In,
    Cm,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<FitArg> for FitStrategy {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Crop => Self::CropToAspect,
            FitArg::Pad => Self::PadToSize,
            FitArg::ScaleWidth => Self::ScaleWidth,
            FitArg::ScaleHeight => Self::ScaleHeight,
        }
    }
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::A4 => Self::A4,
        }
    }
}

impl From<UnitArg> for LengthUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::In => Self::Inches,
            UnitArg::Cm => Self::Centimeters,
        }
    }
}

fn parse_preset(spec: &str) -> Result<(String, CropPreset)> {
    let (file, name) = spec
        .split_once('=')
        .with_context(|| format!("expected FILE=PRESET, got '{spec}'"))?;
    let preset = match name.trim().to_ascii_lowercase().as_str() {
        "small" => CropPreset::Small,
        "medium" => CropPreset::Medium,
        "large" => CropPreset::Large,
        "banner" => CropPreset::Banner,
        other => bail!("unknown crop preset '{other}'"),
    };
    Ok((file.trim().to_string(), preset))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            title,
            contractor,
            image,
            layout,
            orientation,
            fit,
            paper,
            image_width,
            image_height,
            unit,
            margin,
            preset,
            sequence,
            stats_only,
            output,
        } => {
            let shape = GridShape::parse(&layout)?;
            let unit = LengthUnit::from(unit);

            let mut crop_presets = HashMap::new();
            for spec in &preset {
                let (file, chosen) = parse_preset(spec)?;
                crop_presets.insert(file, chosen);
            }

            let options = GenerationOptions {
                shape,
                orientation: orientation.into(),
                fit_strategy: fit.into(),
                image_width_in: unit.to_inches(image_width),
                image_height_in: unit.to_inches(image_height),
                paper_size: paper.into(),
                margins: PageMargins::uniform(unit.to_inches(margin)),
                crop_presets,
            };

            let stats = calculate_statistics(image.len(), shape)?;
            println!("Document statistics:");
            println!("  Images: {}", stats.image_count);
            println!("  Pages: {}", stats.page_count);
            println!("  Slots per page: {}", stats.slots_per_page);
            println!("  Blank slots: {}", stats.blank_slots);

            if stats_only {
                return Ok(());
            }

            let mut request = GenerationRequest::new(title, contractor);
            request.images = load_images(&image).await?;
            request.sequence = sequence;

            let artifact = generate(request, options).await?;
            let output = output.unwrap_or_else(|| PathBuf::from(&artifact.filename));
            save_artifact(&artifact, &output).await?;
            println!("Generated → {}", output.display());
        }

        Commands::Presets => {
            for preset in CropPreset::ALL {
                let (w, h) = preset.dimensions_in();
                println!("{:<8} {w} x {h} in", preset.name());
            }
        }
    }

    Ok(())
}
