//! pixgrid CLI: reduce upscaled pixel art back to one pixel per grid cell.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use pixgrid::{io, GridColor, PixelGridPipeline, PixgridConfig, PixgridReport, SampleMode};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Parser)]
#[command(name = "pixgrid")]
#[command(about = "Reconstruct the pixel grid of upscaled pixel art from gradient energy")]
#[command(version)]
struct Cli {
    /// Input image.
    #[arg(long = "in", value_name = "PATH", required_unless_present = "config")]
    input: Option<PathBuf>,

    /// Output image (default: out/<stem>_sampled.png).
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// JSON config; flags given on the command line override its values.
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Gaussian blur sigma before the gradients (0 disables blur).
    #[arg(long)]
    sigma: Option<f32>,

    /// Expected grid spacing in pixels.
    #[arg(long)]
    gap_size: Option<u32>,

    /// Accepted deviation from the grid spacing in pixels.
    #[arg(long)]
    gap_tolerance: Option<u32>,

    /// Peak threshold relative to the profile maximum, in [0, 1].
    #[arg(long)]
    min_energy: Option<f32>,

    /// Profile smoothing window (0 or 1 disables smoothing).
    #[arg(long)]
    smooth: Option<usize>,

    /// Cell sampling mode: center, average or weighted.
    #[arg(long)]
    mode: Option<SampleMode>,

    /// Centre window size relative to the cell for weighted mode.
    #[arg(long)]
    weight_ratio: Option<f32>,

    /// Draw separators between output cells.
    #[arg(long)]
    show_grid: bool,

    /// Separator colour: red, green, blue, yellow, cyan, magenta, gray, white, black.
    #[arg(long)]
    grid_color: Option<GridColor>,

    /// Edge length of each output cell in pixels.
    #[arg(long)]
    pixel_size: Option<u32>,

    /// Also write the 8-bit energy heatmap.
    #[arg(long, value_name = "PATH")]
    heatmap: Option<PathBuf>,

    /// Write a JSON run report.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Emit JSON trace events (builds with the `tracing` feature).
    #[arg(long)]
    json_trace: bool,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn load_config(&self) -> CliResult<PixgridConfig> {
        let mut cfg = match (&self.config, &self.input) {
            (Some(path), _) => PixgridConfig::load_json(path)?,
            (None, Some(input)) => PixgridConfig::new(input.to_string_lossy()),
            (None, None) => return Err("either --in or --config is required".into()),
        };
        if let Some(input) = &self.input {
            cfg.image_path = input.to_string_lossy().into_owned();
        }
        if let Some(out) = &self.out {
            cfg.output_path = Some(out.to_string_lossy().into_owned());
        }
        if let Some(heatmap) = &self.heatmap {
            cfg.heatmap_path = Some(heatmap.to_string_lossy().into_owned());
        }
        if let Some(report) = &self.report {
            cfg.report_path = Some(report.to_string_lossy().into_owned());
        }

        let grid = &mut cfg.params.grid;
        if let Some(v) = self.sigma {
            grid.sigma = v;
        }
        if let Some(v) = self.gap_size {
            grid.gap_size = v;
        }
        if let Some(v) = self.gap_tolerance {
            grid.gap_tolerance = v;
        }
        if let Some(v) = self.min_energy {
            grid.min_energy = v;
        }
        if let Some(v) = self.smooth {
            grid.smooth = v;
        }

        let sample = &mut cfg.params.sample;
        if let Some(v) = self.mode {
            sample.mode = v;
        }
        if let Some(v) = self.weight_ratio {
            sample.weight_ratio = v;
        }
        if let Some(v) = self.pixel_size {
            sample.pixel_size = v;
        }

        // --grid-color alone only recolours an overlay the config already enables.
        let show_grid = self.show_grid || cfg.params.overlay.is_some();
        if show_grid {
            let color = self.grid_color.or(cfg.params.overlay).unwrap_or_default();
            cfg.params.overlay = Some(color);
        }
        Ok(cfg)
    }
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) -> CliResult<()> {
    use pixgrid::core::TraceFormat;
    let format = if cli.json_trace {
        TraceFormat::Json
    } else {
        TraceFormat::Pretty
    };
    pixgrid::core::init_tracing(format, cli.level());
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) -> CliResult<()> {
    pixgrid::core::init_with_level(cli.level())?;
    if cli.json_trace {
        log::warn!("--json-trace needs a build with the `tracing` feature; ignoring");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match init_logging(&cli).and_then(|()| run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let cfg = cli.load_config()?;
    let img = io::load_rgb(&cfg.image_path)?;
    log::info!("loaded {}", cfg.image_path);

    let pipeline = PixelGridPipeline::new(cfg.params.clone())?;
    let result = pipeline.run(&io::rgb_view(&img))?;

    if let Some(path) = &cfg.heatmap_path {
        io::save_gray(&result.heatmap, path)?;
        log::info!("heatmap written to {path}");
    }

    let mut report = PixgridReport::new(&cfg.image_path, &cfg.params, &result);
    let out = cfg.resolved_output_path();
    if result.image.is_empty() {
        log::warn!(
            "no grid cells found, nothing written to {}; try a different --gap-size or --min-energy",
            out.display()
        );
    } else {
        io::save_rgb(&result.image, &out)?;
        report.set_output_path(&out);
        log::info!("saved {}", out.display());
    }

    if let Some(path) = &cfg.report_path {
        report.write_json(path)?;
        log::info!("report written to {path}");
    }

    Ok(())
}
