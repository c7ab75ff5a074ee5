//! `posecheck` command-line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use posecheck::{load_camera_data, plot_and_save_cameras, PlotOptions, Result};

/// Arrow length used by the command line when no config sets one.
const CLI_ARROW_LENGTH: f32 = 3.0;

#[derive(Parser, Debug, Clone)]
#[command(name = "posecheck")]
#[command(about = "Plot camera positions and viewing directions from a transforms.json file")]
struct Cli {
    /// Nerfstudio-style transforms file
    transform_json_path: PathBuf,

    /// Output image for the default view
    default_output_img: PathBuf,

    /// Output image for the top view
    top_view_output_img: PathBuf,

    /// Length of the viewing-direction arrows
    #[arg(long)]
    arrow_length: Option<f32>,

    /// Export resolution
    #[arg(long)]
    dpi: Option<u32>,

    /// JSON file with plot options
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn plot_options(&self) -> Result<PlotOptions> {
        let defaults = PlotOptions {
            arrow_length: CLI_ARROW_LENGTH,
            ..PlotOptions::default()
        };
        let mut options = match &self.config {
            Some(path) => defaults.merged_with_json_file(path)?,
            None => defaults,
        };
        if let Some(arrow_length) = self.arrow_length {
            options.arrow_length = arrow_length;
        }
        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        Ok(options)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.plot_options()?;
    log::debug!("plot options: {options:?}");

    let cameras = load_camera_data(&cli.transform_json_path)?;
    println!("Loaded {} cameras.", cameras.len());

    plot_and_save_cameras(
        &cameras,
        &options,
        &cli.default_output_img,
        &cli.top_view_output_img,
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.is_format_error() {
                log::error!(
                    "{} is not a usable transforms file",
                    cli.transform_json_path.display()
                );
            }
            log::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
