use std::io::{self, Write};

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use nymeria_proto::cli::args::{Args, Commands};
use nymeria_proto::cli::commands;
use nymeria_proto::config::Config;
use nymeria_proto::constants;
use nymeria_proto::printer::PrinterConfig;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            println!("{}{e}", constants::CLI_MSG_CONFIG_ERROR);
            Config::default()
        }
    };

    let mut out = io::stdout();
    match args.command {
        Commands::Convert {
            data_dir,
            output_file,
            glb_file,
        } => {
            let output_file = output_file.unwrap_or(config.convert.output_file);
            commands::convert(&data_dir, &output_file, non_empty(glb_file.as_deref()), &mut out)?;
        }
        Commands::Print {
            npy_file,
            threshold,
            full,
        } => {
            let printer = if full {
                PrinterConfig::full()
            } else {
                threshold.map_or_else(
                    || config.printer(),
                    |summary_threshold| PrinterConfig { summary_threshold },
                )
            };
            commands::print(&npy_file, &printer, &mut out)?;
        }
        Commands::View {
            data_dir,
            glb_file,
            stride,
        } => {
            let mut viewer = config.viewer;
            if let Some(stride) = stride {
                viewer.frame_stride = stride;
            }
            commands::view(&data_dir, non_empty(glb_file.as_deref()), &viewer, &mut out)?;
        }
        Commands::Joints => commands::joints(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Treats `--glb_file ""` as absent.
fn non_empty(path: Option<&std::path::Path>) -> Option<&std::path::Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
