//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::constants;

/// Nymeria to ProtoMotion skeleton converter
#[derive(Parser, Debug)]
#[command(author, version = constants::APP_VERSION, about, long_about = None)]
pub struct Args {
    /// Path to the config file (defaults to the user config directory)
    #[arg(long, global = true, env = "NYMERIA_PROTO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a Nymeria recording to a ProtoMotion skeleton motion file
    Convert {
        /// Path to xdata.npz, or a directory containing it
        #[arg(long = "data_dir", visible_alias = "data-dir")]
        data_dir: PathBuf,

        /// Where to write the converted motion
        #[arg(long = "output_file", visible_alias = "output-file")]
        output_file: Option<PathBuf>,

        /// Optional GLB mesh passed through to the data provider
        #[arg(long = "glb_file", visible_alias = "glb-file")]
        glb_file: Option<PathBuf>,
    },
    /// Pretty-print the structure of a converted motion file
    Print {
        /// Path to the converted file
        npy_file: PathBuf,

        /// Summarise arrays with more elements than this
        #[arg(long, conflicts_with = "full")]
        threshold: Option<usize>,

        /// Print every array in full
        #[arg(long)]
        full: bool,
    },
    /// Play back the source skeleton in the terminal
    View {
        /// Path to xdata.npz, or a directory containing it
        #[arg(long = "data_dir", visible_alias = "data-dir")]
        data_dir: PathBuf,

        /// Optional GLB mesh passed through to the data provider
        #[arg(long = "glb_file", visible_alias = "glb-file")]
        glb_file: Option<PathBuf>,

        /// Play every Nth frame
        #[arg(long)]
        stride: Option<usize>,
    },
    /// List source part names and target joint names with their indices
    Joints,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_version_from_package() {
        assert_eq!(Args::command().get_version(), Some(constants::APP_VERSION));
    }

    #[test]
    fn test_convert_underscore_flags() {
        let args = Args::parse_from([
            "nymeria-proto",
            "convert",
            "--data_dir",
            "/data/rec",
            "--output_file",
            "out.npy",
        ]);
        match args.command {
            Commands::Convert {
                data_dir,
                output_file,
                glb_file,
            } => {
                assert_eq!(data_dir, PathBuf::from("/data/rec"));
                assert_eq!(output_file, Some(PathBuf::from("out.npy")));
                assert!(glb_file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_dashed_alias_and_global_flags() {
        let args = Args::parse_from(["nymeria-proto", "view", "--data-dir", "rec", "-v", "--stride", "3"]);
        assert!(args.verbose);
        assert!(matches!(args.command, Commands::View { stride: Some(3), .. }));
    }

    #[test]
    fn test_print_full_conflicts_with_threshold() {
        let result = Args::try_parse_from(["nymeria-proto", "print", "m.npy", "--full", "--threshold", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_data_dir_required() {
        assert!(Args::try_parse_from(["nymeria-proto", "convert"]).is_err());
    }
}
