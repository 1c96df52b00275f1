//! Subcommand handlers.
//!
//! Library errors are reported on `out` and swallowed here, so a failed
//! conversion still exits normally. Only failures to write to `out` itself
//! propagate.

use std::io::{self, Write};
use std::path::Path;

use crate::config::ViewerConfig;
use crate::constants;
use crate::error::Error;
use crate::mapping::{create_proto_motion, MappingPlan};
use crate::printer::{print_record, PrinterConfig};
use crate::provider::create_body_data_provider;
use crate::record::{load_record, save_record, Value};
use crate::skeleton::{ProtoJoint, PART_NAMES};
use crate::viewer::{self, ViewerApp};

/// Converts the recording at `data_dir` and writes the result to `output_file`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn convert<W: Write>(
    data_dir: &Path,
    output_file: &Path,
    glb_file: Option<&Path>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}{}", constants::CLI_MSG_LOADING, data_dir.display())?;

    let provider = match create_body_data_provider(data_dir, glb_file) {
        Ok(provider) => {
            writeln!(out, "{}", constants::CLI_MSG_PROVIDER_OK)?;
            provider
        }
        Err(e) => {
            tracing::error!(error = %e, "provider creation failed");
            writeln!(out, "Error: {e}")?;
            writeln!(out, "{}", constants::CLI_MSG_PROVIDER_FAILED)?;
            return Ok(());
        }
    };

    writeln!(out, "{}", constants::CLI_MSG_MAPPING_HEADER)?;
    let record = match create_proto_motion(&provider, &MappingPlan::nymeria()) {
        Ok(motion) => {
            for line in &motion.report {
                writeln!(out, "{line}")?;
            }
            Some(Value::Record(motion.to_record()))
        }
        Err(e) => {
            tracing::error!(error = %e, "conversion failed");
            writeln!(out, "{}{e}", constants::CLI_MSG_ERROR)?;
            writeln!(out, "{}", constants::CLI_MSG_CONVERT_FAILED)?;
            None
        }
    };

    save_output(record.as_ref(), output_file, out)
}

/// Writes `record` to `path`, or reports that there is nothing to save.
fn save_output<W: Write>(record: Option<&Value>, path: &Path, out: &mut W) -> io::Result<()> {
    let Some(record) = record else {
        return writeln!(out, "{}", constants::CLI_MSG_NOTHING_TO_SAVE);
    };
    match save_record(record, path) {
        Ok(()) => writeln!(out, "{}{}", constants::CLI_MSG_SAVED, path.display()),
        Err(e) => writeln!(out, "{}{}: {e}", constants::CLI_MSG_SAVE_FAILED, path.display()),
    }
}

/// Loads a converted file and prints its structure.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn print<W: Write>(path: &Path, config: &PrinterConfig, out: &mut W) -> io::Result<()> {
    match load_record(path) {
        Ok(value) => {
            print_record(&value, config, out)?;
            writeln!(out)
        }
        Err(Error::NotFound(_)) => {
            writeln!(out, "{}{}", constants::CLI_MSG_FILE_NOT_FOUND, path.display())
        }
        Err(e) => writeln!(out, "{}{e}", constants::CLI_MSG_ERROR),
    }
}

/// Plays back the recording at `data_dir` in the terminal.
///
/// # Errors
///
/// Returns an error if writing to `out` fails or the terminal cannot be
/// driven.
pub fn view<W: Write>(
    data_dir: &Path,
    glb_file: Option<&Path>,
    config: &ViewerConfig,
    out: &mut W,
) -> color_eyre::Result<()> {
    let provider = match create_body_data_provider(data_dir, glb_file) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!(error = %e, "provider creation failed");
            writeln!(out, "Error: {e}")?;
            writeln!(out, "{}", constants::CLI_MSG_PROVIDER_FAILED)?;
            return Ok(());
        }
    };

    let app = match ViewerApp::new(&provider, config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "no playable frames");
            writeln!(out, "{}", constants::CLI_MSG_VIEW_NO_FRAMES)?;
            return Ok(());
        }
    };
    out.flush()?;
    viewer::run(app, config.tick_rate_ms)
}

/// Lists source part names and target joint names with their indices.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn joints<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", constants::CLI_MSG_XSENS_HEADER)?;
    for (i, name) in PART_NAMES.iter().enumerate() {
        writeln!(out, "{i}: {name}")?;
    }
    writeln!(out, "{}", constants::CLI_MSG_PROTO_HEADER)?;
    for joint in ProtoJoint::ALL {
        writeln!(out, "{}: {}", joint.index(), joint.name())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::NUM_PARTS;
    use ndarray::{arr1, Array1, Array2, Array3};
    use ndarray_npy::NpzWriter;
    use std::fs::File;

    fn write_archive(path: &Path, frames: usize, with_velocity: bool) {
        let mut npz = NpzWriter::new(File::create(path).unwrap());
        npz.add_array(constants::KEY_FRAME_COUNT, &arr1(&[frames as i64])).unwrap();
        npz.add_array(constants::KEY_FRAMERATE, &arr1(&[30.0_f64])).unwrap();
        npz.add_array(
            constants::KEY_TIMESTAMPS_US,
            &Array1::from_shape_fn(frames, |f| (f as i64) * 33_333),
        )
        .unwrap();
        let mut quat = Array2::<f64>::zeros((frames, NUM_PARTS * 4));
        for f in 0..frames {
            for p in 0..NUM_PARTS {
                quat[[f, p * 4]] = 1.0;
            }
        }
        npz.add_array(constants::KEY_PART_QWXYZ, &quat).unwrap();
        npz.add_array(constants::KEY_PART_TXYZ, &Array2::<f64>::zeros((frames, NUM_PARTS * 3)))
            .unwrap();
        if with_velocity {
            npz.add_array(
                constants::KEY_PART_VELOCITY,
                &Array3::<f64>::zeros((frames, NUM_PARTS, 3)),
            )
            .unwrap();
        }
        npz.add_array(
            constants::KEY_PART_ANGULAR_VELOCITY,
            &Array3::<f64>::zeros((frames, NUM_PARTS, 3)),
        )
        .unwrap();
        npz.finish().unwrap();
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_convert_writes_file_and_report() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(&dir.path().join("xdata.npz"), 5, true);
        let target = dir.path().join("proto_motion_mapped.npy");

        let mut buf = Vec::new();
        convert(dir.path(), &target, None, &mut buf).unwrap();
        let text = output(buf);

        assert!(text.contains(constants::CLI_MSG_PROVIDER_OK));
        assert!(text.contains("ProtoMotion Index 0 (Pelvis): Mapped from Nymeria 'L5' (Index 1)"));
        assert!(text.contains("ProtoMotion Index 17 (L_Wrist): Failed (interpolation not implemented"));
        assert!(text.contains(constants::CLI_MSG_SAVED.trim_start()));
        assert!(target.is_file());

        let Value::Record(record) = load_record(&target).unwrap() else {
            panic!("expected a record");
        };
        assert!(record.get("rotation").is_some());
        assert!(record.get("skeleton_tree").is_some());
    }

    #[test]
    fn test_convert_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.npy");

        let mut buf = Vec::new();
        convert(&dir.path().join("absent"), &target, None, &mut buf).unwrap();
        let text = output(buf);

        assert!(text.contains(constants::CLI_MSG_PROVIDER_FAILED));
        assert!(!target.exists());
    }

    #[test]
    fn test_convert_missing_key_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("take.npz");
        write_archive(&archive, 3, false);
        let target = dir.path().join("out.npy");

        let mut buf = Vec::new();
        convert(&archive, &target, None, &mut buf).unwrap();
        let text = output(buf);

        assert!(text.contains("segment_velocity"));
        assert!(text.contains(constants::CLI_MSG_CONVERT_FAILED));
        assert!(text.contains(constants::CLI_MSG_NOTHING_TO_SAVE));
        assert!(!target.exists());
    }

    #[test]
    fn test_convert_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(&dir.path().join("xdata.npz"), 2, true);
        let target = dir.path().join("missing_dir").join("out.npy");

        let mut buf = Vec::new();
        convert(dir.path(), &target, None, &mut buf).unwrap();
        assert!(output(buf).contains(constants::CLI_MSG_SAVE_FAILED));
    }

    #[test]
    fn test_print_converted_file() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(&dir.path().join("xdata.npz"), 2, true);
        let target = dir.path().join("out.npy");
        convert(dir.path(), &target, None, &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        print(&target, &PrinterConfig::default(), &mut buf).unwrap();
        let text = output(buf);
        assert!(text.starts_with("{Record:"));
        assert!(text.contains("'__name__': str 'SkeletonMotion'"));
        assert!(text.contains("format: 'wxyz'"));
    }

    #[test]
    fn test_print_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.npy");

        let mut buf = Vec::new();
        print(&path, &PrinterConfig::default(), &mut buf).unwrap();
        assert_eq!(
            output(buf),
            format!("Error: File not found at {}\n", path.display())
        );
    }

    #[test]
    fn test_print_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.npy");
        std::fs::write(&path, b"\x93NUMPY").unwrap();

        let mut buf = Vec::new();
        print(&path, &PrinterConfig::default(), &mut buf).unwrap();
        assert!(output(buf).starts_with(constants::CLI_MSG_ERROR));
    }

    #[test]
    fn test_view_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = Vec::new();
        view(&dir.path().join("absent"), None, &ViewerConfig::default(), &mut buf).unwrap();
        assert!(output(buf).contains(constants::CLI_MSG_PROVIDER_FAILED));
    }

    #[test]
    fn test_view_empty_recording() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(&dir.path().join("xdata.npz"), 0, true);
        let mut buf = Vec::new();
        view(dir.path(), None, &ViewerConfig::default(), &mut buf).unwrap();
        assert!(output(buf).contains(constants::CLI_MSG_VIEW_NO_FRAMES));
    }

    #[test]
    fn test_joints_listing() {
        let mut buf = Vec::new();
        joints(&mut buf).unwrap();
        let text = output(buf);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "XSens Part Names:");
        assert_eq!(lines[1], "0: Pelvis");
        assert_eq!(lines[23], "22: L_Toe");
        assert_eq!(lines[24], "");
        assert_eq!(lines[25], "ProtoMotion Node Names:");
        assert_eq!(lines[26], "0: Pelvis");
        assert_eq!(lines.last(), Some(&"23: R_Hand"));
    }
}
