//! Application-wide constants and configuration values.
//!
//! This module defines the static values used throughout the converter,
//! including source data keys, default file names, and CLI messages.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Path Configuration ===

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Archive looked up when `--data_dir` names a directory.
pub const DEFAULT_XDATA_FILE_NAME: &str = "xdata.npz";
/// Default output file for `convert`.
pub const DEFAULT_OUTPUT_FILE: &str = "proto_motion_mapped.npy";

// === Source Data Keys (Nymeria xdata archive) ===

/// Total number of recorded frames (1-element array).
pub const KEY_FRAME_COUNT: &str = "frame_count";
/// Recording frame rate in Hz (1-element array).
pub const KEY_FRAMERATE: &str = "framerate";
/// Per-frame capture timestamps in microseconds.
pub const KEY_TIMESTAMPS_US: &str = "timestamps_us";
/// Per-part orientation quaternions, WXYZ order.
pub const KEY_PART_QWXYZ: &str = "segment_qWXYZ";
/// Per-part positions.
pub const KEY_PART_TXYZ: &str = "segment_tXYZ";
/// Per-part linear velocities.
pub const KEY_PART_VELOCITY: &str = "segment_velocity";
/// Per-part angular velocities.
pub const KEY_PART_ANGULAR_VELOCITY: &str = "segment_angularVelocity";

// === Output Record ===

/// Type tag stored under `__name__`.
pub const RECORD_TYPE_NAME: &str = "SkeletonMotion";
/// Quaternion component order of the `rotation` field.
pub const ROTATION_FORMAT: &str = "wxyz";

// === Defaults ===

/// Arrays with more elements than this are summarised by the printer.
pub const DEFAULT_SUMMARY_THRESHOLD: usize = 1000;
/// Viewer plays every Nth frame.
pub const DEFAULT_FRAME_STRIDE: usize = 10;
/// Viewer redraw interval in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 33;
/// Margin added around the fitted viewer bounds.
pub const DEFAULT_AXIS_PADDING: f64 = 0.1;
/// Viewer yaw/pitch step per key press, in radians.
pub const VIEW_ROTATION_STEP: f64 = 0.1;

// === Messages: CLI Output ===

pub const CLI_MSG_LOADING: &str = "Loading data from: ";
pub const CLI_MSG_PROVIDER_OK: &str = "Data provider created successfully.";
pub const CLI_MSG_PROVIDER_FAILED: &str =
    "Failed to create BodyDataProvider object. Check your data directory and dependencies.";
pub const CLI_MSG_MAPPING_HEADER: &str = "\nMapping Nymeria joints to ProtoMotion joints:";
pub const CLI_MSG_CONVERT_FAILED: &str = "Failed to generate ProtoMotion data.";
pub const CLI_MSG_SAVED: &str = "\nProtoMotion-formatted data saved to: ";
pub const CLI_MSG_SAVE_FAILED: &str = "Error saving file ";
pub const CLI_MSG_NOTHING_TO_SAVE: &str = "No ProtoMotion data generated to save.";
pub const CLI_MSG_FILE_NOT_FOUND: &str = "Error: File not found at ";
pub const CLI_MSG_ERROR: &str = "An error occurred: ";
pub const CLI_MSG_CONFIG_ERROR: &str = "Error reading config, using defaults: ";
pub const CLI_MSG_XSENS_HEADER: &str = "XSens Part Names:";
pub const CLI_MSG_PROTO_HEADER: &str = "\nProtoMotion Node Names:";
pub const CLI_MSG_VIEW_NO_FRAMES: &str = "Failed to load body data.";

// === Messages: Mapping Report ===

pub const MSG_NOT_IN_PLAN: &str = "Failed (No mapping specified in plan)";

// === UI Labels & Titles ===

pub const TITLE_VIEWER: &str = " Skeleton Playback ";
pub const LABEL_PAUSED: &str = "PAUSED";
pub const LABEL_PLAYING: &str = "PLAYING";
pub const LABEL_NO_SKELETON: &str = "No posed skeleton at this timestamp";
