//! Source motion data providers.
//!
//! A provider exposes the keyed XSens arrays of one recording plus a posed
//! skeleton query for visual inspection. [`XsensData`] is the in-memory data
//! set; [`NpzBodyProvider`] loads one from a Nymeria `.npz` export.

pub mod npz;

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::{Array3, ArrayD, ArrayView2, Axis};

use crate::constants;
use crate::error::{Error, Result};
use crate::skeleton::{NUM_PARTS, PART_PARENTS};

pub use npz::{create_body_data_provider, read_xsens_npz, NpzBodyProvider};

/// Supplies source skeleton data to the converter and the viewer.
pub trait BodyDataProvider {
    /// Keyed numeric arrays of the recording.
    fn xsens_data(&self) -> &XsensData;

    /// Optional GLB skin file handed to the provider.
    fn glb_path(&self) -> Option<&Path> {
        None
    }

    /// Bone segments of the skeleton posed at the frame nearest `timestamp_us`.
    ///
    /// Returns an array of shape `(bones, 2, 3)` holding the parent and child
    /// endpoint of every non-root part, or `None` when the timestamp lies
    /// outside the recording or the position data is unusable.
    fn posed_skeleton(&self, timestamp_us: i64) -> Option<Array3<f64>> {
        let data = self.xsens_data();
        let timestamps = data.timestamps_us().ok()?;
        let frame = nearest_frame(&timestamps, timestamp_us)?;
        let frames = data.frame_count().ok()?;
        if frame >= frames {
            return None;
        }
        let positions = data.part_series(constants::KEY_PART_TXYZ, frames, 3).ok()?;
        Some(bone_segments(positions.index_axis(Axis(0), frame)))
    }
}

/// Keyed per-recording arrays, widened to `f64`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XsensData {
    arrays: BTreeMap<String, ArrayD<f64>>,
}

impl XsensData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, array: ArrayD<f64>) {
        self.arrays.insert(key.into(), array);
    }

    /// Removes a key, returning its array if present.
    pub fn remove(&mut self, key: &str) -> Option<ArrayD<f64>> {
        self.arrays.remove(key)
    }

    /// Available keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.arrays.keys().cloned().collect()
    }

    /// Looks up an array by key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] naming the key and the available keys.
    pub fn get(&self, key: &str) -> Result<&ArrayD<f64>> {
        self.arrays.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
            available: self.keys(),
        })
    }

    fn scalar(&self, key: &str) -> Result<f64> {
        self.get(key)?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| Error::InvalidScalar {
                key: key.to_string(),
                reason: "array is empty".to_string(),
            })
    }

    /// Total frame count stored under `frame_count`.
    ///
    /// # Errors
    ///
    /// Fails if the key is missing or the value is not a non-negative integer.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frame_count(&self) -> Result<usize> {
        let key = constants::KEY_FRAME_COUNT;
        let value = self.scalar(key)?;
        // usize::MAX as f64 rounds up to 2^64, which is itself out of range.
        #[allow(clippy::cast_precision_loss)]
        let out_of_range = value >= usize::MAX as f64;
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || out_of_range {
            return Err(Error::InvalidScalar {
                key: key.to_string(),
                reason: format!("{value} is not a frame count"),
            });
        }
        Ok(value as usize)
    }

    /// Frame rate in Hz stored under `framerate`.
    ///
    /// # Errors
    ///
    /// Fails if the key is missing or empty.
    pub fn frame_rate(&self) -> Result<f64> {
        self.scalar(constants::KEY_FRAMERATE)
    }

    /// Capture timestamps in microseconds.
    ///
    /// # Errors
    ///
    /// Fails if the key is missing.
    #[allow(clippy::cast_possible_truncation)]
    pub fn timestamps_us(&self) -> Result<Vec<i64>> {
        Ok(self
            .get(constants::KEY_TIMESTAMPS_US)?
            .iter()
            .map(|&t| t as i64)
            .collect())
    }

    /// Reshapes a flat per-part array to `(frames, NUM_PARTS, components)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if the key is absent and
    /// [`Error::ShapeMismatch`] if the element count does not fit the shape.
    pub fn part_series(&self, key: &str, frames: usize, components: usize) -> Result<Array3<f64>> {
        let flat = self.get(key)?;
        let mismatch = || Error::ShapeMismatch {
            key: key.to_string(),
            len: flat.len(),
            frames,
            parts: NUM_PARTS,
            components,
        };
        let expected = frames
            .checked_mul(NUM_PARTS)
            .and_then(|n| n.checked_mul(components));
        if expected != Some(flat.len()) {
            return Err(mismatch());
        }
        let values: Vec<f64> = flat.iter().copied().collect();
        Array3::from_shape_vec((frames, NUM_PARTS, components), values).map_err(|_| mismatch())
    }
}

impl BodyDataProvider for XsensData {
    fn xsens_data(&self) -> &XsensData {
        self
    }
}

/// Index of the frame closest to `timestamp_us`.
///
/// `timestamps` must be sorted. Returns `None` when empty or when the
/// timestamp falls outside the recorded range.
#[must_use]
pub fn nearest_frame(timestamps: &[i64], timestamp_us: i64) -> Option<usize> {
    let first = *timestamps.first()?;
    let last = *timestamps.last()?;
    if timestamp_us < first || timestamp_us > last {
        return None;
    }
    let upper = timestamps.partition_point(|&t| t < timestamp_us);
    if upper == 0 {
        return Some(0);
    }
    let lower = upper - 1;
    if upper >= timestamps.len() {
        return Some(lower);
    }
    if timestamps[upper] - timestamp_us < timestamp_us - timestamps[lower] {
        Some(upper)
    } else {
        Some(lower)
    }
}

/// Builds `(bones, 2, 3)` line segments from one frame of part positions.
#[must_use]
pub fn bone_segments(positions: ArrayView2<'_, f64>) -> Array3<f64> {
    let bones: Vec<(usize, usize)> = PART_PARENTS
        .iter()
        .enumerate()
        .filter_map(|(child, parent)| parent.map(|p| (p, child)))
        .collect();

    let mut segments = Array3::<f64>::zeros((bones.len(), 2, 3));
    for (b, (parent, child)) in bones.into_iter().enumerate() {
        for c in 0..3 {
            segments[[b, 0, c]] = positions[[parent, c]];
            segments[[b, 1, c]] = positions[[child, c]];
        }
    }
    segments
}
