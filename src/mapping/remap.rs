//! Joint and attribute remapping from the XSens parts to the target skeleton.

use std::fmt;

use ndarray::{arr1, s, Array2, Array3};

use super::plan::{JointSource, MappingPlan};
use crate::constants;
use crate::error::Result;
use crate::provider::BodyDataProvider;
use crate::record::{NdArray, Record, TaggedArray, Value};
use crate::skeleton::{part_index, proto_skeleton_tree, ProtoJoint, ProtoSkeletonTree, NUM_JOINTS};

/// Outcome of mapping one target joint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JointStatus {
    /// Copied from the XSens part at `index`.
    Mapped { source: &'static str, index: usize },
    /// The direct source name is not an XSens part.
    SourceNotFound(&'static str),
    /// Interpolated policy; left zero.
    NotImplemented(&'static str),
    /// The plan declares no source.
    NotInPlan,
}

impl JointStatus {
    #[must_use]
    pub const fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped { .. })
    }
}

impl fmt::Display for JointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapped { source, index } => write!(
                f,
                "Mapped from Nymeria '{source}' (Index {index}) with velocity and angular velocity"
            ),
            Self::SourceNotFound(source) => {
                write!(f, "Failed (Nymeria source '{source}' not found or index invalid)")
            }
            Self::NotImplemented(source) => {
                write!(f, "Failed (interpolation not implemented for source '{source}')")
            }
            Self::NotInPlan => f.write_str(constants::MSG_NOT_IN_PLAN),
        }
    }
}

/// Mapping outcome of one target joint, printed as a diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointReport {
    pub joint: ProtoJoint,
    pub status: JointStatus,
}

impl fmt::Display for JointReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProtoMotion Index {} ({}): {}",
            self.joint.index(),
            self.joint.name(),
            self.status
        )
    }
}

/// Motion remapped onto the target skeleton.
#[derive(Debug, Clone)]
pub struct ProtoMotion {
    /// WXYZ quaternions, `(frames, 24, 4)`.
    pub rotation: Array3<f64>,
    /// Per-joint positions, `(frames, 24, 3)`.
    pub translation: Array3<f64>,
    pub global_velocity: Array3<f64>,
    pub global_angular_velocity: Array3<f64>,
    pub skeleton: ProtoSkeletonTree,
    /// XSens data is global; always `false`.
    pub is_local: bool,
    pub fps: f64,
    /// One entry per target joint, in output order.
    pub report: Vec<JointReport>,
}

impl ProtoMotion {
    #[must_use]
    pub fn num_frames(&self) -> usize {
        self.rotation.shape()[0]
    }

    /// Root (pelvis) translation, `(frames, 3)`.
    #[must_use]
    pub fn root_translation(&self) -> Array2<f64> {
        self.translation
            .slice(s![.., ProtoJoint::Pelvis.index(), ..])
            .to_owned()
    }

    /// Builds the `SkeletonMotion` output record.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let tagged = |array: &Array3<f64>| {
            TaggedArray::new(NdArray::Float64(array.clone().into_dyn()))
        };

        Record::new()
            .with(
                "rotation",
                Value::Tagged(tagged(&self.rotation).with_format(constants::ROTATION_FORMAT)),
            )
            .with(
                "root_translation",
                Value::Tagged(TaggedArray::new(NdArray::Float64(
                    self.root_translation().into_dyn(),
                ))),
            )
            .with("global_velocity", Value::Tagged(tagged(&self.global_velocity)))
            .with(
                "global_angular_velocity",
                Value::Tagged(tagged(&self.global_angular_velocity)),
            )
            .with("skeleton_tree", Value::Record(self.skeleton.to_record()))
            .with("is_local", Value::Bool(self.is_local))
            .with(
                "fps",
                Value::Array(NdArray::Float64(arr1(&[self.fps]).into_dyn())),
            )
            .with(
                "__name__",
                Value::Str(constants::RECORD_TYPE_NAME.to_string()),
            )
    }
}

/// Remaps a recording onto the ProtoMotion skeleton.
///
/// Every `Direct` joint whose source part exists receives that part's full
/// rotation, translation, velocity and angular velocity series, unmodified.
/// All other joints stay zero and are reported as failures.
///
/// # Errors
///
/// Fails if a required key is missing, a scalar is invalid, or a per-part
/// array does not reshape to `(frames, parts, components)`.
pub fn create_proto_motion<P>(provider: &P, plan: &MappingPlan) -> Result<ProtoMotion>
where
    P: BodyDataProvider + ?Sized,
{
    let data = provider.xsens_data();

    let num_frames = data.frame_count()?;
    let frame_rate = data.frame_rate()?;
    let part_quat = data.part_series(constants::KEY_PART_QWXYZ, num_frames, 4)?;
    let part_trans = data.part_series(constants::KEY_PART_TXYZ, num_frames, 3)?;
    let part_vel = data.part_series(constants::KEY_PART_VELOCITY, num_frames, 3)?;
    let part_ang_vel = data.part_series(constants::KEY_PART_ANGULAR_VELOCITY, num_frames, 3)?;

    let mut rotation = Array3::<f64>::zeros((num_frames, NUM_JOINTS, 4));
    let mut translation = Array3::<f64>::zeros((num_frames, NUM_JOINTS, 3));
    let mut global_velocity = Array3::<f64>::zeros((num_frames, NUM_JOINTS, 3));
    let mut global_angular_velocity = Array3::<f64>::zeros((num_frames, NUM_JOINTS, 3));

    let mut report = Vec::with_capacity(NUM_JOINTS);
    for (joint, source) in plan.iter() {
        let status = match source {
            JointSource::Direct(name) => match part_index(name) {
                Some(src) => {
                    let dst = joint.index();
                    rotation
                        .slice_mut(s![.., dst, ..])
                        .assign(&part_quat.slice(s![.., src, ..]));
                    translation
                        .slice_mut(s![.., dst, ..])
                        .assign(&part_trans.slice(s![.., src, ..]));
                    global_velocity
                        .slice_mut(s![.., dst, ..])
                        .assign(&part_vel.slice(s![.., src, ..]));
                    global_angular_velocity
                        .slice_mut(s![.., dst, ..])
                        .assign(&part_ang_vel.slice(s![.., src, ..]));
                    JointStatus::Mapped {
                        source: name,
                        index: src,
                    }
                }
                None => JointStatus::SourceNotFound(name),
            },
            JointSource::Interpolated(name) => JointStatus::NotImplemented(name),
            JointSource::Unmapped => JointStatus::NotInPlan,
        };

        tracing::debug!(joint = joint.name(), mapped = status.is_mapped(), "{status}");
        report.push(JointReport { joint, status });
    }

    Ok(ProtoMotion {
        rotation,
        translation,
        global_velocity,
        global_angular_velocity,
        skeleton: proto_skeleton_tree(),
        is_local: false,
        fps: frame_rate,
        report,
    })
}
