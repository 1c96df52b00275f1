//! Static Nymeria → ProtoMotion joint mapping plan.

use crate::skeleton::{ProtoJoint, NUM_JOINTS};

/// Where a target joint takes its motion from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointSource {
    /// Copy the named XSens part's time series unchanged.
    Direct(&'static str),
    /// Declared interpolation from the named part. Not executed: the joint stays zero.
    Interpolated(&'static str),
    /// No source at all.
    Unmapped,
}

/// Mapping policy used for Nymeria recordings.
///
/// The thorax joints reuse `T8`. The XSens model has no separate wrist
/// segment, so the wrists are declared as interpolated.
#[must_use]
pub const fn nymeria_source(joint: ProtoJoint) -> JointSource {
    use JointSource::{Direct, Interpolated};
    match joint {
        ProtoJoint::Pelvis => Direct("L5"),
        ProtoJoint::Torso => Direct("L3"),
        ProtoJoint::Spine => Direct("T12"),
        ProtoJoint::Chest | ProtoJoint::LThorax | ProtoJoint::RThorax => Direct("T8"),
        ProtoJoint::Neck => Direct("Neck"),
        ProtoJoint::Head => Direct("Head"),
        ProtoJoint::LHip => Direct("L_UpperLeg"),
        ProtoJoint::LKnee => Direct("L_LowerLeg"),
        ProtoJoint::LAnkle => Direct("L_Foot"),
        ProtoJoint::LToe => Direct("L_Toe"),
        ProtoJoint::RHip => Direct("R_UpperLeg"),
        ProtoJoint::RKnee => Direct("R_LowerLeg"),
        ProtoJoint::RAnkle => Direct("R_Foot"),
        ProtoJoint::RToe => Direct("R_Toe"),
        ProtoJoint::LShoulder => Direct("L_Shoulder"),
        ProtoJoint::LElbow => Direct("L_UpperArm"),
        ProtoJoint::LWrist => Interpolated("L_Wrist"),
        ProtoJoint::LHand => Direct("L_Hand"),
        ProtoJoint::RShoulder => Direct("R_Shoulder"),
        ProtoJoint::RElbow => Direct("R_UpperArm"),
        ProtoJoint::RWrist => Interpolated("R_Wrist"),
        ProtoJoint::RHand => Direct("R_Hand"),
    }
}

/// Per-joint source policy for the whole target skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPlan {
    sources: [JointSource; NUM_JOINTS],
}

impl MappingPlan {
    /// The Nymeria plan from [`nymeria_source`].
    #[must_use]
    pub fn nymeria() -> Self {
        Self {
            sources: ProtoJoint::ALL.map(nymeria_source),
        }
    }

    /// Replaces the policy of one joint.
    #[must_use]
    pub fn with_source(mut self, joint: ProtoJoint, source: JointSource) -> Self {
        self.sources[joint.index()] = source;
        self
    }

    #[must_use]
    pub fn source(&self, joint: ProtoJoint) -> JointSource {
        self.sources[joint.index()]
    }

    /// Joints paired with their policy, in output order.
    pub fn iter(&self) -> impl Iterator<Item = (ProtoJoint, JointSource)> + '_ {
        ProtoJoint::ALL.into_iter().zip(self.sources.iter().copied())
    }
}

impl Default for MappingPlan {
    fn default() -> Self {
        Self::nymeria()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::part_index;

    #[test]
    fn test_direct_sources_exist() {
        for (joint, source) in MappingPlan::nymeria().iter() {
            if let JointSource::Direct(name) = source {
                assert!(part_index(name).is_some(), "{joint} maps to unknown part {name}");
            }
        }
    }

    #[test]
    fn test_wrists_are_interpolated() {
        let plan = MappingPlan::nymeria();
        assert_eq!(plan.source(ProtoJoint::LWrist), JointSource::Interpolated("L_Wrist"));
        assert_eq!(plan.source(ProtoJoint::RWrist), JointSource::Interpolated("R_Wrist"));
        let direct = plan
            .iter()
            .filter(|(_, s)| matches!(s, JointSource::Direct(_)))
            .count();
        assert_eq!(direct, NUM_JOINTS - 2);
    }

    #[test]
    fn test_with_source_override() {
        let plan = MappingPlan::nymeria().with_source(ProtoJoint::Head, JointSource::Unmapped);
        assert_eq!(plan.source(ProtoJoint::Head), JointSource::Unmapped);
        assert_eq!(plan.source(ProtoJoint::Neck), JointSource::Direct("Neck"));
    }
}
