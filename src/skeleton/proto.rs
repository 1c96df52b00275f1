//! ProtoMotion/SMPL 24-joint target skeleton.
//!
//! The joint order, parent indices, and rest-pose offsets are fixed. They must
//! match the SMPL body model the downstream tooling loads.

use ndarray::{Array1, Array2};

use crate::record::{NdArray, Record, TaggedArray, Value};

/// Number of joints in the target skeleton.
pub const NUM_JOINTS: usize = 24;

/// A joint of the target skeleton, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtoJoint {
    Pelvis,
    LHip,
    LKnee,
    LAnkle,
    LToe,
    RHip,
    RKnee,
    RAnkle,
    RToe,
    Torso,
    Spine,
    Chest,
    Neck,
    Head,
    LThorax,
    LShoulder,
    LElbow,
    LWrist,
    LHand,
    RThorax,
    RShoulder,
    RElbow,
    RWrist,
    RHand,
}

impl ProtoJoint {
    /// All joints in output order.
    pub const ALL: [ProtoJoint; NUM_JOINTS] = [
        Self::Pelvis,
        Self::LHip,
        Self::LKnee,
        Self::LAnkle,
        Self::LToe,
        Self::RHip,
        Self::RKnee,
        Self::RAnkle,
        Self::RToe,
        Self::Torso,
        Self::Spine,
        Self::Chest,
        Self::Neck,
        Self::Head,
        Self::LThorax,
        Self::LShoulder,
        Self::LElbow,
        Self::LWrist,
        Self::LHand,
        Self::RThorax,
        Self::RShoulder,
        Self::RElbow,
        Self::RWrist,
        Self::RHand,
    ];

    /// Position of the joint in the output arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Node name as written into `skeleton_tree.node_names`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pelvis => "Pelvis",
            Self::LHip => "L_Hip",
            Self::LKnee => "L_Knee",
            Self::LAnkle => "L_Ankle",
            Self::LToe => "L_Toe",
            Self::RHip => "R_Hip",
            Self::RKnee => "R_Knee",
            Self::RAnkle => "R_Ankle",
            Self::RToe => "R_Toe",
            Self::Torso => "Torso",
            Self::Spine => "Spine",
            Self::Chest => "Chest",
            Self::Neck => "Neck",
            Self::Head => "Head",
            Self::LThorax => "L_Thorax",
            Self::LShoulder => "L_Shoulder",
            Self::LElbow => "L_Elbow",
            Self::LWrist => "L_Wrist",
            Self::LHand => "L_Hand",
            Self::RThorax => "R_Thorax",
            Self::RShoulder => "R_Shoulder",
            Self::RElbow => "R_Elbow",
            Self::RWrist => "R_Wrist",
            Self::RHand => "R_Hand",
        }
    }

    /// Parent joint, `None` for the root.
    #[must_use]
    pub const fn parent(self) -> Option<ProtoJoint> {
        match self {
            Self::Pelvis => None,
            Self::LHip | Self::RHip | Self::Torso => Some(Self::Pelvis),
            Self::LKnee => Some(Self::LHip),
            Self::LAnkle => Some(Self::LKnee),
            Self::LToe => Some(Self::LAnkle),
            Self::RKnee => Some(Self::RHip),
            Self::RAnkle => Some(Self::RKnee),
            Self::RToe => Some(Self::RAnkle),
            Self::Spine => Some(Self::Torso),
            Self::Chest => Some(Self::Spine),
            Self::Neck | Self::LThorax | Self::RThorax => Some(Self::Chest),
            Self::Head => Some(Self::Neck),
            Self::LShoulder => Some(Self::LThorax),
            Self::LElbow => Some(Self::LShoulder),
            Self::LWrist => Some(Self::LElbow),
            Self::LHand => Some(Self::LWrist),
            Self::RShoulder => Some(Self::RThorax),
            Self::RElbow => Some(Self::RShoulder),
            Self::RWrist => Some(Self::RElbow),
            Self::RHand => Some(Self::RWrist),
        }
    }

    /// Rest-pose (T-pose) offset from the parent joint, in metres.
    #[must_use]
    pub const fn local_offset(self) -> [f32; 3] {
        match self {
            Self::Pelvis => [-0.0018, -0.2233, 0.0282],
            Self::LHip => [-0.0068, 0.0695, -0.0914],
            Self::LKnee => [-0.0045, 0.0343, -0.3752],
            Self::LAnkle => [-0.0437, -0.0136, -0.398],
            Self::LToe => [0.1193, 0.0264, -0.0558],
            Self::RHip => [-0.0043, -0.0677, -0.0905],
            Self::RKnee => [-0.0089, -0.0383, -0.3826],
            Self::RAnkle => [-0.0423, 0.0158, -0.3984],
            Self::RToe => [0.1233, -0.0254, -0.0481],
            Self::Torso => [-0.0267, -0.0025, 0.109],
            Self::Spine => [0.0011, 0.0055, 0.1352],
            Self::Chest => [0.0254, 0.0015, 0.0529],
            Self::Neck => [-0.0429, -0.0028, 0.2139],
            Self::Head => [0.0513, 0.0052, 0.065],
            Self::LThorax => [-0.0341, 0.0788, 0.1217],
            Self::LShoulder => [-0.0089, 0.091, 0.0305],
            Self::LElbow => [-0.0275, 0.2596, -0.0128],
            Self::LWrist => [-0.0012, 0.2492, 0.009],
            Self::LHand => [-0.0149, 0.084, -0.0082],
            Self::RThorax => [-0.0386, -0.0818, 0.1188],
            Self::RShoulder => [-0.0091, -0.096, 0.0326],
            Self::RElbow => [-0.0214, -0.2537, -0.0133],
            Self::RWrist => [-0.0056, -0.2553, 0.0078],
            Self::RHand => [-0.0103, -0.0846, -0.0061],
        }
    }
}

impl std::fmt::Display for ProtoJoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Target skeleton definition as stored in `skeleton_tree`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoSkeletonTree {
    /// Joint names in output order.
    pub node_names: Vec<String>,
    /// Parent index per joint, `-1` for the root.
    pub parent_indices: Array1<i64>,
    /// Rest-pose offset per joint, shape `(24, 3)`.
    pub local_translation: Array2<f32>,
}

impl ProtoSkeletonTree {
    /// Builds the `skeleton_tree` sub-record.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::new()
            .with(
                "node_names",
                Value::List(self.node_names.iter().cloned().map(Value::Str).collect()),
            )
            .with(
                "parent_indices",
                Value::Tagged(TaggedArray::new(NdArray::Int64(
                    self.parent_indices.clone().into_dyn(),
                ))),
            )
            .with(
                "local_translation",
                Value::Tagged(TaggedArray::new(NdArray::Float32(
                    self.local_translation.clone().into_dyn(),
                ))),
            )
    }
}

/// Returns the fixed target skeleton.
#[must_use]
pub fn proto_skeleton_tree() -> ProtoSkeletonTree {
    let node_names = ProtoJoint::ALL
        .iter()
        .map(|joint| joint.name().to_string())
        .collect();

    let parent_indices = ProtoJoint::ALL
        .iter()
        .map(|joint| joint.parent().map_or(-1, |p| p.index() as i64))
        .collect::<Array1<i64>>();

    let mut local_translation = Array2::<f32>::zeros((NUM_JOINTS, 3));
    for joint in ProtoJoint::ALL {
        let offset = joint.local_offset();
        for (c, value) in offset.into_iter().enumerate() {
            local_translation[[joint.index(), c]] = value;
        }
    }

    ProtoSkeletonTree {
        node_names,
        parent_indices,
        local_translation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_order_matches_index() {
        for (i, joint) in ProtoJoint::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
        }
    }

    #[test]
    fn test_skeleton_shapes() {
        let tree = proto_skeleton_tree();
        assert_eq!(tree.node_names.len(), NUM_JOINTS);
        assert_eq!(tree.parent_indices.len(), NUM_JOINTS);
        assert_eq!(tree.local_translation.shape(), &[NUM_JOINTS, 3]);
        assert_eq!(tree.node_names[0], "Pelvis");
        assert_eq!(tree.node_names[23], "R_Hand");
    }

    #[test]
    fn test_single_root_and_valid_parents() {
        let tree = proto_skeleton_tree();
        let roots = tree.parent_indices.iter().filter(|&&p| p == -1).count();
        assert_eq!(roots, 1);
        assert_eq!(tree.parent_indices[0], -1);
        for &p in &tree.parent_indices {
            assert!(p < NUM_JOINTS as i64);
        }
    }

    #[test]
    fn test_parent_indices_values() {
        let tree = proto_skeleton_tree();
        let expected: Vec<i64> = vec![
            -1, 0, 1, 2, 3, 0, 5, 6, 7, 0, 9, 10, 11, 12, 11, 14, 15, 16, 17, 11, 19, 20, 21, 22,
        ];
        assert_eq!(tree.parent_indices.to_vec(), expected);
    }

    #[test]
    fn test_local_offsets() {
        let tree = proto_skeleton_tree();
        assert!((tree.local_translation[[3, 2]] - (-0.398)).abs() < 1e-6);
        assert!((tree.local_translation[[23, 1]] - (-0.0846)).abs() < 1e-6);
    }

    #[test]
    fn test_skeleton_record_fields() {
        let record = proto_skeleton_tree().to_record();
        let names: Vec<&str> = record.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["node_names", "parent_indices", "local_translation"]);
    }
}
