//! Source and target skeleton topologies.

pub mod proto;
pub mod xsens;

pub use proto::{proto_skeleton_tree, ProtoJoint, ProtoSkeletonTree, NUM_JOINTS};
pub use xsens::{part_index, NUM_PARTS, PART_NAMES, PART_PARENTS};
