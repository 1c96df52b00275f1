//! Nymeria → ProtoMotion retargeting.
//!
//! The retargeting is a fixed name-to-name lookup: each target joint either
//! copies one XSens part's time series or stays zero. See [`plan`] for the
//! table and [`remap`] for the conversion itself.

pub mod plan;
pub mod remap;

pub use plan::{nymeria_source, JointSource, MappingPlan};
pub use remap::{create_proto_motion, JointReport, JointStatus, ProtoMotion};
