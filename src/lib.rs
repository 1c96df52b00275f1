//! Converts Nymeria/XSens body-motion recordings into ProtoMotion
//! `SkeletonMotion` records on the 24-joint SMPL skeleton.
//!
//! The pipeline is provider → [`mapping::create_proto_motion`] →
//! [`record::save_record`]. [`printer`] dumps saved records and [`viewer`]
//! plays back the source skeleton in the terminal.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod mapping;
pub mod printer;
pub mod provider;
pub mod record;
pub mod skeleton;
pub mod viewer;

pub use error::{Error, Result};
