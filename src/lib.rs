//! # armature-joints
//!
//! Infers robot joint semantics from the pose constraints of single-bone
//! armatures, as authored in a 3D modelling tool.
//!
//! The core is two pure functions: [`classify`] derives one of six joint types
//! (floating, fixed, revolute, continuous, prismatic, planar) from the location
//! and rotation limits on a bone, and [`extract_axis_and_limits`] derives the
//! joint's motion axis and numeric limits. [`JointInterpreter`] runs both over a
//! batch of armature snapshots and collects a [`KinematicsBlueprint`] that can be
//! handed to a robot-description exporter.

pub mod blueprint;
pub mod classifier;
pub mod constraint;
pub mod error;
pub mod extractor;
pub mod interpreter;
pub mod joint;
pub mod properties;
pub mod template;

pub use blueprint::*;
pub use classifier::*;
pub use constraint::*;
pub use error::*;
pub use extractor::*;
pub use interpreter::*;
pub use joint::*;
pub use properties::*;
pub use template::*;
