//! Canonical constraint patterns for each joint type.

use crate::constraint::{AxisLimit, ConstraintSpec, LimitBlock};
use crate::joint::JointType;
use serde::{Deserialize, Serialize};

/// Describes the constraints to author on a joint's bone.
///
/// This acts as the "preset" of the joint picker: given a joint type and the
/// lower/upper values entered for it, [`ConstraintTemplate::to_spec`] yields the
/// constraints the joint should carry. The moving axis is always the bone's
/// local Y axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstraintTemplate {
    pub joint_type: JointType,

    /// Lower limit. Degrees for revolute joints, metres for prismatic joints.
    pub lower: f32,

    /// Upper limit. Degrees for revolute joints, metres for prismatic joints.
    pub upper: f32,
}

impl ConstraintTemplate {
    pub fn new(joint_type: JointType) -> Self {
        Self {
            joint_type,
            lower: 0.0,
            upper: 0.0,
        }
    }

    pub fn with_limits(mut self, lower: f32, upper: f32) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Builds the constraint spec for this template.
    pub fn to_spec(&self) -> ConstraintSpec {
        let locked = LimitBlock::locked();
        match self.joint_type {
            JointType::Floating => ConstraintSpec::new(),
            JointType::Fixed => ConstraintSpec::new()
                .with_location(locked)
                .with_rotation(locked),
            JointType::Revolute => {
                let swing = AxisLimit::range(self.lower.to_radians(), self.upper.to_radians());
                ConstraintSpec::new()
                    .with_location(locked)
                    .with_rotation(LimitBlock { y: swing, ..locked })
            }
            JointType::Continuous => ConstraintSpec::new()
                .with_location(locked)
                .with_rotation(LimitBlock {
                    y: AxisLimit::FREE,
                    ..locked
                }),
            JointType::Prismatic => {
                // Equal bounds would lock the sliding axis, so leave it unconstrained.
                let slide = if self.lower == self.upper {
                    AxisLimit::FREE
                } else {
                    AxisLimit::range(self.lower, self.upper)
                };
                ConstraintSpec::new()
                    .with_location(LimitBlock { y: slide, ..locked })
                    .with_rotation(locked)
            }
            JointType::Planar => ConstraintSpec::new()
                .with_location(LimitBlock::new(
                    AxisLimit::FREE,
                    AxisLimit::LOCKED,
                    AxisLimit::FREE,
                ))
                .with_rotation(locked),
        }
    }
}

impl From<JointType> for ConstraintTemplate {
    fn from(joint_type: JointType) -> Self {
        Self::new(joint_type)
    }
}
