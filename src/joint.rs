use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kinematic category of a robot joint.
///
/// Serialized with the lowercase tags stored under the `jointType` property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// Six free degrees of freedom ("universal" in MARS nomenclature).
    Floating,
    /// No degrees of freedom (welded).
    Fixed,
    /// One bounded rotational degree of freedom (e.g., knee, elbow).
    Revolute,
    /// One unbounded rotational degree of freedom (e.g., wheel).
    Continuous,
    /// Slides along a single axis (linear actuator).
    Prismatic,
    /// Slides within a plane (two translational degrees of freedom).
    Planar,
}

impl JointType {
    pub const ALL: [Self; 6] = [
        Self::Floating,
        Self::Fixed,
        Self::Revolute,
        Self::Continuous,
        Self::Prismatic,
        Self::Planar,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Floating => "floating",
            Self::Fixed => "fixed",
            Self::Revolute => "revolute",
            Self::Continuous => "continuous",
            Self::Prismatic => "prismatic",
            Self::Planar => "planar",
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored joint type tag is not one of the six known tags.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown joint type '{0}'")]
pub struct UnknownJointType(pub String);

impl FromStr for JointType {
    type Err = UnknownJointType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownJointType(s.to_owned()))
    }
}

/// A stored type tag that disagrees with the type derived from the constraints.
///
/// Never fatal. Callers may log it, surface it, or ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyWarning {
    /// The tag previously stored on the joint.
    pub recorded: JointType,
    /// The tag derived from the constraints.
    pub derived: JointType,
    /// Set in adjust mode: the stored tag should be replaced with `derived`.
    pub adjusted: bool,
}

/// Output of [`classify`](crate::classify).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointClassification {
    pub joint_type: JointType,

    /// Which rotation axes are enabled with a range other than `(0, 0)`.
    pub limited_rotation_axes: [bool; 3],

    pub warning: Option<ConsistencyWarning>,
}

impl JointClassification {
    /// The tag the caller should write back, if the stored one was adjusted.
    pub fn tag_to_store(&self) -> Option<JointType> {
        self.warning.filter(|w| w.adjusted).map(|w| w.derived)
    }
}

/// Numeric limits of a joint's motion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum JointLimits {
    /// Range along/around the single motion axis.
    Axis { min: f32, max: f32 },
    /// `(min, max)` pairs for the two in-plane axes, in axis index order.
    Plane([f32; 4]),
}

impl JointLimits {
    pub fn values(&self) -> Vec<f32> {
        match *self {
            Self::Axis { min, max } => vec![min, max],
            Self::Plane(values) => values.to_vec(),
        }
    }
}

/// Output of [`extract_axis_and_limits`](crate::extract_axis_and_limits).
///
/// Both fields are `None` for floating and fixed joints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    /// Motion axis, or the plane normal for planar joints.
    pub axis: Option<Vec3>,
    pub limits: Option<JointLimits>,
}

impl AxisLimits {
    pub const NONE: Self = Self {
        axis: None,
        limits: None,
    };
}
