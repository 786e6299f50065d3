//! Read-only snapshots of the pose constraints on a joint's bone.

use crate::error::{BlockKind, JointError, JointResult};
use crate::joint::JointType;
use serde::{Deserialize, Serialize};

/// The limit on a single axis.
///
/// Values are metres for translation and radians for rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisLimit {
    /// Whether the limit is active at all.
    pub enabled: bool,
    pub min: f32,
    pub max: f32,
}

impl AxisLimit {
    /// An inactive limit.
    pub const FREE: Self = Self {
        enabled: false,
        min: 0.0,
        max: 0.0,
    };

    /// An active limit with zero travel at the origin.
    pub const LOCKED: Self = Self {
        enabled: true,
        min: 0.0,
        max: 0.0,
    };

    /// An active limit on `[min, max]`.
    pub const fn range(min: f32, max: f32) -> Self {
        Self {
            enabled: true,
            min,
            max,
        }
    }

    /// Active with zero width, so no motion is permitted along the axis.
    pub fn is_locked(&self) -> bool {
        self.enabled && self.min == self.max
    }

    /// Active with a range other than `(0, 0)`.
    pub fn is_limited(&self) -> bool {
        self.enabled && (self.min != 0.0 || self.max != 0.0)
    }
}

/// Limits on the three axes of one constraint, in x, y, z order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitBlock {
    pub x: AxisLimit,
    pub y: AxisLimit,
    pub z: AxisLimit,
}

impl LimitBlock {
    pub const fn new(x: AxisLimit, y: AxisLimit, z: AxisLimit) -> Self {
        Self { x, y, z }
    }

    /// Every axis locked at zero.
    pub const fn locked() -> Self {
        Self::new(AxisLimit::LOCKED, AxisLimit::LOCKED, AxisLimit::LOCKED)
    }

    pub fn axes(&self) -> [AxisLimit; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the limit for axis `index` (0 = x, 1 = y, 2 = z).
    pub fn axis(&self, index: usize) -> Option<AxisLimit> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            _ => None,
        }
    }

    pub fn locked_mask(&self) -> [bool; 3] {
        self.axes().map(|a| a.is_locked())
    }

    pub fn limited_mask(&self) -> [bool; 3] {
        self.axes().map(|a| a.is_limited())
    }

    pub fn locked_count(&self) -> usize {
        self.locked_mask().into_iter().filter(|&b| b).count()
    }

    pub fn enabled_count(&self) -> usize {
        self.axes().into_iter().filter(|a| a.enabled).count()
    }
}

/// One constraint as collected from the host scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConstraintBlock {
    Location(LimitBlock),
    Rotation(LimitBlock),
}

impl ConstraintBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Location(_) => BlockKind::Location,
            Self::Rotation(_) => BlockKind::Rotation,
        }
    }
}

/// The constraint configuration on one armature joint.
///
/// Holds at most one location block and at most one rotation block. Scenes
/// that stack several constraints of the same kind on a bone are rejected by
/// [`ConstraintSpec::from_blocks`] instead of silently picking one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// Translation limits, if a location constraint exists.
    pub location: Option<LimitBlock>,

    /// Rotation limits, if a rotation constraint exists.
    pub rotation: Option<LimitBlock>,

    /// The joint type previously stored on the joint, if any.
    pub recorded_type: Option<JointType>,
}

impl ConstraintSpec {
    /// An unconstrained joint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a spec from the constraints found on a bone.
    ///
    /// Blocks may come in any order. A second block of the same kind fails
    /// with [`JointError::DuplicateBlock`].
    pub fn from_blocks(blocks: impl IntoIterator<Item = ConstraintBlock>) -> JointResult<Self> {
        let mut spec = Self::new();
        for block in blocks {
            let (slot, limits) = match block {
                ConstraintBlock::Location(b) => (&mut spec.location, b),
                ConstraintBlock::Rotation(b) => (&mut spec.rotation, b),
            };
            if slot.is_some() {
                return Err(JointError::DuplicateBlock { kind: block.kind() });
            }
            *slot = Some(limits);
        }
        Ok(spec)
    }

    pub fn with_location(mut self, block: LimitBlock) -> Self {
        self.location = Some(block);
        self
    }

    pub fn with_rotation(mut self, block: LimitBlock) -> Self {
        self.rotation = Some(block);
        self
    }

    pub fn with_recorded_type(mut self, joint_type: JointType) -> Self {
        self.recorded_type = Some(joint_type);
        self
    }
}
