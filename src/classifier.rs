//! Infers the joint type encoded by a bone's constraints.
//!
//! All joints except floating ones carry a location constraint, so its absence
//! alone identifies a floating joint. Otherwise the number of locked
//! translation axes picks the family:
//!
//! | locked translation | rotation block          | type         |
//! |--------------------|-------------------------|--------------|
//! | 3                  | 3 enabled, any nonzero  | `revolute`   |
//! | 3                  | 3 enabled, all `(0, 0)` | `fixed`      |
//! | 3                  | 2 enabled               | `continuous` |
//! | 2                  | any                     | `prismatic`  |
//! | 1                  | any                     | `planar`     |
//! | 0                  | any                     | `floating`   |
//!
//! Three locked translation axes with a missing rotation block, or with zero
//! or one enabled rotation axes, match no pattern. [`AmbiguityPolicy`] decides
//! what happens then.

use crate::constraint::ConstraintSpec;
use crate::error::{JointError, JointResult};
use crate::joint::{ConsistencyWarning, JointClassification, JointType};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What to do when the stored joint type disagrees with the derived one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyMode {
    /// Warn only.
    #[default]
    CheckOnly,
    /// Warn and flag the stored tag for replacement.
    Adjust,
}

/// What to do with constraints that match no joint pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Classify as `floating`. Matches how existing exported models were typed.
    #[default]
    DefaultToFloating,
    /// Fail with [`JointError::AmbiguousConstraints`].
    Reject,
}

/// Options for [`classify`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    pub consistency: ConsistencyMode,
    pub ambiguity: AmbiguityPolicy,
}

impl ClassifyOptions {
    pub fn with_consistency(mut self, consistency: ConsistencyMode) -> Self {
        self.consistency = consistency;
        self
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }
}

/// Derives the joint type from `spec`.
///
/// Pure: the stored type on `spec` is only compared, never modified. When it
/// disagrees with the derived type the result carries a [`ConsistencyWarning`].
pub fn classify(
    spec: &ConstraintSpec,
    options: ClassifyOptions,
) -> JointResult<JointClassification> {
    let joint_type = derive_type(spec, options.ambiguity)?;

    let limited_rotation_axes = spec
        .rotation
        .map(|r| r.limited_mask())
        .unwrap_or([false; 3]);

    let warning = match spec.recorded_type {
        Some(recorded) if recorded != joint_type => {
            let adjusted = options.consistency == ConsistencyMode::Adjust;
            warn!(
                recorded = %recorded,
                derived = %joint_type,
                "Joint type does not match constraints"
            );
            if adjusted {
                info!(from = %recorded, to = %joint_type, "Changed joint type");
            }
            Some(ConsistencyWarning {
                recorded,
                derived: joint_type,
                adjusted,
            })
        }
        _ => None,
    };

    Ok(JointClassification {
        joint_type,
        limited_rotation_axes,
        warning,
    })
}

fn derive_type(spec: &ConstraintSpec, policy: AmbiguityPolicy) -> JointResult<JointType> {
    let Some(location) = spec.location else {
        return Ok(JointType::Floating);
    };

    match location.locked_count() {
        3 => {
            let Some(rotation) = spec.rotation else {
                return ambiguous(policy, "translation fully locked but no rotation limits");
            };
            match rotation.enabled_count() {
                3 if rotation.limited_mask().contains(&true) => Ok(JointType::Revolute),
                3 => Ok(JointType::Fixed),
                2 => Ok(JointType::Continuous),
                n => ambiguous(
                    policy,
                    format!("translation fully locked with {n} limited rotation axes"),
                ),
            }
        }
        2 => Ok(JointType::Prismatic),
        1 => Ok(JointType::Planar),
        _ => Ok(JointType::Floating),
    }
}

fn ambiguous(policy: AmbiguityPolicy, reason: impl Into<String>) -> JointResult<JointType> {
    let reason = reason.into();
    match policy {
        AmbiguityPolicy::DefaultToFloating => {
            debug!(reason = %reason, "Ambiguous constraints, defaulting to floating");
            Ok(JointType::Floating)
        }
        AmbiguityPolicy::Reject => Err(JointError::ambiguous(reason)),
    }
}
