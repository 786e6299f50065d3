//! Extracts the motion axis and limits of a classified joint.

use crate::constraint::{ConstraintSpec, LimitBlock};
use crate::error::{JointError, JointResult};
use crate::joint::{AxisLimits, JointClassification, JointLimits, JointType};
use glam::Vec3;

const UNIT_AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

/// Returns the axis and limits for the joint described by `spec`.
///
/// `bone_axis` is the vector along the joint's bone in object space. Revolute,
/// continuous and prismatic joints move along/around it regardless of which
/// constraint axis is free. Planar joints instead report the unit normal of
/// their locked axis.
///
/// # Errors
///
/// [`JointError::JointType`] when the constraints do not provide what the
/// classified type needs, [`JointError::DegenerateAxis`] when `bone_axis` has
/// zero length.
pub fn extract_axis_and_limits(
    spec: &ConstraintSpec,
    classification: &JointClassification,
    bone_axis: Vec3,
) -> JointResult<AxisLimits> {
    let joint = classification.joint_type;
    match joint {
        JointType::Floating | JointType::Fixed => Ok(AxisLimits::NONE),
        JointType::Revolute | JointType::Continuous => {
            let rotation = spec
                .rotation
                .ok_or_else(|| JointError::joint_type(joint, "no rotation limits"))?;
            let axis = bone_direction(bone_axis)?;

            let limited = classification
                .limited_rotation_axes
                .iter()
                .position(|&limited| limited);
            let limits = match limited {
                Some(i) => Some(axis_range(&rotation, i)?),
                // A continuous joint leaves its rotating axis unconstrained.
                None if joint == JointType::Continuous => None,
                None => {
                    return Err(JointError::joint_type(joint, "no limited rotation axis"));
                }
            };
            Ok(AxisLimits {
                axis: Some(axis),
                limits,
            })
        }
        JointType::Prismatic => {
            let location = location_block(spec, joint)?;
            let free = free_axes(&location);
            let [i] = free[..] else {
                return Err(JointError::joint_type(
                    joint,
                    format!("expected 1 free translation axis, found {}", free.len()),
                ));
            };
            Ok(AxisLimits {
                axis: Some(bone_direction(bone_axis)?),
                limits: Some(axis_range(&location, i)?),
            })
        }
        JointType::Planar => {
            let location = location_block(spec, joint)?;
            let free = free_axes(&location);
            let [a, b] = free[..] else {
                return Err(JointError::joint_type(
                    joint,
                    format!("expected 2 free translation axes, found {}", free.len()),
                ));
            };
            let locked = 3 - a - b;
            let (a_min, a_max) = axis_bounds(&location, a)?;
            let (b_min, b_max) = axis_bounds(&location, b)?;
            Ok(AxisLimits {
                axis: Some(UNIT_AXES[locked]),
                limits: Some(JointLimits::Plane([a_min, a_max, b_min, b_max])),
            })
        }
    }
}

fn location_block(spec: &ConstraintSpec, joint: JointType) -> JointResult<LimitBlock> {
    spec.location
        .ok_or_else(|| JointError::joint_type(joint, "no location limits"))
}

/// Indices of the translation axes that are not locked, ascending.
fn free_axes(block: &LimitBlock) -> Vec<usize> {
    block
        .locked_mask()
        .into_iter()
        .enumerate()
        .filter_map(|(i, locked)| (!locked).then_some(i))
        .collect()
}

fn axis_bounds(block: &LimitBlock, index: usize) -> JointResult<(f32, f32)> {
    block
        .axis(index)
        .map(|limit| (limit.min, limit.max))
        .ok_or_else(|| JointError::internal(format!("axis index {index} out of range")))
}

fn axis_range(block: &LimitBlock, index: usize) -> JointResult<JointLimits> {
    let (min, max) = axis_bounds(block, index)?;
    Ok(JointLimits::Axis { min, max })
}

fn bone_direction(bone_axis: Vec3) -> JointResult<Vec3> {
    bone_axis.try_normalize().ok_or(JointError::DegenerateAxis)
}
