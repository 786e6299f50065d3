use crate::joint::{JointLimits, JointType};
use crate::properties::{
    JOINT_MAX_EFFORT, JOINT_MAX_VELOCITY, MOTOR_D, MOTOR_I, MOTOR_MAX_FORCE, MOTOR_MAX_SPEED,
    MOTOR_P, MOTOR_TYPE, MotorType, PropertyMap,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The engine-agnostic kinematics of an annotated armature model.
///
/// Collects one [`JointDefinition`] and one [`MotorDefinition`] per non-root
/// link. This is what an exporter (URDF, MARS scene, ...) consumes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KinematicsBlueprint {
    /// All joints, in the order they were derived.
    pub joints: Vec<JointDefinition>,

    /// All motors, one per joint.
    pub motors: Vec<MotorDefinition>,
}

impl KinematicsBlueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_joint(&mut self, joint: JointDefinition) {
        self.joints.push(joint);
    }

    pub fn add_motor(&mut self, motor: MotorDefinition) {
        self.motors.push(motor);
    }

    pub fn joint(&self, name: &str) -> Option<&JointDefinition> {
        self.joints.iter().find(|j| j.name == name)
    }
}

/// A kinematic connection between a link and its parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointDefinition {
    /// Exported joint name.
    pub name: String,

    /// The parent link (the one closer to the root).
    pub parent: String,

    /// The child link, i.e. the armature object carrying the constraints.
    pub child: String,

    /// The type derived from the constraints.
    pub joint_type: JointType,

    /// The axis of rotation/translation in the armature's object space,
    /// or the plane normal for planar joints.
    pub axis: Option<Vec3>,

    /// Motion limits, in radians or metres.
    pub limits: Option<JointLimits>,

    /// Maximum torque (Nm) or force (N), when annotated.
    pub max_effort: Option<f64>,

    /// Maximum velocity (rad/s or m/s), when annotated.
    pub max_velocity: Option<f64>,
}

/// The actuator driving a joint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotorDefinition {
    pub name: String,

    /// Name of the link whose joint the motor drives.
    pub joint: String,

    pub p: Option<f64>,
    pub i: Option<f64>,
    pub d: Option<f64>,

    /// Maximum speed in rad/s.
    pub max_speed: Option<f64>,

    /// Maximum torque in Nm.
    pub max_force: Option<f64>,

    pub motor_type: Option<MotorType>,
}

impl MotorDefinition {
    /// Reads the motor keys stored on the link named `link`.
    pub fn from_properties(link: &str, props: &PropertyMap) -> Self {
        Self {
            name: link.to_owned(),
            joint: link.to_owned(),
            p: props.get_f64(MOTOR_P),
            i: props.get_f64(MOTOR_I),
            d: props.get_f64(MOTOR_D),
            max_speed: props.get_f64(MOTOR_MAX_SPEED),
            max_force: props.get_f64(MOTOR_MAX_FORCE),
            motor_type: props.get_f64(MOTOR_TYPE).and_then(MotorType::from_code),
        }
    }
}

impl JointDefinition {
    /// Copies the effort and velocity keys from `props`, if present.
    pub fn with_dynamics_from(mut self, props: &PropertyMap) -> Self {
        self.max_effort = props.get_f64(JOINT_MAX_EFFORT);
        self.max_velocity = props.get_f64(JOINT_MAX_VELOCITY);
        self
    }
}
