//! The flat key/value metadata stored on joint objects.
//!
//! Key names are the persisted schema read by existing exporters and must not
//! change.

use crate::joint::JointType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use tracing::warn;

pub const JOINT_TYPE: &str = "jointType";
pub const JOINT_MAX_EFFORT: &str = "joint/maxeffort";
pub const JOINT_MAX_VELOCITY: &str = "joint/maxvelocity";
pub const MOTOR_P: &str = "motor/p";
pub const MOTOR_I: &str = "motor/i";
pub const MOTOR_D: &str = "motor/d";
pub const MOTOR_MAX_SPEED: &str = "motor/motorMaxSpeed";
pub const MOTOR_MAX_FORCE: &str = "motor/motorMaxForce";
pub const MOTOR_TYPE: &str = "type";

/// A single custom property value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl PropertyValue {
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            Self::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<JointType> for PropertyValue {
    fn from(v: JointType) -> Self {
        Self::Str(v.as_str().to_owned())
    }
}

/// The custom properties of one scene object, ordered by key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap(BTreeMap<String, PropertyValue>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropertyValue::as_f64)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The stored joint type tag.
    ///
    /// An unrecognised tag is logged and treated as absent.
    pub fn joint_type(&self) -> Option<JointType> {
        let tag = self.get(JOINT_TYPE)?.as_str()?;
        match tag.parse() {
            Ok(t) => Some(t),
            Err(e) => {
                warn!(error = %e, "Ignoring stored joint type");
                None
            }
        }
    }

    pub fn set_joint_type(&mut self, joint_type: JointType) {
        self.set(JOINT_TYPE, joint_type);
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Joint values entered in the joint picker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointAnnotation {
    pub joint_type: JointType,
    /// Maximum effort in N or Nm.
    pub max_effort: f64,
    /// Maximum velocity in m/s or rad/s.
    pub max_velocity: f64,
}

impl JointAnnotation {
    /// Writes the annotation to `props`.
    ///
    /// Fixed joints cannot move, so they get no effort or velocity keys.
    pub fn apply_to(&self, props: &mut PropertyMap) {
        props.set_joint_type(self.joint_type);
        if self.joint_type != JointType::Fixed {
            props.set(JOINT_MAX_EFFORT, self.max_effort);
            props.set(JOINT_MAX_VELOCITY, self.max_velocity);
        }
    }
}

/// Motor family, stored as an integer code under [`MOTOR_TYPE`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotorType {
    #[default]
    Servo,
    Dc,
}

impl MotorType {
    pub const fn code(&self) -> i64 {
        match self {
            Self::Servo => 1,
            Self::Dc => 2,
        }
    }

    /// Parses a stored code. Anything but exactly 1 or 2 is logged and rejected.
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(Self::Servo)
        } else if code == 2.0 {
            Some(Self::Dc)
        } else {
            warn!(code, "Ignoring unknown motor type code");
            None
        }
    }
}

/// Motor values entered in the motor form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotorAnnotation {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    /// Maximum turning velocity in rpm.
    pub max_speed_rpm: f64,
    /// Maximum torque in Nm.
    pub max_torque: f64,
    pub motor_type: MotorType,
}

impl Default for MotorAnnotation {
    fn default() -> Self {
        Self {
            p: 0.0,
            i: 0.0,
            d: 0.0,
            max_speed_rpm: 1.0,
            max_torque: 0.1,
            motor_type: MotorType::Servo,
        }
    }
}

impl MotorAnnotation {
    /// Maximum speed as stored: `rpm * 2π`.
    pub fn max_speed(&self) -> f64 {
        self.max_speed_rpm * TAU
    }

    pub fn apply_to(&self, props: &mut PropertyMap) {
        props.set(MOTOR_P, self.p);
        props.set(MOTOR_I, self.i);
        props.set(MOTOR_D, self.d);
        props.set(MOTOR_MAX_SPEED, self.max_speed());
        props.set(MOTOR_MAX_FORCE, self.max_torque);
        props.set(MOTOR_TYPE, self.motor_type.code());
    }
}
