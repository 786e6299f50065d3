//! Batch derivation of joint descriptions from armature snapshots.
//!
//! The entry point is [`JointInterpreter`]. Configure it with an
//! [`InterpreterConfig`], collect one [`JointRecord`] per armature object, then
//! call [`JointInterpreter::build_blueprint`] with the names of the joints to
//! process.

use crate::blueprint::{JointDefinition, KinematicsBlueprint, MotorDefinition};
use crate::classifier::{AmbiguityPolicy, ClassifyOptions, ConsistencyMode, classify};
use crate::constraint::ConstraintSpec;
use crate::error::{JointError, JointResult};
use crate::extractor::extract_axis_and_limits;
use crate::properties::PropertyMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What a batch does when one joint fails to derive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Record the failure and continue with the next joint.
    Skip,
}

/// Configuration for joint interpretation.
///
/// Every field falls back to the value in [`InterpreterConfig::default`] when
/// missing from a deserialized config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Handling of stale stored joint types. Defaults to [`ConsistencyMode::Adjust`].
    pub consistency: ConsistencyMode,
    pub ambiguity: AmbiguityPolicy,
    /// Suffix exported joint names with a `joint` type tag.
    pub typetags: bool,
    pub on_error: FailurePolicy,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            consistency: ConsistencyMode::Adjust,
            ambiguity: AmbiguityPolicy::DefaultToFloating,
            typetags: false,
            on_error: FailurePolicy::Abort,
        }
    }
}

impl InterpreterConfig {
    /// The options passed to [`classify`] for every joint.
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions::default()
            .with_consistency(self.consistency)
            .with_ambiguity(self.ambiguity)
    }
}

/// Snapshot of one armature object, as read from the host scene.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JointRecord {
    /// Object name. Also the child link name.
    pub name: String,

    /// Parent object name; `None` for the root link, which has no joint.
    pub parent: Option<String>,

    /// Constraints on the armature's single bone.
    pub spec: ConstraintSpec,

    /// Vector along the bone in object space.
    pub bone_axis: Vec3,

    /// The object's custom properties.
    pub properties: PropertyMap,
}

impl JointRecord {
    pub fn new(name: impl Into<String>, spec: ConstraintSpec, bone_axis: Vec3) -> Self {
        Self {
            name: name.into(),
            spec,
            bone_axis,
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }
}

/// Result of a batch run.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    pub blueprint: KinematicsBlueprint,
    /// Joints skipped under [`FailurePolicy::Skip`], with their errors.
    pub failures: Vec<(String, JointError)>,
}

/// Derives joint descriptions from armature records.
pub struct JointInterpreter {
    config: InterpreterConfig,
}

impl JointInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Exported name of the joint on link `name`.
    ///
    /// With typetags, `arm` becomes `arm_joint` and `robot/arm` becomes
    /// `robot/jointarm`.
    pub fn joint_name(&self, name: &str) -> String {
        if !self.config.typetags {
            name.to_owned()
        } else if name.contains('/') {
            name.replacen('/', "/joint", 1)
        } else {
            format!("{name}_joint")
        }
    }

    /// Derives the joint of a single record.
    ///
    /// Returns `Ok(None)` for root links. In adjust mode a stale `jointType`
    /// property on the record is overwritten with the derived type.
    pub fn derive_joint(&self, record: &mut JointRecord) -> JointResult<Option<JointDefinition>> {
        let Some(parent) = record.parent.clone() else {
            debug!(link = %record.name, "Root link has no joint");
            return Ok(None);
        };

        let spec = ConstraintSpec {
            recorded_type: record.properties.joint_type().or(record.spec.recorded_type),
            ..record.spec
        };
        let classification = classify(&spec, self.config.classify_options())?;
        if let Some(tag) = classification.tag_to_store() {
            record.properties.set_joint_type(tag);
        }

        let axis_limits = extract_axis_and_limits(&spec, &classification, record.bone_axis)?;

        let joint = JointDefinition {
            name: self.joint_name(&record.name),
            parent,
            child: record.name.clone(),
            joint_type: classification.joint_type,
            axis: axis_limits.axis,
            limits: axis_limits.limits,
            max_effort: None,
            max_velocity: None,
        }
        .with_dynamics_from(&record.properties);
        Ok(Some(joint))
    }

    /// Derives joints and motors for the records named in `selection`.
    ///
    /// An empty selection processes every record. Records are processed in
    /// slice order; names in `selection` that match no record are ignored.
    pub fn build_blueprint(
        &self,
        records: &mut [JointRecord],
        selection: &[&str],
    ) -> JointResult<BatchReport> {
        let mut report = BatchReport::default();

        for record in records
            .iter_mut()
            .filter(|r| selection.is_empty() || selection.contains(&r.name.as_str()))
        {
            match self.derive_joint(record) {
                Ok(Some(joint)) => {
                    let motor = MotorDefinition::from_properties(&record.name, &record.properties);
                    report.blueprint.add_motor(motor);
                    report.blueprint.add_joint(joint);
                }
                Ok(None) => {}
                Err(e) => match self.config.on_error {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {
                        warn!(link = %record.name, error = %e, "Skipping joint");
                        report.failures.push((record.name.clone(), e));
                    }
                },
            }
        }

        info!(
            joints = report.blueprint.joints.len(),
            failures = report.failures.len(),
            "Derived joints"
        );
        Ok(report)
    }
}
