// tests/interpreter.rs
use approx::assert_relative_eq;
use armature_joints::{
    AmbiguityPolicy, ClassifyOptions, ConsistencyMode, ConstraintSpec, ConstraintTemplate,
    FailurePolicy, InterpreterConfig, JOINT_MAX_EFFORT, JOINT_MAX_VELOCITY, JOINT_TYPE,
    JointAnnotation, JointError, JointInterpreter, JointLimits, JointRecord, JointType, LimitBlock,
    MOTOR_MAX_FORCE, MOTOR_MAX_SPEED, MOTOR_TYPE, MotorAnnotation, MotorDefinition, MotorType,
    PropertyMap, PropertyValue,
};
use glam::Vec3;

fn record(name: &str, joint_type: JointType) -> JointRecord {
    let spec = ConstraintTemplate::new(joint_type)
        .with_limits(-30.0, 30.0)
        .to_spec();
    JointRecord::new(name, spec, Vec3::Y).with_parent("base")
}

fn arm() -> Vec<JointRecord> {
    vec![
        JointRecord::new("base", ConstraintSpec::new(), Vec3::Y),
        record("shoulder", JointType::Revolute),
        record("wheel", JointType::Continuous),
        record("slider", JointType::Prismatic),
    ]
}

#[test]
fn test_blueprint_topology() {
    let interpreter = JointInterpreter::new(InterpreterConfig::default());
    let mut records = arm();

    let report = interpreter.build_blueprint(&mut records, &[]).unwrap();
    let blueprint = report.blueprint;

    assert!(report.failures.is_empty());
    assert_eq!(blueprint.joints.len(), 3, "root link has no joint");
    assert_eq!(blueprint.motors.len(), 3);

    let shoulder = blueprint.joint("shoulder").unwrap();
    assert_eq!(shoulder.parent, "base");
    assert_eq!(shoulder.child, "shoulder");
    assert_eq!(shoulder.joint_type, JointType::Revolute);
    assert_eq!(shoulder.axis, Some(Vec3::Y));
    let Some(JointLimits::Axis { min, max }) = shoulder.limits else {
        panic!("expected axis limits, got {:?}", shoulder.limits);
    };
    assert_relative_eq!(min, (-30.0f32).to_radians());
    assert_relative_eq!(max, 30.0f32.to_radians());

    let slider = blueprint.joint("slider").unwrap();
    assert_eq!(slider.joint_type, JointType::Prismatic);
    assert_eq!(
        slider.limits,
        Some(JointLimits::Axis {
            min: -30.0,
            max: 30.0
        })
    );

    assert_eq!(blueprint.joint("wheel").unwrap().limits, None);
}

#[test]
fn test_selection_limits_processed_joints() {
    let interpreter = JointInterpreter::new(InterpreterConfig::default());
    let mut records = arm();

    let report = interpreter
        .build_blueprint(&mut records, &["wheel", "missing"])
        .unwrap();
    let names: Vec<_> = report
        .blueprint
        .joints
        .iter()
        .map(|j| j.name.as_str())
        .collect();
    assert_eq!(names, ["wheel"]);
}

#[test]
fn test_adjust_mode_rewrites_stale_type() {
    let interpreter = JointInterpreter::new(InterpreterConfig::default());
    let mut props = PropertyMap::new();
    props.set_joint_type(JointType::Revolute);
    let mut rec = record("elbow", JointType::Fixed).with_properties(props);

    let joint = interpreter.derive_joint(&mut rec).unwrap().unwrap();
    assert_eq!(joint.joint_type, JointType::Fixed);
    assert_eq!(rec.properties.joint_type(), Some(JointType::Fixed));
}

#[test]
fn test_check_only_mode_keeps_stored_type() {
    let config = InterpreterConfig {
        consistency: ConsistencyMode::CheckOnly,
        ..Default::default()
    };
    let interpreter = JointInterpreter::new(config);
    let mut props = PropertyMap::new();
    props.set_joint_type(JointType::Revolute);
    let mut rec = record("elbow", JointType::Fixed).with_properties(props);

    let joint = interpreter.derive_joint(&mut rec).unwrap().unwrap();
    assert_eq!(joint.joint_type, JointType::Fixed);
    assert_eq!(rec.properties.joint_type(), Some(JointType::Revolute));
}

#[test]
fn test_typetag_names() {
    let interpreter = JointInterpreter::new(InterpreterConfig {
        typetags: true,
        ..Default::default()
    });
    assert_eq!(interpreter.joint_name("arm"), "arm_joint");
    assert_eq!(interpreter.joint_name("robot/arm"), "robot/jointarm");

    let plain = JointInterpreter::new(InterpreterConfig::default());
    assert_eq!(plain.joint_name("robot/arm"), "robot/arm");
}

fn broken_records() -> Vec<JointRecord> {
    // Three locked translation axes but no rotation block.
    let ambiguous = ConstraintSpec::new().with_location(LimitBlock::locked());
    vec![
        JointRecord::new("broken", ambiguous, Vec3::Y).with_parent("base"),
        record("shoulder", JointType::Revolute),
        record("degenerate", JointType::Prismatic),
    ]
}

fn strict_config(on_error: FailurePolicy) -> InterpreterConfig {
    InterpreterConfig {
        ambiguity: AmbiguityPolicy::Reject,
        on_error,
        ..Default::default()
    }
}

#[test]
fn test_abort_policy_returns_first_error() {
    let interpreter = JointInterpreter::new(strict_config(FailurePolicy::Abort));
    let mut records = broken_records();

    let err = interpreter.build_blueprint(&mut records, &[]).unwrap_err();
    assert!(matches!(err, JointError::AmbiguousConstraints { .. }), "{err:?}");
}

#[test]
fn test_skip_policy_collects_failures() {
    let interpreter = JointInterpreter::new(strict_config(FailurePolicy::Skip));
    let mut records = broken_records();
    records[2].bone_axis = Vec3::ZERO;

    let report = interpreter.build_blueprint(&mut records, &[]).unwrap();
    assert_eq!(report.blueprint.joints.len(), 1);
    assert_eq!(report.blueprint.joints[0].name, "shoulder");

    let failed: Vec<_> = report.failures.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(failed, ["broken", "degenerate"]);
    assert_eq!(report.failures[1].1, JointError::DegenerateAxis);
}

#[test]
fn test_annotations_write_schema_keys() {
    let mut props = PropertyMap::new();
    JointAnnotation {
        joint_type: JointType::Revolute,
        max_effort: 12.5,
        max_velocity: 3.0,
    }
    .apply_to(&mut props);
    MotorAnnotation {
        p: 1.0,
        i: 0.5,
        d: 0.25,
        max_speed_rpm: 2.0,
        max_torque: 4.0,
        motor_type: MotorType::Servo,
    }
    .apply_to(&mut props);

    assert_eq!(props.get(JOINT_TYPE), Some(&PropertyValue::from("revolute")));
    assert_eq!(props.get_f64(JOINT_MAX_EFFORT), Some(12.5));
    assert_eq!(props.get_f64(JOINT_MAX_VELOCITY), Some(3.0));
    assert_relative_eq!(
        props.get_f64(MOTOR_MAX_SPEED).unwrap(),
        4.0 * std::f64::consts::PI
    );
    assert_eq!(props.get_f64(MOTOR_MAX_FORCE), Some(4.0));
    assert_eq!(props.get(MOTOR_TYPE), Some(&PropertyValue::Int(1)));

    let json = serde_json::to_value(&props).unwrap();
    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        [
            "joint/maxeffort",
            "joint/maxvelocity",
            "jointType",
            "motor/d",
            "motor/i",
            "motor/motorMaxForce",
            "motor/motorMaxSpeed",
            "motor/p",
            "type",
        ]
    );
}

#[test]
fn test_fixed_annotation_omits_dynamics() {
    let mut props = PropertyMap::new();
    JointAnnotation {
        joint_type: JointType::Fixed,
        max_effort: 1.0,
        max_velocity: 1.0,
    }
    .apply_to(&mut props);
    assert_eq!(props.len(), 1);
    assert!(!props.contains(JOINT_MAX_EFFORT));
    assert!(!props.contains(JOINT_MAX_VELOCITY));
}

#[test]
fn test_annotated_record_carries_dynamics_and_motor() {
    let mut props = PropertyMap::new();
    JointAnnotation {
        joint_type: JointType::Prismatic,
        max_effort: 40.0,
        max_velocity: 0.5,
    }
    .apply_to(&mut props);
    MotorAnnotation {
        motor_type: MotorType::Dc,
        ..Default::default()
    }
    .apply_to(&mut props);

    let mut records = vec![record("slider", JointType::Prismatic).with_properties(props)];
    let interpreter = JointInterpreter::new(InterpreterConfig::default());
    let blueprint = interpreter.build_blueprint(&mut records, &[]).unwrap().blueprint;

    let joint = &blueprint.joints[0];
    assert_eq!(joint.max_effort, Some(40.0));
    assert_eq!(joint.max_velocity, Some(0.5));

    let motor = &blueprint.motors[0];
    assert_eq!(motor.joint, "slider");
    assert_eq!(motor.motor_type, Some(MotorType::Dc));
    assert_eq!(motor.max_force, Some(0.1));
    assert_relative_eq!(motor.max_speed.unwrap(), std::f64::consts::TAU);
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: InterpreterConfig =
        serde_json::from_str(r#"{ "typetags": true, "on_error": "skip" }"#).unwrap();
    assert!(config.typetags);
    assert_eq!(config.on_error, FailurePolicy::Skip);
    assert_eq!(config.consistency, ConsistencyMode::Adjust);
    assert_eq!(config.ambiguity, AmbiguityPolicy::DefaultToFloating);
}

#[test]
fn test_partial_config_keeps_adjust_mode() {
    let config: InterpreterConfig =
        serde_json::from_str(r#"{ "ambiguity": "reject" }"#).unwrap();
    assert_eq!(config.ambiguity, AmbiguityPolicy::Reject);
    // Setting one classification option leaves the other at the interpreter default.
    assert_eq!(config.consistency, ConsistencyMode::Adjust);
    assert_eq!(
        config.classify_options(),
        ClassifyOptions::default()
            .with_consistency(ConsistencyMode::Adjust)
            .with_ambiguity(AmbiguityPolicy::Reject)
    );

    let interpreter = JointInterpreter::new(config);
    let mut props = PropertyMap::new();
    props.set_joint_type(JointType::Revolute);
    let mut rec = record("elbow", JointType::Fixed).with_properties(props);
    interpreter.derive_joint(&mut rec).unwrap();
    assert_eq!(rec.properties.joint_type(), Some(JointType::Fixed));
}

#[test]
fn test_unknown_motor_code_is_dropped() {
    for code in [PropertyValue::Float(1.9), PropertyValue::Int(0), PropertyValue::Int(7)] {
        let mut props = PropertyMap::new();
        props.set(MOTOR_TYPE, code.clone());
        let motor = MotorDefinition::from_properties("wheel", &props);
        assert_eq!(motor.motor_type, None, "code {code:?}");
    }

    let mut props = PropertyMap::new();
    props.set(MOTOR_TYPE, 2.0);
    let motor = MotorDefinition::from_properties("wheel", &props);
    assert_eq!(motor.motor_type, Some(MotorType::Dc));
}
