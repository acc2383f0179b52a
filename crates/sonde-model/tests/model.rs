use sonde_model::names;
use sonde_model::{ProfileDataHandler, QcOptions, StandardLevel, ValueKind};

#[test]
fn options_accept_operational_key_names() {
    let text = r#"
checks = ["Interpolation"]
ICheck_BigGapInit = 2000.0
ICheck_TInterpTol = 1.0
ICheck_TolRelax = 2.0
ICheck_TolRelaxPThresh = 25000.0

[[standard_levels]]
pressure_hpa = 700
big_gap_hpa = 300.0
"#;
    let options: QcOptions = toml::from_str(text).expect("parse options");
    assert_eq!(options.big_gap_init, 2000.0);
    assert_eq!(options.t_interp_tol, 1.0);
    assert_eq!(options.tol_relax, 2.0);
    assert_eq!(options.tol_relax_p_thresh, 25000.0);
    assert_eq!(options.standard_levels, vec![StandardLevel::new(700, 300.0)]);
    assert!(!options.compare_with_reference);
    options.validate().expect("valid options");
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let options: QcOptions = toml::from_str("ICheck_TInterpTol = 4.0").expect("parse options");
    let defaults = QcOptions::default();
    assert_eq!(options.t_interp_tol, 4.0);
    assert_eq!(options.standard_levels, defaults.standard_levels);
    assert_eq!(options.checks, vec!["Interpolation".to_string()]);
}

#[test]
fn options_round_trip_through_json() {
    let options = QcOptions::default().with_max_levels(Some(40));
    let json = serde_json::to_value(&options).expect("serialize options");
    assert_eq!(json["ICheck_TInterpTol"], 8.0);
    assert_eq!(json["max_levels"], 40);
}

#[test]
fn handler_lists_names_with_kinds() {
    let mut data = ProfileDataHandler::new();
    data.set(names::AIR_PRESSURE, vec![100000.0_f32]);
    data.initialise_derived(1);
    let listed = data.names();
    assert!(listed.contains(&(names::AIR_PRESSURE, ValueKind::Float)));
    assert!(listed.contains(&(names::QC_T_FLAGS, ValueKind::Int)));
    assert!(listed.contains(&(names::COUNTER_NUM_INTERP_ERR_OBS, ValueKind::Int)));
    assert!(data.contains(names::T_OBS_CORRECTION));
}
