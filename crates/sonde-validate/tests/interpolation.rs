use std::collections::BTreeMap;

use sonde_model::flags::{INTERPOLATION, SURFACE_LEVEL};
use sonde_model::names::{
    AIR_PRESSURE, COUNTER_NUM_ANY_ERRORS, COUNTER_NUM_INTERP_ERR_OBS, COUNTER_NUM_INTERP_ERRORS,
    HOFX_AIR_TEMPERATURE, IND_STD, LEV_ERRORS, NUM_SIG, NUM_STD, OBS_AIR_TEMPERATURE, QC_T_FLAGS,
    SIG_ABOVE, SIG_BELOW, STD_LEV, T_INTERP, T_OBS_CORRECTION,
};
use sonde_model::{MISSING_FLOAT, ProfileDataHandler, ProfileError, QcOptions, StandardLevel};
use sonde_validate::{
    CheckContext, CheckOutcome, InterpolationCheck, ProfileCheck, ProfileCheckValidator,
    ProfileIndices, default_registry, run_profile,
};

fn options(levels: Vec<StandardLevel>, tolerance: f32) -> QcOptions {
    let mut options = QcOptions::default().with_standard_levels(levels);
    options.t_interp_tol = tolerance;
    options
}

fn at_700() -> QcOptions {
    options(vec![StandardLevel::new(700, 300.0)], 1.0)
}

fn profile(pressures: Vec<f32>, t_obs: Vec<f32>) -> ProfileDataHandler {
    let levels = pressures.len();
    let mut data = ProfileDataHandler::new();
    data.set(AIR_PRESSURE, pressures);
    data.set(OBS_AIR_TEMPERATURE, t_obs);
    data.set(HOFX_AIR_TEMPERATURE, vec![280.0_f32; levels]);
    data.initialise_derived(levels);
    data
}

fn standard_profile() -> ProfileDataHandler {
    profile(
        vec![100000.0, 85000.0, 70000.0, 50000.0, 30000.0],
        vec![288.0, 280.0, 270.0, 260.0, 250.0],
    )
}

fn run_once(
    options: &QcOptions,
    data: &mut ProfileDataHandler,
) -> (CheckOutcome, InterpolationCheck) {
    let indices = ProfileIndices::new(data, options).expect("indices");
    let validator = ProfileCheckValidator::default();
    let mut check = InterpolationCheck::new(&CheckContext::new(options, &indices, &validator));
    let outcome = check.run_check(data).expect("run check");
    (outcome, check)
}

fn flags(data: &ProfileDataHandler) -> Vec<i32> {
    data.get::<i32>(QC_T_FLAGS).expect("flags").to_vec()
}

fn counters(data: &ProfileDataHandler) -> [i32; 3] {
    [
        data.counter(COUNTER_NUM_ANY_ERRORS).unwrap(),
        data.counter(COUNTER_NUM_INTERP_ERRORS).unwrap(),
        data.counter(COUNTER_NUM_INTERP_ERR_OBS).unwrap(),
    ]
}

#[test]
fn inconsistent_standard_level_flags_three_levels() {
    let options = at_700();
    let mut data = standard_profile();
    let (outcome, check) = run_once(&options, &mut data);

    assert_eq!(outcome, CheckOutcome::Completed);
    assert_eq!(flags(&data), vec![0, INTERPOLATION, INTERPOLATION, INTERPOLATION, 0]);
    assert_eq!(counters(&data), [1, 1, 1]);
    let t_interp = check.interpolated();
    assert!((t_interp[2] - 272.68).abs() < 0.05, "interpolated {}", t_interp[2]);
    assert_eq!(t_interp[0], MISSING_FLOAT);

    check.fill_validator(&mut data);
    assert_eq!(data.get::<i32>(LEV_ERRORS).unwrap(), &[-1, 0, 0, 0, -1]);
}

#[test]
fn existing_flag_bits_are_preserved() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(QC_T_FLAGS, vec![0, 1 << 5, 0, 0, 1 << 5]);
    run_once(&options, &mut data);
    assert_eq!(
        flags(&data),
        vec![0, (1 << 5) | INTERPOLATION, INTERPOLATION, INTERPOLATION, 1 << 5]
    );
}

#[test]
fn second_run_adds_to_counters() {
    let options = at_700();
    let mut data = standard_profile();
    run_once(&options, &mut data);
    let first_flags = flags(&data);
    run_once(&options, &mut data);
    assert_eq!(counters(&data), [2, 2, 2]);
    assert_eq!(flags(&data), first_flags);
}

#[test]
fn empty_inputs_skip_without_changes() {
    let options = at_700();
    let mut data = profile(Vec::new(), Vec::new());
    let before = data.clone();
    let (outcome, check) = run_once(&options, &mut data);
    assert_eq!(outcome, CheckOutcome::Skipped);
    assert_eq!(data, before);

    check.fill_validator(&mut data);
    assert!(data.get::<i32>(STD_LEV).unwrap().is_empty());
}

#[test]
fn empty_correction_alone_skips_without_changes() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(T_OBS_CORRECTION, Vec::<f32>::new());
    let before = data.clone();
    let (outcome, _) = run_once(&options, &mut data);
    assert_eq!(outcome, CheckOutcome::Skipped);
    assert_eq!(data, before);
}

#[test]
fn empty_flags_alone_skip_without_changes() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(QC_T_FLAGS, Vec::<i32>::new());
    let before = data.clone();
    let (outcome, _) = run_once(&options, &mut data);
    assert_eq!(outcome, CheckOutcome::Skipped);
    assert_eq!(data, before);
}

#[test]
fn misaligned_inputs_skip_without_changes() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(OBS_AIR_TEMPERATURE, vec![288.0_f32, 280.0, 270.0, 260.0]);
    let before = data.clone();
    let (outcome, _) = run_once(&options, &mut data);
    assert_eq!(outcome, CheckOutcome::Skipped);
    assert_eq!(data, before);
}

#[test]
fn missing_input_is_an_error() {
    let options = at_700();
    let mut data = ProfileDataHandler::new();
    data.set(AIR_PRESSURE, vec![85000.0_f32, 70000.0, 50000.0]);
    data.set(OBS_AIR_TEMPERATURE, vec![280.0_f32, 270.0, 260.0]);
    data.initialise_derived(3);
    let indices = ProfileIndices::new(&data, &options).unwrap();
    let validator = ProfileCheckValidator::default();
    let mut check = InterpolationCheck::new(&CheckContext::new(&options, &indices, &validator));
    let err = check.run_check(&mut data).unwrap_err();
    assert!(matches!(err, ProfileError::NotFound { name } if name == HOFX_AIR_TEMPERATURE));
}

#[test]
fn correction_is_added_before_comparison() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(T_OBS_CORRECTION, vec![0.0_f32, 0.0, 2.5, 0.0, 0.0]);
    run_once(&options, &mut data);
    assert_eq!(counters(&data), [0, 0, 0]);
}

#[test]
fn too_few_significant_levels_skips_every_standard_level() {
    let options = at_700();
    let mut data = profile(vec![85000.0, 70000.0, 50000.0], vec![280.0, 200.0, 260.0]);
    let (outcome, check) = run_once(&options, &mut data);
    assert_eq!(outcome, CheckOutcome::Completed);
    assert_eq!(flags(&data), vec![0; 3]);
    assert_eq!(check.interpolated(), &[MISSING_FLOAT; 3]);
}

#[test]
fn bracket_beyond_big_gap_is_not_interpolated() {
    let options = options(vec![StandardLevel::new(700, 100.0)], 1.0);
    let mut data = standard_profile();
    let (_, check) = run_once(&options, &mut data);
    assert_eq!(flags(&data), vec![0; 5]);
    assert_eq!(check.interpolated()[2], MISSING_FLOAT);
}

#[test]
fn equal_bracket_pressures_are_not_interpolated() {
    let options = at_700();
    let mut data = profile(
        vec![85000.0, 60000.0, 70000.0, 60000.0, 40000.0],
        vec![280.0, 265.0, 200.0, 265.0, 250.0],
    );
    let (_, check) = run_once(&options, &mut data);
    assert_eq!(check.standard_levels().matches()[0].sig_below, Some(1));
    assert_eq!(check.standard_levels().matches()[0].sig_above, Some(3));
    assert_eq!(flags(&data), vec![0; 5]);
}

#[test]
fn surface_standard_level_is_not_checked() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(QC_T_FLAGS, vec![0, 0, SURFACE_LEVEL, 0, 0]);
    run_once(&options, &mut data);
    assert_eq!(flags(&data), vec![0, 0, SURFACE_LEVEL, 0, 0]);
    assert_eq!(counters(&data), [0, 0, 0]);
}

#[test]
fn surface_level_leaves_the_standard_slot_to_a_later_alias() {
    let options = at_700();
    let mut data = profile(
        vec![100000.0, 85000.0, 70010.0, 69990.0, 50000.0, 30000.0],
        vec![288.0, 280.0, 270.0, 272.7, 260.0, 250.0],
    );
    data.set(QC_T_FLAGS, vec![0, 0, SURFACE_LEVEL, 0, 0, 0]);
    let (_, check) = run_once(&options, &mut data);

    let levels = check.standard_levels();
    assert_eq!(levels.num_std(), 1);
    assert_eq!(levels.matches()[0].level, 3);
    assert_eq!(levels.num_sig(), 4);
    assert_eq!(flags(&data), vec![0, 0, SURFACE_LEVEL, 0, 0, 0]);
    assert_eq!(counters(&data), [0, 0, 0]);
}

#[test]
fn nan_bracket_temperature_does_not_flag() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(OBS_AIR_TEMPERATURE, vec![288.0_f32, 280.0, 272.7, f32::NAN, 250.0]);
    let (outcome, check) = run_once(&options, &mut data);

    assert_eq!(outcome, CheckOutcome::Completed);
    assert_eq!(check.standard_levels().num_sig(), 3);
    assert_eq!(check.standard_levels().matches()[0].sig_above, Some(4));
    assert_eq!(flags(&data), vec![0; 5]);
    assert_eq!(counters(&data), [0, 0, 0]);
}

#[test]
fn nan_standard_temperature_is_not_a_standard_level() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(OBS_AIR_TEMPERATURE, vec![288.0_f32, 280.0, f32::NAN, 260.0, 250.0]);
    let (_, check) = run_once(&options, &mut data);
    assert_eq!(check.standard_levels().num_std(), 0);
    assert_eq!(flags(&data), vec![0; 5]);
    assert_eq!(counters(&data), [0, 0, 0]);
}

#[test]
fn missing_standard_value_is_not_a_standard_level() {
    let options = at_700();
    let mut data = standard_profile();
    data.set(OBS_AIR_TEMPERATURE, vec![288.0_f32, 280.0, MISSING_FLOAT, 260.0, 250.0]);
    let (_, check) = run_once(&options, &mut data);
    assert_eq!(check.standard_levels().num_std(), 0);
    assert_eq!(flags(&data), vec![0; 5]);
}

#[test]
fn tolerance_is_relaxed_below_threshold() {
    // Interpolated value at 250 hPa is about 231.0 K; the observation is 1.2 K off.
    let options = options(vec![StandardLevel::new(250, 100.0)], 1.0);
    let mut data = profile(
        vec![40000.0, 30000.0, 25000.0, 20000.0, 15000.0],
        vec![245.0, 240.0, 229.8, 220.0, 215.0],
    );
    run_once(&options, &mut data);
    assert_eq!(counters(&data), [0, 0, 0]);
}

#[test]
fn tolerance_is_not_relaxed_at_threshold() {
    // Interpolated value at 300 hPa is about 240.4 K; the observation is 1.2 K off.
    let options = options(vec![StandardLevel::new(300, 100.0)], 1.0);
    let mut data = profile(
        vec![40000.0, 35000.0, 30000.0, 25000.0, 20000.0],
        vec![250.0, 245.0, 239.2, 235.0, 230.0],
    );
    run_once(&options, &mut data);
    assert_eq!(counters(&data), [1, 1, 1]);
}

#[test]
fn max_levels_limits_the_checked_levels() {
    let options = at_700().with_max_levels(Some(3));
    let mut data = standard_profile();
    let (_, check) = run_once(&options, &mut data);
    assert_eq!(check.standard_levels().num_levels(), 3);
    // No significant level above the standard level remains in range.
    assert_eq!(flags(&data), vec![0; 5]);
}

#[test]
fn exported_state_snapshot() {
    let options = at_700();
    let mut data = standard_profile();
    let (_, check) = run_once(&options, &mut data);
    check.fill_validator(&mut data);

    let exported: BTreeMap<&str, Vec<i32>> = [
        STD_LEV, SIG_BELOW, SIG_ABOVE, IND_STD, LEV_ERRORS, NUM_STD, NUM_SIG,
    ]
    .into_iter()
    .map(|name| (name, data.get::<i32>(name).unwrap().to_vec()))
    .collect();
    insta::assert_json_snapshot!(exported, @r#"
    {
      "IndStd": [
        0,
        -1,
        -1,
        -1,
        -1
      ],
      "LevErrors": [
        -1,
        0,
        0,
        0,
        -1
      ],
      "NumSig": [
        4,
        4,
        4,
        4,
        4
      ],
      "NumStd": [
        1,
        1,
        1,
        1,
        1
      ],
      "SigAbove": [
        3,
        -1,
        -1,
        -1,
        -1
      ],
      "SigBelow": [
        1,
        -1,
        -1,
        -1,
        -1
      ],
      "StdLev": [
        2,
        -1,
        -1,
        -1,
        -1
      ]
    }
    "#);
    assert!(data.get::<f32>(T_INTERP).unwrap()[2] > 272.0);
}

#[test]
fn runner_compares_against_reference() {
    let options = at_700().with_reference_comparison(true);
    let mut data = standard_profile();
    let mut reference = ProfileDataHandler::new();
    reference.set(LEV_ERRORS, vec![-1, 0, 0, 0, -1]);
    reference.set(STD_LEV, vec![3, -1, -1, -1, -1]);
    let validator = ProfileCheckValidator::new(reference, options.comparison_tolerance);

    let summary = run_profile("sonde-01", &mut data, &options, &validator, default_registry())
        .expect("run profile");
    assert_eq!(summary.flagged_levels, 3);
    assert_eq!(summary.counter(COUNTER_NUM_INTERP_ERRORS), 1);
    assert_eq!(summary.mismatches.len(), 1);
    let mismatch = &summary.mismatches[0];
    assert_eq!(mismatch.check, "Interpolation");
    assert_eq!(mismatch.variable, STD_LEV);
    assert_eq!(mismatch.level, Some(0));
}
