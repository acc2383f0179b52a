//! Interpolation consistency check for temperature profiles.
//!
//! Each standard level is compared with a log-pressure interpolation between
//! its bracketing significant levels. When the difference exceeds the
//! tolerance, all three levels are flagged.

use sonde_model::flags::INTERPOLATION;
use sonde_model::names::{
    AIR_PRESSURE, COUNTER_NUM_ANY_ERRORS, COUNTER_NUM_INTERP_ERR_OBS, COUNTER_NUM_INTERP_ERRORS,
    HOFX_AIR_TEMPERATURE, IND_STD, LEV_ERRORS, LOG_P, NUM_SIG, NUM_STD, OBS_AIR_TEMPERATURE,
    QC_T_FLAGS, SIG_ABOVE, SIG_BELOW, STD_LEV, T_INTERP, T_OBS_CORRECTION,
};
use sonde_model::{MISSING_FLOAT, ProfileDataHandler, QcOptions, Result, T0C};
use tracing::{debug, warn};

use crate::check::{CheckContext, CheckOutcome, ProfileCheck};
use crate::standard_levels::StandardLevels;
use crate::util::{all_same_len, any_empty, correct_values, round_to_hpa};

pub const NAME: &str = "Interpolation";

const VALIDATOR_VARIABLES: &[&str] = &[
    STD_LEV, SIG_ABOVE, SIG_BELOW, IND_STD, LEV_ERRORS, T_INTERP, LOG_P, NUM_STD, NUM_SIG,
];

/// Fewest significant levels a profile needs before any standard level is checked.
fn min_significant_levels(num_std: usize) -> usize {
    3.max(num_std / 2)
}

#[derive(Debug, Clone)]
pub struct InterpolationCheck {
    options: QcOptions,
    num_levels_to_check: usize,
    levels: StandardLevels,
    /// Failures per level, starting from -1 for a level never implicated.
    lev_errors: Vec<i32>,
    t_interp: Vec<f32>,
}

impl InterpolationCheck {
    pub fn new(ctx: &CheckContext<'_>) -> Self {
        Self {
            options: ctx.options.clone(),
            num_levels_to_check: ctx.indices.num_levels_to_check(),
            levels: StandardLevels::new(ctx.options.standard_levels.clone()),
            lev_errors: Vec::new(),
            t_interp: Vec::new(),
        }
    }

    pub fn boxed<'a>(ctx: &CheckContext<'a>) -> Box<dyn ProfileCheck + 'a> {
        Box::new(Self::new(ctx))
    }

    pub fn standard_levels(&self) -> &StandardLevels {
        &self.levels
    }

    /// Interpolated temperature per level; missing where no interpolation was made.
    pub fn interpolated(&self) -> &[f32] {
        &self.t_interp
    }
}

impl ProfileCheck for InterpolationCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run_check(&mut self, data: &mut ProfileDataHandler) -> Result<CheckOutcome> {
        debug!("interpolation check");

        let pressures = data.get::<f32>(AIR_PRESSURE)?.to_vec();
        let t_obs = data.get::<f32>(OBS_AIR_TEMPERATURE)?.to_vec();
        let t_bkg = data.get::<f32>(HOFX_AIR_TEMPERATURE)?.to_vec();
        let t_flags = data.get::<i32>(QC_T_FLAGS)?.to_vec();
        let t_obs_correction = data.get::<f32>(T_OBS_CORRECTION)?.to_vec();
        let counter_lengths = [
            data.get::<i32>(COUNTER_NUM_ANY_ERRORS)?.len(),
            data.get::<i32>(COUNTER_NUM_INTERP_ERRORS)?.len(),
            data.get::<i32>(COUNTER_NUM_INTERP_ERR_OBS)?.len(),
        ];

        let lengths = [
            pressures.len(),
            t_obs.len(),
            t_bkg.len(),
            t_flags.len(),
            t_obs_correction.len(),
        ];
        if any_empty(&lengths) || any_empty(&counter_lengths) {
            warn!("at least one vector is empty; check will not be performed");
            return Ok(CheckOutcome::Skipped);
        }
        if !all_same_len(&lengths) {
            warn!(?lengths, "not all vectors have the same size; check will not be performed");
            return Ok(CheckOutcome::Skipped);
        }

        let num_levels = self.num_levels_to_check.min(pressures.len());
        let t_obs_final = correct_values(&t_obs, &t_obs_correction);

        self.levels
            .calc_std_levels(num_levels, &pressures, &t_obs_final, &t_flags);
        self.lev_errors = vec![-1; num_levels];
        self.t_interp = vec![MISSING_FLOAT; num_levels];

        let num_std = self.levels.num_std();
        let num_sig = self.levels.num_sig();
        let log_p = self.levels.log_p();
        let mut failed_levels = Vec::new();
        let mut num_errors = 0;

        for entry in self.levels.matches() {
            let jlev = entry.level;
            if num_sig < min_significant_levels(num_std) {
                continue;
            }
            let (Some(sig_b), Some(sig_a)) = (entry.sig_below, entry.sig_above) else {
                continue;
            };

            let p_std = pressures[jlev];
            let big_gap = self
                .levels
                .big_gap(round_to_hpa(p_std), self.options.big_gap_init);
            if (pressures[sig_b] - p_std).abs() > big_gap
                || (p_std - pressures[sig_a]).abs() > big_gap
                || log_p[sig_b] == log_p[sig_a]
            {
                continue;
            }

            let ratio = (log_p[jlev] - log_p[sig_b]) / (log_p[sig_a] - log_p[sig_b]);
            let interp = t_obs_final[sig_b] + (t_obs_final[sig_a] - t_obs_final[sig_b]) * ratio;
            self.t_interp[jlev] = interp;

            let tolerance = self.options.interpolation_tolerance(p_std);
            if (t_obs_final[jlev] - interp).abs() > tolerance {
                num_errors += 1;
                for level in [jlev, sig_b, sig_a] {
                    self.lev_errors[level] += 1;
                    failed_levels.push(level);
                }

                debug!(
                    central = jlev,
                    lower = sig_b,
                    upper = sig_a,
                    "failed interpolation check"
                );
                debug!(
                    level = jlev,
                    p_hpa = pressures[jlev] * 0.01,
                    t_obs_c = t_obs_final[jlev] - T0C,
                    t_bkg_c = t_bkg[jlev] - T0C,
                    t_interp_c = interp - T0C,
                    t_interp_minus_t_obs = interp - t_obs_final[jlev],
                    "standard level"
                );
                for level in [sig_b, sig_a] {
                    debug!(
                        level,
                        p_hpa = pressures[level] * 0.01,
                        t_obs_c = t_obs_final[level] - T0C,
                        t_bkg_c = t_bkg[level] - T0C,
                        "bracketing level"
                    );
                }
            }
        }

        if num_errors > 0 {
            let t_flags = data.get_mut::<i32>(QC_T_FLAGS)?;
            for level in failed_levels {
                t_flags[level] |= INTERPOLATION;
            }
            data.get_mut::<i32>(COUNTER_NUM_ANY_ERRORS)?[0] += num_errors;
            data.get_mut::<i32>(COUNTER_NUM_INTERP_ERRORS)?[0] += num_errors;
            data.get_mut::<i32>(COUNTER_NUM_INTERP_ERR_OBS)?[0] += 1;
        }

        Ok(CheckOutcome::Completed)
    }

    fn fill_validator(&self, data: &mut ProfileDataHandler) {
        let num_levels = self.levels.num_levels();
        let as_count = |count: usize| i32::try_from(count).unwrap_or(i32::MAX);
        data.set(STD_LEV, self.levels.std_lev_array());
        data.set(SIG_ABOVE, self.levels.sig_above_array());
        data.set(SIG_BELOW, self.levels.sig_below_array());
        data.set(IND_STD, self.levels.ind_std_array());
        data.set(LEV_ERRORS, self.lev_errors.clone());
        data.set(T_INTERP, self.t_interp.clone());
        data.set(LOG_P, self.levels.log_p().to_vec());
        data.set(NUM_STD, vec![as_count(self.levels.num_std()); num_levels]);
        data.set(NUM_SIG, vec![as_count(self.levels.num_sig()); num_levels]);
    }

    fn validator_variables(&self) -> &'static [&'static str] {
        VALIDATOR_VARIABLES
    }
}
