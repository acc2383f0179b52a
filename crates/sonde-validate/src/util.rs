use sonde_model::MISSING_FLOAT;

/// True when any of the given sequence lengths is zero.
pub fn any_empty(lengths: &[usize]) -> bool {
    lengths.iter().any(|&len| len == 0)
}

/// True when every given sequence length is equal.
pub fn all_same_len(lengths: &[usize]) -> bool {
    lengths.windows(2).all(|pair| pair[0] == pair[1])
}

/// Add a correction to each observed value; missing stays missing.
pub fn correct_values(observed: &[f32], correction: &[f32]) -> Vec<f32> {
    observed
        .iter()
        .zip(correction)
        .map(|(&value, &delta)| {
            if value == MISSING_FLOAT || delta == MISSING_FLOAT {
                MISSING_FLOAT
            } else {
                value + delta
            }
        })
        .collect()
}

/// Pressure (Pa) rounded to the nearest whole hPa.
pub fn round_to_hpa(pressure_pa: f32) -> i32 {
    (pressure_pa * 0.01).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_empty_sequences() {
        assert!(any_empty(&[3, 0, 3]));
        assert!(!any_empty(&[3, 3]));
    }

    #[test]
    fn compares_lengths() {
        assert!(all_same_len(&[4, 4, 4]));
        assert!(!all_same_len(&[4, 5, 4]));
        assert!(all_same_len(&[]));
    }

    #[test]
    fn correction_keeps_missing_values() {
        let corrected = correct_values(&[280.0, MISSING_FLOAT], &[0.5, 0.5]);
        assert_eq!(corrected, vec![280.5, MISSING_FLOAT]);
    }

    #[test]
    fn rounds_to_nearest_hpa() {
        assert_eq!(round_to_hpa(70049.0), 700);
        assert_eq!(round_to_hpa(70060.0), 701);
        assert_eq!(round_to_hpa(69951.0), 700);
    }
}
