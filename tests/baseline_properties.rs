// tests/baseline_properties.rs
//! Property tests for the approximate mode estimator.

use daq_core::BaselineEstimator;
use proptest::prelude::*;

proptest! {
    /// The estimator never fails for a non-empty waveform and always
    /// returns a value present in the input.
    #[test]
    fn estimate_is_total_and_returns_an_input_value(
        samples in prop::collection::vec(any::<i16>(), 1..2000)
    ) {
        let estimator = BaselineEstimator::new();
        let mode = estimator.estimate(&samples).unwrap();
        prop_assert!(samples.contains(&mode));
    }

    /// A constant waveform yields that constant exactly.
    #[test]
    fn constant_waveform_is_its_own_baseline(
        value in any::<i16>(),
        len in 1usize..5000
    ) {
        let estimator = BaselineEstimator::new();
        prop_assert_eq!(estimator.estimate(&vec![value; len]).unwrap(), value);
    }

    /// A value outnumbering the rest two to one is always found, whatever
    /// the minority samples look like.
    #[test]
    fn dominant_value_wins(
        majority in any::<i16>(),
        minority in prop::collection::vec(any::<i16>(), 0..400),
    ) {
        let mut samples: Vec<i16> = Vec::new();
        for &v in minority.iter().filter(|&&v| v != majority) {
            samples.push(majority);
            samples.push(majority);
            samples.push(v);
        }
        samples.push(majority);

        let estimator = BaselineEstimator::new();
        prop_assert_eq!(estimator.estimate(&samples).unwrap(), majority);
    }
}
