use burst_dp::decoders::{TrellisDecoder, ViterbiDecoder};
use burst_dp::{
    detect, Algorithm, BurstConfig, BurstEngine, BurstError, EventSeries, Segmentation,
    StateSpace,
};

#[test]
fn two_timestamps_form_one_segment() {
    let series = EventSeries::new(vec![0.0, 10.0]).unwrap();
    for algorithm in [Algorithm::Viterbi, Algorithm::Trellis] {
        let d = detect(
            &series,
            &BurstConfig {
                algorithm,
                ..BurstConfig::default()
            },
        )
        .unwrap();
        assert_eq!(d.decoding.states, vec![0, 0]);
        assert_eq!(d.segments.to_string(), "0 [0 10)\n");
    }
}

#[test]
fn tiny_dynamic_range_clamps_to_one_state() {
    // T = 1 and the only interval is 101: the raw state count is below 1.
    let series = EventSeries::new(vec![-100.0, 1.0]).unwrap();
    let space = StateSpace::derive(&series, 2.0).unwrap();
    assert_eq!(space.num_states(), 1);

    let v = BurstEngine::new(ViterbiDecoder).run(&series).unwrap();
    let t = BurstEngine::new(TrellisDecoder::new()).run(&series).unwrap();
    assert_eq!(v.decoding.states, vec![0, 0]);
    assert_eq!(t.decoding.states, vec![0, 0]);
    assert_eq!(v.decoding.cost, t.decoding.cost);
}

#[test]
fn rejects_short_input() {
    assert!(matches!(
        EventSeries::new(vec![]),
        Err(BurstError::TooFewTimestamps { len: 0 })
    ));
    assert!(matches!(
        EventSeries::new(vec![3.0]),
        Err(BurstError::TooFewTimestamps { len: 1 })
    ));
}

#[test]
fn rejects_non_increasing_input() {
    assert!(matches!(
        EventSeries::new(vec![0.0, 2.0, 2.0]),
        Err(BurstError::NonIncreasing { index: 2, .. })
    ));
    assert!(matches!(
        EventSeries::new(vec![0.0, 5.0, 1.0]),
        Err(BurstError::NonIncreasing { index: 2, .. })
    ));
}

#[test]
fn rejects_non_finite_and_non_positive_duration() {
    assert!(matches!(
        EventSeries::new(vec![0.0, f64::NAN, 2.0]),
        Err(BurstError::NonFiniteTimestamp { index: 1, .. })
    ));
    assert!(matches!(
        EventSeries::new(vec![0.0, f64::INFINITY]),
        Err(BurstError::NonFiniteTimestamp { index: 1, .. })
    ));
    assert!(matches!(
        EventSeries::new(vec![-5.0, -1.0]),
        Err(BurstError::NonPositiveDuration { .. })
    ));
}

#[test]
fn rejects_bad_parameters() {
    let series: EventSeries = "0 1 2".parse().unwrap();
    for rate in [1.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
        let cfg = BurstConfig {
            rate,
            ..BurstConfig::default()
        };
        assert!(matches!(
            detect(&series, &cfg),
            Err(BurstError::InvalidRate { .. })
        ));
    }
    for penalty in [-0.1, f64::NAN] {
        let cfg = BurstConfig {
            penalty,
            ..BurstConfig::default()
        };
        assert!(matches!(
            detect(&series, &cfg),
            Err(BurstError::InvalidPenalty { .. })
        ));
    }
}

#[test]
fn rejects_state_spaces_that_cannot_be_built() {
    let series: EventSeries = "0 1 10".parse().unwrap();
    let cfg = BurstConfig {
        rate: 1.0 + 1e-12,
        ..BurstConfig::default()
    };
    assert!(cfg.validate().is_ok());
    assert!(matches!(
        detect(&series, &cfg),
        Err(BurstError::StateSpaceTooLarge { .. })
    ));

    let series = EventSeries::new(vec![0.0, 1e-300, 1e300]).unwrap();
    let cfg = BurstConfig {
        rate: 1e10,
        algorithm: Algorithm::Trellis,
        ..BurstConfig::default()
    };
    assert!(matches!(
        detect(&series, &cfg),
        Err(BurstError::NonFiniteRate { .. })
    ));
}

#[test]
fn rejects_unknown_algorithm_name() {
    let err = "dijkstra".parse::<Algorithm>().unwrap_err();
    assert!(matches!(err, BurstError::UnknownAlgorithm { ref name } if name == "dijkstra"));
    assert_eq!("Bellman-Ford".parse::<Algorithm>().unwrap(), Algorithm::Trellis);
}

#[test]
fn rejects_unparsable_tokens() {
    let err = "0 1 two 3".parse::<EventSeries>().unwrap_err();
    assert!(matches!(err, BurstError::Parse { position: 2, .. }));
}

#[test]
fn summarizer_rejects_mismatched_lengths() {
    assert!(matches!(
        Segmentation::summarize(&[0.0, 1.0], &[]),
        Err(BurstError::EmptyStates)
    ));
    assert!(matches!(
        Segmentation::summarize(&[0.0, 1.0, 2.0], &[0, 1]),
        Err(BurstError::LengthMismatch {
            timestamps: 3,
            states: 2
        })
    ));
}
