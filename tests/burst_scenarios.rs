use burst_dp::decoders::{TrellisDecoder, ViterbiDecoder};
use burst_dp::{detect, Algorithm, BurstConfig, BurstEngine, BurstEngineBuilder, EventSeries};

/// Ten 10s gaps, thirty 0.1s gaps, ten 10s gaps.
fn bursty() -> EventSeries {
    let mut times: Vec<f64> = (0..=10).map(|i| 10.0 * i as f64).collect();
    times.extend((1..=30).map(|i| 100.0 + 0.1 * i as f64));
    times.extend((1..=10).map(|i| 103.0 + 10.0 * i as f64));
    EventSeries::new(times).unwrap()
}

fn upward_levels(states: &[usize]) -> usize {
    states
        .windows(2)
        .map(|w| w[1].saturating_sub(w[0]))
        .sum()
}

#[test]
fn dense_region_gets_faster_state() {
    let series = bursty();
    let d = BurstEngine::new(ViterbiDecoder).run(&series).unwrap();
    assert_eq!(d.space.num_states(), 12);

    let states = &d.decoding.states;
    assert!(states[..=10].iter().all(|&s| s == 0));
    assert!(states[11..=40].iter().all(|&s| s == 5));
    assert!(states[41..].iter().all(|&s| s == 0));

    let seg_states: Vec<usize> = d.segments.iter().map(|s| s.state).collect();
    assert_eq!(seg_states, vec![0, 5, 0]);
    assert_eq!(d.segments.segments()[0].start, 0.0);
    assert_eq!(d.segments.segments()[1].start, 100.0);
    assert_eq!(d.segments.segments()[2].end, 203.0);
}

#[test]
fn both_algorithms_agree_on_bursty_stream() {
    let series = bursty();
    let v = detect(&series, &BurstConfig::default()).unwrap();
    let t = detect(
        &series,
        &BurstConfig {
            algorithm: Algorithm::Trellis,
            ..BurstConfig::default()
        },
    )
    .unwrap();
    assert_eq!(v.decoding.states, t.decoding.states);
    assert_eq!(v.decoding.cost, t.decoding.cost);
    assert_eq!(v.segments, t.segments);
}

#[test]
fn long_gap_drops_to_slower_state() {
    // Without a jump surcharge every interval picks its own best rate.
    let series: EventSeries = "0 1 2 3 10 11 12".parse().unwrap();
    let d = BurstEngineBuilder::new(TrellisDecoder::new())
        .with_penalty(0.0)
        .build()
        .unwrap()
        .run(&series)
        .unwrap();
    assert_eq!(d.decoding.states, vec![0, 1, 1, 1, 0, 1, 1]);
    assert_eq!(
        d.segments.to_string(),
        "0 [0 0)\n1 [0 3)\n0 [3 10)\n1 [10 12)\n"
    );

    // With the default penalty the surcharge ln(6) outweighs the gain.
    let d = BurstEngine::new(ViterbiDecoder).run(&series).unwrap();
    assert_eq!(d.decoding.states, vec![0; 7]);
    assert_eq!(d.decoding.switches(), 0);
}

#[test]
fn higher_penalty_never_adds_upward_levels() {
    let series = bursty();
    let mut previous = usize::MAX;
    let mut previous_switches = usize::MAX;
    for penalty in [0.0, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0] {
        let d = BurstEngineBuilder::new(ViterbiDecoder)
            .with_penalty(penalty)
            .build()
            .unwrap()
            .run(&series)
            .unwrap();
        let levels = upward_levels(&d.decoding.states);
        assert!(levels <= previous, "penalty {penalty}: {levels} > {previous}");
        previous = levels;
        let switches = d.decoding.switches();
        assert!(switches <= previous_switches);
        previous_switches = switches;
    }
}

#[test]
fn prohibitive_penalty_stays_in_slowest_state() {
    let d = BurstEngineBuilder::new(ViterbiDecoder)
        .with_penalty(1e6)
        .build()
        .unwrap()
        .run(&bursty())
        .unwrap();
    assert!(d.decoding.states.iter().all(|&s| s == 0));
    assert_eq!(d.segments.len(), 1);
}

#[test]
fn higher_rate_gives_fewer_states() {
    let series = bursty();
    let coarse = BurstEngineBuilder::new(ViterbiDecoder)
        .with_rate(4.0)
        .build()
        .unwrap()
        .run(&series)
        .unwrap();
    let fine = BurstEngine::new(ViterbiDecoder).run(&series).unwrap();
    assert!(coarse.space.num_states() < fine.space.num_states());
    assert!(coarse.decoding.states[11..=40].iter().all(|&s| s > 0));
}

#[test]
fn repeated_runs_are_deterministic() {
    let series = bursty();
    let engine = BurstEngine::new(TrellisDecoder::new());
    let a = engine.run(&series).unwrap();
    let b = engine.run(&series).unwrap();
    assert_eq!(a.decoding.states, b.decoding.states);
    assert_eq!(a.decoding.cost, b.decoding.cost);
    assert_eq!(a.space, b.space);
}
