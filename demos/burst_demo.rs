//! Example: decoding a bursty stream with both decoders.
//!
//! Run with:
//! `cargo run --example burst_demo`

use burst_dp::{
    decoders::{TrellisDecoder, ViterbiDecoder},
    BurstEngineBuilder, EventSeries,
};

fn main() -> Result<(), burst_dp::BurstError> {
    // Ten slow events (one per 10s), a burst of 30 events 0.1s apart,
    // then slow again.
    let mut times: Vec<f64> = (0..=10).map(|i| 10.0 * i as f64).collect();
    times.extend((1..=30).map(|i| 100.0 + 0.1 * i as f64));
    times.extend((1..=10).map(|i| 103.0 + 10.0 * i as f64));
    let series = EventSeries::new(times)?;

    let viterbi = BurstEngineBuilder::new(ViterbiDecoder)
        .with_rate(2.0)
        .with_penalty(1.0)
        .build()?
        .run(&series)?;
    let trellis = BurstEngineBuilder::new(TrellisDecoder::new())
        .with_rate(2.0)
        .with_penalty(1.0)
        .build()?
        .run(&series)?;

    println!(
        "{} states, rates {:?}",
        viterbi.space.num_states(),
        viterbi.space.lambdas()
    );
    println!("viterbi cost = {:.4}", viterbi.decoding.cost);
    println!(
        "trellis cost = {:.4} ({} relaxation rounds)",
        trellis.decoding.cost,
        trellis.decoding.table.rounds()
    );
    println!("Segments:");
    print!("{}", viterbi.segments);
    Ok(())
}
