//! Plain-text report for a finished detection.
//!
//! Segments are always written. In debug mode the derived rates, the
//! decoder's full working table and the total cost come first, rounded to
//! `precision` decimals.

use crate::engine::{DecoderTable, Detection};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug)]
pub struct ReportOptions {
    pub debug: bool,
    pub precision: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            debug: false,
            precision: 2,
        }
    }
}

fn table_title(table: &DecoderTable) -> &'static str {
    match table {
        DecoderTable::Viterbi(_) => "Final cost matrix:",
        DecoderTable::Trellis(_) => "Final distances:",
    }
}

/// Write the report for `detection` to `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    detection: &Detection<DecoderTable>,
    options: &ReportOptions,
) -> io::Result<()> {
    let p = options.precision;
    if options.debug {
        let rates = detection
            .space
            .lambdas()
            .iter()
            .map(|l| format!("{l:.p$}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "States: {} [{rates}]", detection.space.num_states())?;
        writeln!(out, "{}", table_title(&detection.decoding.table))?;
        write!(out, "{:.p$}", detection.decoding.table)?;
        writeln!(out, "Total cost: {:.p$}", detection.decoding.cost)?;
    }
    write!(out, "{}", detection.segments)
}

/// Render the report into a `String`.
pub fn render(detection: &Detection<DecoderTable>, options: &ReportOptions) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(&mut buf, detection, options);
    String::from_utf8_lossy(&buf).into_owned()
}
