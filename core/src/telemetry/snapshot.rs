//! telemetry/snapshot.rs
//! Immutable per-operation report handed back to the caller.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};
use crate::utils::compression_factor;

/// Which direction the snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Compress,
    Decompress,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Compress => f.write_str("compress"),
            Operation::Decompress => f.write_str("decompress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub operation: Operation,
    pub bytes_input: u64,
    pub bytes_output: u64,
    pub bytes_header: u64,
    pub bytes_body: u64,
    pub symbols_distinct: u64,
    pub symbols_coded: u64,
    /// `bytes_output / bytes_input`, 0 for empty input.
    pub compression_ratio: f64,
    pub throughput_input_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(operation: Operation, counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let compression_ratio = if counters.bytes_input > 0 {
            counters.bytes_output as f64 / counters.bytes_input as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_input as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            operation,
            bytes_input: counters.bytes_input,
            bytes_output: counters.bytes_output,
            bytes_header: counters.bytes_header,
            bytes_body: counters.bytes_body,
            symbols_distinct: counters.symbols_distinct,
            symbols_coded: counters.symbols_coded,
            compression_ratio,
            throughput_input_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    /// Output as a percentage of input, as the command line reports it.
    pub fn compression_factor(&self) -> f64 {
        compression_factor(self.bytes_input, self.bytes_output)
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Every phase of this operation was timed and none outlasted the whole.
    pub fn sanity_check(&self) -> bool {
        let expected: &[Stage] = match self.operation {
            Operation::Compress => &Stage::COMPRESS,
            Operation::Decompress => &Stage::DECOMPRESS,
        };
        self.stage_times.has_all(expected) && self.total_stage_time() <= self.elapsed
    }

    /// Multi-line human summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let mut stages: Vec<_> = self.stage_times.iter().collect();
        stages.sort_by_key(|(s, _)| s.to_string());
        for (stage, dur) in stages {
            out.push_str(&format!("{} phase done in {:?}\n", stage, dur));
        }
        out.push_str(&format!("input size: {}\n", self.bytes_input));
        out.push_str(&format!("output size: {}\n", self.bytes_output));
        out.push_str(&format!("compression factor: {:.2}%\n", self.compression_factor()));
        out.push_str(&format!("done in {:?}", self.elapsed));
        out
    }
}
