// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

// Telemetry helpers for JSONL logging when the `telemetry` feature is enabled.
// Manually formats JSON to avoid a non-deterministic serde_json dependency:
// float and map-key formatting differ across platforms and we need byte-for-
// byte identical tick output for replay verification.

use crate::action::Action;
use crate::cluster::{VoidedAction, WaveMetrics};

#[cfg(feature = "telemetry")]
fn ts_micros() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros()
}

#[cfg(feature = "telemetry")]
fn reason_str(reason: crate::error::VoidReason) -> &'static str {
    use crate::error::VoidReason;
    match reason {
        VoidReason::ValidationRejected => "validation_rejected",
        VoidReason::Stalemate => "stalemate",
        VoidReason::DependencyFailed => "dependency_failed",
        VoidReason::UnknownAction => "unknown_action",
        VoidReason::MissingActor => "missing_actor",
    }
}

/// Emits a wave-resolved telemetry event with its aggregate metrics.
///
/// Logs the wave index and [`WaveMetrics`] fields as a JSON line to stdout
/// when the `telemetry` feature is enabled. No-op otherwise.
#[cfg(feature = "telemetry")]
pub fn wave_resolved(wave: u32, metrics: &WaveMetrics) {
    use std::io::Write as _;
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        r#"{{"timestamp_micros":{},"event":"wave_resolved","wave":{},"cluster_count":{},"permutations_tested":{},"stalemate_count":{},"success_count":{}}}"#,
        ts_micros(),
        wave,
        metrics.cluster_count,
        metrics.permutations_tested,
        metrics.stalemate_count,
        metrics.success_count,
    );
    let _ = out.write_all(b"\n");
}

#[cfg(not(feature = "telemetry"))]
pub fn wave_resolved(_wave: u32, _metrics: &WaveMetrics) {}

/// Emits an action-voided telemetry event.
///
/// Logs the wave, voided action's actor and kind, and the void reason as a
/// JSON line to stdout when the `telemetry` feature is enabled. No-op
/// otherwise.
#[cfg(feature = "telemetry")]
pub fn action_voided(wave: u32, voided: &VoidedAction) {
    use std::io::Write as _;
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        r#"{{"timestamp_micros":{},"event":"action_voided","wave":{},"actor":"{}","kind":"{:?}","reason":"{}"}}"#,
        ts_micros(),
        wave,
        voided.action.actor(),
        voided.action.kind(),
        reason_str(voided.reason),
    );
    let _ = out.write_all(b"\n");
}

#[cfg(not(feature = "telemetry"))]
pub fn action_voided(_wave: u32, _voided: &VoidedAction) {}

/// Emits a cluster-stalemate telemetry event.
///
/// Logs the wave and the actors of every action in the stalemated cluster as
/// a JSON line to stdout when the `telemetry` feature is enabled. No-op
/// otherwise.
#[cfg(feature = "telemetry")]
pub fn stalemate(wave: u32, cluster: &[Action]) {
    use std::io::Write as _;
    let actors: Vec<String> = cluster
        .iter()
        .map(|a| format!(r#""{}""#, a.actor()))
        .collect();
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        r#"{{"timestamp_micros":{},"event":"stalemate","wave":{},"actors":[{}]}}"#,
        ts_micros(),
        wave,
        actors.join(","),
    );
    let _ = out.write_all(b"\n");
}

#[cfg(not(feature = "telemetry"))]
pub fn stalemate(_wave: u32, _cluster: &[Action]) {}
