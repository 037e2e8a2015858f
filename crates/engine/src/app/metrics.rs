use std::time::{Duration, Instant};

use crate::world::StepOutcome;

/// One `loop_metrics` interval: loop pacing plus what the player did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub tps: f32,
    pub frame_time_ms: f32,
    pub moving_ticks: u32,
    pub blocked_ticks: u32,
    pub map_transitions: u32,
}

#[derive(Debug, Clone, Copy, Default)]
struct IntervalCounts {
    frames: u32,
    ticks: u32,
    moving_ticks: u32,
    blocked_ticks: u32,
    map_transitions: u32,
    frame_time_sum: Duration,
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    counts: IntervalCounts,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    fn starting_at(interval_start: Instant, interval: Duration) -> Self {
        Self {
            interval_start,
            interval,
            counts: IntervalCounts::default(),
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration) {
        let counts = &mut self.counts;
        counts.frames = counts.frames.saturating_add(1);
        counts.frame_time_sum = counts.frame_time_sum.saturating_add(frame_dt);
    }

    /// Counts one simulation tick. `step` is `None` for scenes without movement.
    pub(crate) fn record_tick(&mut self, step: Option<&StepOutcome>) {
        let counts = &mut self.counts;
        counts.ticks = counts.ticks.saturating_add(1);
        let Some(step) = step else {
            return;
        };
        if step.moved {
            counts.moving_ticks = counts.moving_ticks.saturating_add(1);
        }
        if step.blocked_horizontal || step.blocked_vertical {
            counts.blocked_ticks = counts.blocked_ticks.saturating_add(1);
        }
        let transitions = u32::try_from(step.transitions.len()).unwrap_or(u32::MAX);
        counts.map_transitions = counts.map_transitions.saturating_add(transitions);
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let counts = std::mem::take(&mut self.counts);
        self.interval_start = now;

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = match counts.frames {
            0 => 0.0,
            frames => counts.frame_time_sum.as_secs_f32() * 1000.0 / frames as f32,
        };
        Some(LoopMetricsSnapshot {
            fps: counts.frames as f32 / elapsed_seconds,
            tps: counts.ticks as f32 / elapsed_seconds,
            frame_time_ms,
            moving_ticks: counts.moving_ticks,
            blocked_ticks: counts.blocked_ticks,
            map_transitions: counts.map_transitions,
        })
    }
}
