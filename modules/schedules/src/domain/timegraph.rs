//! Geometry of the 24-hour pie chart.
//!
//! The day maps onto a full circle clockwise from midnight at the top:
//! one minute is 0.25 degrees, and the chart edits in 5-minute steps.

use chrono::{NaiveTime, Timelike};

use crate::contract::model::{GraphSegment, HourTick, Schedule, SegmentKind};

pub const MINUTES_PER_DAY: u32 = 1440;
pub const DEGREES_PER_MINUTE: f64 = 360.0 / MINUTES_PER_DAY as f64;
pub const SNAP_MINUTES: u32 = 5;
pub const SNAP_ANGLE: f64 = SNAP_MINUTES as f64 * DEGREES_PER_MINUTE;

pub const IDLE_COLOR: &str = "#1c1c1c";
pub const TRAILING_IDLE_COLOR: &str = "#444444";

/// Chart radius 300 plus the label offset.
pub const DEFAULT_TICK_RADIUS: f64 = 325.0;

/// Angle of the last snap step (23:55); a schedule reaching it closes the circle.
const LAST_STEP_ANGLE: f64 = 360.0 - SNAP_ANGLE;

/// Seconds are ignored.
pub fn time_to_angle(t: NaiveTime) -> f64 {
    f64::from(t.hour() * 60 + t.minute()) * DEGREES_PER_MINUTE
}

/// Snap to the nearest 5-minute step and wrap into one day.
pub fn angle_to_time(angle: f64) -> NaiveTime {
    let mut snapped = ((angle / SNAP_ANGLE).round() * SNAP_ANGLE) % 360.0;
    if snapped < 0.0 {
        snapped += 360.0;
    }
    let mut minutes = (snapped / DEGREES_PER_MINUTE).round() as u32;
    if minutes >= MINUTES_PER_DAY {
        minutes = 0;
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or_default()
}

struct SegmentBuilder {
    segments: Vec<GraphSegment>,
    cursor: f64,
}

impl SegmentBuilder {
    fn push(&mut self, kind: SegmentKind, color: &str, value: f64, source: Option<&Schedule>) {
        let start_angle = self.cursor;
        self.cursor += value;
        self.segments.push(GraphSegment {
            kind,
            color: color.to_string(),
            value,
            start_angle,
            end_angle: self.cursor,
            schedule_id: source.map(|s| s.id),
            title: source.map(|s| s.title.clone()),
        });
    }
}

/// Pie segments for one day: idle gaps between schedules plus a trailing
/// idle slice up to midnight. An empty day has no segments.
pub fn build_segments(schedules: &[Schedule], default_color: &str) -> Vec<GraphSegment> {
    if schedules.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Schedule> = schedules.iter().collect();
    sorted.sort_by_key(|s| s.start_time);

    let mut out = SegmentBuilder {
        segments: Vec::with_capacity(sorted.len() * 2 + 1),
        cursor: 0.0,
    };
    let mut current = 0.0;

    for s in sorted {
        let start = time_to_angle(s.start_time);
        let end = time_to_angle(s.end_time);

        if start > current {
            out.push(SegmentKind::Idle, IDLE_COLOR, start - current, None);
        }

        let mut value = end - start;
        if s.end_time.hour() == 23 && s.end_time.minute() == 55 {
            value += SNAP_ANGLE;
        }
        let color = s.color.as_deref().unwrap_or(default_color);
        out.push(SegmentKind::Schedule, color, value, Some(s));

        current = end;
    }

    if current >= LAST_STEP_ANGLE {
        current = 360.0;
    }
    if current < 360.0 {
        out.push(SegmentKind::Idle, TRAILING_IDLE_COLOR, 360.0 - current, None);
    }

    out.segments
}

/// Hour labels around the dial, `y` pointing down as on screen.
pub fn hour_ticks(radius: f64) -> Vec<HourTick> {
    (0..24u32)
        .map(|hour| {
            let theta = time_to_angle(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default())
                .to_radians();
            HourTick {
                hour,
                label: format!("{hour}:00"),
                x: theta.sin() * radius,
                y: -theta.cos() * radius,
            }
        })
        .collect()
}

pub fn hour_options() -> Vec<String> {
    (0..24).map(|h| format!("{h:02}")).collect()
}

pub fn minute_options() -> Vec<String> {
    (0..60)
        .step_by(SNAP_MINUTES as usize)
        .map(|m| format!("{m:02}"))
        .collect()
}
