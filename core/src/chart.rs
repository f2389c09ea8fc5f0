//! Chart geometry: scales, auto-ranging, series point generation, and bar
//! layout. Produces renderer-agnostic coordinates; rasterization (SVG,
//! canvas, terminal) is the caller's job.
//!
//! The x domain for line charts is the index position 0..N-1 of the
//! windowed, ascending-sorted log sequence, not calendar distance, so
//! missing days compress rather than leaving blank space.

use serde::Serialize;

use crate::models::DayLog;
use crate::query;

/// Pixel box a chart is laid out in.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        ChartFrame {
            width: 720.0,
            height: 320.0,
            padding: 48.0,
        }
    }
}

/// Map a domain value onto a range. A degenerate domain (min == max) is
/// treated as span 1 so the mapping never divides by zero.
pub fn scale_linear(d0: f64, d1: f64, r0: f64, r1: f64) -> impl Fn(f64) -> f64 {
    let span = if d1 - d0 == 0.0 { 1.0 } else { d1 - d0 };
    move |x| r0 + ((x - d0) / span) * (r1 - r0)
}

/// Axis range for a set of values. Non-finite values are excluded (absent
/// measurements never count as zero). All-equal values expand by ±1 so the
/// axis always has height; both ends then get an 8% pad of the span.
#[must_use]
pub fn nice_min_max(values: &[f64]) -> (f64, f64) {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return (0.0, 1.0);
    }
    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 1.0;
        max += 1.0;
    }
    let pad = (max - min) * 0.08;
    (min - pad, max + pad)
}

/// Stable hue for a series label: rolling 31-multiplier hash of the
/// character codes, mod 360. The same label always gets the same color,
/// across sessions and chart types, with no stored color table.
#[must_use]
pub fn hash_hue(label: &str) -> u16 {
    let mut h: u32 = 0;
    for c in label.chars() {
        h = h.wrapping_mul(31).wrapping_add(c as u32);
    }
    (h % 360) as u16
}

/// A named numeric-field extractor defining one line series.
#[derive(Clone, Copy)]
pub struct SeriesSpec {
    pub label: &'static str,
    pub extract: fn(&DayLog) -> Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub hue: u16,
}

/// Pixel-space geometry for one series. `markers` holds every finite point;
/// `polyline` is empty when fewer than 2 finite points exist (nothing to
/// connect). Gaps are dropped, not interpolated, so a single missing value
/// does not break the surrounding segments.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesGeometry {
    pub label: String,
    pub hue: u16,
    pub markers: Vec<(f64, f64)>,
    pub polyline: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineChart {
    pub frame: ChartFrame,
    pub y_label: String,
    pub y_min: f64,
    pub y_max: f64,
    pub grid_ys: Vec<f64>,
    pub x_start_label: Option<String>,
    pub x_end_label: Option<String>,
    pub series: Vec<SeriesGeometry>,
    pub legend: Vec<LegendEntry>,
}

const GRID_LINES: usize = 5;

/// Build multi-series line geometry over an ascending, windowed log
/// sequence. The y range spans all series together so they share an axis.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_line_chart(
    frame: ChartFrame,
    logs_asc: &[DayLog],
    specs: &[SeriesSpec],
    y_label: &str,
) -> LineChart {
    let pad = frame.padding;

    let all_values: Vec<f64> = specs
        .iter()
        .flat_map(|s| logs_asc.iter().filter_map(s.extract))
        .collect();
    let (y_min, y_max) = nice_min_max(&all_values);

    let x_max = (logs_asc.len().saturating_sub(1)).max(1) as f64;
    let x_scale = scale_linear(0.0, x_max, pad, frame.width - pad);
    // y axis is inverted: larger values sit higher on screen
    let y_scale = scale_linear(y_min, y_max, frame.height - pad, pad);

    let grid_ys = (0..=GRID_LINES)
        .map(|i| pad + (frame.height - 2.0 * pad) * (i as f64 / GRID_LINES as f64))
        .collect();

    let mut series = Vec::with_capacity(specs.len());
    let mut legend = Vec::with_capacity(specs.len());
    for spec in specs {
        let markers: Vec<(f64, f64)> = logs_asc
            .iter()
            .enumerate()
            .filter_map(|(i, log)| {
                (spec.extract)(log)
                    .filter(|v| v.is_finite())
                    .map(|v| (x_scale(i as f64), y_scale(v)))
            })
            .collect();
        let polyline = if markers.len() < 2 {
            Vec::new()
        } else {
            markers.clone()
        };
        let hue = hash_hue(spec.label);
        series.push(SeriesGeometry {
            label: spec.label.to_string(),
            hue,
            markers,
            polyline,
        });
        legend.push(LegendEntry {
            label: spec.label.to_string(),
            hue,
        });
    }

    LineChart {
        frame,
        y_label: y_label.to_string(),
        y_min,
        y_max,
        grid_ys,
        x_start_label: logs_asc.first().map(|l| l.date.clone()),
        x_end_label: logs_asc.last().map(|l| l.date.clone()),
        series,
        legend,
    }
}

/// A named counting function defining one aggregate bar.
#[derive(Clone, Copy)]
pub struct BarSpec {
    pub label: &'static str,
    pub count: fn(&DayLog) -> usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub label: String,
    pub hue: u16,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub frame: ChartFrame,
    pub max_count: usize,
    pub bars: Vec<Bar>,
    pub legend: Vec<LegendEntry>,
}

const BAR_GAP: f64 = 16.0;
const BAR_MIN_WIDTH: f64 = 22.0;

/// Sum each group's counting function over the windowed logs and lay the
/// bars out left to right. Heights scale against the largest total, with a
/// minimum denominator of 1 so an all-zero window yields flat bars rather
/// than a division error.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_bar_chart(frame: ChartFrame, logs: &[DayLog], groups: &[BarSpec]) -> BarChart {
    let pad = frame.padding;

    let totals: Vec<(String, usize)> = groups
        .iter()
        .map(|g| {
            let total = logs.iter().map(|l| (g.count)(l)).sum();
            (g.label.to_string(), total)
        })
        .collect();

    let max_count = totals.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);

    let bar_area = frame.width - 2.0 * pad;
    let n = totals.len() as f64;
    let bar_width = BAR_MIN_WIDTH.max((bar_area - BAR_GAP * (n - 1.0)) / n.max(1.0));

    let y_scale = scale_linear(0.0, max_count as f64, 0.0, frame.height - 2.0 * pad);
    let base_y = frame.height - pad;

    let mut bars = Vec::with_capacity(totals.len());
    let mut legend = Vec::with_capacity(totals.len());
    for (i, (label, count)) in totals.into_iter().enumerate() {
        let hue = hash_hue(&label);
        let height = y_scale(count as f64);
        bars.push(Bar {
            label: label.clone(),
            hue,
            count,
            x: pad + i as f64 * (bar_width + BAR_GAP),
            y: base_y - height,
            width: bar_width,
            height,
        });
        legend.push(LegendEntry { label, hue });
    }

    BarChart {
        frame,
        max_count,
        bars,
        legend,
    }
}

// --- Chart presets (the five line charts + adherence bars) ---

pub struct LineChartDef {
    pub key: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    pub series: &'static [SeriesSpec],
}

pub const LINE_CHARTS: &[LineChartDef] = &[
    LineChartDef {
        key: "sugar",
        title: "Blood sugar",
        y_label: "mmol/L",
        series: &[
            SeriesSpec {
                label: "Fasting",
                extract: |l| l.fasting_blood_sugar,
            },
            SeriesSpec {
                label: "Pre-dinner",
                extract: |l| l.pre_dinner_sugar,
            },
            SeriesSpec {
                label: "Post-dinner",
                extract: |l| l.post_dinner_sugar,
            },
        ],
    },
    LineChartDef {
        key: "weight-fat",
        title: "Weight & body fat",
        y_label: "kg / %",
        series: &[
            SeriesSpec {
                label: "Weight (kg)",
                extract: |l| l.weight,
            },
            SeriesSpec {
                label: "Fat (%)",
                extract: |l| l.fat_percentage,
            },
        ],
    },
    LineChartDef {
        key: "waist",
        title: "Waist",
        y_label: "cm",
        series: &[SeriesSpec {
            label: "Waist (cm)",
            extract: |l| l.waist_size,
        }],
    },
    LineChartDef {
        key: "blood-pressure",
        title: "Blood pressure",
        y_label: "mmHg",
        series: &[
            SeriesSpec {
                label: "Systolic",
                extract: |l| l.blood_pressure_systolic,
            },
            SeriesSpec {
                label: "Diastolic",
                extract: |l| l.blood_pressure_diastolic,
            },
        ],
    },
    LineChartDef {
        key: "grip",
        title: "Grip strength",
        y_label: "kg",
        series: &[
            SeriesSpec {
                label: "Grip Left",
                extract: |l| l.grip_strength_left,
            },
            SeriesSpec {
                label: "Grip Right",
                extract: |l| l.grip_strength_right,
            },
        ],
    },
];

pub const ADHERENCE_BARS: &[BarSpec] = &[
    BarSpec {
        label: "Supplements checked",
        count: query::supplement_taken_count,
    },
    BarSpec {
        label: "Exercises checked",
        count: query::exercise_count,
    },
    BarSpec {
        label: "Fasted days",
        count: |l| usize::from(l.fasted),
    },
    BarSpec {
        label: "Water fasted days",
        count: |l| usize::from(l.water_fasted),
    },
];
