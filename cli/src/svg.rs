//! Minimal SVG rendering for chart geometry. The geometry carries pixel
//! coordinates already; this module only turns them into markup.

use std::fmt::Write;

use vitalog_core::chart::{BarChart, LineChart};

fn color(hue: u16) -> String {
    format!("hsl({hue} 85% 65%)")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn line_chart_svg(chart: &LineChart, title: &str) -> String {
    let frame = chart.frame;
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.width,
        h = frame.height,
    );
    let _ = write!(
        out,
        r##"<rect width="{w}" height="{h}" fill="#141820"/>"##,
        w = frame.width,
        h = frame.height,
    );
    let _ = write!(
        out,
        r##"<text x="{x}" y="20" fill="#e8e8e8" font-size="14">{title}</text>"##,
        x = frame.padding,
        title = escape(title),
    );

    // grid lines with axis labels; the top grid line carries y_max
    let steps = chart.grid_ys.len().saturating_sub(1).max(1) as f64;
    for (i, y) in chart.grid_ys.iter().enumerate() {
        let _ = write!(
            out,
            r##"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="#2a3040" stroke-width="1"/>"##,
            x1 = frame.padding,
            x2 = frame.width - frame.padding,
        );
        let value = chart.y_max - (chart.y_max - chart.y_min) * (i as f64 / steps);
        let _ = write!(
            out,
            r##"<text x="{x}" y="{ty}" fill="#8a94a8" font-size="10" text-anchor="end">{value:.1}</text>"##,
            x = frame.padding - 6.0,
            ty = y + 3.0,
        );
    }

    if let Some(label) = &chart.x_start_label {
        let _ = write!(
            out,
            r##"<text x="{x}" y="{y}" fill="#8a94a8" font-size="10">{label}</text>"##,
            x = frame.padding,
            y = frame.height - frame.padding + 16.0,
        );
    }
    if let Some(label) = &chart.x_end_label {
        let _ = write!(
            out,
            r##"<text x="{x}" y="{y}" fill="#8a94a8" font-size="10" text-anchor="end">{label}</text>"##,
            x = frame.width - frame.padding,
            y = frame.height - frame.padding + 16.0,
        );
    }

    for series in &chart.series {
        let stroke = color(series.hue);
        if !series.polyline.is_empty() {
            let points: Vec<String> = series
                .polyline
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect();
            let _ = write!(
                out,
                r#"<polyline points="{points}" fill="none" stroke="{stroke}" stroke-width="2"/>"#,
                points = points.join(" "),
            );
        }
        for (x, y) in &series.markers {
            let _ = write!(
                out,
                r#"<circle cx="{x:.2}" cy="{y:.2}" r="3" fill="{stroke}"/>"#,
            );
        }
    }

    for (i, entry) in chart.legend.iter().enumerate() {
        let x = frame.padding + 110.0 * i as f64;
        let y = frame.height - 8.0;
        let _ = write!(
            out,
            r#"<rect x="{x}" y="{ry}" width="10" height="10" fill="{fill}"/>"#,
            ry = y - 9.0,
            fill = color(entry.hue),
        );
        let _ = write!(
            out,
            r##"<text x="{tx}" y="{y}" fill="#e8e8e8" font-size="11">{label}</text>"##,
            tx = x + 14.0,
            label = escape(&entry.label),
        );
    }

    out.push_str("</svg>");
    out
}

pub(crate) fn bar_chart_svg(chart: &BarChart, title: &str) -> String {
    let frame = chart.frame;
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.width,
        h = frame.height,
    );
    let _ = write!(
        out,
        r##"<rect width="{w}" height="{h}" fill="#141820"/>"##,
        w = frame.width,
        h = frame.height,
    );
    let _ = write!(
        out,
        r##"<text x="{x}" y="20" fill="#e8e8e8" font-size="14">{title}</text>"##,
        x = frame.padding,
        title = escape(title),
    );
    let _ = write!(
        out,
        r##"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="#2a3040" stroke-width="1"/>"##,
        x1 = frame.padding,
        x2 = frame.width - frame.padding,
        y = frame.height - frame.padding,
    );

    for bar in &chart.bars {
        let fill = color(bar.hue);
        let _ = write!(
            out,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}" rx="3"/>"#,
            x = bar.x,
            y = bar.y,
            w = bar.width,
            h = bar.height,
        );
        let _ = write!(
            out,
            r##"<text x="{cx:.2}" y="{ty:.2}" fill="#e8e8e8" font-size="11" text-anchor="middle">{count}</text>"##,
            cx = bar.x + bar.width / 2.0,
            ty = bar.y - 5.0,
            count = bar.count,
        );
        let _ = write!(
            out,
            r##"<text x="{cx:.2}" y="{ly:.2}" fill="#8a94a8" font-size="10" text-anchor="middle">{label}</text>"##,
            cx = bar.x + bar.width / 2.0,
            ly = frame.height - frame.padding + 16.0,
            label = escape(&bar.label),
        );
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalog_core::chart::{
        ADHERENCE_BARS, ChartFrame, SeriesSpec, build_bar_chart, build_line_chart,
    };
    use vitalog_core::models::DayLog;

    fn logs() -> Vec<DayLog> {
        let mut a = DayLog::empty("2024-06-14");
        a.weight = Some(80.0);
        a.fasted = true;
        let mut b = DayLog::empty("2024-06-15");
        b.weight = Some(79.5);
        vec![a, b]
    }

    const WEIGHT: SeriesSpec = SeriesSpec {
        label: "Weight (kg)",
        extract: |l| l.weight,
    };

    #[test]
    fn test_line_svg_has_polyline_and_markers() {
        let chart = build_line_chart(ChartFrame::default(), &logs(), &[WEIGHT], "kg");
        let svg = line_chart_svg(&chart, "Weight & body fat");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("2024-06-14"));
        assert!(svg.contains("2024-06-15"));
        assert!(svg.contains("hsl("));
    }

    #[test]
    fn test_line_svg_omits_polyline_for_single_point() {
        let single = vec![logs().remove(0)];
        let chart = build_line_chart(ChartFrame::default(), &single, &[WEIGHT], "kg");
        let svg = line_chart_svg(&chart, "Weight");
        assert!(!svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_bar_svg_renders_every_group() {
        let frame = ChartFrame {
            padding: 58.0,
            ..ChartFrame::default()
        };
        let chart = build_bar_chart(frame, &logs(), ADHERENCE_BARS);
        let svg = bar_chart_svg(&chart, "Adherence");
        assert_eq!(svg.matches("rx=\"3\"").count(), 4);
        assert!(svg.contains("Fasted days"));
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape("a<b&c"), "a&lt;b&amp;c");
    }
}
