//! Plain-text report layout.

use chrono::NaiveDate;
use hermes::{NatalChart, Report, Window};
use std::fmt::Write;

const RULE: &str = "----------------------------------------";

pub fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

pub fn natal_chart(chart: &NatalChart) -> String {
    let birth = chart.birth();
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "NATAL CHART: {}", birth.instrument);
    let _ = writeln!(
        out,
        "Born: {} at {:.4},{:.4} (UTC{:+.2})",
        birth.local.format("%Y-%m-%d %H:%M"),
        birth.geo.lat,
        birth.geo.lon,
        birth.utc_offset_hours
    );
    let _ = writeln!(out, "Ruling Planet: {}", chart.ruling_planet());
    let _ = writeln!(out, "{RULE}");
    for p in chart.describe() {
        let _ = writeln!(
            out,
            "{:<12}: {:02}°{:02}'{:02}\" {}",
            p.point.name(),
            p.degrees,
            p.minutes,
            p.seconds,
            p.sign
        );
    }
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn window_line(window: &Window) -> String {
    let span = format!("{} – {}", fmt_date(window.start()), fmt_date(window.end()));
    let peak = fmt_date(window.peak());
    match window {
        Window::Retrograde(w) => format!("  • {}: {} Retrograde (peak {})", span, w.planet, peak),
        Window::Aspect(w) => format!(
            "  • {}: {} (peak {} @ orb {:.2}°, score {:.2}; {})",
            span, w.label, peak, w.peak_orb, w.score, w.interpretation
        ),
    }
}

pub fn window_summary(report: &Report) -> String {
    let mut out = format!("\nUNIFIED WINDOW SUMMARY FOR {}\n", report.instrument.to_uppercase());
    if report.windows.is_empty() {
        out.push_str("  (no windows)\n");
    }
    for window in &report.windows {
        out.push_str(&window_line(window));
        out.push('\n');
    }
    out
}
