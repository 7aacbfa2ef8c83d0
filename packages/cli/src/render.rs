//! Terminal rendering of view states.
//!
//! Pure presentation: everything here takes already-derived render props
//! and prints. Missing values render as `N/A` or `0`, empty collections as
//! a "No data available" placeholder, and fetch errors as a single styled
//! `Error:` line.

use console::{Style, style};
use drive_smart_analytics::FULL_CIRCUMFERENCE;
use drive_smart_api_models::{ReportDocument, SeverityCounts};
use drive_smart_dashboard::ViewState;
use drive_smart_dashboard::analytics::AnalyticsProps;
use drive_smart_dashboard::map::MapState;
use drive_smart_dashboard::reports::ReportPreview;
use drive_smart_prediction::{PredictionOutcome, Severity};

/// Widest bar in the trend chart, in characters.
const BAR_WIDTH: usize = 30;

/// Width of the severity pie strip, in characters.
const PIE_WIDTH: usize = 24;

pub fn summary(state: &ViewState<SeverityCounts>) {
    match state {
        ViewState::Loading => println!("Loading summary..."),
        ViewState::Error(message) => print_error(message),
        ViewState::Ready(counts) => {
            println!("{}", style("Accident Summary").bold());
            println!("  {} {}", style("Fatal accidents:  ").red(), counts.fatal);
            println!(
                "  {} {}",
                orange().apply_to("Serious accidents:"),
                counts.serious
            );
            println!(
                "  {} {}",
                style("Slight accidents: ").yellow(),
                counts.slight
            );
            println!("  Total incidents:   {}", counts.total);
            println!();
        }
    }
}

pub fn map(state: &MapState) {
    // Unavailable and empty both render nothing; any warning was already
    // logged by the view.
    let MapState::Ready(scene) = state else {
        return;
    };

    println!(
        "{} ({} points, centered {:.2}, {:.2}, zoom {})",
        style("Accident Hotspot Map").bold(),
        scene.point_count,
        scene.config.center.lat,
        scene.config.center.lng,
        scene.config.zoom,
    );
    for row in scene.grid.render() {
        println!("  {}", style(row).red());
    }
    println!();
}

pub fn prediction(outcome: PredictionOutcome) {
    let color = severity_style(outcome.severity);

    println!();
    println!("{}", style("Prediction Result").bold());
    println!(
        "  Predicted severity: {}",
        color.apply_to(outcome.severity.to_string())
    );
    match outcome.confidence {
        Some(confidence) => println!("  Confidence: {confidence}%"),
        None => println!("  Confidence: N/A"),
    }
    if outcome.fallback {
        println!(
            "  {}",
            style("(estimated locally: prediction service unreachable)").dim()
        );
    }

    println!("  Recommended actions:");
    for action in outcome.severity.recommended_actions() {
        println!("    - {action}");
    }
    println!();
}

pub fn analytics(state: &ViewState<AnalyticsProps>) {
    match state {
        ViewState::Loading => println!("Loading analytics..."),
        ViewState::Error(message) => print_error(message),
        ViewState::Ready(props) => {
            println!("{}", style("Monthly Trend Analysis").bold());
            if props.bars.is_empty() {
                println!("  No data available");
            }
            for bar in &props.bars {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let width = ((bar.height / 100.0 * BAR_WIDTH as f64).round() as usize).max(1);
                println!(
                    "  {:>4} {} {}",
                    bar.label,
                    style("#".repeat(width)).cyan(),
                    bar.count
                );
            }
            println!();

            println!("{}", style("Top Risk Factors").bold());
            if props.factors.is_empty() {
                println!("  No data available");
            }
            for factor in &props.factors {
                println!("  {:<24} {}", factor.category, factor.top_count);
            }
            println!();

            println!("{}", style("Severity Distribution").bold());
            if props.pie.is_empty() {
                println!("  No data available");
            }
            for slice in &props.pie {
                let share = slice.length / FULL_CIRCUMFERENCE;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let width = (share * PIE_WIDTH as f64).round() as usize;
                let color = severity_style(drive_smart_prediction::classify_label(&slice.label));
                println!(
                    "  {:<8} {:>6}  {} {}",
                    slice.label,
                    slice.count,
                    color.apply_to("█".repeat(width)),
                    style(format!(
                        "{:.1}% (arc {:.1} @ {:.1})",
                        share * 100.0,
                        slice.length,
                        slice.offset
                    ))
                    .dim()
                );
            }
            println!("  Total incidents: {}", props.total_incidents);
            println!();
        }
    }
}

pub fn report(state: &ViewState<ReportPreview>) {
    match state {
        ViewState::Loading => println!("Loading report..."),
        ViewState::Error(message) => print_error(message),
        ViewState::Ready(preview) => {
            println!();
            println!("{}", style(preview.kind.title()).bold());
            match &preview.document {
                ReportDocument::MonthlySafety(report) => monthly_safety(report),
                ReportDocument::HotspotAnalysis(report) => hotspot_analysis(report),
                ReportDocument::EmergencyResponse(report) => emergency_response(report),
                ReportDocument::Raw(value) => raw_json(value),
            }
        }
    }
}

fn monthly_safety(report: &drive_smart_api_models::MonthlySafetyReport) {
    println!("  Total incidents:  {}", report.total_incidents);
    println!("  Total casualties: {}", report.total_casualties);
    println!(
        "  Avg incidents/month: {:.1}",
        report.statistics.avg_incidents_per_month
    );
    println!();

    if report.trends.is_empty() {
        println!("  No data available");
        return;
    }
    println!(
        "  {:<12} {:>9} {:>10} {:>6} {:>7} {:>7}",
        "MONTH", "INCIDENTS", "CASUALTIES", "FATAL", "SEVERE", "SLIGHT"
    );
    println!("  {}", "-".repeat(58));
    for row in &report.trends {
        println!(
            "  {:<12} {:>9} {:>10} {:>6} {:>7} {:>7}",
            truncate(row.month_label(), 12),
            row.incidents,
            row.casualties,
            row.severity_breakdown.fatal,
            row.severity_breakdown.severe,
            row.severity_breakdown.slight,
        );
    }
    println!();
}

fn hotspot_analysis(report: &drive_smart_api_models::HotspotReport) {
    println!("  Unique hotspots: {}", report.total_unique_hotspots);
    println!();

    if report.top_hotspots.is_empty() {
        println!("  No data available");
    } else {
        println!(
            "  {:<32} {:>9} {:>10} {:>8}",
            "LOCATION", "INCIDENTS", "CASUALTIES", "RISK"
        );
        println!("  {}", "-".repeat(64));
        for row in &report.top_hotspots {
            println!(
                "  {:<32} {:>9} {:>10} {:>8}",
                truncate(row.display_name(), 32),
                row.incidents,
                row.casualties,
                row.risk_level.as_deref().unwrap_or("N/A"),
            );
        }
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("  Recommendations:");
        for recommendation in &report.recommendations {
            println!("    - {recommendation}");
        }
    }
    println!();
}

fn emergency_response(report: &drive_smart_api_models::EmergencyResponseReport) {
    println!(
        "  Overall response rate: {}",
        fmt_rate(report.police_response.overall_response_rate)
    );
    println!();

    if report.police_response.by_police_force.is_empty() {
        println!("  No data available");
        println!();
        return;
    }
    println!(
        "  {:<28} {:>6} {:>9} {:>9} {:>7}",
        "POLICE FORCE", "TOTAL", "ATTENDED", "MISSED", "RATE"
    );
    println!("  {}", "-".repeat(64));
    for row in &report.police_response.by_police_force {
        println!(
            "  {:<28} {:>6} {:>9} {:>9} {:>7}",
            truncate(row.force_name.as_deref().unwrap_or("N/A"), 28),
            row.total_incidents,
            row.attended,
            row.not_attended,
            fmt_rate(row.response_rate),
        );
    }
    println!();
}

fn raw_json(value: &serde_json::Value) {
    println!(
        "  {}",
        style("Unrecognized report shape; showing raw JSON").dim()
    );
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    for line in pretty.lines() {
        println!("  {line}");
    }
    println!();
}

fn print_error(message: &str) {
    println!("{}", style(format!("Error: {message}")).red());
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Fatal => Style::new().red(),
        Severity::Serious => orange(),
        Severity::Slight => Style::new().yellow(),
    }
}

/// Orange is not one of the base terminal colors; 256-color code 208 is.
fn orange() -> Style {
    Style::new().color256(208)
}

fn fmt_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "N/A".to_string(), |value| format!("{value:.1}%"))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
