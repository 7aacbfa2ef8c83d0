//! Screen flows: activate the view, prompt where needed, render.

use dialoguer::{Confirm, Input, Select};
use drive_smart_api::ApiClient;
use drive_smart_api_models::ReportKind;
use drive_smart_dashboard::analytics::AnalyticsView;
use drive_smart_dashboard::map::MapView;
use drive_smart_dashboard::prediction::PredictionView;
use drive_smart_dashboard::reports::ReportsView;
use drive_smart_dashboard::summary::SummaryView;
use drive_smart_geo::{EnvGeolocation, MapCapability};

use crate::render;

/// Density grid size for the terminal heatmap.
const MAP_GRID_WIDTH: usize = 48;
const MAP_GRID_HEIGHT: usize = 14;

type ScreenResult = Result<(), Box<dyn std::error::Error>>;

/// Summary cards plus the hotspot heatmap.
pub async fn dashboard(client: &ApiClient, capability: Option<&MapCapability>) -> ScreenResult {
    let mut summary = SummaryView::new();
    summary.activate(client).await;
    render::summary(summary.state());

    let mut map = MapView::new();
    map.activate(client, capability, MAP_GRID_WIDTH, MAP_GRID_HEIGHT)
        .await;
    render::map(map.state());
    Ok(())
}

/// The severity prediction form.
pub async fn prediction(
    client: &ApiClient,
    capability: Option<&MapCapability>,
    geocode_client: &reqwest::Client,
    geolocation: &EnvGeolocation,
) -> ScreenResult {
    let mut view = PredictionView::new();

    println!("{}", console::style("Accident Severity Prediction").bold());

    if Confirm::new()
        .with_prompt("Use current location?")
        .default(false)
        .interact()?
    {
        let label = view.locate(geolocation, geocode_client, capability).await;
        println!("Location: {label}");
    } else {
        view.form.location = Input::new()
            .with_prompt("Location (optional)")
            .allow_empty(true)
            .interact_text()?;
    }

    view.form.age_of_driver = prompt_text("Driver age", &view.form.age_of_driver)?;
    view.form.age_of_vehicle = prompt_text("Vehicle age (years)", &view.form.age_of_vehicle)?;
    view.form.engine_cc = prompt_text("Engine CC", &view.form.engine_cc)?;
    view.form.speedl = prompt_text("Approx speed (km/h)", &view.form.speedl)?;
    view.form.did_police_officer_attend = prompt_code(
        "Police attended",
        &[("No", "0"), ("Yes", "1")],
        &view.form.did_police_officer_attend,
    )?;
    view.form.gender = prompt_code(
        "Gender",
        &[("Male", "1"), ("Female", "2"), ("Other", "3")],
        &view.form.gender,
    )?;
    view.form.weather = prompt_code(
        "Weather conditions",
        &[
            ("Clear/Sunny", "clear"),
            ("Rainy", "rain"),
            ("Foggy", "fog"),
            ("Snowy", "snow"),
        ],
        &view.form.weather,
    )?;
    view.form.roadsc = prompt_code(
        "Road condition",
        &[
            ("Dry", "dry"),
            ("Wet/Damp", "wet"),
            ("Ice/Snow", "ice"),
            ("Potholes present", "pothole"),
        ],
        &view.form.roadsc,
    )?;
    view.form.vehicle = prompt_code(
        "Vehicle type",
        &[
            ("Car", "car"),
            ("Motorcycle", "bike"),
            ("Truck/Heavy vehicle", "truck"),
            ("Bus", "bus"),
        ],
        &view.form.vehicle,
    )?;

    let outcome = view.predict(client).await;
    render::prediction(outcome);
    Ok(())
}

/// Trend bars, risk factors, and the severity pie.
pub async fn analytics(client: &ApiClient) -> ScreenResult {
    let mut view = AnalyticsView::new();
    view.activate(client).await;
    render::analytics(view.state());
    Ok(())
}

/// Report picker and preview.
pub async fn reports(client: &ApiClient) -> ScreenResult {
    let labels: Vec<String> = ReportKind::ALL
        .iter()
        .map(|kind| format!("{} ({})", kind.title(), kind.description()))
        .collect();

    let idx = Select::new()
        .with_prompt("Generate report")
        .items(&labels)
        .default(0)
        .interact()?;

    let mut view = ReportsView::new();
    view.fetch(client, ReportKind::ALL[idx]).await;
    render::report(view.state());
    Ok(())
}

fn prompt_text(prompt: &str, default: &str) -> Result<String, dialoguer::Error> {
    Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
}

fn prompt_code(
    prompt: &str,
    options: &[(&str, &str)],
    current: &str,
) -> Result<String, dialoguer::Error> {
    let labels: Vec<&str> = options.iter().map(|(label, _)| *label).collect();
    let default = options
        .iter()
        .position(|(_, code)| *code == current)
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[idx].1.to_string())
}
