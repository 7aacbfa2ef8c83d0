#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive terminal dashboard for DriveSmart.
//!
//! Presents the four screens of the accident-severity dashboard (summary +
//! hotspot map, severity prediction, analytics, reports) as a menu loop.
//! All data comes from the DriveSmart backend; the mapping provider
//! capability is resolved once at startup and passed down to the screens
//! that need it.

mod render;
mod screens;

use clap::Parser;
use dialoguer::Select;
use drive_smart_api::ApiClient;
use drive_smart_geo::{EnvGeolocation, MapCapability};

/// Top-level screens, in nav order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
enum Screen {
    Dashboard,
    Prediction,
    Analytics,
    Reports,
}

impl Screen {
    const ALL: &[Self] = &[
        Self::Dashboard,
        Self::Prediction,
        Self::Analytics,
        Self::Reports,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Prediction => "Predict Severity",
            Self::Analytics => "Analytics",
            Self::Reports => "Reports",
        }
    }
}

/// Terminal dashboard for traffic-accident statistics.
#[derive(Debug, Parser)]
struct Args {
    /// Backend origin (defaults to DRIVE_SMART_BACKEND or the fixed
    /// development address).
    #[arg(long)]
    backend: Option<String>,

    /// Open one screen non-interactively and exit
    /// (dashboard | prediction | analytics | reports).
    #[arg(long)]
    screen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let args = Args::parse();
    let client = args.backend.map_or_else(ApiClient::from_env, ApiClient::new);
    log::info!("Using backend at {}", client.base_url());

    println!("{}", console::style("DriveSmart").bold().cyan());
    println!("Data-Powered Decision Support for Accident Severity Analysis");
    println!();

    let capability = drive_smart_dashboard::init_map_capability(&client).await;
    let geocode_client = reqwest::Client::new();
    let geolocation = EnvGeolocation;

    if let Some(name) = args.screen.as_deref() {
        let screen: Screen = name.parse().map_err(|_| format!("unknown screen: {name}"))?;
        run_screen(
            screen,
            &client,
            capability.as_ref(),
            &geocode_client,
            &geolocation,
        )
        .await?;
        return Ok(());
    }

    loop {
        let mut labels: Vec<&str> = Screen::ALL.iter().map(Screen::label).collect();
        labels.push("Exit");

        let idx = Select::new()
            .with_prompt("Where to?")
            .items(&labels)
            .default(0)
            .interact()?;

        if idx == Screen::ALL.len() {
            break;
        }

        run_screen(
            Screen::ALL[idx],
            &client,
            capability.as_ref(),
            &geocode_client,
            &geolocation,
        )
        .await?;
        println!();
    }

    Ok(())
}

async fn run_screen(
    screen: Screen,
    client: &ApiClient,
    capability: Option<&MapCapability>,
    geocode_client: &reqwest::Client,
    geolocation: &EnvGeolocation,
) -> Result<(), Box<dyn std::error::Error>> {
    match screen {
        Screen::Dashboard => screens::dashboard(client, capability).await,
        Screen::Prediction => {
            screens::prediction(client, capability, geocode_client, geolocation).await
        }
        Screen::Analytics => screens::analytics(client).await,
        Screen::Reports => screens::reports(client).await,
    }
}
