use std::time::Duration;

use chrono::Utc;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::http_client,
    config::{InferenceSettings, SpotifySettings},
    error,
    error::RoastError,
    info,
    roast::{Roaster, reconcile},
    session::{SessionStore, SessionTokenManager},
    spotify::SpotifyClient,
    types::{CollectMode, RoastCard, RoastReport, RoastTableRow},
    warning,
};

pub async fn roast(playlist: Option<String>) {
    let spotify_settings = match SpotifySettings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Cannot load Spotify settings. Err: {}", e),
    };
    let inference_settings = match InferenceSettings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Cannot load inference settings. Err: {}", e),
    };
    let client = http_client();

    let store = SessionStore::default();
    let record = match store.load().await {
        Ok(r) => r,
        Err(e) => error!(
            "Failed to load session. Please run spotroast auth\n Error: {}",
            e
        ),
    };

    let manager = SessionTokenManager::new(client.clone(), &spotify_settings);
    let resolved = manager.resolve(record.clone(), Utc::now()).await;
    if resolved != record {
        if let Err(e) = store.persist(&resolved).await {
            warning!("Failed to save refreshed session: {}", e);
        }
    }
    if resolved.is_errored() {
        error!("Your Spotify session could not be refreshed. Please run spotroast auth");
    }

    let mode = match playlist {
        Some(url) => CollectMode::Playlist { url },
        None => CollectMode::UserTaste,
    };
    let spotify = SpotifyClient::new(client.clone(), spotify_settings.api_url.clone());
    let roaster = Roaster::from_settings(client, &inference_settings);

    let pb = spinner();
    let outcome = tokio::select! {
        res = run(&spotify, &roaster, &mode, &resolved.access_token, &pb) => res,
        _ = tokio::signal::ctrl_c() => {
            pb.finish_and_clear();
            warning!("Cancelled.");
            return;
        }
    };
    pb.finish_and_clear();

    match outcome {
        Ok((report, cards)) => print_report(&report, cards),
        Err(RoastError::AuthExpired) => {
            error!("Spotify session expired. Please run spotroast auth again.")
        }
        Err(RoastError::InvalidInput(e)) => error!("Invalid Spotify playlist URL: {}", e),
        Err(e) => {
            warning!("{}", e);
            error!("System failure: the AI refuses to perceive this level of bad taste.")
        }
    }
}

async fn run(
    spotify: &SpotifyClient,
    roaster: &Roaster,
    mode: &CollectMode,
    access_token: &str,
    pb: &ProgressBar,
) -> Result<(RoastReport, Vec<RoastCard>), RoastError> {
    let items = spotify.collect_items(mode, access_token).await?;
    if items.is_empty() {
        warning!("Spotify returned nothing to roast.");
    }

    pb.set_message(format!("Roasting {} items...", items.len()));
    let report = roaster.generate_roast(&items).await?;
    let cards = reconcile(&items, &report.roasts);
    Ok((report, cards))
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching your listening data...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

fn print_report(report: &RoastReport, cards: Vec<RoastCard>) {
    info!("Basic score: {}/100", report.score.to_string().bold());
    println!("{}\n", report.playlist_roast.italic());

    let table_rows: Vec<RoastTableRow> = cards
        .into_iter()
        .map(|card| RoastTableRow {
            name: card.name,
            roast: card.roast,
            image: if card.image.is_empty() {
                "-".to_string()
            } else {
                card.image
            },
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
