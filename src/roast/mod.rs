//! The roast pipeline: prompt the providers with the item names, parse their
//! JSON answer and match the per-item roasts back to the source items.

mod reconcile;

use reqwest::Client;

use crate::{
    config::InferenceSettings,
    error::RoastError,
    inference::{GeminiProvider, OpenRouterProvider, build_prompt},
    types::{ItemRoast, NamedItem, RoastReport},
    utils, warning,
};

pub use reconcile::reconcile;

/// Names used when the request carries none.
pub const UNKNOWN_MUSIC: &str = "Unknown Music";

/// Report returned when the provider text is not a valid roast report.
pub fn sentinel_report() -> RoastReport {
    RoastReport {
        score: 69.0,
        playlist_roast: "My brain fried trying to analyze your taste. It's that confused."
            .to_string(),
        roasts: vec![ItemRoast {
            name: "Error".to_string(),
            roast: "Even the AI gave up on you.".to_string(),
        }],
    }
}

/// Parses provider text into a [`RoastReport`], ignoring Markdown code fences.
///
/// # Errors
///
/// [`RoastError::MalformedInferenceOutput`] when the text is not the expected
/// JSON shape or the score is outside `0..=100`.
pub fn parse_report(text: &str) -> Result<RoastReport, RoastError> {
    let cleaned = utils::strip_code_fences(text);
    let report: RoastReport = serde_json::from_str(&cleaned)
        .map_err(|e| RoastError::MalformedInferenceOutput(e.to_string()))?;

    if !report.score.is_finite() || !(0.0..=100.0).contains(&report.score) {
        return Err(RoastError::MalformedInferenceOutput(format!(
            "score {} is outside 0..=100",
            report.score
        )));
    }
    Ok(report)
}

/// Generates roasts with a primary provider and a single fallback.
pub struct Roaster {
    primary: GeminiProvider,
    secondary: OpenRouterProvider,
}

impl Roaster {
    pub fn new(primary: GeminiProvider, secondary: OpenRouterProvider) -> Self {
        Self { primary, secondary }
    }

    pub fn from_settings(client: Client, settings: &InferenceSettings) -> Self {
        Self::new(
            GeminiProvider::new(client.clone(), settings),
            OpenRouterProvider::new(client, settings),
        )
    }

    /// Roasts the given items. An empty slice is roasted as [`UNKNOWN_MUSIC`].
    ///
    /// # Arguments
    ///
    /// * `items` - The collected artists, tracks or playlist entries
    ///
    /// # Errors
    ///
    /// [`RoastError::InferenceUnavailable`] when both providers fail.
    ///
    /// # Example
    ///
    /// ```
    /// let items = spotify.collect_items(&CollectMode::UserTaste, &token).await?;
    /// let report = roaster.generate_roast(&items).await?;
    /// let cards = reconcile(&items, &report.roasts);
    /// ```
    pub async fn generate_roast(&self, items: &[NamedItem]) -> Result<RoastReport, RoastError> {
        self.roast_names(&utils::join_names(items)).await
    }

    /// Roasts an already comma-joined list of names. An empty string is
    /// roasted as [`UNKNOWN_MUSIC`].
    ///
    /// Unparsable provider output degrades to [`sentinel_report`]; only a
    /// failure of both providers is an error.
    pub async fn roast_names(&self, names: &str) -> Result<RoastReport, RoastError> {
        let names = if names.is_empty() { UNKNOWN_MUSIC } else { names };
        let prompt = build_prompt(names);
        let text = self.generate_text(&prompt).await?;

        Ok(parse_report(&text).unwrap_or_else(|e| {
            warning!("JSON parse error on provider text: {}", e);
            sentinel_report()
        }))
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, RoastError> {
        let primary_err = match self.primary.generate(prompt).await {
            Ok(text) => return Ok(text),
            Err(e) => e,
        };

        warning!(
            "Gemini failed ({}). Attempting OpenRouter fallback...",
            primary_err
        );
        self.secondary.generate(prompt).await.map_err(|e| {
            RoastError::InferenceUnavailable(format!(
                "Gemini failed ({}), OpenRouter failed ({})",
                primary_err, e
            ))
        })
    }
}
