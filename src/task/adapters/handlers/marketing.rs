//! Stand-in marketing services used as default task handlers.
//!
//! Figures are derived from a digest of the task title so that repeated runs
//! over the same task produce the same numbers.

use async_trait::async_trait;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::task::ports::{
    GenerationError, GenerationResult, HandlerInput, HandlerOutput, TaskHandler,
};

fn seeded_figures(title: &str) -> [u64; 4] {
    let digest = Sha256::digest(title.as_bytes());
    let mut figures = [0_u64; 4];
    for (slot, chunk) in figures.iter_mut().zip(digest.chunks_exact(8)) {
        *slot = chunk
            .iter()
            .fold(0_u64, |acc, byte| acc.wrapping_shl(8) | u64::from(*byte));
    }
    figures
}

/// Reduces `value` into `0..ceiling`.
fn bounded(value: u64, ceiling: u64) -> u64 {
    value.checked_rem(ceiling).unwrap_or_default()
}

fn structured(value: &impl Serialize) -> GenerationResult<HandlerOutput> {
    serde_json::to_value(value)
        .map(HandlerOutput::Structured)
        .map_err(GenerationError::runtime)
}

/// Formats a basis-point value as a percentage with two decimals.
fn percent(basis_points: u64) -> String {
    let whole = basis_points.checked_div(100).unwrap_or_default();
    format!("{whole}.{:02}", bounded(basis_points, 100))
}

#[derive(Debug, Serialize)]
struct GraphicsAnalysis {
    resolution: &'static str,
    colors: [&'static str; 3],
    feedback: String,
}

/// Reviews creative assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicsHandler;

#[async_trait]
impl TaskHandler for GraphicsHandler {
    async fn handle(&self, input: HandlerInput<'_>) -> GenerationResult<HandlerOutput> {
        structured(&GraphicsAnalysis {
            resolution: "1920x1080",
            colors: ["#FF5733", "#33FF57", "#3357FF"],
            feedback: format!("Graphics for task \"{}\" meet the standards.", input.title),
        })
    }
}

/// Produces copy for content and ad tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHandler;

#[async_trait]
impl TaskHandler for ContentHandler {
    async fn handle(&self, input: HandlerInput<'_>) -> GenerationResult<HandlerOutput> {
        let basis = if input.description.trim().is_empty() {
            "no description provided"
        } else {
            input.description
        };
        Ok(HandlerOutput::Text(format!(
            "Generated content for \"{}\" based on: {basis}",
            input.title
        )))
    }
}

#[derive(Debug, Serialize)]
struct CampaignMetrics {
    impressions: u64,
    clicks: u64,
    ctr: String,
    cost: u64,
}

/// Reports media-buying metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsHandler;

#[async_trait]
impl TaskHandler for MetricsHandler {
    async fn handle(&self, input: HandlerInput<'_>) -> GenerationResult<HandlerOutput> {
        let [impressions, clicks, ctr, cost] = seeded_figures(input.title);
        structured(&CampaignMetrics {
            impressions: bounded(impressions, 100_000),
            clicks: bounded(clicks, 1_000),
            ctr: percent(bounded(ctr, 500)),
            cost: bounded(cost, 1_000),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrafficAnalytics {
    sessions: u64,
    bounce_rate: String,
    avg_session_duration: u64,
}

/// Reports traffic analytics.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsHandler;

#[async_trait]
impl TaskHandler for AnalyticsHandler {
    async fn handle(&self, input: HandlerInput<'_>) -> GenerationResult<HandlerOutput> {
        let [sessions, bounce, duration, _] = seeded_figures(input.title);
        structured(&TrafficAnalytics {
            sessions: bounded(sessions, 50_000),
            bounce_rate: percent(bounded(bounce, 10_000)),
            avg_session_duration: bounded(duration, 300),
        })
    }
}
