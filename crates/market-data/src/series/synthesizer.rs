//! Synthetic price series for ranges the upstream returned no graph for.
//!
//! The series only exists so the chart has something continuous to draw. It
//! interpolates from the previous close to the current price, adds bounded
//! noise plus a four-cycle wave, and always ends exactly on the current price.
//!
//! Randomness and the window anchor are injected: production code uses
//! [`synthesize_series_now`], tests drive [`synthesize_series`] with a
//! [`FixedJitter`] and a fixed timestamp.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use log::debug;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::labels::format_label;
use crate::models::{GraphPoint, TimeRange};

/// Price used when the current price is unknown.
pub const PLACEHOLDER_PRICE: f64 = 100.0;

/// Previous close assumed relative to the current price when unknown.
const PREVIOUS_CLOSE_RATIO: f64 = 0.99;

/// Share of the total move used as noise amplitude.
const MOVE_VOLATILITY: f64 = 0.3;

/// Minimum noise amplitude relative to the current price.
const MIN_VOLATILITY: f64 = 0.02;

const WAVE_AMPLITUDE: f64 = 0.3;
const WAVE_CYCLES: f64 = 2.0;

/// No synthesized price goes below this share of the current price.
pub const PRICE_FLOOR_RATIO: f64 = 0.1;

/// Source of the uniform noise term, in `[-1, 1]`.
pub trait Jitter {
    fn next_jitter(&mut self) -> f64;
}

/// Uniform noise from any [`rand::Rng`].
pub struct RandomJitter<R>(pub R);

impl<R: Rng> Jitter for RandomJitter<R> {
    fn next_jitter(&mut self) -> f64 {
        self.0.gen_range(-1.0..=1.0)
    }
}

/// The same noise value for every point.
#[derive(Clone, Copy, Debug)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn next_jitter(&mut self) -> f64 {
        self.0.clamp(-1.0, 1.0)
    }
}

/// Rounds to cents, halves away from zero.
fn round_to_cents(price: f64) -> f64 {
    Decimal::from_f64_retain(price)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(price)
}

/// Generates a synthetic series ending at `now`.
///
/// Guards: a non-positive `current_price` becomes [`PLACEHOLDER_PRICE`]; a
/// non-positive `previous_close` becomes 99% of the current price.
pub fn synthesize_series<J: Jitter + ?Sized>(
    current_price: f64,
    previous_close: f64,
    range: &TimeRange,
    now: DateTime<Utc>,
    jitter: &mut J,
) -> Vec<GraphPoint> {
    let current = if current_price > 0.0 {
        current_price
    } else {
        PLACEHOLDER_PRICE
    };
    let previous = if previous_close > 0.0 {
        previous_close
    } else {
        current * PREVIOUS_CLOSE_RATIO
    };

    let resolution = range.resolution();
    let points = resolution.points;
    let step_secs = resolution.step.num_seconds();
    let start = (now - resolution.span()).timestamp();

    let total_change = current - previous;
    let volatility = (total_change.abs() * MOVE_VOLATILITY).max(current * MIN_VOLATILITY);
    let floor = current * PRICE_FLOOR_RATIO;
    let last_index = points.saturating_sub(1).max(1) as f64;

    let mut series: Vec<GraphPoint> = (0..points)
        .map(|i| {
            let timestamp = start + i as i64 * step_secs;
            let progress = i as f64 / last_index;
            let base = previous + total_change * progress;

            let noise = jitter.next_jitter();
            let wave = (i as f64 / points as f64 * WAVE_CYCLES * 2.0 * PI).sin() * WAVE_AMPLITUDE;
            let price = round_to_cents(base + (noise + wave) * volatility).max(floor);

            GraphPoint {
                timestamp,
                price,
                date: format_label(timestamp, range),
            }
        })
        .collect();

    if let Some(last) = series.last_mut() {
        last.price = current;
    }

    debug!(
        "Synthesized {} points for {} ({} -> {})",
        series.len(),
        range,
        previous,
        current
    );

    series
}

/// Generates a synthetic series anchored at the wall clock with thread-local randomness.
pub fn synthesize_series_now(
    current_price: f64,
    previous_close: f64,
    range: &TimeRange,
) -> Vec<GraphPoint> {
    synthesize_series(
        current_price,
        previous_close,
        range,
        Utc::now(),
        &mut RandomJitter(rand::thread_rng()),
    )
}
