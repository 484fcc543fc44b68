//! Chart series helpers: date labels and synthetic series.

mod labels;
mod synthesizer;

pub use labels::format_label;
pub use synthesizer::{
    synthesize_series, synthesize_series_now, FixedJitter, Jitter, RandomJitter,
    PLACEHOLDER_PRICE, PRICE_FLOOR_RATIO,
};
