//! Stock record assembly: extraction + series selection or synthesis.

mod stock;

pub use stock::{assemble_stock, assemble_stock_with, check_search_status};
