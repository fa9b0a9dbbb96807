//! Utility modules

pub mod formatters;

pub use formatters::{format_currency, format_currency_opt, format_number, format_number_opt, humanize};
