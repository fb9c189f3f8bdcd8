use rusty_money::{iso, Money};

/// Whole-dollar US currency, e.g. `$10,600`.
pub fn format_usd(amount: u32) -> String {
    format!("{}", Money::from_major(i64::from(amount), iso::USD))
}

pub fn format_range(low: u32, high: u32) -> String {
    format!("{} - {}", format_usd(low), format_usd(high))
}

pub fn format_monthly(amount: u32) -> String {
    format!("{}/mo", format_usd(amount))
}
