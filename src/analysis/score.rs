use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;

pub(crate) const MAX_PROBABILITY: u8 = 100;

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new("[0-9]+").unwrap();
}

/// Takes the first run of digits in the model's reply and clamps it to `0..=100`.
pub fn extract_probability(reply: &str) -> Result<u8> {
    let digits = DIGIT_RUN
        .find(reply)
        .ok_or_else(|| anyhow!("No number in completion reply {:?}", reply))?;

    // Only fails on overflow, which is far above the upper bound anyway
    let value = digits.as_str().parse::<u64>().unwrap_or(u64::MAX);
    Ok(value.min(u64::from(MAX_PROBABILITY)) as u8)
}
