//! Best-effort decimal conversion for attribute values
//!
//! Older documents may carry missing or malformed numbers. Parsing never
//! fails: the caller picks the fallback for each field.

/// Parse a base-10 unsigned value, ignoring surrounding whitespace.
pub fn parse_decimal(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok()
}

/// Parse `text` or fall back to `default`. Wide values are truncated to 32 bits.
pub fn parse_u32_or(text: &str, default: u32) -> u32 {
    parse_decimal(text).map_or(default, |v| v as u32)
}

pub fn parse_usize_or(text: &str, default: usize) -> usize {
    parse_decimal(text).map_or(default, |v| v as usize)
}

/// Any nonzero value means true
pub fn parse_flag(text: &str) -> bool {
    parse_decimal(text).map_or(false, |v| v != 0)
}

pub fn format_decimal(value: impl Into<u64>) -> String {
    value.into().to_string()
}

pub fn format_flag(value: bool) -> String {
    format_decimal(value as u8)
}
