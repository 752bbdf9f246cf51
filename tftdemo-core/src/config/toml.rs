//! Simple TOML parser for demo configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `demo.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys
//!
//! Unknown keys are ignored; unknown sections are an error.

use tftdemo_hal::WallTime;

use super::types::DemoConfig;
use crate::traits::{ColorDepth, Rotation};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type or out of range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Display,
    Clock,
    Random,
    Diagnostics,
}

/// Parse TOML configuration into DemoConfig
///
/// Keys not present keep their defaults.
pub fn parse_config(input: &str) -> Result<DemoConfig, ParseError> {
    let mut config = DemoConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let end = line.find(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(&line[1..end])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "timing" => Ok(Section::Timing),
        "display" => Ok(Section::Display),
        "clock" => Ok(Section::Clock),
        "random" => Ok(Section::Random),
        "diagnostics" => Ok(Section::Diagnostics),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DemoConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Timing => {
            let t = &mut config.timing;
            match key {
                "phase_ms" => t.phase_ms = Some(parse_int(value)?),
                "quantum_ms" => t.quantum_ms = parse_nonzero(value)?,
                "drain_interval_ms" => t.drain_interval_ms = parse_nonzero(value)?,
                "intro_ms" => t.intro_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Display => {
            let d = &mut config.display;
            match key {
                "width" => d.width = parse_nonzero(value)?,
                "height" => d.height = parse_nonzero(value)?,
                "rotation" => d.rotation = parse_rotation(value)?,
                "color_bits" => d.color_depth = parse_color_bits(value)?,
                "touch" => d.touch = parse_bool(value)?,
                "read_clock_hz" => d.read_clock_hz = parse_int(value)?,
                _ => {}
            }
        }
        Section::Clock => {
            if key == "start" {
                config.clock.start = parse_time(parse_string(value)?)?;
            }
        }
        Section::Random => {
            if key == "seed" {
                config.random.seed = parse_u64(value)?;
            }
        }
        Section::Diagnostics => match key {
            "enabled" => config.diagnostics.enabled = parse_bool(value)?,
            "quiet_after_pass" => config.diagnostics.quiet_after_pass = parse_int(value)?,
            _ => {}
        },
        Section::Root => {}
    }
    Ok(())
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_nonzero<T: core::str::FromStr + Default + PartialEq>(
    value: &str,
) -> Result<T, ParseError> {
    let v: T = parse_int(value)?;
    if v == T::default() {
        return Err(ParseError::InvalidValue);
    }
    Ok(v)
}

/// Parse a decimal or `0x` hex integer, `_` separators allowed
fn parse_u64(value: &str) -> Result<u64, ParseError> {
    let mut digits = heapless::String::<32>::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    match digits.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidValue),
        None => parse_int(&digits),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Rotation index 0-3 or name ("portrait", "landscape", ...)
fn parse_rotation(value: &str) -> Result<Rotation, ParseError> {
    match parse_string(value)? {
        "0" | "portrait" => Ok(Rotation::Portrait),
        "1" | "landscape" => Ok(Rotation::Landscape),
        "2" | "portrait_flip" => Ok(Rotation::PortraitFlip),
        "3" | "landscape_flip" => Ok(Rotation::LandscapeFlip),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_color_bits(value: &str) -> Result<ColorDepth, ParseError> {
    match parse_int::<u8>(value)? {
        16 => Ok(ColorDepth::Bits16),
        24 => Ok(ColorDepth::Bits24),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse "HH:MM:SS"
fn parse_time(value: &str) -> Result<WallTime, ParseError> {
    let mut parts = value.split(':');
    let mut next = |max: u8| -> Result<u8, ParseError> {
        let v: u8 = parse_int(parts.next().ok_or(ParseError::InvalidValue)?)?;
        if v > max {
            return Err(ParseError::InvalidValue);
        }
        Ok(v)
    };
    let (h, m, s) = (next(23)?, next(59)?, next(59)?);
    if parts.next().is_some() {
        return Err(ParseError::InvalidValue);
    }
    Ok(WallTime::from_hms(h, m, s))
}
