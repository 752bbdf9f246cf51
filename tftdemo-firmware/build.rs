//! Build script for tftdemo-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates demo.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate demo.toml configuration at compile time
///
/// The firmware parses the same file with its own no_std parser at boot;
/// catching mistakes here turns a silent fallback to defaults into a
/// build error.
fn validate_config() {
    println!("cargo:rerun-if-changed=demo.toml");

    let config_path = Path::new("demo.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: demo.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a demo.toml configuration file.             ║\n\
            ║  Please create one in the tftdemo-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read demo.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in demo.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_clock(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid demo configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=demo.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The firmware parser rejects unknown sections
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    const KNOWN: [&str; 5] = ["timing", "display", "clock", "random", "diagnostics"];

    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        if !KNOWN.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|s| s.as_table())
}

/// Check an integer key is within `min..=max` if present
fn check_range(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer {}-{}", section, key, min, max)),
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = section(config, "timing") else {
        return;
    };
    check_range(timing, "timing", "phase_ms", 0, u32::MAX as i64, errors);
    check_range(timing, "timing", "quantum_ms", 1, 1000, errors);
    check_range(timing, "timing", "drain_interval_ms", 1, 1000, errors);
    check_range(timing, "timing", "intro_ms", 0, 60_000, errors);
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = section(config, "display") else {
        return;
    };
    check_range(display, "display", "width", 1, 480, errors);
    check_range(display, "display", "height", 1, 480, errors);
    check_range(display, "display", "read_clock_hz", 0, 80_000_000, errors);

    match display.get("color_bits") {
        None | Some(toml::Value::Integer(16)) | Some(toml::Value::Integer(24)) => {}
        Some(_) => errors.push("[display] color_bits must be 16 or 24".to_string()),
    }

    match display.get("rotation") {
        None => {}
        Some(toml::Value::Integer(0..=3)) => {}
        Some(toml::Value::String(r))
            if ["portrait", "landscape", "portrait_flip", "landscape_flip"]
                .contains(&r.as_str()) => {}
        Some(_) => errors.push(
            "[display] rotation must be 0-3 or portrait/landscape/portrait_flip/landscape_flip"
                .to_string(),
        ),
    }

    if let Some(touch) = display.get("touch") {
        if !touch.is_bool() {
            errors.push("[display] touch must be true or false".to_string());
        }
    }
}

fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(start) = section(config, "clock").and_then(|c| c.get("start")) else {
        return;
    };
    let valid = start.as_str().is_some_and(|s| {
        let parts: Vec<&str> = s.split(':').collect();
        parts.len() == 3
            && parts
                .iter()
                .zip([24u32, 60, 60])
                .all(|(p, limit)| p.parse::<u32>().is_ok_and(|v| v < limit))
    });
    if !valid {
        errors.push("[clock] start must be a \"HH:MM:SS\" string".to_string());
    }
}
