//! Build script for skyclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates skyclock.toml at compile time

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

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate skyclock.toml at compile time
///
/// The firmware parser is deliberately small, so anything it would reject
/// at boot is caught here instead.
fn validate_config() {
    println!("cargo:rerun-if-changed=skyclock.toml");

    let config_path = Path::new("skyclock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: skyclock.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds skyclock.toml as its configuration.         ║\n\
            ║  Please create one in the skyclock-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read skyclock.toml                             ║\n\
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
                ║  ERROR: Invalid TOML syntax in skyclock.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_panel(&config, &mut errors);
    validate_clock(&config, &mut errors);
    validate_palette(&config, &mut errors);
    report("Invalid configuration", &errors);

    println!("cargo:warning=skyclock.toml validated successfully");
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

/// Panic with a boxed list of errors, if there are any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only the three sections the firmware parser understands are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        if !["panel", "clock", "palette"].contains(&name.as_str()) {
            errors.push(format!("unknown section or key '{}'", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }
}

fn validate_panel(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(panel) = config.get("panel").and_then(|p| p.as_table()) else {
        return;
    };

    if let Some(variant) = panel.get("variant") {
        match variant.as_str() {
            Some(name) if ["green144", "green", "red", "black"].contains(&name) => {}
            _ => errors.push(
                "[panel] variant must be 'green144', 'green', 'red' or 'black'".to_string(),
            ),
        }
    }

    check_range(panel, "panel", "spi_frequency_hz", 1, 62_500_000, errors);
    check_range(panel, "panel", "madctl", 0, 0xFF, errors);

    if let Some(value) = panel.get("invert_colors") {
        if !value.is_bool() {
            errors.push("[panel] invert_colors must be true or false".to_string());
        }
    }
}

fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(clock) = config.get("clock").and_then(|c| c.as_table()) else {
        return;
    };

    check_range(clock, "clock", "utc_offset_s", -12 * 3600, 14 * 3600, errors);
    check_range(clock, "clock", "sync_timeout_s", 1, u32::MAX as i64, errors);
    check_range(clock, "clock", "fallback_epoch", 0, i64::MAX, errors);
    check_range(clock, "clock", "min_valid_epoch", 0, i64::MAX, errors);
    check_range(clock, "clock", "weather_interval_s", 1, u32::MAX as i64, errors);
    check_range(clock, "clock", "weather_failure_limit", 0, 255, errors);
    check_range(clock, "clock", "render_interval_ms", 10, 1000, errors);

    if let Some(location) = clock.get("location") {
        match location.as_str() {
            // The display state holds 32 bytes of location text
            Some(text) if text.len() <= 32 => {}
            Some(_) => errors.push("[clock] location must be at most 32 bytes".to_string()),
            None => errors.push("[clock] location must be a string".to_string()),
        }
    }
}

fn validate_palette(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(palette) = config.get("palette").and_then(|p| p.as_table()) else {
        return;
    };
    for key in ["text", "temperature", "background"] {
        check_range(palette, "palette", key, 0, 0xFFFF, errors);
    }
}

fn check_range(
    table: &toml::map::Map<String, toml::Value>,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}
