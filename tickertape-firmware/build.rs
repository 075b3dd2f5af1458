//! Build script for tickertape-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Copies the CYW43439 radio blobs into OUT_DIR
//! - Validates ticker.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Blobs the firmware embeds with `include_bytes!`
const RADIO_BLOBS: [&str; 2] = ["43439A0.bin", "43439A0_clm.bin"];

fn main() {
    setup_linker();
    copy_radio_firmware();
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
}

/// Copy the radio firmware from `CYW43_FIRMWARE_DIR` (the `cyw43-firmware`
/// directory of the embassy repository)
fn copy_radio_firmware() {
    println!("cargo:rerun-if-env-changed=CYW43_FIRMWARE_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let source = match env::var("CYW43_FIRMWARE_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: CYW43_FIRMWARE_DIR is not set                            ║\n\
                ║                                                                  ║\n\
                ║  Point it at a directory holding 43439A0.bin and                 ║\n\
                ║  43439A0_clm.bin (embassy-rs/embassy, cyw43-firmware/).          ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n"
            );
        }
    };

    for blob in RADIO_BLOBS {
        let from = source.join(blob);
        println!("cargo:rerun-if-changed={}", from.display());
        if let Err(e) = fs::copy(&from, out_dir.join(blob)) {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to copy radio firmware                            ║\n\
                ║                                                                  ║\n\
                ║  File:  {:<56} ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                blob, e
            );
        }
    }
}

/// Validate ticker.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=ticker.toml");

    let config_path = Path::new("ticker.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: ticker.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds ticker.toml at build time.                  ║\n\
            ║  Please create one in the tickertape-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read ticker.toml                               ║\n\
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
                ║  ERROR: Invalid TOML syntax in ticker.toml                       ║\n\
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
    validate_wifi(&config, &mut errors);
    validate_feed(&config, &mut errors);
    validate_scan(&config, &mut errors);
    validate_ui(&config, &mut errors);
    report_errors(&errors);

    println!("cargo:warning=ticker.toml validated successfully");
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

fn report_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: ticker.toml validation failed                            ║\n\
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

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Value> {
    config.get(name)
}

/// Non-empty string of at most `max` bytes
fn check_string(table: &toml::Value, key: &str, max: usize, path: &str, errors: &mut Vec<String>) {
    match table.get(key) {
        Some(toml::Value::String(s)) if s.is_empty() => {
            errors.push(format!("{}.{} must not be empty", path, key));
        }
        Some(toml::Value::String(s)) if s.len() > max => {
            errors.push(format!("{}.{} longer than {} bytes", path, key, max));
        }
        Some(toml::Value::String(_)) => {}
        Some(_) => errors.push(format!("{}.{} must be a string", path, key)),
        None => errors.push(format!("Missing {}.{}", path, key)),
    }
}

/// Optional positive integer that fits in `max`
fn check_positive(table: &toml::Value, key: &str, max: i64, path: &str, errors: &mut Vec<String>) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(n)) if *n > 0 && *n <= max => {}
        Some(toml::Value::Integer(n)) => {
            errors.push(format!("{}.{} = {} out of range 1..={}", path, key, n, max));
        }
        Some(_) => errors.push(format!("{}.{} must be an integer", path, key)),
    }
}

fn validate_wifi(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(wifi) = section(config, "wifi") else {
        errors.push("Missing [wifi] section".to_string());
        return;
    };

    check_string(wifi, "ssid", 32, "wifi", errors);
    let passphrase = wifi.get("passphrase").or_else(|| wifi.get("password"));
    if let Some(toml::Value::String(p)) = passphrase {
        if !p.is_empty() && !(8..=64).contains(&p.len()) {
            errors.push("wifi.passphrase must be 8..=64 bytes (or empty for open)".to_string());
        }
    }
    check_positive(wifi, "connect_timeout_ms", u32::MAX as i64, "wifi", errors);
    check_positive(wifi, "poll_interval_ms", u32::MAX as i64, "wifi", errors);
}

fn validate_feed(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(feed) = section(config, "feed") else {
        errors.push("Missing [feed] section".to_string());
        return;
    };

    check_string(feed, "api_token", 48, "feed", errors);

    match feed.get("symbols") {
        None => {}
        Some(toml::Value::Array(symbols)) => {
            if symbols.is_empty() || symbols.len() > 8 {
                errors.push(format!("feed.symbols has {} entries, need 1..=8", symbols.len()));
            }
            for symbol in symbols {
                match symbol.as_str() {
                    Some(s) if !s.is_empty() && s.len() <= 8 => {}
                    _ => errors.push(format!("feed.symbols entry {} is not a 1..=8 char string", symbol)),
                }
            }
        }
        Some(_) => errors.push("feed.symbols must be an array".to_string()),
    }

    check_positive(feed, "fetch_interval_ms", u32::MAX as i64, "feed", errors);
    check_positive(feed, "request_timeout_ms", u32::MAX as i64, "feed", errors);
    if let Some(throttle) = feed.get("throttle_ms") {
        if !matches!(throttle.as_integer(), Some(n) if (0..=u32::MAX as i64).contains(&n)) {
            errors.push("feed.throttle_ms must be a non-negative integer".to_string());
        }
    }
}

fn validate_scan(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(scan) = section(config, "scan") else {
        return;
    };

    check_positive(scan, "rescan_interval_ms", u32::MAX as i64, "scan", errors);
    check_positive(scan, "per_channel_ms", u16::MAX as i64, "scan", errors);
    check_positive(scan, "settle_ms", u32::MAX as i64, "scan", errors);
    check_positive(scan, "max_results", 10, "scan", errors);
}

fn validate_ui(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(ui) = section(config, "ui") else {
        return;
    };

    match ui.get("frame_delays_ms") {
        None => {}
        Some(toml::Value::Array(delays)) => {
            if delays.len() != 5 {
                errors.push(format!("ui.frame_delays_ms needs 5 entries, has {}", delays.len()));
            }
            if delays.iter().any(|d| !matches!(d.as_integer(), Some(n) if n > 0)) {
                errors.push("ui.frame_delays_ms entries must be positive integers".to_string());
            }
        }
        Some(_) => errors.push("ui.frame_delays_ms must be an array".to_string()),
    }

    check_positive(ui, "retrigger_ms", u32::MAX as i64, "ui", errors);
    check_positive(ui, "debounce_ms", u32::MAX as i64, "ui", errors);
    check_positive(ui, "fallback_frame_ms", u32::MAX as i64, "ui", errors);
    if let Some(v) = ui.get("button_active_low") {
        if !v.is_bool() {
            errors.push("ui.button_active_low must be true or false".to_string());
        }
    }
}
