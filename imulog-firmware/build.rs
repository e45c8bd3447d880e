//! Build script for imulog-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates logger.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in the [logger] table with their inclusive ranges
const LOGGER_KEYS: &[(&str, i64, i64)] = &[
    ("tick_ms", 1, 60_000),
    ("sample_interval_ms", 0, 60_000),
    ("max_samples", 1, 128),
    ("boot_settle_ms", 0, 60_000),
    ("mount_settle_ms", 0, 10_000),
    ("alert_row", 0, 63),
    ("display_refresh_ms", 1, 60_000),
];

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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate logger.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=logger.toml");

    let config_path = Path::new("logger.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: logger.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds logger.toml as its configuration.           ║\n\
            ║  Please create one in the imulog-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read logger.toml                               ║\n\
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
                ║  ERROR: Invalid TOML syntax in logger.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_logger(&config);

    println!("cargo:warning=logger.toml validated successfully");
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

/// Validate the [logger] table: known keys only, integers in range
fn validate_logger(config: &toml::Value) {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for name in root.keys() {
        if name != "logger" {
            errors.push(format!("Unknown section [{}]", name));
        }
    }

    match root.get("logger") {
        Some(toml::Value::Table(logger)) => {
            for (key, value) in logger {
                let Some(&(_, min, max)) = LOGGER_KEYS.iter().find(|(k, _, _)| k == key) else {
                    errors.push(format!("[logger] unknown key '{}'", key));
                    continue;
                };
                match value {
                    toml::Value::Integer(v) if (min..=max).contains(v) => {}
                    toml::Value::Integer(_) => {
                        errors.push(format!("[logger] {} must be {}-{}", key, min, max));
                    }
                    _ => errors.push(format!("[logger] {} must be an integer", key)),
                }
            }
        }
        Some(_) => errors.push("[logger] must be a table".to_string()),
        None => errors.push("Missing [logger] section".to_string()),
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid logger configuration                             ║\n\
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
}
