//! Build script for pinmux-check-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates harness.toml at compile time
//! - Generates the harness settings module from harness.toml

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest selectable retry budget
const MAX_RETRY_BUDGET: i64 = 8;

/// Validated contents of harness.toml
struct HarnessSettings {
    baud_rate: i64,
    uart_timeout_ms: i64,
    uart_test_bytes: i64,
    gpio_wait_ms: i64,
    gpio_test_length: i64,
    fail_immediately: bool,
    enable_retry: bool,
    retry_budget: i64,
    seed_hi: i64,
    seed_lo: i64,
}

fn main() {
    setup_linker();
    let settings = validate_config();
    generate_settings(&settings);
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

/// Validate harness.toml at compile time
fn validate_config() -> HarnessSettings {
    println!("cargo:rerun-if-changed=harness.toml");

    let config_path = Path::new("harness.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: harness.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a harness.toml settings file.             ║\n\
            ║  Please create one in the pinmux-check-firmware directory.       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read harness.toml                              ║\n\
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
                ║  ERROR: Invalid TOML syntax in harness.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);
    let settings = validate_values(&config);

    println!("cargo:warning=harness.toml validated successfully");
    settings
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

/// Panic with a boxed list of problems
fn report_errors(title: &str, errors: &[String]) {
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

/// Validate that required sections exist
fn validate_required_sections(config: &toml::Value) {
    let errors: Vec<String> = ["console", "uart", "gpio", "runner", "prng"]
        .iter()
        .filter(|section| config.get(**section).and_then(|s| s.as_table()).is_none())
        .map(|section| format!("Missing [{}] section", section))
        .collect();

    report_errors("Missing required sections in harness.toml", &errors);
}

/// Integer at `section.key`, recording an error if absent or outside `min..=max`
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => *value,
        Some(toml::Value::Integer(value)) => {
            errors.push(format!(
                "[{}] {} = {} must be in {}..={}",
                section, key, value, min, max
            ));
            0
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            0
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            0
        }
    }
}

/// Boolean at `section.key`, recording an error if absent
fn boolean(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> bool {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Boolean(value)) => *value,
        Some(_) => {
            errors.push(format!("[{}] {} must be true or false", section, key));
            false
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            false
        }
    }
}

/// Validate every setting's type and range
fn validate_values(config: &toml::Value) -> HarnessSettings {
    let mut errors = Vec::new();
    let u32_max = i64::from(u32::MAX);
    let u16_max = i64::from(u16::MAX);

    let settings = HarnessSettings {
        baud_rate: integer(config, "console", "baud_rate", 1, u32_max, &mut errors),
        uart_timeout_ms: integer(config, "uart", "timeout_ms", 0, u32_max, &mut errors),
        uart_test_bytes: integer(config, "uart", "test_bytes", 0, u32_max, &mut errors),
        gpio_wait_ms: integer(config, "gpio", "wait_ms", 0, u32_max, &mut errors),
        gpio_test_length: integer(config, "gpio", "test_length", 0, u32_max, &mut errors),
        fail_immediately: boolean(config, "runner", "fail_immediately", &mut errors),
        enable_retry: boolean(config, "runner", "enable_retry", &mut errors),
        retry_budget: integer(config, "runner", "retry_budget", 0, MAX_RETRY_BUDGET, &mut errors),
        seed_hi: integer(config, "prng", "seed_hi", 0, u16_max, &mut errors),
        seed_lo: integer(config, "prng", "seed_lo", 0, u16_max, &mut errors),
    };

    report_errors("Invalid settings in harness.toml", &errors);

    if settings.enable_retry && settings.retry_budget == 0 {
        println!("cargo:warning=enable_retry is set but retry_budget is 0; failures will not be retried");
    }

    settings
}

/// Write the settings as Rust constants into OUT_DIR
fn generate_settings(settings: &HarnessSettings) {
    let generated = format!(
        "// Generated from harness.toml by build.rs\n\
        \n\
        pub const BAUD_RATE: u32 = {};\n\
        pub const UART_TIMEOUT_MS: u32 = {};\n\
        pub const UART_TEST_BYTES: u32 = {};\n\
        pub const GPIO_WAIT_MS: u32 = {};\n\
        pub const GPIO_TEST_LENGTH: u32 = {};\n\
        pub const FAIL_IMMEDIATELY: bool = {};\n\
        pub const ENABLE_RETRY: bool = {};\n\
        pub const RETRY_BUDGET: u8 = {};\n\
        pub const SEED_HI: u16 = {:#06x};\n\
        pub const SEED_LO: u16 = {:#06x};\n",
        settings.baud_rate,
        settings.uart_timeout_ms,
        settings.uart_test_bytes,
        settings.gpio_wait_ms,
        settings.gpio_test_length,
        settings.fail_immediately,
        settings.enable_retry,
        settings.retry_budget,
        settings.seed_hi,
        settings.seed_lo,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("harness_settings.rs"), generated).unwrap();
}
