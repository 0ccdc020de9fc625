//! Build script for picoi2c-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and turns it into `board.rs` in OUT_DIR

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use picoi2c_core::config::{AdapterConfig, PinConfig, GPIO_COUNT};

fn main() {
    setup_linker();
    let board = load_board();
    generate_board(&board);
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
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and validate board.toml
fn load_board() -> AdapterConfig {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the picoi2c-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
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
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
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
    let board = parse_board(&config, &mut errors);

    if errors.is_empty() {
        if let Err(e) = board.validate() {
            errors.push(format!("{:?}", e));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board.toml                                       ║\n\
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

    println!("cargo:warning=board.toml validated successfully");
    board
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

/// Build the adapter config, collecting every problem found
fn parse_board(config: &toml::Value, errors: &mut Vec<String>) -> AdapterConfig {
    let mut board = AdapterConfig::default();

    let i2c = match config.get("i2c") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[i2c] must be a table".to_string());
            return board;
        }
        None => {
            errors.push("Missing [i2c] section".to_string());
            return board;
        }
    };

    for (key, slot) in [("sda", &mut board.sda), ("scl", &mut board.scl)] {
        match i2c.get(key) {
            Some(toml::Value::String(s)) => match parse_pin_string(s) {
                Some(pin) => *slot = pin,
                None => errors.push(format!("[i2c] {} is not a valid pin: '{}'", key, s)),
            },
            Some(_) => errors.push(format!("[i2c] {} must be a string like \"gpio6\"", key)),
            None => errors.push(format!("[i2c] missing '{}'", key)),
        }
    }

    match i2c.get("clock_period_us") {
        Some(toml::Value::Integer(us)) if (1..=u16::MAX as i64).contains(us) => {
            board.clock_period_us = *us as u16;
        }
        Some(_) => errors.push("[i2c] clock_period_us must be 1-65535".to_string()),
        None => {}
    }

    match i2c.get("stretch_timeout_ms") {
        Some(toml::Value::Integer(ms)) if (1..=60_000).contains(ms) => {
            board.stretch_timeout_ms = *ms as u32;
        }
        Some(_) => errors.push("[i2c] stretch_timeout_ms must be 1-60000".to_string()),
        None => {}
    }

    board.led = match config.get("led").and_then(|led| led.get("pin")) {
        Some(toml::Value::String(s)) => match parse_pin_string(s) {
            Some(pin) => Some(pin.pin),
            None => {
                errors.push(format!("[led] pin is not a valid pin: '{}'", s));
                None
            }
        },
        Some(_) => {
            errors.push("[led] pin must be a string like \"gpio25\"".to_string());
            None
        }
        None => None,
    };

    board
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio6" -> pin 6
/// - "^gpio6" -> pin 6 with the internal pull-up
fn parse_pin_string(s: &str) -> Option<PinConfig> {
    let s = s.trim();

    let (s, pull_up) = match s.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    if pin >= GPIO_COUNT {
        return None;
    }

    Some(PinConfig { pin, pull_up })
}

/// Write `board.rs`: the config constant and pin-taking macros
fn generate_board(board: &AdapterConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let led_const = match board.led {
        Some(pin) => format!("Some({})", pin),
        None => "None".to_string(),
    };
    let led_macro = match board.led {
        Some(pin) => format!(
            "Some(embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_{}))",
            pin
        ),
        None => "None::<embassy_rp::Peri<'static, embassy_rp::gpio::AnyPin>>".to_string(),
    };

    let source = format!(
        "// Generated by build.rs from board.toml\n\
        \n\
        /// Board configuration\n\
        pub const BOARD: AdapterConfig = AdapterConfig {{\n\
        \x20   sda: PinConfig {{ pin: {sda}, pull_up: {sda_pull} }},\n\
        \x20   scl: PinConfig {{ pin: {scl}, pull_up: {scl_pull} }},\n\
        \x20   led: {led_const},\n\
        \x20   clock_period_us: {period},\n\
        \x20   stretch_timeout_ms: {stretch},\n\
        }};\n\
        \n\
        /// Take the (SDA, SCL) pins from the peripherals\n\
        macro_rules! board_pins {{\n\
        \x20   ($p:expr) => {{\n\
        \x20       ($p.PIN_{sda}, $p.PIN_{scl})\n\
        \x20   }};\n\
        }}\n\
        \n\
        /// Take the status LED pin from the peripherals, if the board has one\n\
        macro_rules! board_led {{\n\
        \x20   ($p:expr) => {{\n\
        \x20       {led_macro}\n\
        \x20   }};\n\
        }}\n",
        sda = board.sda.pin,
        sda_pull = board.sda.pull_up,
        scl = board.scl.pin,
        scl_pull = board.scl.pull_up,
        led_const = led_const,
        period = board.clock_period_us,
        stretch = board.stretch_timeout_ms,
        led_macro = led_macro,
    );

    let mut f = File::create(out_dir.join("board.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
