//! Build script for lumina-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and compiles it into a `BOARD` constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use lumina_core::config::BoardConfig;

fn main() {
    setup_linker();
    let board = load_board();
    write_board(&board);
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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Parse and validate board.toml
fn load_board() -> BoardConfig {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the lumina-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
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

    let board: BoardConfig = match toml::from_str(&content) {
        Ok(board) => board,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    if let Err(e) = board.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ║                                                                  ║\n\
            ║  {:<64} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
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

/// Emit `board.rs` with the validated configuration as a constant
fn write_board(board: &BoardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let t = &board.thermistor;
    let pwm = &board.pwm;
    let pins = &board.pins;

    let source = format!(
        "/// Board configuration compiled from board.toml\n\
         pub const BOARD: BoardConfig = BoardConfig {{\n\
         \x20   thermistor: ThermistorConfig {{\n\
         \x20       r0_ohms: {},\n\
         \x20       t0_c: {},\n\
         \x20       beta: {},\n\
         \x20       series_ohms: {},\n\
         \x20       sample_spacing_us: {},\n\
         \x20   }},\n\
         \x20   pwm: PwmConfig {{ top: {}, divider: {} }},\n\
         \x20   pins: PinConfig {{\n\
         \x20       proximity: {},\n\
         \x20       proximity_inverted: {},\n\
         \x20       pwm_a: {},\n\
         \x20       pwm_b: {},\n\
         \x20       thermistor: {},\n\
         \x20   }},\n\
         \x20   store_offset: {},\n\
         }};\n",
        t.r0_ohms,
        t.t0_c,
        t.beta,
        t.series_ohms,
        t.sample_spacing_us,
        pwm.top,
        pwm.divider,
        pins.proximity,
        pins.proximity_inverted,
        pins.pwm_a,
        pins.pwm_b,
        pins.thermistor,
        board.store_offset,
    );

    fs::write(out_dir.join("board.rs"), source).unwrap();
}
