// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Simulated camera loop.
//!
//! Publishes moving targets from a simulated coprocessor into the in-process
//! table, polls them back through `PhotonCamera` at a fixed rate and prints each
//! decoded result as a JSON line.

use std::collections::HashMap;
use std::env;
use std::f64::consts::TAU;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use photon_client::camera::{PhotonCamera, SimulatedCoprocessor};
use photon_client::config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config, ConfigError,
    PhotonConfig,
};
use photon_client::observability::{debug_flags_help, init_logging, parse_debug_flags};
use photon_client::serialization::{PhotonPipelineResult, PhotonTrackedTarget, Pose2d};
use photon_client::table::LocalTableInstance;
use tracing::{info, warn};

struct Options {
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
    cycles: u64,
    rate_hz: f64,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: simulate_camera [--config <path>] [--camera-name <name>] [--root-table <name>]\n\
         \x20                      [--max-targets <n>] [--log-level <level>]\n\
         \x20                      [--cycles <n>] [--rate <hz>] [--debug-<crate>]\n\n\
         Defaults:\n\
         - camera-name: simulated (when no config file is found)\n\
         - cycles: 250\n\
         - rate: 50\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_args() -> Options {
    let mut options = Options {
        config_path: None,
        overrides: HashMap::new(),
        cycles: 250,
        rate_hz: 50.0,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().unwrap_or_else(|| usage_and_exit());
        match arg.as_str() {
            "--config" => options.config_path = Some(PathBuf::from(value())),
            "--camera-name" => {
                options.overrides.insert("camera_name".to_string(), value());
            }
            "--root-table" => {
                options.overrides.insert("root_table".to_string(), value());
            }
            "--max-targets" => {
                options.overrides.insert("max_targets".to_string(), value());
            }
            "--log-level" => {
                options.overrides.insert("log_level".to_string(), value());
            }
            "--cycles" => {
                options.cycles = value().parse().unwrap_or_else(|_| usage_and_exit());
            }
            "--rate" => {
                options.rate_hz = value().parse().unwrap_or_else(|_| usage_and_exit());
                if options.rate_hz <= 0.0 {
                    usage_and_exit();
                }
            }
            "-h" | "--help" => usage_and_exit(),
            // Handled by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    options
}

/// Load the config file if there is one, otherwise start from defaults.
/// Overrides apply either way.
fn load_simulation_config(options: &Options) -> Result<PhotonConfig> {
    let config = match load_config(options.config_path.as_deref(), Some(&options.overrides)) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) if options.config_path.is_none() => {
            let mut config = PhotonConfig::default();
            config.camera.camera_name = "simulated".to_string();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &options.overrides);
            config
        }
        Err(err) => return Err(err).context("Failed to load configuration"),
    };
    validate_config(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Two targets circling the image center, the first one ranked best.
/// Every fourth second the targets are lost.
fn simulated_frame(cycle: u64, rate_hz: f64) -> PhotonPipelineResult {
    let seconds = cycle as f64 / rate_hz;
    let latency_millis = 18.0 + 4.0 * (seconds * 3.0).sin();
    if seconds % 4.0 >= 3.5 {
        return PhotonPipelineResult::new(latency_millis, Vec::new());
    }

    let angle = TAU * seconds / 4.0;
    let best = PhotonTrackedTarget::new(
        20.0 * angle.cos(),
        12.0 * angle.sin(),
        6.0 + 2.0 * angle.sin(),
        5.0 * (angle * 2.0).sin(),
        Pose2d::new(2.5 + angle.cos(), angle.sin(), angle.to_degrees() % 360.0),
    );
    let other = PhotonTrackedTarget::new(
        -best.get_yaw(),
        best.get_pitch() * 0.5,
        best.get_area() * 0.4,
        0.0,
        Pose2d::default(),
    );
    PhotonPipelineResult::new(latency_millis, vec![best, other])
}

fn main() -> Result<()> {
    let options = parse_args();
    let config = load_simulation_config(&options)?;

    let debug_flags = parse_debug_flags();
    let _logging_guard = init_logging(
        &debug_flags,
        &config.logging.level,
        config.logging.log_dir.clone(),
    )?;

    let instance = LocalTableInstance::get_default();
    let mut coprocessor = SimulatedCoprocessor::from_config(&instance, &config.camera)
        .context("Failed to bind simulated coprocessor")?;
    let mut camera = PhotonCamera::from_config(&instance, &config.camera, &config.decoder)
        .context("Failed to bind camera")?;

    info!(
        "[SIM] Simulating {} for {} cycles at {} Hz",
        camera.table_path(),
        options.cycles,
        options.rate_hz
    );

    let period = Duration::from_secs_f64(1.0 / options.rate_hz);
    let cycles_per_pipeline = (options.rate_hz * 2.0).max(1.0) as u64;

    for cycle in 0..options.cycles {
        coprocessor.publish(&simulated_frame(cycle, options.rate_hz))?;

        // Cycle through three pipelines every two seconds
        if cycle > 0 && cycle % cycles_per_pipeline == 0 {
            let pipeline_index = (camera.get_pipeline_index() + 1) % 3;
            if let Err(err) = camera.set_pipeline_index(pipeline_index) {
                warn!("[SIM] Pipeline switch failed: {}", err);
            }
            info!(
                "[SIM] Pipeline {} requested, coprocessor sees {}",
                pipeline_index,
                coprocessor.requested_pipeline_index()?
            );
        }

        let result = camera.get_latest_result();
        println!(
            "{}",
            serde_json::to_string(&result).context("Failed to serialize result")?
        );

        thread::sleep(period);
    }

    info!("[SIM] Done");
    Ok(())
}
