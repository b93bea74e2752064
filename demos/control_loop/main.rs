use bytemuck::{Pod, Zeroable};
use clap::Parser;
use spdlog::prelude::*;
use std::cell::Cell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use timed_filters::{
    Filter, StopWatch, TimedAverageOptions, TimedMovingAverage, chain, clamp, deadband, inspect,
    latency,
};

/// Smooths a simulated noisy joystick axis polled at a jittery rate.
#[derive(Parser)]
struct Args {
    /// Averaging window in seconds.
    #[arg(long, default_value_t = 0.25)]
    window: f64,
    /// Nominal control loop rate.
    #[arg(long, default_value_t = 50.0)]
    rate_hz: f64,
    /// Period jitter as a fraction of the nominal period, in [0, 1).
    #[arg(long, default_value_t = 0.3)]
    jitter: f64,
    /// How long to run, in seconds.
    #[arg(long, default_value_t = 5.0)]
    duration: f64,
    /// Pin the loop thread to this core.
    #[arg(long)]
    pin_core: Option<usize>,
    /// Write raw/smoothed trace records to this file.
    #[arg(long)]
    record: Option<PathBuf>,
}

/// Upper bound on samples reserved up front; larger windows grow on demand.
const MAX_CAPACITY: usize = 1 << 20;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
struct TraceRecord {
    t: f64,
    raw: f64,
    smoothed: f64,
}

/// Room for two windows' worth of samples at the nominal rate.
fn reserve_capacity(window: f64, rate_hz: f64) -> usize {
    ((window * rate_hz * 2.0) as usize).min(MAX_CAPACITY) + 8
}

/// Slow stick motion plus high-frequency wobble.
fn stick_position(t: f64) -> f64 {
    0.8 * (0.5 * t).sin() + 0.15 * (47.0 * t).sin() + 0.05 * (113.0 * t).cos()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if !(0.0..1.0).contains(&args.jitter) || args.rate_hz <= 0.0 {
        return Err("--jitter must be in [0, 1) and --rate-hz positive".into());
    }

    if let Some(core) = args.pin_core {
        match core_affinity::get_core_ids().and_then(|ids| ids.get(core).copied()) {
            Some(core_id) if core_affinity::set_for_current(core_id) => {
                info!("[System] Pinned control loop to core {}", core)
            }
            _ => warn!("[System] Could not pin control loop to core {}", core),
        }
    }

    let period = 1.0 / args.rate_hz;
    let window = TimedMovingAverage::with_options(
        TimedAverageOptions {
            window_seconds: args.window,
            capacity: reserve_capacity(args.window, args.rate_hz),
        },
        StopWatch::new(),
    )?;

    let mut recorder = args.record.as_ref().map(File::create).transpose()?.map(BufWriter::new);
    let raw = Cell::new(0.0);
    let mut records = Vec::new();
    let mut axis = chain![
        inspect(|x: &f64| raw.set(*x)),
        deadband(0.02),
        latency("Axis", (args.rate_hz as usize).max(1), 1, window),
        clamp(-1.0, 1.0),
    ];

    info!(
        "[System] Running {}s at {}Hz (jitter {}), window {}s",
        args.duration, args.rate_hz, args.jitter, args.window
    );

    let start = Instant::now();
    let mut step = 0u64;
    let mut max_error: f64 = 0.0;
    while start.elapsed().as_secs_f64() < args.duration {
        let t = start.elapsed().as_secs_f64();
        let smoothed = axis.get(stick_position(t));

        // Lag-compensated comparison against the slow component only.
        max_error = max_error.max((smoothed - 0.8 * (0.5 * (t - args.window / 2.0)).sin()).abs());
        records.push(TraceRecord {
            t,
            raw: raw.get(),
            smoothed,
        });

        step += 1;
        let wobble = args.jitter * (step as f64 * 1.7).sin();
        thread::sleep(Duration::from_secs_f64(period * (1.0 + wobble)));
    }

    info!(
        "[System] {} steps, max deviation from slow motion: {:.3}",
        step, max_error
    );

    if let Some(out) = recorder.as_mut() {
        out.write_all(bytemuck::cast_slice(&records))?;
        out.flush()?;
        info!("[System] Wrote {} trace records", records.len());
    }

    info!("[System] Done!");
    Ok(())
}
