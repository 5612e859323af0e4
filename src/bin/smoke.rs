//! memdev smoke runner
//!
//! Opens a device pair with the given geometry, drives a fixed workload
//! through both stores and reports the resulting stats.

use clap::Parser;
use memdev::{Config, DeviceError, Devices, Whence};
use tracing_subscriber::{fmt, EnvFilter};

/// memdev smoke runner
#[derive(Parser, Debug)]
#[command(name = "memdev-smoke")]
#[command(about = "Exercise the in-memory sector and stream stores")]
#[command(version)]
struct Args {
    /// Bytes per sector
    #[arg(long, default_value = "512")]
    sector_size: u32,

    /// Number of sectors
    #[arg(short, long, default_value = "2048")]
    sectors: u64,

    /// Initial stream capacity in bytes
    #[arg(long, default_value = "4096")]
    stream_capacity: usize,

    /// Number of concurrent sector writers
    #[arg(short, long, default_value = "8")]
    writers: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,memdev=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("memdev smoke v{}", memdev::VERSION);

    let config = match Config::builder()
        .sector_size(args.sector_size)
        .sector_count(args.sectors)
        .stream_capacity(args.stream_capacity)
        .sector_banner(true)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let devices = match Devices::open(config) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Failed to open devices: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = run_stream(&devices)
        .and_then(|_| run_sectors(&devices))
        .and_then(|_| run_concurrent_writers(&devices, args.writers));

    let stream = devices.stream().get_stats();
    let sector = devices.sectors().stats();
    tracing::info!(
        "Stream: {} reads, {} writes, {}/{} bytes used",
        stream.read_count,
        stream.write_count,
        stream.used,
        stream.capacity
    );
    tracing::info!("Sector: {} reads, {} writes", sector.read_count, sector.write_count);

    devices.shutdown();

    if let Err(msg) = outcome {
        tracing::error!("Smoke run failed: {}", msg);
        std::process::exit(1);
    }

    tracing::info!("Smoke run passed");
}

fn check(ok: bool, what: &str) -> Result<(), String> {
    if ok {
        Ok(())
    } else {
        Err(what.to_string())
    }
}

fn run_stream(devices: &Devices) -> Result<(), String> {
    let stream = devices.stream();
    stream.reset();

    let written = stream.write(0, b"hello").map_err(|e| e.to_string())?;
    check(written == 5, "stream write returned wrong count")?;
    check(stream.get_stats().used == 5, "stream used bytes mismatch")?;
    check(&stream.read(0, 100)[..] == b"hello", "stream read-back mismatch")?;

    let end = stream.seek(0, Whence::FromEnd).map_err(|e| e.to_string())?;
    check(end == 5, "seek to end mismatch")?;

    let capacity = stream.capacity();
    let far = capacity as u64 + 16;
    stream.write(far, b"grown").map_err(|e| e.to_string())?;
    check(&stream.read(0, 5)[..] == b"hello", "growth lost existing bytes")?;
    check(&stream.read(far, 5)[..] == b"grown", "growth write read-back mismatch")?;

    Ok(())
}

fn run_sectors(devices: &Devices) -> Result<(), String> {
    let sectors = devices.sectors();
    let unit = sectors.unit_size() as usize;
    let last = sectors.capacity_units() - 1;

    sectors
        .write_sectors(last, &vec![0xAA; unit])
        .map_err(|e| e.to_string())?;
    let back = sectors.read_sectors(last, 1).map_err(|e| e.to_string())?;
    check(back.iter().all(|&b| b == 0xAA), "last sector read-back mismatch")?;

    match sectors.write_sectors(last, &vec![0u8; unit * 2]) {
        Err(DeviceError::OutOfRange { .. }) => Ok(()),
        other => Err(format!("oversized write not rejected: {:?}", other)),
    }
}

fn run_concurrent_writers(devices: &Devices, writers: u64) -> Result<(), String> {
    let sectors = devices.sectors();
    let unit = sectors.unit_size() as usize;
    let span = sectors.capacity_units() / writers.max(1);
    check(span > 0, "more writers than sectors")?;

    let results = crossbeam::thread::scope(|s| {
        let handles: Vec<_> = (0..writers)
            .map(|i| {
                s.spawn(move |_| {
                    let pattern = vec![(i % 251) as u8 + 1; unit * span as usize];
                    sectors.write_sectors(i * span, &pattern)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join()).collect::<Vec<_>>()
    })
    .map_err(|_| "writer thread panicked".to_string())?;

    for result in results {
        result
            .map_err(|_| "writer thread panicked".to_string())?
            .map_err(|e| e.to_string())?;
    }

    for i in 0..writers {
        let expected = crc32fast::hash(&vec![(i % 251) as u8 + 1; unit * span as usize]);
        let actual = sectors.checksum(i * span, span).map_err(|e| e.to_string())?;
        check(actual == expected, "concurrent writer ranges were mixed")?;
    }

    tracing::info!("{} concurrent writers verified", writers);
    Ok(())
}
