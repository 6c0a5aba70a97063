//! Chain length statistics for `ChainedHashMap`.
//!
//! Runs a short walkthrough of inserts, updates and growth, then fills one table per
//! load factor with random keys and plots the longest and mean chain lengths.

#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

use std::error::Error;

use chainmap::{ChainedHashMap, DEFAULT_CAPACITY};
use plotters::prelude::*;
use rand::{Rng, SeedableRng, distr::Alphanumeric, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Keys inserted for every simulated load factor
const KEY_COUNT: usize = 10_000;
/// Seed for the key generator, so every run plots the same data
const SEED: u64 = 0x5eed;
/// Load factor thresholds to simulate
const LOAD_FACTORS: [f64; 12] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0, 4.0, 5.0];
/// Where the chart is written
const OUTPUT_PATH: &str = "chain_lengths.png";

/// Colour-word pairs inserted by the walkthrough
const WALKTHROUGH: [(&str, &str); 12] = [
    ("apple", "red"),
    ("banana", "yellow"),
    ("carrot", "orange"),
    ("dog", "brown"),
    ("elephant", "gray"),
    ("frog", "green"),
    ("grape", "purple"),
    ("hat", "black"),
    ("ice cream", "white"),
    ("jacket", "blue"),
    ("kite", "pink"),
    ("lion", "golden"),
];

/// Chain statistics for one load factor threshold
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Threshold the table was built with
    load_factor: f64,
    /// Bucket count after all keys were inserted
    capacity: usize,
    /// Length of the longest chain
    longest: usize,
    /// Mean length over buckets that hold a chain
    mean: f64,
}

/// Inserts, updates and adds keys to a default table, logging its size as it goes
fn walkthrough() {
    let mut map = ChainedHashMap::new();
    for (key, value) in WALKTHROUGH {
        map.set(key, value);
    }
    info!(length = map.length(), capacity = map.capacity(), "inserted twelve keys");

    map.set("jacket", "orange");
    map.set("kite", "red");
    map.set("lion", "white");
    info!(length = map.length(), capacity = map.capacity(), "updated three keys");

    map.set("moon", "silver");
    info!(length = map.length(), capacity = map.capacity(), "inserted a thirteenth key");

    map.set("a;sldfjk", "a;sldkjf");
    info!(length = map.length(), capacity = map.capacity(), "inserted a fourteenth key");
}

/// Generates `count` random alphanumeric keys of 4 to 11 characters
fn random_keys(rng: &mut StdRng, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let len = rng.random_range(4_usize..12);
            (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect::<String>()
        })
        .collect()
}

/// Fills a table built with `load_factor` and measures its chains
fn simulate(load_factor: f64, keys: &[String]) -> Result<Sample, Box<dyn Error>> {
    let mut map = ChainedHashMap::with_options(load_factor, DEFAULT_CAPACITY)?;
    map.extend(keys.iter().map(|key| (key.as_str(), ())));

    let lengths = map.chain_lengths();
    let longest = lengths.iter().copied().max().unwrap_or(0);
    let occupied = lengths.iter().filter(|&&len| len > 0).count();
    let mean = if occupied == 0 { 0.0 } else { map.length() as f64 / occupied as f64 };

    Ok(Sample { load_factor, capacity: map.capacity(), longest, mean })
}

/// Draws longest and mean chain length against load factor threshold
fn plot(samples: &[Sample]) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let min_x = samples.first().map_or(0.0, |s| s.load_factor);
    let max_x = samples.last().map_or(1.0, |s| s.load_factor);
    let max_y = samples.iter().map(|s| s.longest as f64).fold(1.0, f64::max) * 1.1;

    let root = BitMapBackend::new(OUTPUT_PATH, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Chain Length by Load Factor Threshold", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(min_x..max_x, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor Threshold")
        .y_desc("Chain Length (entries)")
        .axis_desc_style((font_family, 16))
        .draw()?;

    let longest_style = ShapeStyle::from(&RGBColor(220, 50, 50)).stroke_width(2);
    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.load_factor, s.longest as f64)),
            longest_style,
        ))?
        .label("Longest chain")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], longest_style));
    chart.draw_series(samples.iter().map(|s| {
        Circle::new((s.load_factor, s.longest as f64), 4, longest_style.filled())
    }))?;

    let mean_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(2);
    chart
        .draw_series(LineSeries::new(samples.iter().map(|s| (s.load_factor, s.mean)), mean_style))?
        .label("Mean occupied chain")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], mean_style));
    chart.draw_series(
        samples.iter().map(|s| Circle::new((s.load_factor, s.mean), 4, mean_style.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Logs the walkthrough, runs the simulation and writes the chart
fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("failed to initialise logging: {e}"))?;

    walkthrough();

    let mut rng = StdRng::seed_from_u64(SEED);
    let keys = random_keys(&mut rng, KEY_COUNT);

    let mut samples = Vec::with_capacity(LOAD_FACTORS.len());
    for load_factor in LOAD_FACTORS {
        let sample = simulate(load_factor, &keys)?;
        info!(
            load_factor,
            capacity = sample.capacity,
            longest = sample.longest,
            mean = sample.mean,
            "filled table"
        );
        samples.push(sample);
    }

    plot(&samples)?;
    println!("Generated plot image: {OUTPUT_PATH}");

    Ok(())
}
