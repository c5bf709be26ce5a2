// Copyright (c) Calibra Research
// SPDX-License-Identifier: Apache-2.0

//! Main executable to run a simulation of the self-organising wireless sensor network.

mod scene;

use anyhow::{Context, Result};
use clap::{App, Arg};
use log::{info, warn};
use wsn_sim_kernel::base_types::{Duration, VirtualTime};
use wsn_sim_kernel::RealtimePacer;
use wsn_sim_protocol::{Config, Network};

fn main() -> Result<()> {
    let args = get_arguments();

    env_logger::init();

    let placements = scene::load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene))?;

    let mut config = match &args.config {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config override {}", path))?;
            serde_json::from_str(&data)
                .with_context(|| format!("invalid config override in {}", path))?
        }
        None => Config::default(),
    };
    config.sim_node_count = placements.len();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(scale) = args.timescale {
        config.sim_time_scale = Some(scale);
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create output directory {}", args.output_dir))?;

    let mut network = Network::new(config.clone(), placements, &args.output_dir);
    let pacer = config
        .sim_time_scale
        .map(|scale| RealtimePacer::new(scale, network.now()));
    let until = VirtualTime::default() + Duration::from_secs_f64(args.duration);

    network.run(until, pacer)?;

    let roles: Vec<_> = network.nodes().iter().map(|n| (n.gui, n.role)).collect();
    warn!("final node roles: {:#?}", roles);
    info!(
        "simulation finished at virtual time {:.3}s, csv output in {}",
        network.now().as_secs_f64(),
        args.output_dir
    );

    Ok(())
}

struct CliArguments {
    scene: String,
    config: Option<String>,
    duration: f64,
    seed: Option<u64>,
    output_dir: String,
    timescale: Option<f64>,
}

// TODO: use structopt
fn get_arguments() -> CliArguments {
    let matches = App::new("WSN simulator")
        .about("A discrete-event simulation of a self-organising wireless sensor network")
        .arg(
            Arg::with_name("scene")
                .long("scene")
                .help("Path to the node-placement scene file")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .help("Path to a JSON config override bundle; falls back to built-in defaults")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("duration")
                .long("duration")
                .help("Virtual simulation duration, in seconds")
                .default_value("600"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .help("Overrides the config's PRNG seed")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output_dir")
                .long("output-dir")
                .help("Directory to write CSV trace output into")
                .default_value("wsn_sim_output"),
        )
        .arg(
            Arg::with_name("timescale")
                .long("timescale")
                .help("Optional real-time pacing factor; omit to run as fast as possible")
                .takes_value(true),
        )
        .get_matches();

    CliArguments {
        scene: matches.value_of("scene").unwrap().to_string(),
        config: matches.value_of("config").map(|x| x.to_string()),
        duration: matches
            .value_of("duration")
            .unwrap()
            .parse::<f64>()
            .unwrap(),
        seed: matches.value_of("seed").map(|x| x.parse::<u64>().unwrap()),
        output_dir: matches.value_of("output_dir").unwrap().to_string(),
        timescale: matches
            .value_of("timescale")
            .map(|x| x.parse::<f64>().unwrap()),
    }
}
