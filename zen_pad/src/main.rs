//! zen_pad — interactive entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use zen_engine::ZenConfig;
use zen_midi::{list_output_ports, MidiTransport, MidirTransport, NullTransport};
use zen_pad::app;
use zen_scale::ScaleTable;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bouncing balls that play notes when they touch the edge zones")]
struct Cli {
    /// Path to a RON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scale by index or name (see --list-scales)
    #[arg(long)]
    scale: Option<String>,

    /// Starting octave, 2–7
    #[arg(long)]
    octave: Option<u8>,

    /// MIDI output port name fragment
    #[arg(long)]
    port: Option<String>,

    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print MIDI output ports and exit
    #[arg(long, default_value_t = false)]
    list_ports: bool,

    /// Print the scale table and exit
    #[arg(long, default_value_t = false)]
    list_scales: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let scales = ScaleTable::builtin();

    if cli.list_scales {
        for (i, s) in scales.iter().enumerate() {
            println!("  {:>2}  {}", i, s.name);
        }
        return Ok(());
    }
    if cli.list_ports {
        let ports = list_output_ports().context("failed to enumerate MIDI outputs")?;
        if ports.is_empty() {
            println!("  (no MIDI output ports)");
        }
        for (i, name) in ports.iter().enumerate() {
            println!("  {:>2}  {}", i, name);
        }
        return Ok(());
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Zen Balls — Physics-Driven MIDI Pad               ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut config = match &cli.config {
        Some(path) => {
            let (cfg, err) = ZenConfig::load_or_default(path);
            if let Some(e) = err {
                log::warn!("{}: {}; using defaults", path.display(), e);
            }
            cfg
        }
        None => ZenConfig::default(),
    };
    if let Some(sel) = &cli.scale {
        match sel.parse::<usize>().ok().or_else(|| scales.position(sel)) {
            Some(i) => config.scale = i,
            None    => log::warn!("unknown scale {:?}; keeping {}", sel, scales.get(config.scale).name),
        }
    }
    if let Some(octave) = cli.octave { config.octave = octave; }
    if cli.seed.is_some() { config.seed = cli.seed; }

    let transport: Box<dyn MidiTransport> =
        match MidirTransport::open(cli.port.as_deref(), config.notes.channel()) {
            Ok(t) => {
                println!("  MIDI → {}", t.port_name());
                Box::new(t)
            }
            Err(e) => {
                log::warn!("MIDI output unavailable ({}); running silent", e);
                Box::new(NullTransport)
            }
        };

    println!("  Scale {}, octave {}", scales.get(config.scale).name, config.octave());
    println!("  S = next scale   Q / Esc = quit");
    println!();

    app::run(&config, scales, transport)
}
