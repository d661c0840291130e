use clap::{Parser, ValueEnum};
use log::{error, info};

use customlogic_config::{init_logger, Cfg, Lut, RegisterProgrammer, SimulatedGrabber};

#[derive(Clone, Copy, ValueEnum)]
enum LutKind {
    /// Entry equals index (loaded as the inverse luminance set)
    Identity,
    /// Entry equals 255 - index
    Inverted,
}

#[derive(Parser)]
#[command(name = "customlogic-config", about = "Configure the CustomLogic block of frame-grabbers")]
struct Cli {
    /// Number of simulated grabbers to configure
    #[arg(short, long, default_value_t = 1)]
    grabbers: usize,

    /// Pixel threshold level
    #[arg(short, long, default_value_t = 0x7F)]
    threshold: u8,

    /// LUT loaded into the pixel LUT stage
    #[arg(short, long, value_enum, default_value_t = LutKind::Identity)]
    lut: LutKind,
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    let lut = match cli.lut {
        LutKind::Identity => Lut::identity(),
        LutKind::Inverted => Lut::inverted(),
    };
    let programmer = RegisterProgrammer::with_cfg(Cfg::new().with_threshold(cli.threshold).with_lut(lut));

    let mut grabbers: Vec<SimulatedGrabber> = (0..cli.grabbers)
        .map(|i| SimulatedGrabber::new(&format!("grabber{}", i)))
        .collect();

    if let Err(e) = programmer.configure_all(grabbers.iter_mut()) {
        error!("Configuration aborted: {}", e);
        std::process::exit(1);
    }

    for grabber in &grabbers {
        info!(
            "{}: {} LUT coefficients, LUT bypass {}, threshold 0x{:02X}, threshold bypass {}, {} memento event(s)",
            grabber.name(),
            grabber.lut_coefficients().len(),
            if grabber.lut_bypass_disabled() { "off" } else { "on" },
            grabber.threshold(),
            if grabber.threshold_bypass_disabled() { "off" } else { "on" },
            grabber.memento_events(),
        );
    }
}
