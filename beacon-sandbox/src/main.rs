use beacon_align::{align_with, AlignSettings};
use beacon_core::parse_report;
use log::*;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Clone)]
#[structopt(
    name = "beacon-sandbox",
    about = "A tool for aligning beacon scanner reports"
)]
struct Opt {
    /// The file where settings are specified.
    ///
    /// This is in the format of `beacon_align::AlignSettings`.
    #[structopt(short, long, default_value = "beacon-settings.json")]
    settings: PathBuf,
    /// Overrides the minimum number of shared beacons for an alignment.
    #[structopt(short, long)]
    threshold: Option<usize>,
    /// Overrides the id of the scanner whose frame becomes the global frame.
    #[structopt(short, long)]
    reference: Option<usize>,
    /// Fail when a pair of scanners aligns in more than one way.
    #[structopt(long)]
    strict: bool,
    /// The scanner report to align
    #[structopt(parse(from_os_str))]
    report: PathBuf,
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let settings = std::fs::File::open(&opt.settings)
        .ok()
        .and_then(|file| serde_json::from_reader(file).ok());
    if settings.is_some() {
        info!("loaded existing settings");
    } else {
        info!("used default settings");
    }
    let mut settings: AlignSettings = settings.unwrap_or_default();
    if let Some(threshold) = opt.threshold {
        settings.overlap_threshold = threshold;
    }
    if let Some(reference) = opt.reference {
        settings.reference = reference;
    }
    settings.reject_ambiguous |= opt.strict;
    debug!("settings: {:?}", settings);

    let text = match std::fs::read_to_string(&opt.report) {
        Ok(text) => text,
        Err(e) => {
            error!("unable to read {}: {}", opt.report.display(), e);
            std::process::exit(1);
        }
    };
    let scanners = match parse_report(&text) {
        Ok(scanners) => scanners,
        Err(e) => {
            error!("malformed report {}: {}", opt.report.display(), e);
            std::process::exit(1);
        }
    };
    info!("read {} scanners", scanners.len());

    let report = match align_with(&settings, scanners) {
        Ok(report) => report,
        Err(e) => {
            error!("alignment failed: {}", e);
            std::process::exit(1);
        }
    };
    for (id, position) in &report.positions {
        info!("scanner {} at {}", id, position);
    }

    println!("beacons: {}", report.beacon_count);
    println!("max distance: {}", report.max_distance);
}
