mod render;

use anyhow::Context;
use clap::Parser;
use hermes::chart::{parse_date, BirthParams};
use hermes::{EphemerisProvider, NatalPoint, PipelineOptions, Planet, TransitPipeline};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scan transits against an instrument's natal chart")]
struct Args {
    /// Market or instrument name.
    #[arg(long, default_value = "VNIndex")]
    instrument: String,

    /// Birth date (YYYY/MM/DD).
    #[arg(long)]
    birth_date: Option<String>,

    /// Birth time (HH:MM, local).
    #[arg(long)]
    birth_time: Option<String>,

    #[arg(long)]
    birth_location: Option<String>,

    /// Latitude, e.g. 10.7769N.
    #[arg(long)]
    lat: Option<String>,

    /// Longitude, e.g. 106.7009E.
    #[arg(long)]
    lon: Option<String>,

    /// UTC offset, e.g. +07:00.
    #[arg(long)]
    utc_offset: Option<String>,

    #[arg(long, default_value = "2025/01/01")]
    start_date: String,

    #[arg(long, default_value = "2025/12/31")]
    end_date: String,

    /// Orb window in degrees/days.
    #[arg(long, default_value_t = hermes::pipeline::DEFAULT_ORB_DAYS)]
    orb_days: f64,

    /// Minimum significance score to display.
    #[arg(long, default_value_t = hermes::pipeline::DEFAULT_MIN_SCORE)]
    min_score: f64,

    /// How many hits per date to show.
    #[arg(long, default_value_t = hermes::pipeline::DEFAULT_TOP_N)]
    top_n: usize,

    /// Transit bodies to scan.
    #[arg(long, num_args = 0.., default_values_t = ["Sun".to_string(), "Moon".to_string()])]
    transit_planets: Vec<String>,

    /// Natal points to evaluate.
    #[arg(
        long,
        num_args = 0..,
        default_values_t = [
            "Ascendant", "Midheaven", "Sun", "Moon", "Mercury", "Jupiter", "Neptune",
        ].map(String::from)
    )]
    filter: Vec<String>,

    /// Instrument registry (defaults to configs/natals.toml).
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Swiss Ephemeris data directory (defaults to $SWISS_EPHEMERIS_PATH).
    #[arg(long)]
    ephe_path: Option<PathBuf>,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,

    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn birth_params(&self) -> anyhow::Result<BirthParams> {
        let instrument = self.instrument.to_uppercase();
        let given = BirthParams {
            instrument: instrument.clone(),
            birth_date: self.birth_date.clone(),
            birth_time: self.birth_time.clone(),
            birth_location: self.birth_location.clone(),
            lat: self.lat.clone(),
            lon: self.lon.clone(),
            utc_offset: self.utc_offset.clone(),
        };
        let registered = hermes_config::load_instrument(&instrument, self.config_file.as_deref())?;
        Ok(match registered {
            Some(record) => given.or(record),
            None => given,
        })
    }

    fn pipeline_options(&self) -> anyhow::Result<PipelineOptions> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        let mut options = PipelineOptions::new(start, end);
        options.orb_days = self.orb_days;
        options.min_score = self.min_score;
        options.top_n = self.top_n;
        options.planets = Planet::parse_tracked_list(self.transit_planets.as_slice());
        options.points = Some(NatalPoint::parse_list(self.filter.as_slice())?);
        Ok(options)
    }
}

#[cfg(feature = "swiss")]
fn open_ephemeris(path: Option<PathBuf>) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    let adapter = hermes::SwissEphemerisAdapter::new(path).context("Swiss Ephemeris data unavailable")?;
    log::debug!("Using ephemeris files in {}", adapter.ephemeris_path().display());
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swiss"))]
fn open_ephemeris(_path: Option<PathBuf>) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    anyhow::bail!("transit_scan was built without the `swiss` feature; no ephemeris backend available")
}

fn run(args: &Args) -> anyhow::Result<()> {
    let birth = args.birth_params()?.validate().context("Invalid birth parameters")?;
    let options = args.pipeline_options()?;
    options.scan_request().validate()?;
    log::debug!("Birth data: {:?}", birth);
    log::debug!("Options: {:?}", options);

    let provider = open_ephemeris(args.ephe_path.clone())?;
    let pipeline = TransitPipeline::new(provider.as_ref());

    let chart = pipeline.build_chart(birth)?;
    log::debug!("Natal chart at JD {:.6}", chart.julian_day().value());
    let report = pipeline.run_with_chart(&chart, &options)?;

    if args.json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
        return Ok(());
    }

    println!("\nANALYSIS FOR {}", report.instrument);
    print!("{}", render::natal_chart(&chart));
    print!("{}", render::window_summary(&report));
    Ok(())
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&args) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
