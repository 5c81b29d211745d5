//! Render an APRS beacon to WAV audio.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use aprs_afsk::aprs::{Coordinate, PositionReport};
use aprs_afsk::beacon::{self, Beacon, Station};
use aprs_afsk::{consts, wav, AfskConfig, Synthesis};

/// Encode an AX.25 UI frame and synthesize it as Bell 202 AFSK audio
#[derive(Parser, Debug)]
#[command(name = "aprs-beacon", version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Destination address
    #[arg(long, default_value = "APZ")]
    dest: String,

    /// Source address, as CALL or CALL-SSID
    #[arg(long, default_value = "N0CALL-7")]
    source: String,

    /// Digipeater path, comma separated
    #[arg(long, value_delimiter = ',', default_value = "WIDE1-1")]
    path: Vec<String>,

    /// Information field text
    #[arg(long, default_value = beacon::REFERENCE_INFO, conflicts_with = "lat")]
    info: String,

    /// Send a position report at this latitude, in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude for the position report, in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Symbol table and symbol code for the position report
    #[arg(long, default_value = "/b")]
    symbol: String,

    /// Position report comment
    #[arg(long)]
    comment: Option<String>,

    /// Advertise APRS messaging support in the position report
    #[arg(long)]
    messaging: bool,

    #[arg(long, default_value_t = consts::SAMPLE_RATE)]
    sample_rate: u32,

    #[arg(long, default_value_t = consts::BIT_RATE)]
    bit_rate: u32,

    /// Mark tone, in Hz
    #[arg(long, default_value_t = consts::MARK_FREQ)]
    mark: u32,

    /// Space tone, in Hz
    #[arg(long, default_value_t = consts::SPACE_FREQ)]
    space: u32,

    /// Sine table entries
    #[arg(long, default_value_t = consts::TABLE_SIZE)]
    table_size: usize,

    /// Preamble bytes before the frame [default: 500 ms at the bit rate]
    #[arg(long)]
    prepend: Option<usize>,

    /// Flags on each side of the frame
    #[arg(long, default_value_t = consts::POSTPEND)]
    postpend: usize,

    /// Output audio file
    #[arg(short, long, default_value = "aprs.wav")]
    output: PathBuf,

    /// Also render with whole samples per bit to this file, for comparison
    #[arg(long, value_name = "WAV_PATH")]
    naive: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> AfskConfig {
        AfskConfig {
            sample_rate: self.sample_rate,
            bit_rate: self.bit_rate,
            mark: self.mark,
            space: self.space,
            table_size: self.table_size,
            prepend: self.prepend
                .unwrap_or_else(|| AfskConfig::warmup_bytes(self.bit_rate, consts::WARMUP_MS)),
            postpend: self.postpend,
            ..AfskConfig::default()
        }
    }

    fn info(&self) -> Result<Vec<u8>> {
        let (lat, lon) = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Ok(self.info.as_bytes().to_vec()),
        };

        let mut symbol = self.symbol.chars();

        let (table, code) = match (symbol.next(), symbol.next(), symbol.next()) {
            (Some(t), Some(c), None) => (t, c),
            _ => anyhow::bail!("symbol must be two characters: {:?}", self.symbol),
        };

        let lat = Coordinate::from_degrees(lat).context("invalid latitude")?;
        let lon = Coordinate::from_degrees(lon).context("invalid longitude")?;

        let mut report = PositionReport::new(lat, lon, table, code);
        report.comment = self.comment.clone();
        report.messaging = self.messaging;

        let text = report.encode().context("invalid position report")?;
        info!(%text, "position report");

        Ok(text.into_bytes())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let path = cli.path.iter()
        .map(|p| p.as_str())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>();

    let station = Station::parse(&cli.dest, &cli.source, &path)
        .context("invalid address")?;
    let frame = station.frame(&cli.info()?).context("invalid frame")?;

    let config = cli.config();
    let beacon = Beacon::new(config).context("invalid modem configuration")?;
    let tx = beacon.transmit(&frame);

    wav::write_wav_file(&cli.output, tx.samples(), tx.sample_rate())
        .with_context(|| format!("failed to write {:?}", cli.output))?;

    println!("{} bytes, {} line bits, {} samples ({:.3} s) written to {:?}",
             tx.frame().len(), tx.bits().encoded().len(), tx.samples().len(),
             tx.duration(), cli.output);

    if let Some(ref out) = cli.naive {
        let naive = Beacon::new(config.with_synthesis(Synthesis::Naive))?
            .modulate(tx.frame().to_vec());

        wav::write_wav_file(out, naive.samples(), naive.sample_rate())
            .with_context(|| format!("failed to write {:?}", out))?;

        println!("{} samples ({:.3} s) written to {:?}", naive.samples().len(),
                 naive.duration(), out);
    }

    Ok(())
}
