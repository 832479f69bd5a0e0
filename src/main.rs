// SPDX-License-Identifier: MPL-2.0
use odo_lens::application::pipeline::{check_photo_pair, Pipeline};
use odo_lens::application::polling::cancellation;
use odo_lens::config::{self, DEFAULT_LOG_LEVEL};
use odo_lens::domain::mileage::{DistanceUnit, DualMileage};
use odo_lens::error::{Error, Result};
use odo_lens::infrastructure::{GoogleVisionDetector, LogFileSink, TokioSleeper};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
odo_lens - odometer photo validation and mileage extraction

USAGE:
  odo_lens [--config PATH] run
  odo_lens [--config PATH] read IMAGE
  odo_lens [--config PATH] validate REFERENCE MILEAGE
  odo_lens convert VALUE UNIT

COMMANDS:
  run        Wait for the newest inbox photo, read it and record the mileage
  read       Crop, OCR and parse a single image without recording it
  validate   Check that two photos were taken at the same time and place
  convert    Convert a distance between miles (mi) and kilometres (km)

OPTIONS:
  --config PATH   Config file (default: $ODO_LENS_CONFIG or the platform config dir)
  -h, --help      Print this help
";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn usage(err: impl std::fmt::Display) -> Error {
    Error::Config(format!("{err} (see --help)"))
}

async fn run() -> Result<ExitCode> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(ExitCode::SUCCESS);
    }

    let config_path: Option<PathBuf> = args.opt_value_from_str("--config").map_err(usage)?;
    let command = args.subcommand().map_err(usage)?;

    if command.as_deref() == Some("convert") {
        init_logging(DEFAULT_LOG_LEVEL);
        let value: u64 = args.free_from_str().map_err(usage)?;
        let unit: String = args.free_from_str().map_err(usage)?;
        ensure_no_extra_args(args)?;

        let unit = DistanceUnit::from_name(&unit)
            .ok_or_else(|| usage(format!("unknown unit {unit:?}")))?;
        println!("{}", DualMileage::from_value(value, unit));
        return Ok(ExitCode::SUCCESS);
    }

    let config = config::load(config_path.as_deref())?;
    init_logging(&config.logging.level);

    match command.as_deref() {
        Some("run") => {
            ensure_no_extra_args(args)?;
            let detector = GoogleVisionDetector::from_config(&config.ocr)?;
            let sink = LogFileSink::new(&config.paths.record_log);
            let pipeline = Pipeline::new(&config, detector, sink)?;

            let (handle, mut token) = cancellation();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("interrupt received, stopping");
                    handle.cancel();
                }
            });

            tracing::info!(inbox = %config.paths.inbox_dir.display(), "waiting for odometer photo");
            let record = pipeline.run_until_recorded(&TokioSleeper, &mut token).await?;
            println!("{}", record.mileage());
            Ok(ExitCode::SUCCESS)
        }
        Some("read") => {
            let image: PathBuf = args.free_from_str().map_err(usage)?;
            ensure_no_extra_args(args)?;
            let detector = GoogleVisionDetector::from_config(&config.ocr)?;
            let sink = LogFileSink::new(&config.paths.record_log);
            let pipeline = Pipeline::new(&config, detector, sink)?;

            let reading = pipeline.read_mileage(&image).await?;
            println!("{}", reading.to_dual());
            Ok(ExitCode::SUCCESS)
        }
        Some("validate") => {
            let reference: PathBuf = args.free_from_str().map_err(usage)?;
            let mileage: PathBuf = args.free_from_str().map_err(usage)?;
            ensure_no_extra_args(args)?;

            let valid =
                check_photo_pair(&reference, &mileage, config.validation.tolerances()).await?;

            if valid {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        }
        Some(other) => Err(usage(format!("unknown command {other:?}"))),
        None => {
            print!("{HELP}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn ensure_no_extra_args(args: pico_args::Arguments) -> Result<()> {
    let rest = args.finish();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(usage(format!("unexpected arguments: {rest:?}")))
    }
}
