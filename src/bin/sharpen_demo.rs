use log::info;
use raster_conv::config::run::{parse_cli, RunConfig};
use raster_conv::engine::{
    process_with_report, EngineParams, Kernel3x3, ProcessReport,
};
use raster_conv::raster::io::{load_bmp, save_bmp, write_json_file};
use raster_conv::raster::RasterBuffer;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "sharpen_demo".to_string());
    let config = parse_cli(&program)?;

    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .map_err(|e| format!("Failed to initialize logger: {e}"))?;

    let (header, image) = load_bmp(&config.input)
        .map_err(|e| format!("Failed to load {}: {e}", config.input.display()))?;
    info!(
        "loaded {}: {}x{}, {} bytes/row",
        config.input.display(),
        image.width(),
        image.height(),
        image.stride()
    );

    let kernel = Kernel3x3::sharpen(config.center_weight).map_err(|e| e.to_string())?;

    let (output, reports) = if config.bench_workers.is_empty() {
        let params = EngineParams::new(config.workers, kernel).with_topology(config.topology());
        let (output, report) =
            process_with_report(image.as_view(), &params).map_err(|e| e.to_string())?;
        info!(
            "{} workers: {:.3} ms total, {:.3} ms convolving",
            report.workers, report.elapsed_ms, report.elapsed_convolve_ms
        );
        (output, vec![report])
    } else {
        run_bench(&image, kernel, &config)?
    };

    save_bmp(&config.output, &header, &output)
        .map_err(|e| format!("Failed to save {}: {e}", config.output.display()))?;
    info!("wrote {}", config.output.display());

    if let Some(path) = &config.report {
        write_json_file(path, &reports)
            .map_err(|e| format!("Failed to write report {}: {e}", path.display()))?;
        info!("timing report written to {}", path.display());
    }
    Ok(())
}

/// Run every requested worker count over the same input, verifying that the
/// outputs are byte-identical before handing back the last one.
fn run_bench(
    image: &RasterBuffer,
    kernel: Kernel3x3,
    config: &RunConfig,
) -> Result<(RasterBuffer, Vec<ProcessReport>), String> {
    let mut reports = Vec::with_capacity(config.bench_workers.len());
    let mut last: Option<RasterBuffer> = None;

    for &workers in &config.bench_workers {
        let params = EngineParams::new(workers, kernel).with_topology(config.topology());
        let (output, report) =
            process_with_report(image.as_view(), &params).map_err(|e| e.to_string())?;
        info!(
            "{workers} workers: {:.3} ms total, {:.3} ms convolving",
            report.elapsed_ms, report.elapsed_convolve_ms
        );
        if let Some(previous) = &last {
            if previous.data() != output.data() {
                return Err(format!(
                    "output for {workers} workers diverged from the previous run"
                ));
            }
        }
        last = Some(output);
        reports.push(report);
    }

    let output = last.ok_or_else(|| "--bench requires at least one worker count".to_string())?;
    Ok((output, reports))
}
