mod bootstrap;
mod render;

use aging_core::settings::Settings;
use aging_data::report::build_report;
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("ar-aging v{} starting", env!("CARGO_PKG_VERSION"));

    // "Now" is injected into the pipeline rather than read inside it, so the
    // same invocation is reproducible with an explicit --as-of.
    let as_of = settings
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let report = build_report(&settings.file, as_of)?;

    match settings.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", render::render_report(&report)),
    }

    Ok(())
}
