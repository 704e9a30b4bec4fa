use anyhow::Context;
use log::info;
use survey_eda::{AnalysisConfig, run};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::from_env().context("invalid configuration")?;
    info!(
        "Analysing {} with questions from {}",
        config.results_path.display(),
        config.schema_path.display()
    );

    let report = run(&config).context("survey analysis failed")?;

    info!(
        "{} of {} responses kept after cleaning",
        report.cleaning.rows_out, report.rows_loaded
    );
    if let Some(share) = report.data_science_share {
        info!("Data-science share of developer types: {share}%");
    }
    info!(
        "Wrote {} charts and summary.json to {}",
        report.charts.len(),
        config.output_dir.display()
    );

    Ok(())
}
