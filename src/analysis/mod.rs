//! The exploratory analysis of the developer survey.
//!
//! [`run`] loads the responses, cleans them, prints intermediate tables,
//! writes one SVG per figure into the output directory and finishes with a
//! JSON summary of every computed aggregate.

pub mod report;

use std::path::PathBuf;
use std::time::Instant;

use arrow::record_batch::RecordBatch;

use crate::charts::{
    ScatterGroup, bar_chart, histogram_chart, histogram_kde_chart, horizontal_bar_chart, pie_chart,
    scatter_chart,
};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::error::util::ensure_directory;
use crate::reader::read_csv;
use crate::schema::QuestionSchema;
use crate::stats::{
    Ranking, ValueCounts, bin_edges, describe, equal_width_edges, filter_by_min_count, group_mean, histogram,
    info, round_to, sample_rows, value_counts, value_counts_in_order, value_counts_of,
};
use crate::transform::{clean_survey, select_columns, split_multiselect};
use crate::utils::arrow::{float_column, string_column};
use crate::utils::logging::console::{
    print_describe, print_heading, print_info, print_question, print_ranking, print_sample,
};
use crate::utils::logging::{create_spinner, finish_progress_bar, log_step, log_warning};

pub use report::{AnalysisReport, Histogram};

/// Columns kept for the analysis, in output order
pub const SELECTED_COLUMNS: [&str; 20] = [
    "Country",
    "Age",
    "Gender",
    "EdLevel",
    "UndergradMajor",
    "Hobbyist",
    "Age1stCode",
    "YearsCode",
    "YearsCodePro",
    "LanguageWorkedWith",
    "LanguageDesireNextYear",
    "NEWLearn",
    "NEWStuck",
    "Employment",
    "DevType",
    "WorkWeekHrs",
    "JobSat",
    "JobFactors",
    "NEWOvertime",
    "NEWEdImpt",
];

/// Developer type counted as a data-science role
pub const DATA_SCIENCE_ROLE: &str = "Data scientist or machine learning specialist";

const TOP_COUNTRIES: usize = 15;
const TOP_WORK_HOURS: usize = 15;
const AGE_FIRST_CODE_BINS: usize = 30;
const GENDER_START_ANGLE: f64 = 180.0;

/// Run one named step under a spinner and log how long it took
fn step<T>(name: &str, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = create_spinner(Some(name));
    let start = Instant::now();
    let result = work();
    match &result {
        Ok(_) => finish_progress_bar(&spinner, Some(&format!("{name}: done"))),
        Err(e) => spinner.abandon_with_message(format!("{name}: failed ({e})")),
    }
    log_step(name, start.elapsed());
    result
}

/// Collects the paths of written charts
struct ChartFiles {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ChartFiles {
    fn next(&mut self, name: &str) -> PathBuf {
        let path = self.dir.join(name);
        self.written.push(path.clone());
        path
    }
}

fn owned_labels<T>(ranking: &Ranking<T>) -> Vec<String> {
    ranking.labels().into_iter().map(str::to_string).collect()
}

/// `Age` against `YearsCodePro`, one group per `Hobbyist` answer
///
/// Rows missing any of the three values are left out. Groups appear in the
/// order their label is first seen.
fn hobbyist_groups(batch: &RecordBatch) -> Result<Vec<ScatterGroup>> {
    let age = float_column(batch, "Age")?;
    let years_pro = float_column(batch, "YearsCodePro")?;
    let hobbyist = string_column(batch, "Hobbyist")?;

    let mut groups: Vec<ScatterGroup> = Vec::new();
    for ((x, y), label) in age.iter().zip(years_pro.iter()).zip(hobbyist.iter()) {
        let (Some(x), Some(y), Some(label)) = (x, y, label) else {
            continue;
        };
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.points.push((x, y)),
            None => groups.push(ScatterGroup::new(label, vec![(x, y)])),
        }
    }
    Ok(groups)
}

/// Percentage of all developer-type selections that name [`DATA_SCIENCE_ROLE`]
///
/// `None` when nobody picked any developer type.
fn data_science_share(totals: &ValueCounts) -> Option<f64> {
    let all = totals.total();
    if all == 0 {
        return None;
    }
    let ds = totals.get(DATA_SCIENCE_ROLE).copied().unwrap_or(0);
    Some(round_to(ds as f64 * 100.0 / all as f64, 2))
}

/// Run the full analysis
///
/// # Errors
/// Fails when an input file cannot be read, a selected column is missing
/// from the data or schema, or a chart cannot be written.
pub fn run(config: &AnalysisConfig) -> Result<AnalysisReport> {
    let started = Instant::now();
    ensure_directory(&config.output_dir)?;
    let style = config.chart_style;
    let delimiter = config.multiselect_delimiter;
    let mut charts = ChartFiles {
        dir: config.output_dir.clone(),
        written: Vec::new(),
    };

    // Loading
    let (raw, full_schema) = step("Loading survey responses", || {
        let raw = read_csv(&config.results_path, &config.csv, None)?;
        let schema = QuestionSchema::load(&config.schema_path, &config.csv)?;
        Ok((raw, schema))
    })?;
    let rows_loaded = raw.num_rows();

    let years_code_pro_question = full_schema.question("YearsCodePro").map(str::to_string);
    print_heading("Survey schema");
    println!("{} columns described", full_schema.len());
    match &years_code_pro_question {
        Some(text) => print_question("YearsCodePro", text),
        None => log_warning("No question text for YearsCodePro", Some(&config.schema_path)),
    }

    // Selection
    let (survey, schema) = step("Selecting columns", || {
        Ok((
            select_columns(&raw, &SELECTED_COLUMNS)?,
            full_schema.select(&SELECTED_COLUMNS)?,
        ))
    })?;
    drop(raw);
    print_heading("Selected columns");
    println!("{} columns selected", SELECTED_COLUMNS.len());
    print_info(survey.num_rows(), &info(&survey));

    // Cleaning
    let (cleaned, cleaning) = step("Cleaning responses", || clean_survey(&survey, &config.cleaning))?;
    print_heading("Summary statistics");
    print_describe(&describe(&cleaned));
    print_heading("Sample responses");
    print_sample(&sample_rows(&cleaned, config.sample_size, config.sample_seed)?)?;

    // Figures
    let countries = value_counts_of(&cleaned, "Country")?;
    let top_countries = countries.head(TOP_COUNTRIES);
    let age_edges = bin_edges(10.0, 80.0, 5.0);
    let age_counts = histogram(float_column(&cleaned, "Age")?.iter().flatten(), &age_edges);
    let gender_percentages = value_counts_of(&cleaned, "Gender")?.percentages();
    let ed_level = string_column(&cleaned, "EdLevel")?;
    let ed_level_counts = value_counts_in_order(ed_level);
    let ed_level_percentages = value_counts(ed_level).percentages();
    let undergrad_major_percentages = value_counts_of(&cleaned, "UndergradMajor")?.percentages();
    let employment_percentages = value_counts_of(&cleaned, "Employment")?.percentages();
    let dev_type = split_multiselect(string_column(&cleaned, "DevType")?, delimiter);
    let dev_type_totals = dev_type.totals();

    step("Drawing demographic charts", || {
        bar_chart(
            &charts.next("01_top_countries.svg"),
            schema.title_for("Country"),
            &owned_labels(&top_countries),
            &top_countries.values(),
            "Respondents",
            &style,
        )?;
        histogram_chart(
            &charts.next("02_age_histogram.svg"),
            schema.title_for("Age"),
            &age_edges,
            &age_counts,
            "Age",
            &style,
        )?;
        pie_chart(
            &charts.next("03_gender.svg"),
            schema.title_for("Gender"),
            &owned_labels(&gender_percentages),
            &gender_percentages.values(),
            GENDER_START_ANGLE,
            &style,
        )?;
        horizontal_bar_chart(
            &charts.next("04_ed_level_counts.svg"),
            schema.title_for("EdLevel"),
            &owned_labels(&ed_level_counts),
            &ed_level_counts.values(),
            "Respondents",
            &style,
        )?;
        horizontal_bar_chart(
            &charts.next("05_ed_level_percentages.svg"),
            schema.title_for("EdLevel"),
            &owned_labels(&ed_level_percentages),
            &ed_level_percentages.values(),
            "Percentage",
            &style,
        )?;
        horizontal_bar_chart(
            &charts.next("06_undergrad_major.svg"),
            schema.title_for("UndergradMajor"),
            &owned_labels(&undergrad_major_percentages),
            &undergrad_major_percentages.values(),
            "Percentage",
            &style,
        )?;
        horizontal_bar_chart(
            &charts.next("07_employment.svg"),
            schema.title_for("Employment"),
            &owned_labels(&employment_percentages),
            &employment_percentages.values(),
            "Percentage",
            &style,
        )?;
        horizontal_bar_chart(
            &charts.next("08_dev_type.svg"),
            schema.title_for("DevType"),
            &owned_labels(&dev_type_totals),
            &dev_type_totals.values(),
            "Selections",
            &style.tall(),
        )
    })?;

    // Questions
    let data_science_share = data_science_share(&dev_type_totals);
    print_heading("Data science roles");
    match data_science_share {
        Some(share) => println!("{share}% of developer-type selections are data-science roles"),
        None => println!("No developer types were selected"),
    }

    let worked = split_multiselect(string_column(&cleaned, "LanguageWorkedWith")?, delimiter);
    let desired = split_multiselect(string_column(&cleaned, "LanguageDesireNextYear")?, delimiter);
    let languages_worked = worked.share_of_rows();
    let languages_desired = desired.share_of_rows();
    let languages_loved = worked.retention_percentages(&desired)?;

    step("Drawing language charts", || {
        horizontal_bar_chart(
            &charts.next("09_languages_worked.svg"),
            "Languages used in the past year",
            &owned_labels(&languages_worked),
            &languages_worked.values(),
            "Percentage of respondents",
            &style.tall(),
        )?;
        horizontal_bar_chart(
            &charts.next("10_languages_desired.svg"),
            "Languages people are interested in learning over the next year",
            &owned_labels(&languages_desired),
            &languages_desired.values(),
            "Percentage of respondents",
            &style.tall(),
        )?;
        horizontal_bar_chart(
            &charts.next("11_languages_loved.svg"),
            "Most loved languages",
            &owned_labels(&languages_loved),
            &languages_loved.values(),
            "Percentage of users who want to continue",
            &style.tall(),
        )
    })?;

    let work_hours_by_country = filter_by_min_count(
        group_mean(&cleaned, "Country", "WorkWeekHrs")?,
        &countries,
        config.min_country_responses,
    )
    .head(TOP_WORK_HOURS);
    print_ranking(
        &format!(
            "Mean weekly hours, countries with more than {} responses",
            config.min_country_responses
        ),
        &work_hours_by_country,
    );

    let groups = hobbyist_groups(&cleaned)?;
    let first_code: Vec<f64> = float_column(&cleaned, "Age1stCode")?
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();
    let first_code_edges = match (
        first_code.iter().copied().reduce(f64::min),
        first_code.iter().copied().reduce(f64::max),
    ) {
        (Some(min), Some(max)) => equal_width_edges(min, max, AGE_FIRST_CODE_BINS),
        _ => Vec::new(),
    };
    let first_code_counts = histogram(first_code.iter().copied(), &first_code_edges);

    step("Drawing experience charts", || {
        scatter_chart(
            &charts.next("12_age_vs_years_code_pro.svg"),
            "Age vs professional coding experience",
            &groups,
            "Age",
            "YearsCodePro",
            &style,
        )?;
        histogram_kde_chart(
            &charts.next("13_age_first_code.svg"),
            schema.title_for("Age1stCode"),
            &first_code_edges,
            &first_code_counts,
            &first_code,
            "Age1stCode",
            &style,
        )
    })?;

    let report = AnalysisReport {
        generated_at: chrono::Utc::now(),
        rows_loaded,
        columns_selected: SELECTED_COLUMNS.len(),
        cleaning,
        years_code_pro_question,
        top_countries,
        age_histogram: Histogram {
            edges: age_edges,
            counts: age_counts,
        },
        gender_percentages,
        ed_level_counts,
        ed_level_percentages,
        undergrad_major_percentages,
        employment_percentages,
        dev_type_totals,
        data_science_share,
        languages_worked,
        languages_desired,
        languages_loved,
        work_hours_by_country,
        age_first_code_histogram: Histogram {
            edges: first_code_edges,
            counts: first_code_counts,
        },
        charts: charts.written,
    };
    report.write_json(&config.output_dir.join("summary.json"))?;

    log::info!(
        "Analysis of {} responses finished in {:?}, {} charts written",
        rows_loaded,
        started.elapsed(),
        report.charts.len()
    );
    Ok(report)
}
