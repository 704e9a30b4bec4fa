use crate::utils::{HEADER, fixture_config, responses, write_csv, write_fixture};
use survey_eda::{SurveyError, run};

/// The whole analysis runs on the fixture and leaves every artefact behind
#[test]
fn test_run_writes_charts_and_summary() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());
    let config = fixture_config(dir.path(), &fixture);

    let report = run(&config)?;

    assert_eq!(report.charts.len(), 13);
    for chart in &report.charts {
        assert!(chart.exists(), "missing chart {}", chart.display());
        assert_eq!(chart.extension().and_then(|e| e.to_str()), Some("svg"));
    }
    assert!(config.output_dir.join("summary.json").exists());
    Ok(())
}

/// Aggregates computed on the fixture
#[test]
fn test_report_values() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());
    let config = fixture_config(dir.path(), &fixture);

    let report = run(&config)?;

    assert_eq!(report.rows_loaded, 10);
    assert_eq!(report.columns_selected, 20);
    assert_eq!(report.cleaning.rows_out, 7);
    assert!(
        report
            .years_code_pro_question
            .as_deref()
            .is_some_and(|q| q.starts_with("NOT including education"))
    );

    assert_eq!(report.top_countries.labels(), vec!["India", "Germany", "United States"]);
    assert_eq!(report.top_countries.get("India"), Some(&4));

    assert_eq!(report.age_histogram.edges.len(), 14);
    assert_eq!(report.age_histogram.counts.iter().sum::<usize>(), 5);

    let man = report.gender_percentages.get("Man").copied().unwrap();
    assert!((man - 200.0 / 3.0).abs() < 1e-9);

    assert_eq!(report.dev_type_totals.get("Developer, back-end"), Some(&3));
    assert_eq!(report.data_science_share, Some(33.33));

    // Python in four of the seven remaining rows
    let python = report.languages_worked.get("Python").copied().unwrap();
    assert!((python - 400.0 / 7.0).abs() < 1e-9);
    assert_eq!(report.languages_loved.get("Python"), Some(&50.0));

    // no country has more than 250 responses in the fixture
    assert!(report.work_hours_by_country.is_empty());

    assert_eq!(report.age_first_code_histogram.counts.len(), 30);
    assert_eq!(report.age_first_code_histogram.counts.iter().sum::<usize>(), 4);
    Ok(())
}

/// The country threshold is configurable
#[test]
fn test_work_hours_by_country() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());
    let mut config = fixture_config(dir.path(), &fixture);
    config.min_country_responses = 1;

    let report = run(&config)?;

    assert_eq!(report.work_hours_by_country.labels(), vec!["India"]);
    assert_eq!(report.work_hours_by_country.get("India"), Some(&45.75));
    Ok(())
}

/// The summary file is valid JSON with the expected shape
#[test]
fn test_summary_json() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());
    let config = fixture_config(dir.path(), &fixture);
    run(&config)?;

    let text = std::fs::read_to_string(config.output_dir.join("summary.json"))?;
    let json: serde_json::Value = serde_json::from_str(&text)?;

    assert_eq!(json["cleaning"]["outliers_dropped"], 3);
    assert_eq!(json["top_countries"][0][0], "India");
    assert_eq!(json["top_countries"][0][1], 4);
    assert!(json["generated_at"].is_string());
    assert_eq!(json["charts"].as_array().map(Vec::len), Some(13));
    Ok(())
}

/// A responses file lacking a selected column is rejected
#[test]
fn test_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());

    let header: Vec<&str> = HEADER.iter().copied().filter(|c| *c != "DevType").collect();
    let dev_type = HEADER.iter().position(|c| *c == "DevType").unwrap();
    let rows: Vec<Vec<String>> = responses()
        .into_iter()
        .map(|mut row| {
            row.remove(dev_type);
            row
        })
        .collect();
    write_csv(&fixture.results, &header, &rows);

    let err = run(&fixture_config(dir.path(), &fixture)).unwrap_err();
    assert!(matches!(err, SurveyError::ColumnNotFound { ref column } if column == "DevType"));
}

/// Nonexistent input is an IO error naming the path
#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = survey_eda::AnalysisConfig::default();
    config.results_path = dir.path().join("nope.csv");
    config.output_dir = dir.path().join("out");

    let err = run(&config).unwrap_err();
    assert!(matches!(err, SurveyError::Io { path: Some(_), .. }));
}

/// A responses file with only its header still produces every artefact
#[test]
fn test_run_header_only() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());
    write_csv(&fixture.results, &HEADER, &[]);
    let config = fixture_config(dir.path(), &fixture);

    let report = run(&config)?;

    assert_eq!(report.rows_loaded, 0);
    assert_eq!(report.cleaning.rows_out, 0);
    assert!(report.top_countries.is_empty());
    assert_eq!(report.data_science_share, None);
    assert_eq!(report.charts.len(), 13);
    assert!(report.charts.iter().all(|chart| chart.exists()));
    assert!(config.output_dir.join("summary.json").exists());
    Ok(())
}

/// A single fully answered response passes through cleaning untouched
#[test]
fn test_run_single_complete_row() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());
    let first = responses().into_iter().take(1).collect::<Vec<_>>();
    write_csv(&fixture.results, &HEADER, &first);
    let config = fixture_config(dir.path(), &fixture);

    let report = run(&config)?;

    assert_eq!(report.rows_loaded, 1);
    assert_eq!(report.cleaning.outliers_dropped, 0);
    assert_eq!(report.cleaning.rows_out, 1);
    assert_eq!(report.top_countries.get("India"), Some(&1));
    assert_eq!(report.data_science_share, Some(50.0));
    assert_eq!(report.charts.len(), 13);
    Ok(())
}

/// Education counts follow the order the answers first appear in
#[test]
fn test_ed_level_counts_first_appearance() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());
    let reversed = responses().into_iter().rev().collect::<Vec<_>>();
    write_csv(&fixture.results, &HEADER, &reversed);
    let config = fixture_config(dir.path(), &fixture);

    let report = run(&config)?;

    // row 10 (a master's degree) now comes first; both levels have three answers
    let counts = report.ed_level_counts.labels();
    assert_eq!(counts.len(), 2);
    assert!(counts[0].starts_with("Master"));
    assert!(counts[1].starts_with("Bachelor"));
    assert_eq!(report.ed_level_counts.total(), 6);

    // percentages keep the ranked order
    let percentages = report.ed_level_percentages.labels();
    assert!(percentages[0].starts_with("Bachelor"));
    Ok(())
}
