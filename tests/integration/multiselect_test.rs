use crate::utils::write_fixture;
use arrow::array::Array;
use survey_eda::config::CsvOptions;
use survey_eda::reader::read_csv;
use survey_eda::split_multiselect;
use survey_eda::utils::arrow::string_column;

fn languages(column: &str) -> survey_eda::Result<survey_eda::MultiSelect> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());
    let batch = read_csv(&fixture.results, &CsvOptions::default(), Some(&[column]))?;
    Ok(split_multiselect(string_column(&batch, column)?, ';'))
}

/// Options come out in order of first appearance
#[test]
fn test_option_order() -> survey_eda::Result<()> {
    let worked = languages("LanguageWorkedWith")?;
    assert_eq!(
        worked.options(),
        ["Python", "SQL", "Java", "Rust", "Kotlin", "Go", "JavaScript", "C"]
    );
    assert_eq!(worked.num_rows(), 10);
    Ok(())
}

/// Missing answers are missing in every indicator column
#[test]
fn test_missing_rows_stay_missing() -> survey_eda::Result<()> {
    let worked = languages("LanguageWorkedWith")?;
    for option in worked.options() {
        let column = worked.column(option).unwrap();
        // rows 5 and 8 have no answer
        assert!(column.is_null(4), "{option} row 5");
        assert!(column.is_null(7), "{option} row 8");
        assert_eq!(column.null_count(), 2);
    }
    Ok(())
}

/// Each answered row is true exactly for its own options
#[test]
fn test_indicators_match_answers() -> survey_eda::Result<()> {
    let worked = languages("LanguageWorkedWith")?;
    let batch = worked.to_record_batch()?;
    assert_eq!(batch.num_columns(), worked.options().len());

    let python = worked.column("Python").unwrap();
    let selected: Vec<Option<bool>> = python.iter().collect();
    assert_eq!(
        selected,
        vec![
            Some(true),
            Some(false),
            Some(true),
            Some(true),
            None,
            Some(false),
            Some(true),
            None,
            Some(true),
            Some(true),
        ]
    );
    assert_eq!(worked.count("Python"), 6);
    assert_eq!(worked.count("Go"), 1);
    assert_eq!(worked.totals().labels()[0], "Python");
    Ok(())
}

/// Retention compares the languages used with the ones wanted next year
#[test]
fn test_loved_languages() -> survey_eda::Result<()> {
    let worked = languages("LanguageWorkedWith")?;
    let desired = languages("LanguageDesireNextYear")?;
    let loved = worked.retention_percentages(&desired)?;

    assert_eq!(loved.get("Java"), Some(&100.0));
    assert_eq!(loved.get("Rust"), Some(&100.0));
    assert_eq!(loved.get("SQL"), Some(&0.0));
    // Python used in six rows, wanted again in two of them
    let python = loved.get("Python").copied().unwrap();
    assert!((python - 100.0 / 3.0).abs() < 1e-9);
    // Go appears only in the desired column for row 10, which did not use it
    assert_eq!(loved.get("Go"), Some(&0.0));
    Ok(())
}
