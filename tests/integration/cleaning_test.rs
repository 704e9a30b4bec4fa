use crate::utils::{HEADER, write_fixture};
use arrow::array::Array;
use survey_eda::analysis::SELECTED_COLUMNS;
use survey_eda::config::{CleaningRules, CsvOptions};
use survey_eda::reader::read_csv;
use survey_eda::transform::{clean_survey, select_columns};
use survey_eda::utils::arrow::{float_column, string_column};

/// Reading keeps every row and column as text
#[test]
fn test_fixture_reads_as_text() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());

    let batch = read_csv(&fixture.results, &CsvOptions::default(), None)?;
    assert_eq!(batch.num_rows(), 10);
    assert_eq!(batch.num_columns(), HEADER.len());

    let dev_type = string_column(&batch, "DevType")?;
    assert_eq!(
        dev_type.value(0),
        "Developer, back-end;Data scientist or machine learning specialist"
    );
    // empty fields are missing
    assert!(string_column(&batch, "Age")?.is_null(7));
    Ok(())
}

/// Outliers are dropped, rows with missing values survive and blanked rows keep their slot
#[test]
fn test_cleaning_fixture() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());

    let raw = read_csv(&fixture.results, &CsvOptions::default(), None)?;
    let survey = select_columns(&raw, &SELECTED_COLUMNS)?;
    let (cleaned, summary) = clean_survey(&survey, &CleaningRules::default())?;

    assert_eq!(summary.rows_in, 10);
    assert_eq!(summary.outliers_dropped, 3);
    assert_eq!(summary.rows_blanked, 1);
    assert_eq!(summary.rows_out, 7);
    assert_eq!(cleaned.num_rows(), 7);

    // rows 1, 2, 3, 6, 8, 9, 10 remain
    let age = float_column(&cleaned, "Age")?;
    assert_eq!(age.value(0), 25.0);
    assert!(age.is_null(3), "blanked row has no age");
    assert!(age.is_null(4), "missing age is kept");
    assert_eq!(age.value(6), 45.0);

    let country = string_column(&cleaned, "Country")?;
    assert!(country.is_null(3));
    assert_eq!(country.value(4), "India");

    // text in numeric columns becomes missing
    let years_pro = float_column(&cleaned, "YearsCodePro")?;
    assert!(years_pro.is_null(2));
    assert_eq!(years_pro.value(6), 20.0);
    let years_code = float_column(&cleaned, "YearsCode")?;
    assert!(years_code.is_null(6));

    // untouched text column
    assert_eq!(string_column(&cleaned, "Hobbyist")?.value(1), "No");
    Ok(())
}

/// Tighter thresholds remove more rows
#[test]
fn test_cleaning_custom_thresholds() -> survey_eda::Result<()> {
    let dir = tempfile::tempdir()?;
    let fixture = write_fixture(dir.path());

    let raw = read_csv(
        &fixture.results,
        &CsvOptions::default(),
        Some(&["Age", "WorkWeekHrs", "Gender", "Age1stCode", "YearsCode", "YearsCodePro"]),
    )?;
    let rules = CleaningRules {
        max_age: 40.0,
        max_work_week_hours: 45.0,
        ..CleaningRules::default()
    };
    let (cleaned, summary) = clean_survey(&raw, &rules)?;

    // ages 5, 120, 45 and hours 50, 200, 60 are out
    assert_eq!(summary.outliers_dropped, 5);
    assert_eq!(cleaned.num_rows(), 5);
    Ok(())
}
