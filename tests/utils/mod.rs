use std::path::{Path, PathBuf};

use survey_eda::AnalysisConfig;

/// Header of the fixture responses file, two columns more than the analysis keeps
pub const HEADER: [&str; 22] = [
    "Respondent",
    "MainBranch",
    "Hobbyist",
    "Age",
    "Age1stCode",
    "Country",
    "DevType",
    "EdLevel",
    "Employment",
    "Gender",
    "JobFactors",
    "JobSat",
    "LanguageDesireNextYear",
    "LanguageWorkedWith",
    "NEWEdImpt",
    "NEWLearn",
    "NEWOvertime",
    "NEWStuck",
    "UndergradMajor",
    "WorkWeekHrs",
    "YearsCode",
    "YearsCodePro",
];

const BACHELOR: &str = "Bachelor’s degree (B.A., B.S., B.Eng., etc.)";
const MASTER: &str = "Master’s degree (M.A., M.S., M.Eng., MBA, etc.)";
const CS: &str = "Computer science, computer engineering, or software engineering";
const FULL_TIME: &str = "Employed full-time";
const BACK_END: &str = "Developer, back-end";
const DATA_SCIENCE: &str = "Data scientist or machine learning specialist";

/// One fixture row; unnamed columns are left empty
fn row(id: &str, values: &[(&str, &str)]) -> Vec<String> {
    HEADER
        .iter()
        .map(|column| {
            if *column == "Respondent" {
                return id.to_string();
            }
            values
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Ten responses exercising every cleaning rule
///
/// Rows 4, 5 and 7 are outliers, row 6 has a multi-valued gender and row 8
/// is missing its age.
#[must_use]
pub fn responses() -> Vec<Vec<String>> {
    let dev_1 = format!("{BACK_END};{DATA_SCIENCE}");
    vec![
        row("1", &[
            ("Country", "India"), ("Age", "25"), ("Gender", "Man"), ("EdLevel", BACHELOR),
            ("UndergradMajor", CS), ("Hobbyist", "Yes"), ("Age1stCode", "15"), ("YearsCode", "8"),
            ("YearsCodePro", "3"), ("LanguageWorkedWith", "Python;SQL"),
            ("LanguageDesireNextYear", "Python;Rust"), ("Employment", FULL_TIME),
            ("DevType", dev_1.as_str()), ("WorkWeekHrs", "40"),
        ]),
        row("2", &[
            ("Country", "India"), ("Age", "31"), ("Gender", "Woman"), ("EdLevel", MASTER),
            ("UndergradMajor", CS), ("Hobbyist", "No"), ("Age1stCode", "12"), ("YearsCode", "15"),
            ("YearsCodePro", "8"), ("LanguageWorkedWith", "Java;SQL"),
            ("LanguageDesireNextYear", "Java"), ("Employment", FULL_TIME),
            ("DevType", "Developer, front-end"), ("WorkWeekHrs", "45"),
        ]),
        row("3", &[
            ("Country", "Germany"), ("Age", "40"), ("Gender", "Man"), ("EdLevel", MASTER),
            ("UndergradMajor", "Mathematics or statistics"), ("Hobbyist", "Yes"),
            ("Age1stCode", "10"), ("YearsCode", "25"), ("YearsCodePro", "Less than 1 year"),
            ("LanguageWorkedWith", "Rust;Python"), ("LanguageDesireNextYear", "Rust"),
            ("Employment", "Independent contractor, freelancer, or self-employed"),
            ("DevType", BACK_END), ("WorkWeekHrs", "50"),
        ]),
        row("4", &[
            ("Country", "Germany"), ("Age", "5"), ("Gender", "Man"), ("Hobbyist", "Yes"),
            ("LanguageWorkedWith", "Kotlin;Python"), ("WorkWeekHrs", "10"),
        ]),
        row("5", &[("Country", "Brazil"), ("Age", "120"), ("Gender", "Man")]),
        row("6", &[
            ("Country", "Brazil"), ("Age", "28"), ("Gender", "Man;Woman"), ("Hobbyist", "Yes"),
            ("LanguageWorkedWith", "Go"), ("WorkWeekHrs", "40"),
        ]),
        row("7", &[
            ("Country", "Brazil"), ("Age", "35"), ("Gender", "Man"), ("Hobbyist", "No"),
            ("LanguageWorkedWith", "Python"), ("WorkWeekHrs", "200"),
        ]),
        row("8", &[
            ("Country", "India"), ("Gender", "Man"), ("EdLevel", BACHELOR), ("Hobbyist", "Yes"),
            ("Employment", FULL_TIME), ("WorkWeekHrs", "38"),
        ]),
        row("9", &[
            ("Country", "United States"), ("Age", "22"), ("Gender", "Woman"), ("EdLevel", BACHELOR),
            ("UndergradMajor", CS), ("Hobbyist", "Yes"), ("Age1stCode", "Younger than 5 years"),
            ("YearsCode", "10"), ("YearsCodePro", "1"), ("LanguageWorkedWith", "JavaScript;Python"),
            ("LanguageDesireNextYear", "Python"), ("Employment", "Student"),
            ("DevType", DATA_SCIENCE), ("WorkWeekHrs", "20"),
        ]),
        row("10", &[
            ("Country", "India"), ("Age", "45"), ("Gender", "Man"), ("EdLevel", MASTER),
            ("UndergradMajor", CS), ("Hobbyist", "No"), ("Age1stCode", "20"),
            ("YearsCode", "More than 50 years"), ("YearsCodePro", "20"),
            ("LanguageWorkedWith", "C;Python"), ("LanguageDesireNextYear", "Go"),
            ("Employment", FULL_TIME), ("DevType", BACK_END), ("WorkWeekHrs", "60"),
        ]),
    ]
}

/// Question text for every fixture column
#[must_use]
pub fn questions() -> Vec<(String, String)> {
    HEADER
        .iter()
        .map(|column| {
            let text = match *column {
                "YearsCodePro" => {
                    "NOT including education, how many years have you coded professionally (as a part of your work)?"
                }
                "Country" => "Where do you live?",
                "Gender" => "Which of the following describe you, if any?",
                _ => "Fixture question",
            };
            ((*column).to_string(), text.to_string())
        })
        .collect()
}

fn quote(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Write rows as CSV with every non-empty field quoted
pub fn write_csv(path: &Path, header: &[&str], rows: &[Vec<String>]) {
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.iter().map(|f| quote(f)).collect::<Vec<_>>().join(","));
        out.push('\n');
    }
    std::fs::write(path, out).unwrap();
}

/// Fixture responses and schema written into `dir`
pub struct Fixture {
    pub results: PathBuf,
    pub schema: PathBuf,
}

#[must_use]
pub fn write_fixture(dir: &Path) -> Fixture {
    let results = dir.join("survey_results_public.csv");
    let schema = dir.join("survey_results_schema.csv");

    write_csv(&results, &HEADER, &responses());
    let question_rows = questions()
        .into_iter()
        .map(|(c, q)| vec![c, q])
        .collect::<Vec<_>>();
    write_csv(&schema, &["Column", "QuestionText"], &question_rows);

    Fixture { results, schema }
}

/// Configuration pointing at a fixture, output under `dir/figures`
#[must_use]
pub fn fixture_config(dir: &Path, fixture: &Fixture) -> AnalysisConfig {
    AnalysisConfig {
        results_path: fixture.results.clone(),
        schema_path: fixture.schema.clone(),
        output_dir: dir.join("figures"),
        ..AnalysisConfig::default()
    }
}
