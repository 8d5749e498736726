use radio_parity::analyzers::parity::Verdict;
use radio_parity::config::{Config, StationSource};
use radio_parity::error::Error;
use radio_parity::output::write_report;
use radio_parity::pipeline;
use std::fs;
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_config() -> Config {
    Config {
        dataset_dir: fixtures(),
        ..Config::default()
    }
}

fn render(config: &Config) -> String {
    let report = pipeline::run(config).expect("pipeline failed");
    let mut buf = Vec::new();
    write_report(&report, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_full_pipeline_counts() {
    let report = pipeline::run(&fixture_config()).expect("pipeline failed");

    let culture = &report.stations[0];
    assert_eq!(culture.name, "France Culture");
    assert_eq!(culture.slot_count, 4);
    assert_eq!(culture.appearance_count, 7);
    assert_eq!(culture.group_appearances.men, 3);
    assert_eq!(culture.group_appearances.women, 2);
    assert_eq!(culture.group_appearances.other, 1);

    let info = &report.stations[1];
    assert_eq!(info.appearance_count, 5);
    assert_eq!(info.recurrence.by_group.men, Some(3.0));
    assert_eq!(info.recurrence.by_group.other, None);

    let inter = &report.stations[2];
    assert_eq!(inter.appearance_count, 3);
    assert_eq!(inter.recurrence.by_group.other, Some(2.0));
    assert_eq!(inter.group_appearances.men + inter.group_appearances.women, 0);

    let proportions = report.proportions.unwrap();
    assert!((proportions.men + proportions.women + proportions.other - 1.0).abs() < 1e-12);
    assert_eq!(report.unknown_gender, 1);

    let parity = report.parity.unwrap();
    assert_eq!(parity.n, 9);
    assert_eq!(parity.men, 6);
    assert!((parity.z - 1.0).abs() < 1e-9);
    assert_eq!(parity.verdict, Verdict::EquityRespected);
}

#[test]
fn test_full_report_text() {
    let text = render(&fixture_config());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Men represent 28.57% of the people in the dataset");
    assert_eq!(lines[1], "Women represent 42.86% of the people in the dataset");
    assert_eq!(lines[2], "Others represent 28.57% of the people in the dataset");
    assert!(lines[3].starts_with("grid_france_culture_men="));
    assert!(lines[3].ends_with("isOrganisation"));
    // three joined rows, no truncation footer
    assert!(lines[6].ends_with("False"));

    let tail: Vec<&str> = lines[7..].to_vec();
    let expected = vec![
        "Out of 4 emissions, 7 personalities appeared in France Culture",
        "Out of 4 emissions, 5 personalities appeared in France Info",
        "Out of 2 emissions, 3 personalities appeared in France Inter",
        "",
        "Average of time people reappeared in France Culture: 1",
        "Average of time people reappeared in France Info: 2",
        "Average of time people reappeared in France Inter: 2",
        "",
        "Average of time men reappeared in France Culture : 2",
        "Average of time men reappeared in France Info : 3",
        "Average of time men reappeared in France Inter : no data",
        "",
        "Average of time woman reappeared in France Culture : 1",
        "Average of time woman reappeared in France Info : 1",
        "Average of time woman reappeared in France Inter : no data",
        "",
        "Average of time other reappeared in France Culture : 1",
        "Average of time other reappeared in France Info : no data",
        "Average of time other reappeared in France Inter : 2",
        "",
        "Performing normal approximation test for Radio France",
        "It is likely that equity is respected in Radio France",
    ];
    assert_eq!(tail, expected);
}

#[test]
fn test_per_station_verdicts() {
    let config = Config {
        per_station: true,
        ..fixture_config()
    };
    let text = render(&config);
    let lines: Vec<&str> = text.lines().collect();
    let n = lines.len();

    assert_eq!(lines[n - 3], "It is likely that equity is respected in France Culture");
    assert_eq!(lines[n - 2], "It is likely that equity is respected in France Info");
    assert_eq!(
        lines[n - 1],
        "Not enough data to test equity in France Inter (no data)"
    );
}

#[test]
fn test_custom_station_list() {
    let config = Config {
        stations: vec![StationSource::new("Inter", "franceinter.csv")],
        network: "Inter only".to_string(),
        ..fixture_config()
    };
    let text = render(&config);

    assert!(text.contains("grid_inter_men=Empty DataFrame"));
    assert!(text.ends_with("Not enough data to test equity in Inter only (no data)\n"));
}

#[test]
fn test_missing_file_aborts() {
    let config = Config {
        stations: vec![StationSource::new("Mouv", "mouv.csv")],
        ..fixture_config()
    };
    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, Error::Open { .. }));
}

#[test]
fn test_missing_column_aborts() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        fixtures().join("personnality.csv"),
        dir.path().join("personnality.csv"),
    )
    .unwrap();
    fs::write(dir.path().join("broken.csv"), "diffusion_id,guests\nb1,m1\n").unwrap();

    let config = Config {
        dataset_dir: dir.path().to_path_buf(),
        stations: vec![StationSource::new("Broken", "broken.csv")],
        ..Config::default()
    };
    match pipeline::run(&config).unwrap_err() {
        Error::MissingColumn { table, column } => {
            assert_eq!(table, "broken");
            assert_eq!(column, "personality_ids");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_config_rejected_before_loading() {
    let config = Config {
        dataset_dir: PathBuf::from("/nonexistent"),
        alpha: 0.0,
        ..Config::default()
    };
    assert!(matches!(
        pipeline::run(&config).unwrap_err(),
        Error::InvalidConfig(_)
    ));
}
