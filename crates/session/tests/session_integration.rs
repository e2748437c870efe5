//! Integration tests: session lifecycle and command output.

use domain::columns;
use ingest::{SourceName, Sources};
use projections::{FilterCriteria, SortDirection};
use session::cli::{Command, FilterArgs, execute};
use session::{Session, SessionError};

const CATALOG: &str = "\
song,artist,year,type,gender,duration,language,tabber,source,date,difficulty,specialbooks,capo
ItemA,PersonX,2005,Person,female,00:03:10,english,Bea,new,20240101,3,,2
ItemB,PersonY,1995,Group,female,00:04:00,french,Joh,old,20240102,1,yes,
ItemC,PersonZ,2008,Group,Male,00:02:30,english,Bea,new,20240103,2,,
";

const PLAYS: &str = "\
song,artist,20240101,20240102
ItemA,PersonX,2,
ItemB,PersonY,1,3
";

const REQUESTS: &str = "\
song,artist,20240101,20240102
ItemA,PersonX,G,
ItemB,PersonY,,?
";

fn sources() -> Sources {
    Sources::new()
        .csv(SourceName::Catalog, CATALOG)
        .csv(SourceName::Plays, PLAYS)
        .csv(SourceName::Requests, REQUESTS)
}

fn loaded() -> Session {
    let mut session = Session::new();
    session.load(sources(), &columns::REQUIRED_CATALOG).unwrap();
    session
}

#[test]
fn test_load_filter_sort_cycle() {
    let mut session = loaded();

    let outcome = session
        .filter(&FilterCriteria::new().tabbers(["Bea"]))
        .unwrap();
    assert_eq!(outcome.row_count, 2);

    let table = session
        .sort(Some("difficulty"), SortDirection::Ascending)
        .unwrap();
    let songs: Vec<_> = table.rows().iter().map(|r| r.item.key.song()).collect();
    assert_eq!(songs, vec!["ItemC", "ItemA"]);
}

#[test]
fn test_reload_replaces_previous_data() {
    let mut session = loaded();
    session.filter(&FilterCriteria::new()).unwrap();

    let smaller = Sources::new()
        .csv(
            SourceName::Catalog,
            CATALOG.lines().take(2).collect::<Vec<_>>().join("\n"),
        )
        .csv(SourceName::Plays, PLAYS)
        .csv(SourceName::Requests, REQUESTS);
    let snapshot = session.load(smaller, &columns::REQUIRED_CATALOG).unwrap();

    assert_eq!(snapshot.catalog.len(), 1);
    assert!(session.current_result().is_none());
}

#[test]
fn test_schema_error_surfaces_through_session() {
    let mut session = Session::new();
    let sources = sources().csv(SourceName::Catalog, "song,artist\nA,X\n");

    let err = session
        .load(sources, &columns::REQUIRED_CATALOG)
        .unwrap_err();

    assert!(matches!(err, SessionError::Load(_)));
    assert!(err.to_string().starts_with("tabdb.csv is missing required columns: year"));
}

#[test]
fn test_filter_command_outputs_enriched_rows() {
    let mut session = loaded();
    let args = FilterArgs {
        year: Some("2000,2010".to_string()),
        genders: vec!["female".to_string()],
        ..FilterArgs::default()
    };

    let output = execute(&mut session, &Command::Filter(args)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["row_count"], 1);
    let row = &json["table"]["rows"][0];
    assert_eq!(row["song"], "ItemA");
    assert_eq!(row["order_of_song_played"], 2);
    assert_eq!(row["requested_by"], "Group");
    assert_eq!(row["capo"], 2);
}

#[test]
fn test_merge_command_declares_column_shapes() {
    let mut session = loaded();

    let output = execute(&mut session, &Command::Merge).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["columns"][0]["shape"], "scalar");
    assert_eq!(json["columns"][2]["name"], "date");
    assert_eq!(json["columns"][2]["shape"], "list");
    assert_eq!(json["rows"].as_array().unwrap().len(), 2);
}

#[test]
fn test_stats_and_options_commands() {
    let mut session = loaded();

    let output = execute(
        &mut session,
        &Command::Stats {
            filter: FilterArgs::default(),
            bins: 2,
        },
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["rows"], 3);
    assert_eq!(json["difficulty"].as_array().unwrap().len(), 2);
    assert_eq!(json["genders"][0]["value"], "Female");
    assert_eq!(json["genders"][0]["count"], 2);

    let output = execute(
        &mut session,
        &Command::Options {
            column: "tabber".to_string(),
        },
    )
    .unwrap();
    let values: Vec<String> = serde_json::from_str(&output).unwrap();
    assert_eq!(values, vec!["Bea", "Joh"]);
}
