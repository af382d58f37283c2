mod common;

use common::{individual_sides, individual_volume, table, team_sides, team_volume};
use real_trends_report::ReportError;
use real_trends_report::model::{Cell, DataSubset};
use real_trends_report::rank::{merge_and_rank, rank_subset};
use real_trends_report::record::{IndividualRecord, TeamRecord};

#[test]
fn matched_volume_is_parsed_onto_the_sides_record() {
    let ranked = rank_subset(
        "georgia",
        DataSubset::Individuals,
        &individual_sides(),
        &individual_volume(),
    )
    .expect("ranked");

    let jane = ranked.row_by_identity("Jane Doe").expect("Jane Doe present");
    assert_eq!(jane.transactions, 10);
    assert_eq!(jane.volume, 500_000.0);
}

#[test]
fn volume_only_identities_are_left_out() {
    let ranked = rank_subset(
        "georgia",
        DataSubset::Individuals,
        &individual_sides(),
        &individual_volume(),
    )
    .expect("ranked");

    assert_eq!(ranked.rows.len(), 2);
    assert!(ranked.row_by_identity("Only Volume").is_none());
}

#[test]
fn individuals_lead_with_full_name_and_drop_name_parts() {
    let ranked = rank_subset(
        "georgia",
        DataSubset::Individuals,
        &individual_sides(),
        &individual_volume(),
    )
    .expect("ranked");

    assert_eq!(
        ranked.headings,
        vec!["Rank", "Full Name", "Brokerage", "Transactions", "Volume"]
    );
    assert_eq!(ranked.rows[0].cells[0], Cell::Text("Jane Doe".into()));
    assert!(!ranked.headings.iter().any(|h| h == "First Name" || h == "Last Name"));
}

#[test]
fn sorted_by_transactions_then_volume() {
    let sides = table(
        &["Rank", "Team Name", "Transactions"],
        &[&["1", "A", "10"], &["2", "B", "10"], &["3", "C", "5"]],
    );
    let volume = table(
        &["Rank", "Team Name", "Volume"],
        &[&["1", "C", "$300"], &["2", "A", "$100"], &["3", "B", "$200"]],
    );

    let ranked = merge_and_rank::<TeamRecord>("georgia", DataSubset::TeamsSmall, &sides, &volume)
        .expect("ranked");

    let order: Vec<(&str, usize)> = ranked
        .rows
        .iter()
        .map(|row| (row.identity.as_str(), row.rank))
        .collect();
    assert_eq!(order, vec![("B", 1), ("A", 2), ("C", 3)]);
}

#[test]
fn exact_ties_keep_published_order() {
    let sides = table(
        &["Rank", "Team Name", "Transactions"],
        &[&["1", "First", "4"], &["2", "Second", "4"], &["3", "Third", "4"]],
    );
    let volume = table(&["Rank", "Team Name", "Volume"], &[]);

    let ranked = merge_and_rank::<TeamRecord>("ohio", DataSubset::TeamsMega, &sides, &volume)
        .expect("ranked");

    let names: Vec<&str> = ranked.rows.iter().map(|row| row.identity.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
    assert!(ranked.rows.iter().all(|row| row.volume == 0.0));
}

#[test]
fn ranks_are_contiguous_for_any_size() {
    for size in 0..25usize {
        let rows: Vec<Vec<String>> = (0..size)
            .map(|i| {
                vec![
                    (size - i).to_string(),
                    format!("Team {i}"),
                    ((i * 7) % 5).to_string(),
                ]
            })
            .collect();
        let row_refs: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect();
        let row_slices: Vec<&[&str]> = row_refs.iter().map(Vec::as_slice).collect();
        let sides = table(&["Rank", "Team Name", "Transactions"], &row_slices);
        let volume = table(&["Team Name", "Volume"], &[]);

        let ranked = rank_subset("texas", DataSubset::TeamsLarge, &sides, &volume)
            .expect("ranked");

        let ranks: Vec<usize> = ranked.rows.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, (1..=size).collect::<Vec<_>>());
    }
}

#[test]
fn source_rank_column_is_replaced() {
    let ranked = rank_subset(
        "georgia",
        DataSubset::TeamsSmall,
        &team_sides(),
        &team_volume(),
    )
    .expect("ranked");

    assert_eq!(ranked.headings.iter().filter(|h| *h == "Rank").count(), 1);
    assert_eq!(
        ranked.headings,
        vec!["Rank", "Team Name", "Brokerage", "City", "State", "Transactions", "Volume"]
    );
    assert_eq!(ranked.rows[0].identity, "Beta Group");
    assert_eq!(ranked.rows[0].rank, 1);
}

#[test]
fn team_subset_end_to_end() {
    let ranked = rank_subset(
        "georgia",
        DataSubset::TeamsMedium,
        &team_sides(),
        &team_volume(),
    )
    .expect("ranked");

    let summary: Vec<(usize, &str, u64, f64)> = ranked
        .rows
        .iter()
        .map(|row| (row.rank, row.identity.as_str(), row.transactions, row.volume))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "Beta Group", 12, 3_400_000.0),
            (2, "Alpha Team", 12, 2_100_000.0),
            (3, "Gamma Co", 7, 0.0),
        ]
    );
    assert_eq!(
        ranked.rows[0].cells,
        vec![
            Cell::Text("Beta Group".into()),
            Cell::Text("RE/MAX".into()),
            Cell::Text("Savannah".into()),
            Cell::Text("GA".into()),
            Cell::Number(12.0),
        ]
    );
    assert_eq!(ranked.sheet_name(), "georgia_teams-medium");
}

#[test]
fn duplicate_volume_identities_use_the_first_row() {
    let sides = table(&["Team Name", "Transactions"], &[&["Alpha", "3"]]);
    let volume = table(
        &["Team Name", "Volume"],
        &[&["Alpha", "$900"], &["Alpha", "$100"]],
    );

    let ranked = rank_subset("iowa", DataSubset::TeamsSmall, &sides, &volume).expect("ranked");

    assert_eq!(ranked.rows.len(), 1);
    assert_eq!(ranked.rows[0].volume, 900.0);
}

#[test]
fn missing_identity_column_is_a_schema_error() {
    let sides = table(&["Rank", "Name", "Transactions"], &[&["1", "Alpha", "3"]]);

    let error = merge_and_rank::<TeamRecord>("utah", DataSubset::TeamsSmall, &sides, &team_volume())
        .expect_err("schema mismatch");

    match error {
        ReportError::MissingColumn { column, table } => {
            assert_eq!(column, "Team Name");
            assert_eq!(table, "teams-small sides");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn volume_table_without_name_parts_is_a_schema_error() {
    let volume = table(&["Rank", "Full Name", "Volume"], &[&["1", "Jane Doe", "$1"]]);

    let error = merge_and_rank::<IndividualRecord>(
        "utah",
        DataSubset::Individuals,
        &individual_sides(),
        &volume,
    )
    .expect_err("schema mismatch");

    assert!(matches!(
        error,
        ReportError::MissingColumn { ref column, ref table }
            if column == "First Name" && table == "individuals volume"
    ));
}

#[test]
fn missing_volume_column_is_a_schema_error() {
    let volume = table(&["Rank", "Team Name"], &[&["1", "Alpha Team"]]);

    let error = rank_subset("utah", DataSubset::TeamsSmall, &team_sides(), &volume)
        .expect_err("schema mismatch");

    assert!(error.to_string().contains("'Volume'"));
}
