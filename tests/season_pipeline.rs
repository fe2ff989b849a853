use pretty_assertions::assert_eq;
use rzb_stats::{
    Category, Cell, PipelineTables, RecordSet, ScrapeError, SuffixPolicy, assemble_season,
    csv_export::{read_csv, write_csv},
    historic::summarize,
    pipeline::ScrapedSeasons,
    tables::{DerivedColumn, Derivation},
};

const TEAMS: usize = 8;

fn team_name(i: usize) -> String {
    format!("Team {i}")
}

fn category_table(category: Category) -> String {
    let mut html = String::from(r##"<table bordercolor="#800000" width="95%">"##);
    html.push_str(&format!(
        "<tr><th>{}</th><th>Att</th><th>Yds</th><th>Avg</th></tr>",
        category.label()
    ));
    for i in 1..=TEAMS {
        html.push_str(&format!(
            "<tr><td> {} </td><td>{}</td><td>{}</td><td>{:.1}</td></tr>",
            team_name(i),
            10 * i,
            100 * i,
            10.0
        ));
    }
    html.push_str("</table>");
    html
}

fn stats_page(skip: Option<Category>) -> String {
    let tables: Vec<String> = Category::ALL
        .into_iter()
        .filter(|c| Some(*c) != skip)
        .map(category_table)
        .collect();
    format!(
        r#"<html><body><table width="100%"><tr><th>Team Stats</th></tr></table>{}</body></html>"#,
        tables.join("\n")
    )
}

fn standings_page() -> String {
    let mut rows = String::new();
    for i in 1..=TEAMS {
        let name = if i == 1 {
            format!("{} (WC)", team_name(i))
        } else {
            team_name(i)
        };
        let wins = i + 4;
        rows.push_str(&format!(
            "<tr><td>{name}</td><td>{wins}</td><td>{}</td><td>0</td><td>.500</td><td>{}</td><td>300</td><td>6-6</td><td>3-3</td></tr>",
            16 - wins,
            300 + 10 * i
        ));
    }
    format!(
        r##"<html><body><table bordercolor="#800000" width="80%">
            <tr><td>Team</td><td>W</td><td>L</td><td>T</td><td>Pct</td><td>PF</td><td>PA</td><td>Conf</td><td>Div</td></tr>
            <tr><td colspan="9">Northern Division</td></tr>
            {rows}
        </table></body></html>"##
    )
}

fn assembled() -> RecordSet {
    assemble_season(&stats_page(None), &standings_page(), 2063, &SuffixPolicy::default())
        .unwrap()
}

#[test]
fn eight_teams_assemble_into_eight_rows() {
    let records = assembled();
    assert_eq!(records.len(), TEAMS);

    // 16 tables of 4 columns share one team column; standings add 7, season 1.
    assert_eq!(records.width(), 16 * 4 - 15 + 7 + 1);

    let w = records.column("W").unwrap();
    let wins = records.column("Wins").unwrap();
    let pythag = records.column("pythag_wins").unwrap();
    for i in 0..TEAMS {
        assert!(!pythag[i].is_missing(), "row {i}");
        assert_eq!(wins[i], w[i]);
    }
    assert_eq!(records.column("Year").unwrap()[0], &Cell::Number(2063.0));
}

#[test]
fn merged_columns_follow_the_suffix_policy() {
    let records = assembled();
    let columns = records.columns();
    assert_eq!(&columns[..7], &["Team", "Att", "Yds", "Avg", "Att_vs", "Yds_vs", "Avg_vs"]);
    assert_eq!(&columns[7..10], &["Att_PassingOffense", "Yds_PassingOffense", "Avg_PassingOffense"]);
    assert_eq!(
        &columns[46..49],
        &["Att_ScoringTurnovers", "Yds_ScoringTurnovers", "Avg_ScoringTurnovers"]
    );
    assert_eq!(
        &columns[49..],
        &["W", "L", "T", "PF", "PA", "Wins", "pythag_wins", "Year"]
    );
}

#[test]
fn seeded_team_matches_its_stats_row() {
    let records = assembled();
    let team = records.column("Team").unwrap();
    let w = records.column("W").unwrap();
    assert_eq!(team[0], &Cell::text("Team 1"));
    assert_eq!(w[0], &Cell::Number(5.0));
}

#[test]
fn a_missing_category_fails_the_season() {
    let err = assemble_season(
        &stats_page(Some(Category::Returns)),
        &standings_page(),
        2050,
        &SuffixPolicy::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::MissingTable {
            category: Category::Returns,
            season: 2050
        }
    ));
}

fn fixture_tables() -> PipelineTables {
    PipelineTables {
        curated_columns: vec![
            ("1Team".into(), "team".into()),
            ("3Yds".into(), "run_yds".into()),
            ("6Yds_vs".into(), "run_yds_vs".into()),
            ("55Wins".into(), "wins".into()),
            ("56pythag_wins".into(), "pythag_wins".into()),
            ("57Year".into(), "year".into()),
        ],
        derived_columns: vec![DerivedColumn {
            name: "yds_margin".into(),
            derivation: Derivation::Difference {
                minuend: "run_yds".into(),
                subtrahend: "run_yds_vs".into(),
            },
        }],
        historic_columns: ["team", "year", "pythag_wins", "wins", "yds_margin"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        plotted_metrics: vec!["yds_margin".into()],
        ..PipelineTables::default()
    }
}

#[test]
fn curated_seasons_feed_the_historic_summary() {
    let tables = fixture_tables();
    let scraped = ScrapedSeasons::from_assembled(vec![assembled(), assembled()], &tables).unwrap();
    assert_eq!(scraped.combined.len(), 2 * TEAMS);
    assert_eq!(
        scraped.curated.columns(),
        &["team", "run_yds", "run_yds_vs", "wins", "pythag_wins", "year", "yds_margin"]
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filtered_stats.csv");
    write_csv(&scraped.curated, &path).unwrap();
    let reloaded = read_csv(&path).unwrap();

    let summary = summarize(&reloaded, &tables).unwrap();
    assert_eq!(summary.filtered.len(), 2 * TEAMS);
    // Wins 5..=12, one bucket each.
    assert_eq!(summary.averages.len(), TEAMS);
    assert_eq!(summary.averages.columns(), &["wins", "pythag_wins", "yds_margin"]);
    assert_eq!(summary.averages.rows()[0][0], Cell::Number(5.0));
    assert_eq!(summary.averages.rows()[0][2], Cell::Number(0.0));
}
