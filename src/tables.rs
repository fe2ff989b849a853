use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{category::SuffixPolicy, rounding::RoundingTable};

/// A column computed from other columns of a curated season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedColumn {
    pub name: String,
    #[serde(flatten)]
    pub derivation: Derivation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Derivation {
    /// Sum of `numerator` columns over sum of `denominator` columns.
    Ratio {
        numerator: Vec<String>,
        denominator: Vec<String>,
    },
    Difference { minuend: String, subtrahend: String },
}

/// The hand-maintained constant tables that shape the pipeline's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineTables {
    pub suffix_policy: SuffixPolicy,
    /// Position-prefixed merged column -> curated name, in output order.
    pub curated_columns: Vec<(String, String)>,
    pub derived_columns: Vec<DerivedColumn>,
    pub rounding: RoundingTable,
    /// Columns kept by the historic stage, in output order. The first two are
    /// identifiers; everything from the third on is averaged.
    pub historic_columns: Vec<String>,
    pub plotted_metrics: Vec<String>,
}

impl PipelineTables {
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tables file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse tables file {}", path.display()))
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn ratio(name: &str, numerator: &[&str], denominator: &[&str]) -> DerivedColumn {
    DerivedColumn {
        name: name.to_string(),
        derivation: Derivation::Ratio {
            numerator: owned(numerator),
            denominator: owned(denominator),
        },
    }
}

const CURATED_COLUMNS: [(&str, &str); 40] = [
    ("1Team", "team"),
    ("3Yards", "run_yds"),
    ("4Avg", "ypc"),
    ("14Yards_vs", "run_yds_vs"),
    ("15Avg_vs", "ypc_vs"),
    ("24Att", "Att"),
    ("27Yards_PassingOffense", "pass_yds"),
    ("29Yds/A", "ypt"),
    ("31Rate", "Rate"),
    ("32PPly", "Pply"),
    ("39Yards_vs", "pass_yds_vs"),
    ("41Yds/A_vs", "ypt_vs"),
    ("43Rate_vs", "Rate_vs"),
    ("46OpPDPct_vs", "PDPct"),
    ("72KRB", "KRB"),
    ("75RPly", "Rply"),
    ("80SPct", "SPct"),
    ("84KRB_vs", "KRB_vs"),
    ("87RPly_vs", "Rply_vs"),
    ("92SPct_vs", "SPct_vs"),
    ("131Pnlty", "Pnlty"),
    ("154Avg_Kicking", "Punt_for"),
    ("156Avg_Kicking", "Net_punt"),
    ("167Avg_vs", "Net_punt_vs"),
    ("169Avg_Returns", "PR_avg"),
    ("171Avg_Returns", "KR_avg"),
    ("173Avg_Returns", "OppPR_avg"),
    ("175Avg_Returns", "OppKR_avg"),
    ("178Yds/G", "yds_per_game"),
    ("179OpYds/G", "ydsvs_per_game"),
    ("180Fum", "Fum"),
    ("181Int", "Int"),
    ("187W", "W"),
    ("188L", "L"),
    ("189T", "T"),
    ("190PF", "PF"),
    ("191PA", "PA"),
    ("192Wins", "wins"),
    ("193pythag_wins", "pythag_wins"),
    ("194Year", "year"),
];

const ROUNDING: [(&str, u32); 26] = [
    ("pythag_wins", 1),
    ("wins", 0),
    ("yds_per_game", 1),
    ("ydsvs_per_game", 1),
    ("Pen_per_snap", 1),
    ("Fum_per_snap", 3),
    ("Rate", 1),
    ("ypt", 2),
    ("Int_per_Att", 2),
    ("SPct", 2),
    ("ypc", 2),
    ("KRB_per_Rply", 1),
    ("Rate_vs", 1),
    ("PDPct", 1),
    ("Intvs_per_Att", 2),
    ("ypt_vs", 2),
    ("SPct_vs", 2),
    ("KRBvs_per_Rply", 1),
    ("ypc_vs", 2),
    ("PR_avg", 1),
    ("KR_avg", 1),
    ("Net_punt_vs", 1),
    ("OppPR_avg", 1),
    ("OppKR_avg", 1),
    ("Net_punt", 1),
    ("Punt_for", 1),
];

const PLOTTED_METRICS: [&str; 24] = [
    "yds_per_game",
    "ydsvs_per_game",
    "Pen_per_snap",
    "Fum_per_snap",
    "Rate",
    "ypt",
    "Int_per_Att",
    "SPct",
    "ypc",
    "KRB_per_Rply",
    "Rate_vs",
    "PDPct",
    "Intvs_per_Att",
    "ypt_vs",
    "SPct_vs",
    "KRBvs_per_Rply",
    "ypc_vs",
    "PR_avg",
    "KR_avg",
    "Net_punt_vs",
    "OppPR_avg",
    "OppKR_avg",
    "Net_punt",
    "Punt_for",
];

impl Default for PipelineTables {
    fn default() -> Self {
        let mut historic_columns = owned(&["team", "year", "pythag_wins", "wins"]);
        historic_columns.extend(owned(&PLOTTED_METRICS));

        Self {
            suffix_policy: SuffixPolicy::default(),
            curated_columns: CURATED_COLUMNS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            derived_columns: vec![
                ratio("Int_per_Att", &["Int"], &["Att"]),
                ratio("Fum_per_snap", &["Fum"], &["Pply", "Rply"]),
                ratio("KRB_per_Rply", &["KRB"], &["Rply"]),
                ratio("KRBvs_per_Rply", &["KRB_vs"], &["Rply_vs"]),
                ratio("Pen_per_snap", &["Pnlty"], &["Pply", "Rply"]),
                DerivedColumn {
                    name: "Ydsgain_per_game".to_string(),
                    derivation: Derivation::Difference {
                        minuend: "yds_per_game".to_string(),
                        subtrahend: "ydsvs_per_game".to_string(),
                    },
                },
            ],
            rounding: RoundingTable(
                ROUNDING
                    .iter()
                    .map(|(name, decimals)| (name.to_string(), *decimals))
                    .collect(),
            ),
            historic_columns,
            plotted_metrics: owned(&PLOTTED_METRICS),
        }
    }
}
