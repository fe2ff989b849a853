use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text_manipulators::squash_label;

/// One of the per-team statistics tables on a season's team-stats page.
///
/// The declaration order is the merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    RushingOffense,
    RushingDefense,
    PassingOffense,
    PassingDefense,
    MiscPassingOffense,
    MiscPassingDefense,
    Linemen,
    OppLinemen,
    RedZoneOffense,
    RedZoneDefense,
    Miscellaneous,
    MiscOpponents,
    Kicking,
    OppKicking,
    Returns,
    ScoringTurnovers,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::RushingOffense,
        Category::RushingDefense,
        Category::PassingOffense,
        Category::PassingDefense,
        Category::MiscPassingOffense,
        Category::MiscPassingDefense,
        Category::Linemen,
        Category::OppLinemen,
        Category::RedZoneOffense,
        Category::RedZoneDefense,
        Category::Miscellaneous,
        Category::MiscOpponents,
        Category::Kicking,
        Category::OppKicking,
        Category::Returns,
        Category::ScoringTurnovers,
    ];

    /// The text of the table's first header cell.
    pub fn label(&self) -> &'static str {
        match self {
            Category::RushingOffense => "Rushing Offense",
            Category::RushingDefense => "Rushing Defense",
            Category::PassingOffense => "Passing Offense",
            Category::PassingDefense => "Passing Defense",
            Category::MiscPassingOffense => "Misc. Passing Offense",
            Category::MiscPassingDefense => "Misc. Passing Defense",
            Category::Linemen => "Linemen",
            Category::OppLinemen => "Opp. Linemen",
            Category::RedZoneOffense => "Red Zone Offense",
            Category::RedZoneDefense => "Red Zone Defense",
            Category::Miscellaneous => "Miscellaneous",
            Category::MiscOpponents => "Misc. Opponents",
            Category::Kicking => "Kicking",
            Category::OppKicking => "Opp. Kicking",
            Category::Returns => "Returns",
            Category::ScoringTurnovers => "Scoring/Turnovers",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a category's colliding column names are disambiguated during the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixRule {
    /// Stats allowed by the team: the shared `_vs` suffix.
    Opponent,
    /// `_` followed by the category label with whitespace and punctuation removed.
    Label,
}

impl SuffixRule {
    pub fn suffix_for(&self, category: Category) -> String {
        match self {
            SuffixRule::Opponent => "_vs".to_string(),
            SuffixRule::Label => format!("_{}", squash_label(category.label())),
        }
    }
}

/// Per-category suffix rules. Categories without an entry use [`SuffixRule::Label`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffixPolicy {
    rules: Vec<(Category, SuffixRule)>,
}

impl SuffixPolicy {
    pub fn new(rules: Vec<(Category, SuffixRule)>) -> Self {
        Self { rules }
    }

    pub fn rule(&self, category: Category) -> SuffixRule {
        self.rules
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rule)| *rule)
            .unwrap_or(SuffixRule::Label)
    }

    pub fn suffix(&self, category: Category) -> String {
        self.rule(category).suffix_for(category)
    }
}

impl Default for SuffixPolicy {
    fn default() -> Self {
        let opponent_views = [
            Category::RushingDefense,
            Category::PassingDefense,
            Category::MiscPassingDefense,
            Category::OppLinemen,
            Category::RedZoneDefense,
            Category::MiscOpponents,
            Category::OppKicking,
        ];
        Self::new(
            opponent_views
                .into_iter()
                .map(|c| (c, SuffixRule::Opponent))
                .collect(),
        )
    }
}
