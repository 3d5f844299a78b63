//! Raw deadline candidates, in each upstream domain's own shape.
//!
//! Field names follow the upstream JSON (camelCase). Urgency and status stay
//! as free strings here; [`crate::normalize`] maps them onto the closed enums.

use serde::{Deserialize, Deserializer, Serialize};

use crate::deadline::Category;

/// Upstream writes domain-global deadlines with `"caseId": null`.
fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// A statutory housing-disrepair deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingCandidate {
    pub id: String,
    /// Housing calculators are case-scoped by their caller and often omit this.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub case_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub deadline_date: String,
    /// `urgent | high | medium | low`
    #[serde(default)]
    pub priority: Option<String>,
    /// `upcoming | due_today | overdue | passed`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub action_required: Option<String>,
}

/// A court / CPR procedural deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtCandidate {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub case_id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub is_overdue: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub cpr_rule: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub completed_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A deadline created by hand in the case file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualCandidate {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub case_id: String,
    pub title: String,
    pub due_date: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form; unknown or missing values normalize to MANUAL.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source_rule: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub completed_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A limitation-period expiry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitationCandidate {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub case_id: String,
    pub label: String,
    pub limitation_date: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Statutory basis, e.g. "Limitation Act 1980 s.11".
    #[serde(default)]
    pub basis: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub completed_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One candidate from any domain.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainCandidate {
    Court(CourtCandidate),
    Housing(HousingCandidate),
    Limitation(LimitationCandidate),
    Manual(ManualCandidate),
}

impl DomainCandidate {
    /// Domain this candidate was fetched from.
    pub fn category(&self) -> Category {
        match self {
            Self::Court(_) => Category::Court,
            Self::Housing(_) => Category::Housing,
            Self::Limitation(_) => Category::Limitation,
            Self::Manual(_) => Category::Manual,
        }
    }

    /// Upstream identifier, for log lines about this candidate.
    pub fn id(&self) -> &str {
        match self {
            Self::Court(c) => &c.id,
            Self::Housing(c) => &c.id,
            Self::Limitation(c) => &c.id,
            Self::Manual(c) => &c.id,
        }
    }

    /// Owning case; empty for domain-global deadlines.
    pub fn case_id(&self) -> &str {
        match self {
            Self::Court(c) => &c.case_id,
            Self::Housing(c) => &c.case_id,
            Self::Limitation(c) => &c.case_id,
            Self::Manual(c) => &c.case_id,
        }
    }

    /// Decode one JSON record in the shape of `category`.
    ///
    /// Decoding is per record so one bad element does not sink a whole list.
    pub fn from_json(category: Category, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match category {
            Category::Court => Self::Court(serde_json::from_value(value)?),
            Category::Housing => Self::Housing(serde_json::from_value(value)?),
            Category::Limitation => Self::Limitation(serde_json::from_value(value)?),
            Category::Manual => Self::Manual(serde_json::from_value(value)?),
        })
    }
}

/// Candidates for one evaluation, one list per domain.
///
/// Any list may be empty, including when its source failed upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    pub court: Vec<CourtCandidate>,
    pub housing: Vec<HousingCandidate>,
    pub limitation: Vec<LimitationCandidate>,
    pub manual: Vec<ManualCandidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a candidate into its domain's list, preserving arrival order.
    pub fn push(&mut self, candidate: DomainCandidate) {
        match candidate {
            DomainCandidate::Court(c) => self.court.push(c),
            DomainCandidate::Housing(c) => self.housing.push(c),
            DomainCandidate::Limitation(c) => self.limitation.push(c),
            DomainCandidate::Manual(c) => self.manual.push(c),
        }
    }

    pub fn len(&self) -> usize {
        self.court.len() + self.housing.len() + self.limitation.len() + self.manual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<DomainCandidate> for CandidateSet {
    fn extend<I: IntoIterator<Item = DomainCandidate>>(&mut self, iter: I) {
        for c in iter {
            self.push(c);
        }
    }
}

impl FromIterator<DomainCandidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = DomainCandidate>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
