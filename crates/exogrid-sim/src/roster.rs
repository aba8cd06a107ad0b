//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Static suit metadata served to the dashboard."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use chrono::NaiveDate;
use exogrid_common::config::SuitConfig;
use serde::{Deserialize, Serialize};

/// Reference metadata for one exosuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitProfile {
    pub id: String,
    pub asset_tag: String,
    pub operator: String,
    pub site: String,
    pub model: String,
    pub commissioned: NaiveDate,
}

impl From<SuitConfig> for SuitProfile {
    fn from(config: SuitConfig) -> Self {
        Self {
            id: config.id,
            asset_tag: config.asset_tag,
            operator: config.operator,
            site: config.site,
            model: config.model,
            commissioned: config.commissioned,
        }
    }
}

/// Ordered, non-empty fleet list. The first entry doubles as the fallback profile.
#[derive(Debug, Clone)]
pub struct SuitRoster {
    suits: Vec<SuitProfile>,
}

impl Default for SuitRoster {
    fn default() -> Self {
        Self {
            suits: builtin_fleet(),
        }
    }
}

impl SuitRoster {
    /// Build from configuration entries, keeping the built-in fleet when none are given.
    pub fn from_config(entries: &[SuitConfig]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }
        Self {
            suits: entries.iter().cloned().map(SuitProfile::from).collect(),
        }
    }

    pub fn suits(&self) -> &[SuitProfile] {
        &self.suits
    }

    pub fn get(&self, id: &str) -> Option<&SuitProfile> {
        self.suits.iter().find(|suit| suit.id == id)
    }

    /// Look up `id`, falling back to the first suit for unknown ids.
    pub fn find(&self, id: &str) -> &SuitProfile {
        self.get(id).unwrap_or_else(|| self.fallback())
    }

    pub fn fallback(&self) -> &SuitProfile {
        // from_config and default never build an empty list
        &self.suits[0]
    }
}

fn builtin_fleet() -> Vec<SuitProfile> {
    [
        ("XS-001", "Anna K.", "Linz Plant A", (2025, 6, 12)),
        ("XS-002", "Michael T.", "Graz Logistics", (2025, 7, 3)),
        ("XS-003", "Rahim S.", "Vienna Assembly", (2025, 8, 20)),
        ("XS-004", "Laura M.", "Leoben R&D", (2025, 9, 2)),
    ]
    .into_iter()
    .map(|(id, operator, site, (y, m, d))| SuitProfile {
        id: id.to_owned(),
        asset_tag: format!("EXO-{id}"),
        operator: operator.to_owned(),
        site: site.to_owned(),
        model: "ExoGrid X1".to_owned(),
        commissioned: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
    })
    .collect()
}
