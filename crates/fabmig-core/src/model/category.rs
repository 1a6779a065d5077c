use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Artifact type; names are unique only within one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectCategory {
    Datasets,
    Reports,
    Dashboards,
    Dataflows,
    Pipelines,
    Lakehouses,
    DataWarehouses,
}

impl ObjectCategory {
    /// Every category, in the order a run processes them
    pub const ALL: [ObjectCategory; 7] = [
        ObjectCategory::Datasets,
        ObjectCategory::Reports,
        ObjectCategory::Dashboards,
        ObjectCategory::Dataflows,
        ObjectCategory::Pipelines,
        ObjectCategory::Lakehouses,
        ObjectCategory::DataWarehouses,
    ];

    /// Tag name; also the snapshot file stem and the listing key
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectCategory::Datasets => "datasets",
            ObjectCategory::Reports => "reports",
            ObjectCategory::Dashboards => "dashboards",
            ObjectCategory::Dataflows => "dataflows",
            ObjectCategory::Pipelines => "pipelines",
            ObjectCategory::Lakehouses => "lakehouses",
            ObjectCategory::DataWarehouses => "data_warehouses",
        }
    }

    /// Collection path segment under `/workspaces/{id}/`
    pub fn segment(&self) -> &'static str {
        match self {
            ObjectCategory::Datasets => "datasets",
            ObjectCategory::Reports => "reports",
            ObjectCategory::Dashboards => "dashboards",
            ObjectCategory::Dataflows => "dataflows",
            ObjectCategory::Pipelines => "dataPipelines",
            ObjectCategory::Lakehouses => "lakehouses",
            ObjectCategory::DataWarehouses => "warehouses",
        }
    }

    /// Snapshot artifact name, e.g. `datasets.json`
    pub fn snapshot_file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown object category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for ObjectCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ObjectCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
