use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Which execution adapter a resolved unit was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    Legacy,
    Modern,
}

/// Serializable outline of an assembled suite.
///
/// All payloads carry an explicit `schemaVersion` field to allow additive
/// evolution without breaking consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteOutline {
    pub schema_version: u32,
    pub suite: OutlineSuite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineSuite {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum OutlineEntry {
    #[serde(rename = "suite")]
    Suite(OutlineSuite),
    #[serde(rename = "test")]
    Test(OutlineTest),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineTest {
    pub id: String,
    pub adapter: AdapterKind,
    pub case_count: u32,
}
