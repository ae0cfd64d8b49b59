use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Spark major version a job is submitted with.
///
/// Anything that is not recognisably Spark 1 or Spark 2 is kept verbatim in
/// `Unrecognized` so callers can log it; it is submitted as Spark 2.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SparkVersion {
    Spark1,
    #[default]
    Spark2,
    Unrecognized(String),
}

impl From<String> for SparkVersion {
    fn from(s: String) -> Self {
        match s.trim() {
            "SPARK1" | "V1" => SparkVersion::Spark1,
            "SPARK2" | "V2" => SparkVersion::Spark2,
            _ => SparkVersion::Unrecognized(s),
        }
    }
}

impl From<SparkVersion> for String {
    fn from(v: SparkVersion) -> Self {
        match v {
            SparkVersion::Spark1 => "SPARK1".to_string(),
            SparkVersion::Spark2 => "SPARK2".to_string(),
            SparkVersion::Unrecognized(s) => s,
        }
    }
}

impl SparkVersion {
    pub fn is_spark1(&self) -> bool {
        matches!(self, SparkVersion::Spark1)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    Cluster,
    Client,
    Local,
}

impl DeployMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployMode::Cluster => "cluster",
            DeployMode::Client => "client",
            DeployMode::Local => "local",
        }
    }
}

impl FromStr for DeployMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cluster" => Ok(DeployMode::Cluster),
            "client" => Ok(DeployMode::Client),
            "local" => Ok(DeployMode::Local),
            other => Err(format!("unknown deploy mode: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramType {
    Java,
    Scala,
    Python,
}

/// Whether a parameter flows into the task or is produced by it.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direct {
    #[default]
    In,
    Out,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    #[default]
    Varchar,
    Integer,
    Long,
    Float,
    Double,
    Date,
    Time,
    Timestamp,
    Boolean,
    List,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    #[default]
    File,
    Udf,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::File => "FILE",
            ResourceType::Udf => "UDF",
        }
    }
}

/// Job engines a task type can be dispatched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Spark,
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPARK" => Ok(EngineKind::Spark),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Spark => f.write_str("SPARK"),
        }
    }
}
