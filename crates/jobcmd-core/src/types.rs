use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::*;

/// Reference to a resource the job needs.
///
/// `id == 0` means `res` is authoritative; any other id must be looked up in
/// the resource catalog, after which `res` holds the canonical path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceInfo {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub res: String,
}

impl ResourceInfo {
    pub fn literal(res: impl Into<String>) -> Self {
        Self { id: 0, res: res.into() }
    }

    pub fn by_id(id: i32) -> Self {
        Self { id, res: String::new() }
    }

    pub fn needs_lookup(&self) -> bool {
        self.id != 0
    }
}

/// A named task parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "prop")]
    pub name: String,
    #[serde(default)]
    pub direct: Direct,
    #[serde(rename = "type", default)]
    pub data_type: DataType,
    #[serde(default)]
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direct: Direct::In,
            data_type: DataType::Varchar,
            value: value.into(),
        }
    }
}

/// Catalog entry for an uploaded resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i32,
    /// Full name as stored by the catalog, usually with a leading `/`.
    pub full_name: String,
    pub kind: ResourceType,
}

/// Spark task parameters as authored by the user.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparkParameters {
    #[serde(default)]
    pub main_jar: Option<ResourceInfo>,
    #[serde(default)]
    pub main_class: Option<String>,
    #[serde(default)]
    pub deploy_mode: Option<DeployMode>,
    #[serde(default)]
    pub driver_cores: Option<u32>,
    #[serde(default)]
    pub driver_memory: Option<String>,
    #[serde(default)]
    pub num_executors: Option<u32>,
    #[serde(default)]
    pub executor_cores: Option<u32>,
    #[serde(default)]
    pub executor_memory: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    /// Extra submit options passed through verbatim (e.g. `--conf k=v --jars x.jar`).
    #[serde(default)]
    pub others: Option<String>,
    #[serde(default)]
    pub program_type: Option<ProgramType>,
    #[serde(default)]
    pub spark_version: Option<SparkVersion>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub main_args: Vec<String>,
    #[serde(default)]
    pub local_params: Vec<Property>,
    #[serde(default)]
    pub resource_list: Vec<ResourceInfo>,
    #[serde(default)]
    pub queue: Option<String>,
}

impl SparkParameters {
    pub fn version(&self) -> SparkVersion {
        self.spark_version.clone().unwrap_or_default()
    }
}

/// `mainArgs` is either one string (kept as a single token) or a list of tokens.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Args {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Args>::deserialize(deserializer)? {
        None => vec![],
        Some(Args::One(s)) if s.trim().is_empty() => vec![],
        Some(Args::One(s)) => vec![s],
        Some(Args::Many(v)) => v,
    })
}

/// Runtime bundle for one task attempt. Read-only to command construction.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    pub task_instance_id: String,
    /// Task type tag used to pick the job engine, e.g. `SPARK`.
    pub task_type: String,
    /// Raw JSON task parameters.
    pub task_params: String,
    /// Queue assigned by the scheduler; wins over any queue in the payload.
    pub queue: String,
    pub local_params: BTreeMap<String, Property>,
    pub global_params: BTreeMap<String, Property>,
    /// Values passed down from a parent workflow instance.
    pub params_map: Option<BTreeMap<String, Property>>,
    pub schedule_time: Option<NaiveDateTime>,
}

impl ExecutionContext {
    pub fn new(task_params: impl Into<String>, queue: impl Into<String>) -> Self {
        Self {
            task_instance_id: String::new(),
            task_type: EngineKind::Spark.to_string(),
            task_params: task_params.into(),
            queue: queue.into(),
            local_params: BTreeMap::new(),
            global_params: BTreeMap::new(),
            params_map: None,
            schedule_time: None,
        }
    }
}

/// Index a property list by name; later entries win.
pub fn properties_by_name(props: &[Property]) -> BTreeMap<String, Property> {
    props.iter().map(|p| (p.name.clone(), p.clone())).collect()
}
