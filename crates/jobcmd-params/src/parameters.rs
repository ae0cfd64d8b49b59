use std::collections::BTreeMap;

use jobcmd_core::{properties_by_name, Property, ResourceInfo, SparkParameters, ValidationError};

/// What every engine's task parameters expose to the worker.
pub trait TaskParameters: Send + Sync {
    fn check_parameters(&self) -> Result<(), ValidationError>;

    fn local_parameters_map(&self) -> BTreeMap<String, Property>;

    /// Resources that must be staged next to the job before launch.
    fn resource_files_list(&self) -> Vec<ResourceInfo>;
}

impl TaskParameters for SparkParameters {
    fn check_parameters(&self) -> Result<(), ValidationError> {
        crate::decode::validate(self)
    }

    fn local_parameters_map(&self) -> BTreeMap<String, Property> {
        properties_by_name(&self.local_params)
    }

    fn resource_files_list(&self) -> Vec<ResourceInfo> {
        let mut out: Vec<ResourceInfo> = Vec::new();
        for r in self.main_jar.iter().chain(self.resource_list.iter()) {
            if !out.contains(r) {
                out.push(r.clone());
            }
        }
        out
    }
}
