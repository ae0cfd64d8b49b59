use jobcmd_core::Resource;

/// Read access to the resource catalog. Shared across concurrent builds.
pub trait ResourceCatalog: Send + Sync {
    /// `Ok(None)` when no resource has this id; `Err` only for lookup failures.
    fn get_resource_by_id(&self, id: i32) -> anyhow::Result<Option<Resource>>;
}
