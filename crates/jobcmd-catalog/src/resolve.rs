use jobcmd_core::{BuildError, ResourceInfo, Result};
use tracing::{debug, error};

use crate::traits::ResourceCatalog;

/// Drop one leading `/`, if any. Nothing else about the path is touched.
pub fn strip_leading_separator(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Canonical path for a resource reference.
///
/// Literal references (`id == 0`) never reach the catalog.
pub fn resolve_resource(reference: &ResourceInfo, catalog: &dyn ResourceCatalog) -> Result<String> {
    if !reference.needs_lookup() {
        return Ok(strip_leading_separator(&reference.res).to_string());
    }

    let id = reference.id;
    debug!(id, "looking up resource in catalog");
    let resource = catalog
        .get_resource_by_id(id)
        .map_err(|cause| BuildError::Catalog { id, cause })?;

    match resource {
        Some(r) => Ok(strip_leading_separator(&r.full_name).to_string()),
        None => {
            error!("resource id: {} not exist", id);
            Err(BuildError::ResourceNotFound { id })
        }
    }
}
