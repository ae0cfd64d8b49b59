use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use jobcmd_core::{Resource, ResourceType};

use crate::traits::ResourceCatalog;

/// In-memory catalog for tests and embedded use.
#[derive(Default)]
pub struct InMemoryCatalog {
    inner: Mutex<HashMap<i32, Resource>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<'a>(entries: impl IntoIterator<Item = (i32, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(id, full_name)| {
                (id, Resource { id, full_name: full_name.to_string(), kind: ResourceType::File })
            })
            .collect();
        Self { inner: Mutex::new(map) }
    }

    pub fn insert(&self, resource: Resource) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().map_err(|_| anyhow!("catalog lock poisoned"))?;
        inner.insert(resource.id, resource);
        Ok(())
    }
}

impl ResourceCatalog for InMemoryCatalog {
    fn get_resource_by_id(&self, id: i32) -> anyhow::Result<Option<Resource>> {
        let inner = self.inner.lock().map_err(|_| anyhow!("catalog lock poisoned"))?;
        Ok(inner.get(&id).cloned())
    }
}
