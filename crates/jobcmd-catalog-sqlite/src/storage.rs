use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use jobcmd_catalog::ResourceCatalog;
use jobcmd_core::{Resource, ResourceType};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(db_path).with_context(|| format!("open sqlite db {}", db_path.display()))?;
        let init_sql = include_str!("../migrations/0001_init.sql");
        conn.execute_batch(init_sql).context("migrate catalog schema")?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn str_to_kind(s: &str) -> ResourceType {
        match s {
            "UDF" => ResourceType::Udf,
            _ => ResourceType::File,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("catalog connection lock poisoned"))
    }

    pub fn insert_resource(&self, resource: &Resource, created_at: i64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO resources(id, full_name, kind, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![resource.id, resource.full_name, resource.kind.as_str(), created_at],
        )
        .with_context(|| format!("insert resource {}", resource.id))?;
        Ok(())
    }

    pub fn list_resources(&self) -> Result<Vec<Resource>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, full_name, kind FROM resources ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Resource {
                id: r.get(0)?,
                full_name: r.get(1)?,
                kind: Self::str_to_kind(&r.get::<_, String>(2)?),
            })
        })?;
        let mut out = vec![];
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

impl ResourceCatalog for SqliteCatalog {
    fn get_resource_by_id(&self, id: i32) -> Result<Option<Resource>> {
        let conn = self.lock()?;
        let resource = conn
            .query_row("SELECT id, full_name, kind FROM resources WHERE id = ?1", [id], |r| {
                Ok(Resource {
                    id: r.get(0)?,
                    full_name: r.get(1)?,
                    kind: Self::str_to_kind(&r.get::<_, String>(2)?),
                })
            })
            .optional()
            .with_context(|| format!("query resource {id}"))?;
        Ok(resource)
    }
}

pub fn now_unix() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or_default()
}
