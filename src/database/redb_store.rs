use std::{path::Path, sync::Arc};

use redb::TableDefinition;
use tracing::{debug, info};

use paisa_common::consts::{ROOT_DATA_DIR, database_location};
use paisa_util::result_ext::ResultExt as _;

use super::{Error, KeyValueStore};

pub const TABLE: TableDefinition<&'static str, String> = TableDefinition::new("wallet_state");

/// On-disk store backed by a single redb table
#[derive(Debug, Clone)]
pub struct RedbStore {
    db: Arc<redb::Database>,
}

impl RedbStore {
    /// Open the database in the app data directory, creating it on first launch
    pub fn open_default() -> Result<Self, Error> {
        std::fs::create_dir_all(&*ROOT_DATA_DIR).map_err_str(Error::DatabaseAccess)?;
        Self::open(&database_location())
    }

    pub fn open(location: &Path) -> Result<Self, Error> {
        if !location.exists() {
            info!("Creating a new database, at {}", location.display());
        }

        let db = redb::Database::create(location).map_err_str(Error::DatabaseAccess)?;

        // create table if it doesn't exist
        let write_txn = db.begin_write().map_err_str(Error::DatabaseAccess)?;
        write_txn.open_table(TABLE).map_err_str(Error::TableAccess)?;
        write_txn.commit().map_err_str(Error::DatabaseAccess)?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let read_txn = self.db.begin_read().map_err_str(Error::DatabaseAccess)?;
        let table = read_txn.open_table(TABLE).map_err_str(Error::TableAccess)?;

        let value = table.get(key).map_err_str(Error::Read)?.map(|value| value.value());

        Ok(value)
    }

    fn set(&self, key: &str, value: String) -> Result<(), Error> {
        debug!("set {key}, {} bytes", value.len());
        let write_txn = self.db.begin_write().map_err_str(Error::DatabaseAccess)?;

        {
            let mut table = write_txn.open_table(TABLE).map_err_str(Error::TableAccess)?;
            table.insert(key, value).map_err_str(Error::Save)?;
        }

        write_txn.commit().map_err_str(Error::DatabaseAccess)?;

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Error> {
        debug!("delete {key}");
        let write_txn = self.db.begin_write().map_err_str(Error::DatabaseAccess)?;

        {
            let mut table = write_txn.open_table(TABLE).map_err_str(Error::TableAccess)?;
            table.remove(key).map_err_str(Error::Save)?;
        }

        write_txn.commit().map_err_str(Error::DatabaseAccess)?;

        Ok(())
    }
}
