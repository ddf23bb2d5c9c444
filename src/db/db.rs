use crate::db::migrations::MigrationManager;
use crate::libs::data_storage::DataStorage;
use crate::libs::repository::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "habitual.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Db> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Db> {
        // Sessions are removed with their habit through ON DELETE CASCADE.
        conn.pragma_update(None, "foreign_keys", "ON")?;
        MigrationManager::new().run_migrations(&mut conn)?;

        Ok(Db { conn })
    }
}
