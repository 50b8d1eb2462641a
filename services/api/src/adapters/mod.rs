pub mod db;
pub mod object_store;

pub use db::PgCatalog;
pub use object_store::FsObjectStore;
