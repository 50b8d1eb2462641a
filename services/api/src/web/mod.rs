pub mod ingest;
pub mod principal;
pub mod rest;
pub mod router;
pub mod state;

// Re-export the router builder to make it easily accessible to the
// binary and to black-box tests.
pub use principal::require_principal;
pub use router::router;
