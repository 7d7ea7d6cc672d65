// Project storage, CSV ledgers and demo data
pub mod csv_ledger;
pub mod project_store;
pub mod sample;
