// Internship catalog: storage, admin curation and CSV bulk import.

pub mod csv_import;
pub mod handlers;
pub mod store;
pub mod validation;
