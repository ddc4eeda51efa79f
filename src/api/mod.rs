pub mod admin;
pub mod report;
pub mod scan;
