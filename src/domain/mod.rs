pub mod change;
pub mod commit;
pub mod report;
pub mod repository;
