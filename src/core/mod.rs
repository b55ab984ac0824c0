pub mod confirmation;
pub mod matcher;
pub mod report;
