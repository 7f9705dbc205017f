pub mod assign;
pub mod build;
pub mod list;
pub mod print;
pub mod random;
pub mod report;
pub mod stats;
pub mod trigger;
