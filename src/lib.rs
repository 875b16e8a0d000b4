pub mod cli;
pub mod compose;
pub mod config;
pub mod dotenv;
pub mod report;
pub mod scanner;
pub mod usage;
