pub mod export;
pub mod output;
pub mod table;
