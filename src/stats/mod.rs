pub mod export;
pub mod filter;
pub mod score;
pub mod summary;
pub mod table;
pub mod team;

pub use filter::FilterSpec;
pub use summary::{summarize, Summary};
pub use table::{TablePage, TableView};
