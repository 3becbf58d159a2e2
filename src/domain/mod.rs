pub mod dates;
pub mod error;
pub mod issue_row;
