pub mod results;
pub mod search;
pub mod topics;
