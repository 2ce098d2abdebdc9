pub mod figure;
pub mod form;
pub mod schema;
pub mod table;
