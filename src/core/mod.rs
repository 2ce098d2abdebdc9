pub mod draft;
pub mod duration;
pub mod log;
pub mod submit;
