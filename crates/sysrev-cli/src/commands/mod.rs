pub mod articles;
pub mod dispatch;
pub mod files;
pub mod labels;
pub mod project;
pub mod sync;
pub mod tables;
