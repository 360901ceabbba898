pub mod render;
pub mod shell;
