pub mod colors;
pub mod ui;
