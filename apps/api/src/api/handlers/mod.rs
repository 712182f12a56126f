pub mod projects;
pub mod ui;
