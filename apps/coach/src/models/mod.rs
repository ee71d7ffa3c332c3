pub mod draft;
pub mod narrative;
pub mod project;
pub mod settings;
pub mod virtual_project;
