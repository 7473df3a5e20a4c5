pub mod extension_settings;
pub mod settings_panel;
pub mod settings_repository;
pub mod settings_store;
