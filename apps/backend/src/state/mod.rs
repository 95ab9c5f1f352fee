pub mod app_state;
pub mod site_config;
