pub mod config_home;
