pub mod config_routes;
