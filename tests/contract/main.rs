mod client_config;
mod public_routes;
