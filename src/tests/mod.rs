mod config;
mod status;
