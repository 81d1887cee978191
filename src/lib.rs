// Core game logic modules
pub mod core;

// Session tokens
pub mod auth;

// Environment configuration
pub mod config;

// HTTP error type
pub mod error;

// Middleware
pub mod middleware;

// API models (requests/responses)
pub mod models;

// HTTP routes
pub mod routes;

// Application state
pub mod state;
