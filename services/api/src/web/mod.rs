pub mod rest;
pub mod state;

// Re-export the handler to make it easily accessible to the binary that
// builds the web server router.
pub use rest::daily_quote_handler;
