// Private module declaration
mod server;

// Re-export for public API
pub use server::start_http_server;
