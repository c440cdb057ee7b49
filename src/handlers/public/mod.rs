// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Routes here are registered with `Access::Public`: health checks, signup and
// token acquisition.

pub mod auth;
pub mod health;

pub use health::health_get;
