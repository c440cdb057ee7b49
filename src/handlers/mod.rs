// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) and Protected (bearer access token). The tier a handler
// lives in must match the `Access` it is registered with in `routes`.

pub mod protected;
pub mod public;
