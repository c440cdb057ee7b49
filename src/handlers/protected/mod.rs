// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Routes here are registered with `Access::RequiresAuth`, which puts
// `jwt_auth_middleware` in front of them. Handlers may rely on an `AuthUser`
// extension being present.

pub mod products;
