// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and token acquisition. None of these require a bearer token.

pub mod login; // POST /auth/login/ - credentials -> token pair
pub mod refresh; // POST /auth/token/refresh/ - refresh -> access token
pub mod signup; // POST /auth/signup/ - create new account

pub use login::login_post;
pub use refresh::refresh_post;
pub use signup::signup_post;
