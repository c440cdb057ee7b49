use axum::{
    extract::OriginalUri,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Who may call a route. Every route states this explicitly when registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    RequiresAuth,
}

/// One entry of the routing table
pub struct Route {
    pub path: &'static str,
    pub access: Access,
    pub handlers: MethodRouter<AppState>,
}

impl Route {
    fn new(path: &'static str, access: Access, handlers: MethodRouter<AppState>) -> Self {
        Self { path, access, handlers }
    }
}

/// The complete routing table
pub fn route_table() -> Vec<Route> {
    use protected::products;
    use public::auth;

    vec![
        Route::new("/health/", Access::Public, get(public::health_get)),
        Route::new("/auth/signup/", Access::Public, post(auth::signup_post)),
        Route::new("/auth/login/", Access::Public, post(auth::login_post)),
        Route::new("/auth/token/refresh/", Access::Public, post(auth::refresh_post)),
        Route::new(
            "/products/",
            Access::RequiresAuth,
            get(products::list).post(products::create),
        ),
        Route::new(
            "/products/:id/",
            Access::RequiresAuth,
            get(products::retrieve)
                .put(products::update)
                .patch(products::partial_update)
                .delete(products::destroy),
        ),
    ]
}

/// Build the application router with all middleware applied
pub fn app(state: AppState) -> Router {
    let mut router = Router::new();
    for route in route_table() {
        let handlers = route.handlers.fallback(method_not_allowed);
        let handlers = match route.access {
            Access::Public => handlers,
            Access::RequiresAuth => {
                handlers.route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
            }
        };
        router = router.route(route.path, handlers);
    }

    let config = state.config.clone();
    let mut router = router
        .fallback(|| async { ApiError::not_found("Not found.") })
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// Known path, unsupported method
async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::method_not_allowed(format!("Method \"{}\" not allowed on {}.", method, uri.path()))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if security.cors_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
