pub mod health;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::admin::guard::require_admin;
use crate::state::AppState;
use crate::{admin, applications, catalog, chat, profiles, recommendation};

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/internships",
            get(catalog::handlers::handle_list_internships)
                .post(catalog::handlers::handle_create_internship),
        )
        .route(
            "/internships/import",
            post(catalog::handlers::handle_import_csv),
        )
        .route(
            "/internships/:id",
            put(catalog::handlers::handle_update_internship)
                .delete(catalog::handlers::handle_delete_internship),
        )
        .route("/overview", get(admin::handlers::handle_overview))
        .route(
            "/applications/recent",
            get(admin::handlers::handle_recent_applications),
        )
        .route("/users", get(admin::handlers::handle_list_users))
        .route("/users/:id", delete(admin::handlers::handle_delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendations",
            post(recommendation::handlers::handle_recommend),
        )
        .route(
            "/api/v1/recommendations/options",
            get(recommendation::handlers::handle_wizard_options),
        )
        .route(
            "/api/v1/applications",
            get(applications::handlers::handle_list_applications)
                .post(applications::handlers::handle_apply),
        )
        .route(
            "/api/v1/profiles/:id",
            get(profiles::handlers::handle_get_profile).put(profiles::handlers::handle_put_profile),
        )
        .route("/api/v1/chat", post(chat::handlers::handle_chat))
        .nest("/api/v1/admin", admin_routes)
        .with_state(state)
}
