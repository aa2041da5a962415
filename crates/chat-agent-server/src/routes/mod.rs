// Export route modules
pub mod health;
pub mod send_message;

use crate::state::AppState;
use axum::Router;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(send_message::routes(state))
        .merge(health::routes())
}
