// Route exports
pub mod travel;

use actix_web::web;

pub use travel::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(travel::configure);
}
