//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod authentication;
pub mod cities;
pub mod error;
pub mod health;
pub mod points_of_interest;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` route on the given service config.
///
/// Shared by the server bootstrap and integration tests so route wiring
/// cannot drift between them.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(authentication::authenticate)
            .service(cities::list_cities)
            .service(cities::get_city)
            .service(points_of_interest::list_points_of_interest)
            .service(points_of_interest::get_point_of_interest)
            .service(points_of_interest::create_point_of_interest)
            .service(points_of_interest::update_point_of_interest)
            .service(points_of_interest::partially_update_point_of_interest)
            .service(points_of_interest::delete_point_of_interest),
    );
}
