use crate::{auth::jwt::verify_session_token, config::Config};
use actix_web::{
    FromRequest, HttpRequest, HttpResponse,
    cookie::{Cookie, SameSite, time::Duration},
    dev::Payload,
    error::InternalError,
    http::header,
    web::Data,
};
use futures::future::{Ready, ready};
use tracing::debug;

/// Cookie carrying the signed admin session token
pub const SESSION_COOKIE: &str = "qr_attendance_session";

/// An authenticated admin. Taking this as a handler argument gates the route:
/// requests without a valid session are redirected to the login page.
pub struct AdminSession {
    pub username: String,
}

impl FromRequest for AdminSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(
                    actix_web::error::ErrorInternalServerError("Config missing"),
                ));
            }
        };

        let token = match req.cookie(SESSION_COOKIE) {
            Some(c) => c.value().to_string(),
            None => return ready(Err(redirect_to_login())),
        };

        match verify_session_token(&token, &config.session_secret) {
            Ok(claims) => ready(Ok(AdminSession {
                username: claims.sub,
            })),
            Err(e) => {
                debug!(error = %e, "Rejected admin session");
                ready(Err(redirect_to_login()))
            }
        }
    }
}

fn redirect_to_login() -> actix_web::Error {
    InternalError::from_response(
        "admin session required",
        HttpResponse::Found()
            .insert_header((header::LOCATION, "/"))
            .finish(),
    )
    .into()
}

pub fn session_cookie(token: String, ttl: usize) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(ttl as i64))
        .finish()
}
