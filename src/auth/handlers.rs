use crate::{
    auth::{auth::session_cookie, credentials, jwt::generate_session_token},
    config::Config,
    error::AppError,
    models::LoginForm,
    templates::{LoginTemplate, render},
};
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

/// Login form, served on both `/` and `/login`
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Login form", body = String, content_type = "text/html")
    ),
    tag = "Auth"
)]
pub async fn login_page(req: HttpRequest) -> Result<HttpResponse, AppError> {
    render(&LoginTemplate {
        action: req.path().to_string(),
    })
}

/// Checks the admin credential and starts a session.
///
/// A wrong username or password simply shows the form again.
#[utoipa::path(
    post,
    path = "/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in, redirects to /admin and sets the session cookie"),
        (status = 200, description = "Invalid credentials, login form shown again", body = String, content_type = "text/html"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "admin_login",
    skip(req, form, pool, config),
    fields(username = %form.username)
)]
pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginForm>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if !credentials::verify(pool.get_ref(), &form.username, &form.password).await? {
        info!("Invalid credentials");
        return render(&LoginTemplate {
            action: req.path().to_string(),
        });
    }

    let (token, claims) =
        generate_session_token(&form.username, &config.session_secret, config.session_ttl)?;
    debug!(jti = %claims.jti, exp = claims.exp, "Session token issued");

    info!("Login successful");

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/admin"))
        .cookie(session_cookie(token, config.session_ttl))
        .finish())
}
