use crate::{
    auth::auth::AdminSession,
    config::Config,
    error::AppError,
    model::attendance,
    qr,
    templates::{DashboardTemplate, QrView, render},
};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{Duration, Local};
use sqlx::SqlitePool;
use tracing::info;

/// Admin dashboard
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Dashboard", body = String, content_type = "text/html"),
        (status = 302, description = "No admin session, redirects to /"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn dashboard(
    admin: AdminSession,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    render(&DashboardTemplate {
        username: admin.username,
        records: attendance::count(pool.get_ref()).await?,
        qr: None,
    })
}

/// Issue a scan QR code
///
/// The QR code encodes `<base>/scan?exp=HH:MM` with the expiry a few minutes ahead.
#[utoipa::path(
    get,
    path = "/generate",
    responses(
        (status = 200, description = "Dashboard with an embedded base64 PNG QR code and its expiry label", body = String, content_type = "text/html"),
        (status = 302, description = "No admin session, redirects to /"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn generate(
    admin: AdminSession,
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let base_url = match &config.public_base_url {
        Some(url) => url.clone(),
        None => {
            let info = req.connection_info();
            format!("{}://{}", info.scheme(), info.host())
        }
    };

    let ticket = qr::issue(
        &base_url,
        Local::now().naive_local(),
        Duration::minutes(config.qr_ttl_minutes),
    )?;

    info!(
        admin = %admin.username,
        expiry = %ticket.expiry,
        scan_url = %ticket.scan_url,
        "QR code issued"
    );

    render(&DashboardTemplate {
        username: admin.username,
        records: attendance::count(pool.get_ref()).await?,
        qr: Some(QrView {
            data_uri: ticket.data_uri(),
            expiry: ticket.expiry.to_string(),
            scan_url: ticket.scan_url,
        }),
    })
}
