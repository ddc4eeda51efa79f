use crate::{
    config::Config,
    error::AppError,
    model::{
        attendance::{self, MarkOutcome},
        expiry::ExpiryLabel,
    },
    models::{ScanForm, ScanQuery},
    templates::{ScanTemplate, SuccessTemplate, render},
};
use actix_web::{HttpResponse, web};
use chrono::{Duration, Local, NaiveDateTime};
use sqlx::SqlitePool;
use tracing::{Span, info, instrument};

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

#[derive(Debug, PartialEq)]
enum ScanWindow {
    Open(Option<ExpiryLabel>),
    Expired,
}

/// Unparseable labels count as expired. A missing label is accepted unless
/// the deployment requires one.
fn scan_window(
    exp: Option<&str>,
    now: NaiveDateTime,
    validity: Duration,
    require_expiry: bool,
) -> ScanWindow {
    match exp {
        Some(raw) => match raw.parse::<ExpiryLabel>() {
            Ok(label) if !label.is_expired_at(now, validity) => ScanWindow::Open(Some(label)),
            _ => ScanWindow::Expired,
        },
        None if require_expiry => ScanWindow::Expired,
        None => ScanWindow::Open(None),
    }
}

fn window_for(query: &ScanQuery, config: &Config) -> ScanWindow {
    scan_window(
        query.exp.as_deref(),
        Local::now().naive_local(),
        Duration::minutes(config.qr_ttl_minutes),
        config.scan_require_expiry,
    )
}

fn expired() -> HttpResponse {
    HttpResponse::Gone().content_type(PLAIN_TEXT).body("QR Expired")
}

/// Attendance submission form
#[utoipa::path(
    get,
    path = "/scan",
    params(ScanQuery),
    responses(
        (status = 200, description = "Submission form", body = String, content_type = "text/html"),
        (status = 410, description = "QR Expired", body = String, content_type = "text/plain")
    ),
    tag = "Scan"
)]
pub async fn scan_form(
    query: web::Query<ScanQuery>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let action = match window_for(&query, &config) {
        ScanWindow::Expired => return Ok(expired()),
        ScanWindow::Open(Some(label)) => format!("/scan?exp={label}"),
        ScanWindow::Open(None) => "/scan".to_string(),
    };

    render(&ScanTemplate { action })
}

/// Mark attendance
///
/// Records one check-in per roll number per day.
#[utoipa::path(
    post,
    path = "/scan",
    params(ScanQuery),
    request_body(content = ScanForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Attendance recorded", body = String, content_type = "text/html"),
        (status = 400, description = "Roll or name missing", body = String, content_type = "text/plain"),
        (status = 409, description = "Attendance Already Marked", body = String, content_type = "text/plain"),
        (status = 410, description = "QR Expired", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Scan"
)]
#[instrument(
    name = "mark_attendance",
    skip(query, form, pool, config),
    fields(exp = ?query.exp, roll = tracing::field::Empty)
)]
pub async fn submit_scan(
    query: web::Query<ScanQuery>,
    form: Option<web::Form<ScanForm>>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    // Expiry is decided before the body is looked at
    if window_for(&query, &config) == ScanWindow::Expired {
        info!("Rejected scan with expired QR");
        return Ok(expired());
    }

    let Some(form) = form else {
        return Ok(HttpResponse::BadRequest()
            .content_type(PLAIN_TEXT)
            .body("Roll and name are required"));
    };
    Span::current().record("roll", form.roll.as_str());

    let now = Local::now().naive_local();
    let roll = form.roll.trim();
    let name = form.name.trim();
    if roll.is_empty() || name.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .content_type(PLAIN_TEXT)
            .body("Roll and name are required"));
    }

    match attendance::mark(pool.get_ref(), roll, name, now).await? {
        MarkOutcome::Recorded(record) => {
            info!(id = record.id, date = %record.date, "Attendance recorded");
            render(&SuccessTemplate { record })
        }
        MarkOutcome::AlreadyMarked => {
            info!("Attendance already marked today");
            Ok(HttpResponse::Conflict()
                .content_type(PLAIN_TEXT)
                .body("Attendance Already Marked"))
        }
    }
}
