use crate::{
    error::AppError,
    model::attendance,
    report::export_csv,
    templates::{ViewTemplate, render},
};
use actix_web::{
    HttpResponse,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web,
};
use sqlx::SqlitePool;
use tracing::info;

/// Attendance table
#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "All attendance records", body = String, content_type = "text/html"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report"
)]
pub async fn view(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let records = attendance::list_all(pool.get_ref()).await?;
    render(&ViewTemplate { records })
}

/// Attendance CSV export
#[utoipa::path(
    get,
    path = "/export",
    responses(
        (status = 200, description = "attendance.csv with columns ID,Roll,Name,Date,Time", body = String, content_type = "text/csv"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Report"
)]
pub async fn export(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let records = attendance::list_all(pool.get_ref()).await?;
    let csv = export_csv(&records)?;

    info!(rows = records.len(), "Attendance exported");

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename("attendance.csv".to_string())],
        })
        .body(csv))
}
