//! Askama templates for the HTML pages.

use crate::{error::AppError, model::attendance::AttendanceRecord};
use actix_web::HttpResponse;
use askama::Template;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    /// Path the form posts back to, `/` or `/login`
    pub action: String,
}

pub struct QrView {
    pub data_uri: String,
    pub expiry: String,
    pub scan_url: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    /// Attendance rows stored so far
    pub records: i64,
    pub qr: Option<QrView>,
}

#[derive(Template)]
#[template(path = "scan.html")]
pub struct ScanTemplate {
    pub action: String,
}

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessTemplate {
    pub record: AttendanceRecord,
}

#[derive(Template)]
#[template(path = "view.html")]
pub struct ViewTemplate {
    pub records: Vec<AttendanceRecord>,
}

pub fn render<T: Template>(template: &T) -> Result<HttpResponse, AppError> {
    let body = template.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AttendanceRecord {
        AttendanceRecord {
            id: 3,
            roll: "R1".to_string(),
            name: "<Alice>".to_string(),
            date: "2026-10-18".to_string(),
            time: "09:41:05".to_string(),
        }
    }

    #[test]
    fn dashboard_embeds_qr_data_uri_unescaped() {
        let html = DashboardTemplate {
            username: "admin".to_string(),
            records: 0,
            qr: Some(QrView {
                data_uri: "data:image/png;base64,iVBORw0KGgo/+A==".to_string(),
                expiry: "09:42".to_string(),
                scan_url: "http://localhost:5000/scan?exp=09:42".to_string(),
            }),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"src="data:image/png;base64,iVBORw0KGgo/+A==""#));
        assert!(html.contains("09:42"));
    }

    #[test]
    fn dashboard_without_qr_has_no_image() {
        let html = DashboardTemplate {
            username: "admin".to_string(),
            records: 0,
            qr: None,
        }
        .render()
        .unwrap();

        assert!(!html.contains("<img"));
        assert!(html.contains("/generate"));
    }

    #[test]
    fn view_escapes_submitted_names() {
        let html = ViewTemplate {
            records: vec![record()],
        }
        .render()
        .unwrap();

        assert!(html.contains("&lt;Alice&gt;"));
        assert!(!html.contains("<Alice>"));
    }
}
