use crate::models::{LoginForm, ScanForm};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "QR Attendance",
        version = "0.1.0",
        description = r#"
## QR Attendance

Time-limited QR codes for classroom check-in.

- An admin logs in and generates a QR code that links to `/scan?exp=HH:MM`
- Students scan it before the expiry label and submit their roll number and name
- One check-in is kept per roll number per day
- The log can be browsed at `/view` or downloaded from `/export` as CSV

Admin pages use a signed session cookie set on login.
"#,
    ),
    paths(
        crate::auth::handlers::login_page,
        crate::auth::handlers::login,

        crate::api::admin::dashboard,
        crate::api::admin::generate,

        crate::api::scan::scan_form,
        crate::api::scan::submit_scan,

        crate::api::report::view,
        crate::api::report::export
    ),
    components(schemas(LoginForm, ScanForm)),
    tags(
        (name = "Auth", description = "Admin login, also served on /login"),
        (name = "Admin", description = "Dashboard and QR issuing"),
        (name = "Scan", description = "Student check-in"),
        (name = "Report", description = "Attendance listing and export"),
    )
)]
pub struct ApiDoc;
