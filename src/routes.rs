use crate::{
    api::{admin, report, scan},
    auth::handlers,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Login is served on both paths
    for path in ["/", "/login"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(handlers::login_page))
                .route(web::post().to(handlers::login)),
        );
    }

    // Admin only, gated by the AdminSession extractor
    cfg.service(web::resource("/admin").route(web::get().to(admin::dashboard)))
        .service(web::resource("/generate").route(web::get().to(admin::generate)));

    // Student facing
    cfg.service(
        web::resource("/scan")
            .route(web::get().to(scan::scan_form))
            .route(web::post().to(scan::submit_scan)),
    );

    // Reports
    cfg.service(web::resource("/view").route(web::get().to(report::view)))
        .service(web::resource("/export").route(web::get().to(report::export)));
}
