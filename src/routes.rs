use crate::{api::attendance, config::Config};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::Context;

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter allowing `requests_per_min` with an equal burst.
pub fn build_rate_limit(requests_per_min: u32) -> anyhow::Result<RateLimit> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limit configuration")
}

pub fn attendance_scope() -> actix_web::Scope {
    web::scope("/attendance")
        // /attendance/submit/{employee_id}
        .service(
            web::resource("/submit/{employee_id}")
                .route(web::post().to(attendance::submit_attendance)),
        )
        // /attendance/employee/{employee_id}
        .service(
            web::resource("/employee/{employee_id}")
                .route(web::get().to(attendance::get_attendance_by_employee)),
        )
        // /attendance/presence/{employee_id}/{date}
        .service(
            web::resource("/presence/{employee_id}/{date}")
                .route(web::get().to(attendance::presence)),
        )
        .service(web::resource("/calendar").route(web::get().to(attendance::month_calendar)))
        .service(
            web::scope("/admin")
                .service(
                    web::resource("/all").route(web::get().to(attendance::list_all_attendance)),
                )
                .service(
                    web::resource("/employees-attendance")
                        .route(web::get().to(attendance::list_employees_attendance)),
                )
                // /attendance/admin/update/{employee_id}
                .service(
                    web::resource("/update/{employee_id}")
                        .route(web::put().to(attendance::update_weekly_attendance)),
                )
                // /attendance/admin/weekly/{employee_id}?month=&year=
                .service(
                    web::resource("/weekly/{employee_id}")
                        .route(web::get().to(attendance::weekly_summary)),
                ),
        )
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, rate_limit: &RateLimit) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(rate_limit)) // rate limiting
            .service(attendance_scope()),
    );
}
