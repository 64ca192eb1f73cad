use crate::{
    api::{attendance, reports},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // Kiosks hammer /register, so it carries its own tighter budget on top
    // of the shared API ceiling.
    let event_limiter = Arc::new(build_limiter(config.rate_events_per_min));
    let api_limiter = Arc::new(build_limiter(config.rate_api_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(api_limiter) // rate limiting
            .service(
                web::scope("/attendance")
                    // /attendance/register
                    .service(
                        web::resource("/register")
                            .wrap(event_limiter.clone())
                            .route(web::post().to(attendance::register_event)),
                    )
                    // /attendance/close-shift
                    .service(
                        web::resource("/close-shift")
                            .route(web::post().to(attendance::close_shift)),
                    )
                    // /attendance/by-date/{date}
                    .service(
                        web::resource("/by-date/{date}").route(web::get().to(reports::by_date)),
                    )
                    // /attendance/by-employee/{identity_token}
                    .service(
                        web::resource("/by-employee/{identity_token}")
                            .route(web::get().to(reports::by_employee)),
                    )
                    // /attendance/summary
                    .service(web::resource("/summary").route(web::get().to(reports::summary)))
                    // /attendance/open/{date}
                    .service(
                        web::resource("/open/{date}").route(web::get().to(reports::open_records)),
                    )
                    // /attendance/{id} stays last so the literal paths above
                    // keep winning the match
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(attendance::update_record))
                            .route(web::get().to(attendance::get_record)),
                    ),
            ),
    );
}

// POST /api/attendance/register                        clock event
// POST /api/attendance/close-shift                     bulk exit stamp
// GET  /api/attendance/by-date/{date}                  records of a day
// GET  /api/attendance/by-employee/{token}?start=&end= one employee's history
// GET  /api/attendance/summary?date=                   aggregated counts
// GET  /api/attendance/open/{date}                     shifts missing an exit
// PUT  /api/attendance/{id}                            manual correction
// GET  /api/attendance/{id}                            single record
