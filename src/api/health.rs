use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

#[derive(Serialize)]
struct BannerResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
}

/// Root endpoint, doubles as a trivial liveness response
#[get("/")]
async fn banner() -> impl Responder {
    HttpResponse::Ok().json(BannerResponse {
        message: "Job Tracker API running! 🚀",
    })
}

/// Liveness check endpoint
///
/// Simple check that the process is alive. Does not contact the upstream service.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(LivenessResponse { status: "alive" })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config.service(banner).service(liveness_check);
}
