use actix_web::{
    HttpRequest, HttpResponse, get,
    web::{Data, ServiceConfig, scope},
};

use super::params::{JobSearchParams, RawSearchQuery};
use super::service::{JobService, ServiceError};

/// Search job listings
///
/// Query parameters are optional; missing or invalid ones fall back to
/// defaults, so this handler never rejects a request.
#[get("")]
async fn search_jobs(
    req: HttpRequest,
    service: Data<JobService>,
) -> Result<HttpResponse, ServiceError> {
    let raw = RawSearchQuery::from_query_string(req.query_string());
    let params = JobSearchParams::normalize(&raw);

    let page = service.search(&params).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(scope("/api/jobs").service(search_jobs));
}
