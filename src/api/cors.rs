use actix_web::{
    Error, HttpResponse,
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::{
        Method,
        header::{self, HeaderMap, HeaderValue},
    },
    middleware::Next,
};

/// Origin granted when the caller's origin is not on the allow-list
pub const FALLBACK_ORIGIN: &str = "http://localhost:5173";

const ALLOWED_METHODS: &str = "GET,HEAD,PUT,POST,DELETE,PATCH";

/// Substrings that mark an origin as trusted: local development and the two
/// hosting platforms the front-end is deployed to.
const TRUSTED_ORIGIN_MARKERS: [&str; 3] = ["localhost", ".netlify.app", ".railway.app"];

fn is_trusted_origin(origin: &str) -> bool {
    TRUSTED_ORIGIN_MARKERS.iter().any(|marker| origin.contains(marker))
}

/// Origin to put into `Access-Control-Allow-Origin` for a request.
///
/// Trusted origins are echoed back, everything else (including no origin at
/// all) gets the fallback origin.
pub fn allowed_origin(origin: Option<&str>) -> &str {
    match origin {
        Some(origin) if is_trusted_origin(origin) => origin,
        _ => FALLBACK_ORIGIN,
    }
}

fn origin_header(headers: &HeaderMap) -> HeaderValue {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());

    HeaderValue::from_str(allowed_origin(origin))
        .unwrap_or_else(|_| HeaderValue::from_static(FALLBACK_ORIGIN))
}

fn apply_common(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
}

/// CORS middleware, used with `actix_web::middleware::from_fn`.
///
/// Every `OPTIONS` request is answered here as a preflight with 204; other
/// requests pass through and get the CORS headers added to the response.
pub async fn cors_policy<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let origin = origin_header(req.headers());

    if req.method() == Method::OPTIONS {
        let requested_headers = req
            .headers()
            .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
            .cloned();

        let mut preflight = HttpResponse::NoContent();
        preflight.insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS));
        if let Some(requested) = &requested_headers {
            preflight.insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone()));
        }

        let mut res = req.into_response(preflight.finish());
        apply_common(res.headers_mut(), origin);
        if requested_headers.is_some() {
            res.headers_mut().append(
                header::VARY,
                HeaderValue::from_static("Access-Control-Request-Headers"),
            );
        }
        return Ok(res.map_into_right_body());
    }

    let mut res = next.call(req).await?;
    apply_common(res.headers_mut(), origin);
    Ok(res.map_into_left_body())
}

#[cfg(test)]
mod tests {
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, middleware::from_fn, web};

    use super::*;

    #[test]
    fn trusted_origins_are_echoed() {
        for origin in [
            "http://localhost:5173",
            "http://localhost:3000",
            "https://job-tracker.netlify.app",
            "https://deploy-preview-12--job-tracker.netlify.app",
            "https://backend-production.up.railway.app",
        ] {
            assert_eq!(allowed_origin(Some(origin)), origin);
        }
    }

    #[test]
    fn other_origins_get_fallback() {
        assert_eq!(allowed_origin(Some("https://example.com")), FALLBACK_ORIGIN);
        assert_eq!(allowed_origin(Some("https://netlify.app.evil.com")), FALLBACK_ORIGIN);
        assert_eq!(allowed_origin(None), FALLBACK_ORIGIN);
    }

    #[actix_web::test]
    async fn simple_request_gets_headers() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(cors_policy))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://job-tracker.netlify.app"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), 200);
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://job-tracker.netlify.app"
        );
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );

        let req = actix_test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://example.com"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            FALLBACK_ORIGIN
        );
    }

    #[actix_web::test]
    async fn preflight_is_answered() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(cors_policy))
                .route("/api/jobs", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/jobs")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), 204);
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            ALLOWED_METHODS
        );
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "content-type"
        );
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }
}
