//! Fallback for unmatched routes.

use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Default service answering every unknown path with a 404 payload.
///
/// Register with `App::default_service(web::to(not_found))`.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found("page not found").with_details(json!({ "path": req.path() })))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    use super::*;

    #[actix_web::test]
    async fn unknown_paths_echo_the_path() {
        let app =
            actix_test::init_service(App::new().default_service(web::to(not_found))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/no/such/page/")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["details"]["path"], "/no/such/page/");
    }
}
