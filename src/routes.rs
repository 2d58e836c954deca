// src/routes.rs

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas de relatório; o TenantContext de cada handler faz a autenticação.
    let report_routes = Router::new()
        .route("/item-sale-report", get(handlers::reports::get_item_sale_report))
        .route("/group-report", get(handlers::reports::get_group_report));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(report_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::services::{
        auth::tests::{token_for, SECRET},
        report_service::tests::{sample_repo, FakeReportRepository, RepoCall},
        ReportService, TenantResolver,
    };

    fn app(repo: Arc<FakeReportRepository>) -> Router {
        build_router(AppState {
            report_service: ReportService::new(repo),
            tenant_resolver: TenantResolver::new(SECRET, None),
        })
    }

    async fn send_get(app: Router, uri: &str, token: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_is_public() {
        let response = send_get(app(Arc::new(sample_repo())), "/api/health", None).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn item_sale_report_returns_groups_and_rows() {
        let repo = Arc::new(sample_repo());
        let token = token_for("acme", "1", 3600);

        let response = send_get(
            app(repo.clone()),
            "/item-sale-report?branchId=5&fromDate=2024-03-01&toDate=2024-03-31&groupName=Drinks",
            Some(&token),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["groupNames"], json!(["Coffee", "Drinks"]));
        assert_eq!(body["message"], "Group names and item sale report fetched successfully");
        assert_eq!(
            body["data"],
            json!([{
                "ShortDescription": "Cola",
                "GroupName": "Drinks",
                "Qty": 6.0,
                "TotalAmount": 12.25
            }])
        );
        assert_eq!(
            repo.calls()[1],
            RepoCall::ItemSales {
                branch_id: "5".into(),
                from: "2024-03-01 05:00:00 AM".into(),
                to: "2024-04-01 05:00:00 AM".into(),
                group_name: Some("Drinks".into()),
            }
        );
    }

    #[tokio::test]
    async fn item_sale_report_without_dates_has_empty_data() {
        let token = token_for("acme", "1", 3600);

        let response = send_get(app(Arc::new(sample_repo())), "/item-sale-report", Some(&token)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["groupNames"], json!(["Coffee", "Drinks"]));
    }

    #[tokio::test]
    async fn blank_query_values_fall_back_to_token_station() {
        let repo = Arc::new(sample_repo());
        let token = token_for("acme", "7", 3600);

        let response = send_get(
            app(repo.clone()),
            "/item-sale-report?branchId=&fromDate=&toDate=&groupName=",
            Some(&token),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], json!([]));
        assert_eq!(repo.calls(), vec![RepoCall::GroupNames { branch_id: "7".into() }]);
    }

    #[tokio::test]
    async fn malformed_query_string_is_a_json_bad_request() {
        let repo = Arc::new(sample_repo());
        let token = token_for("acme", "1", 3600);

        let response = send_get(
            app(repo.clone()),
            "/group-report?branchId=1&branchId=2&fromDate=2024-01-01&toDate=2024-01-31",
            Some(&token),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("query string"));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn expired_token_is_rejected_without_touching_the_database() {
        let token = token_for("acme", "1", -60);

        for uri in [
            "/item-sale-report?fromDate=2024-03-01&toDate=2024-03-31",
            "/group-report?fromDate=2024-03-01&toDate=2024-03-31",
        ] {
            let repo = Arc::new(sample_repo());
            let response = send_get(app(repo.clone()), uri, Some(&token)).await;

            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            let body = body_json(response).await;
            assert_eq!(body["expired"], true);
            assert!(repo.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let repo = Arc::new(sample_repo());

        let response = send_get(app(repo.clone()), "/group-report", None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn group_report_without_dates_is_a_bad_request() {
        let token = token_for("acme", "1", 3600);

        let response = send_get(app(Arc::new(sample_repo())), "/group-report?fromDate=2024-03-01", Some(&token)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "message": "From date and To date are required" }));
    }

    #[tokio::test]
    async fn group_report_returns_rounded_totals() {
        let token = token_for("acme", "1", 3600);

        let response = send_get(
            app(Arc::new(sample_repo())),
            "/group-report?fromDate=2024-01-01&toDate=2024-01-31",
            Some(&token),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Group sales report fetched successfully");
        assert_eq!(body["data"][0]["GroupName"], "Coffee");
        assert_eq!(body["data"][0]["TotalQty"], 6.0);
        assert_eq!(body["data"][0]["TotalAmount"], 23.5);
    }

    #[tokio::test]
    async fn database_failure_is_a_generic_server_error() {
        let repo = Arc::new(FakeReportRepository { fail: true, ..sample_repo() });
        let token = token_for("acme", "1", 3600);

        let response = send_get(app(repo), "/item-sale-report", Some(&token)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "message": "Server error" }));
    }
}
