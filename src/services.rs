pub mod auth;
pub use auth::TenantResolver;
pub mod report_service;
pub use report_service::ReportService;
