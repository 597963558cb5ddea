pub mod correlation_service;
pub mod dashboard_service;
pub mod normalizer;
pub mod presentation;
pub mod series_service;
