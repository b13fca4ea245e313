pub mod chart_utils;
pub mod controls;
pub mod correlation_view;
pub mod dashboard;
pub mod price_view;
pub mod score_view;
