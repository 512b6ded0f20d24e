// =============================================================================
// API Module
// =============================================================================
//
// JSON/HTTP surface over the analysis engine, consumed by the dashboard
// front-end.

pub mod rest;
