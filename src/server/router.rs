//! Route resolution.
//!
//! Every route is reachable both at its canonical path and under `/api`:
//!
//! ```text
//! POST   /tables                  POST   /records
//! GET    /tables/:tableName       PUT    /records
//! DELETE /tables/:tableName       DELETE /records
//! POST   /tables/addIndex         POST   /records/retrieveRecord
//! GET    /health                  POST   /records/query
//!                                 POST   /records/scan
//! ```

use http::{Method, StatusCode};

const API_PREFIX: &str = "/api";

/// A resolved endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `GET /health`
    Health,
    /// `POST /tables`
    CreateTable,
    /// `GET /tables/:tableName`
    DescribeTable(String),
    /// `DELETE /tables/:tableName`
    DeleteTable(String),
    /// `POST /tables/addIndex`
    AddIndex,
    /// `POST /records`
    PutItem,
    /// `POST /records/retrieveRecord`
    GetItem,
    /// `PUT /records`
    UpdateItem,
    /// `DELETE /records`
    DeleteItem,
    /// `POST /records/query`
    Query,
    /// `POST /records/scan`
    Scan,
}

impl Route {
    /// Status returned when the operation succeeds.
    pub fn success_status(&self) -> StatusCode {
        match self {
            Self::CreateTable | Self::PutItem => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }

    /// Fixed message returned when the request fails outside the store call.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Health => "Internal server error",
            Self::CreateTable => "Failed to create table",
            Self::DescribeTable(_) => "Failed to describe table",
            Self::DeleteTable(_) => "Failed to delete table",
            Self::AddIndex => "Failed to add secondary index",
            Self::PutItem => "Failed to create record",
            Self::GetItem => "Failed to get record",
            Self::UpdateItem => "Failed to update record",
            Self::DeleteItem => "Failed to delete record",
            Self::Query => "Failed to query records",
            Self::Scan => "Failed to scan records",
        }
    }
}

/// Resolve a route from the request method and path.
pub fn resolve_route(method: &Method, path: &str) -> Option<Route> {
    let path = match path.strip_prefix(API_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    let path = path.trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').skip(1).collect();

    let route = match (method, segments.as_slice()) {
        (&Method::GET, ["health"]) => Route::Health,
        (&Method::POST, ["tables"]) => Route::CreateTable,
        (&Method::POST, ["tables", "addIndex"]) => Route::AddIndex,
        (&Method::GET, ["tables", table_name]) if !table_name.is_empty() => {
            Route::DescribeTable((*table_name).to_owned())
        }
        (&Method::DELETE, ["tables", table_name]) if !table_name.is_empty() => {
            Route::DeleteTable((*table_name).to_owned())
        }
        (&Method::POST, ["records"]) => Route::PutItem,
        (&Method::PUT, ["records"]) => Route::UpdateItem,
        (&Method::DELETE, ["records"]) => Route::DeleteItem,
        (&Method::POST, ["records", "retrieveRecord"]) => Route::GetItem,
        (&Method::POST, ["records", "query"]) => Route::Query,
        (&Method::POST, ["records", "scan"]) => Route::Scan,
        _ => return None,
    };
    Some(route)
}
