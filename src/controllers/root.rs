use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::routers::Route;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RouteDescriptor {
    pub path: String,
    pub methods: Vec<String>,
}

pub struct RootController;

impl RootController {
    /// Describes `routes`, rendering `{param}` segments as `:param`.
    pub fn manifest(routes: &[Route]) -> Vec<RouteDescriptor> {
        routes
            .iter()
            .map(|route| RouteDescriptor {
                path: route
                    .path
                    .split('/')
                    .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                        Some(param) => format!(":{}", param),
                        None => segment.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("/"),
                methods: vec![route.method.to_string()],
            })
            .collect()
    }

    pub fn root(manifest: &[RouteDescriptor]) -> Response {
        Json(manifest).into_response()
    }
}
