use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{MethodRouter, get},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod records;
pub mod root;

use crate::controllers::{RootController, RouteDescriptor};
use crate::db::Storage;
use crate::models::{Movie, Song};
use records::{find_route, list_route};
use root::{fallback_route, method_not_allowed_route, root_route};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Manifest,
    ListSongs,
    FindSong,
    ListMovies,
    FindMovie,
}

#[derive(Clone, Debug)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub endpoint: Endpoint,
}

/// Every route the server answers. Both the router and `GET /` are built from it.
pub const ROUTES: [Route; 5] = [
    Route {
        method: Method::GET,
        path: "/",
        endpoint: Endpoint::Manifest,
    },
    Route {
        method: Method::GET,
        path: "/songs",
        endpoint: Endpoint::ListSongs,
    },
    Route {
        method: Method::GET,
        path: "/songs/id/{id}",
        endpoint: Endpoint::FindSong,
    },
    Route {
        method: Method::GET,
        path: "/movies",
        endpoint: Endpoint::ListMovies,
    },
    Route {
        method: Method::GET,
        path: "/movies/id/{id}",
        endpoint: Endpoint::FindMovie,
    },
];

#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub manifest: Arc<Vec<RouteDescriptor>>,
}

// All endpoints are reads, so every route is wired with `get`.
fn endpoint_router<S: Storage>(endpoint: Endpoint) -> MethodRouter<AppState<S>> {
    match endpoint {
        Endpoint::Manifest => get(root_route::<S>),
        Endpoint::ListSongs => get(list_route::<S, Song>),
        Endpoint::FindSong => get(find_route::<S, Song>),
        Endpoint::ListMovies => get(list_route::<S, Movie>),
        Endpoint::FindMovie => get(find_route::<S, Movie>),
    }
}

pub fn make_app<S: Storage>(store: S) -> Router {
    let state = AppState {
        store,
        manifest: Arc::new(RootController::manifest(&ROUTES)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    ROUTES
        .iter()
        .fold(Router::new(), |router, route| {
            router.route(route.path, endpoint_router::<S>(route.endpoint))
        })
        .fallback(fallback_route)
        .method_not_allowed_fallback(method_not_allowed_route)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
