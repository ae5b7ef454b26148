//! Species service client.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::{OutboundPool, RawResponse, SpeciesFetcher};
use crate::config::SpeciesApiConfig;
use crate::error::{FablegateError, Result};

/// Reads species records with `GET <base_url><path>/<name>`.
#[derive(Debug, Clone)]
pub struct SpeciesClient {
    pool: Arc<OutboundPool>,
    base_url: String,
    path: String,
}

impl SpeciesClient {
    pub fn new(pool: Arc<OutboundPool>, config: &SpeciesApiConfig) -> Self {
        Self {
            pool,
            base_url: config.base_url.clone(),
            path: config.path.clone(),
        }
    }

    /// Full URL for `name`, pushed as one percent-encoded path segment.
    ///
    /// The configured path is appended segment by segment, so leading and
    /// trailing slashes on either part do not matter.
    pub fn species_url(&self, name: &str) -> Result<Url> {
        let base = &self.base_url;
        let mut url = Url::parse(base)
            .map_err(|e| FablegateError::Transport(format!("invalid species URL '{base}': {e}")))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FablegateError::Transport(format!("species URL '{base}' cannot be a base"))
            })?;
            segments.pop_if_empty();
            segments.extend(self.path.split('/').filter(|s| !s.is_empty()));
            segments.push(name);
        }
        Ok(url)
    }
}

#[async_trait]
impl SpeciesFetcher for SpeciesClient {
    async fn fetch_species(&self, name: &str) -> Result<RawResponse> {
        let url = self.species_url(name)?;
        debug!(%url, "Fetching species");
        self.pool.execute(self.pool.client().get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::spawn_stub;
    use axum::extract::Path;
    use axum::http::{header, StatusCode};
    use axum::routing::get;
    use axum::Router;

    fn client(base_url: &str) -> SpeciesClient {
        let config = SpeciesApiConfig {
            base_url: base_url.to_string(),
            ..SpeciesApiConfig::default()
        };
        SpeciesClient::new(Arc::new(OutboundPool::new(2).unwrap()), &config)
    }

    #[test]
    fn test_species_url_default_layout() {
        let url = client("https://species.example").species_url("pikachu").unwrap();
        assert_eq!(
            url.as_str(),
            "https://species.example/api/v2/pokemon-species/pikachu"
        );
    }

    #[test]
    fn test_species_url_trailing_slashes() {
        let config = SpeciesApiConfig {
            base_url: "http://host:1/".into(),
            path: "/species/".into(),
        };
        let c = SpeciesClient::new(Arc::new(OutboundPool::new(1).unwrap()), &config);
        assert_eq!(
            c.species_url("onix").unwrap().as_str(),
            "http://host:1/species/onix"
        );
    }

    #[test]
    fn test_species_url_path_without_leading_slash() {
        for (base, path) in [
            ("http://host", "species"),
            ("http://host/", "species"),
            ("http://host", "/species"),
        ] {
            let config = SpeciesApiConfig {
                base_url: base.into(),
                path: path.into(),
            };
            let c = SpeciesClient::new(Arc::new(OutboundPool::new(1).unwrap()), &config);
            assert_eq!(
                c.species_url("onix").unwrap().as_str(),
                "http://host/species/onix",
                "{base} + {path}"
            );
        }
    }

    #[test]
    fn test_species_url_keeps_base_prefix() {
        let config = SpeciesApiConfig {
            base_url: "http://host/proxy/".into(),
            path: "api/v2/pokemon-species".into(),
        };
        let c = SpeciesClient::new(Arc::new(OutboundPool::new(1).unwrap()), &config);
        assert_eq!(
            c.species_url("onix").unwrap().as_str(),
            "http://host/proxy/api/v2/pokemon-species/onix"
        );
    }

    #[test]
    fn test_species_url_encodes_name_as_one_segment() {
        let url = client("http://host").species_url("mr mime/../x").unwrap();
        assert_eq!(
            url.as_str(),
            "http://host/api/v2/pokemon-species/mr%20mime%2F..%2Fx"
        );
    }

    #[test]
    fn test_malformed_base_is_transport_error() {
        assert!(matches!(
            client("not a url").species_url("pikachu"),
            Err(FablegateError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_species_passes_status_and_body_through() {
        let router = Router::new().route(
            "/api/v2/pokemon-species/{name}",
            get(|Path(name): Path<String>| async move {
                if name == "pikachu" {
                    (StatusCode::OK, r#"{"name":"pikachu"}"#.to_string())
                } else {
                    (StatusCode::NOT_FOUND, "Not Found".to_string())
                }
            }),
        );
        let base = spawn_stub(router).await;
        let c = client(&base);

        let ok = c.fetch_species("pikachu").await.unwrap();
        assert_eq!(ok, RawResponse::new(200, r#"{"name":"pikachu"}"#));

        let missing = c.fetch_species("nobody").await.unwrap();
        assert_eq!(missing, RawResponse::new(404, "Not Found"));
    }

    #[tokio::test]
    async fn test_fetch_species_decodes_name_on_server() {
        let router = Router::new().route(
            "/api/v2/pokemon-species/{name}",
            get(|Path(name): Path<String>| async move { name }),
        );
        let base = spawn_stub(router).await;
        let resp = client(&base).fetch_species("mr mime").await.unwrap();
        assert_eq!(resp.body, "mr mime");
    }

    #[tokio::test]
    async fn test_fetch_species_does_not_follow_redirects() {
        let router = Router::new()
            .route(
                "/api/v2/pokemon-species/{name}",
                get(|| async {
                    (
                        StatusCode::MOVED_PERMANENTLY,
                        [(header::LOCATION, "/elsewhere")],
                        "moved",
                    )
                }),
            )
            .route("/elsewhere", get(|| async { r#"{"name":"other"}"# }));
        let base = spawn_stub(router).await;

        let resp = client(&base).fetch_species("pikachu").await.unwrap();
        assert_eq!(resp, RawResponse::new(301, "moved"));
    }
}
