use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Static file router over the output directory
pub fn router(output_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .fallback_service(ServeDir::new(output_dir))
        .layer(cors)
}

/// URL of the generated site page on the local server
#[must_use]
pub fn site_url(port: u16, site_file: &Path) -> String {
    let page = site_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("http://localhost:{port}/{page}")
}

/// Serve `output_dir` until Ctrl+C
pub async fn run(output_dir: PathBuf, site_file: &Path, port: u16) -> Result<()> {
    let app = router(&output_dir);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Serving {} at {}", output_dir.display(), site_url(port, site_file));
    tracing::info!("Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| "Web server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_url() {
        assert_eq!(
            site_url(8000, Path::new("output/parks_site.html")),
            "http://localhost:8000/parks_site.html"
        );
    }

    #[tokio::test]
    async fn test_serves_output_files() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("parks_site.html"), "<h1>parks</h1>").unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(temp_dir.path());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let body = reqwest::get(format!("http://{addr}/parks_site.html"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "<h1>parks</h1>");
    }
}
