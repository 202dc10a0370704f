//! HTTP server for the generated documents and the public directory.
//!
//! Routes (query strings ignored):
//!
//! | Path                  | Body                              |
//! |-----------------------|-----------------------------------|
//! | `/<site.feed.path>`   | RSS feed, rendered per request    |
//! | `/<site.sitemap.path>`| sitemap, rendered per request     |
//! | `/<samples.manifest>` | sample manifest                   |
//! | anything else         | file from `build.public`, or 404  |

mod lifecycle;
mod path;
mod response;

use crate::{
    config::{SiteConfig, cfg},
    core::{is_shutdown, register_server},
    debug,
    generator::{feed::render_feed, minify_xml, sitemap::render_sitemap},
    log,
    samples::manifest::render_site_manifest,
    utils::mime::types::{JSON, RSS, XML},
};
use anyhow::{Context, Result};
use std::{path::Path, sync::Arc};
use tiny_http::{Request, Server};

/// Documents rendered on request rather than read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Feed,
    Sitemap,
    Manifest,
    Static,
}

impl Route {
    fn of(clean_path: &str, config: &SiteConfig) -> Self {
        let matches = |p: &Path| Path::new(clean_path) == p;

        if config.site.feed.enable && matches(&config.site.feed.path) {
            Self::Feed
        } else if config.site.sitemap.enable && matches(&config.site.sitemap.path) {
            Self::Sitemap
        } else if matches(&config.samples.manifest) {
            Self::Manifest
        } else {
            Self::Static
        }
    }
}

/// Bind the server and serve until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    if !config.build.public.is_dir() {
        log!("warning"; "public dir {} not found, serving generated documents only", config.build.public.display());
    }

    run_request_loop(&server, config.serve.threads)
}

fn run_request_loop(server: &Server, threads: usize) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("serve-{i}"))
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let config = cfg();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }

    log!("serve"; "stopped");
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    debug!("serve"; "{} {}", request.method(), request.url());

    if !response::is_get_or_head(&request) {
        return response::respond_method_not_allowed(request);
    }

    let clean = path::normalize_url(request.url());
    let rendered = match Route::of(&clean, config) {
        Route::Feed => render_feed(config).map(|xml| (RSS, xml.into_bytes())),
        Route::Sitemap => {
            let xml = render_sitemap(config);
            Ok((XML, minify_xml(xml.as_bytes(), config.build.minify).into_owned()))
        }
        Route::Manifest => render_site_manifest(config).map(|json| (JSON, json.into_bytes())),
        Route::Static => {
            return match path::resolve_path(request.url(), &config.build.public) {
                Some(file) => response::respond_file(request, &file),
                None => response::respond_not_found(request),
            };
        }
    };

    match rendered {
        Ok((content_type, body)) => response::respond_document(request, content_type, body),
        Err(e) => {
            log!("error"; "{}: {e:#}", clean);
            response::respond_internal_error(request, &e)
        }
    }
}
