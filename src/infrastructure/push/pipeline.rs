//! HTTP push pipeline: package, upload, wait for bundling, open browser

use std::time::Duration;

use reqwest::Url;

use crate::domain::policies::EventFilter;
use crate::domain::ports::{PushError, PushPipeline, PushReport, PushRequest};

use super::frontend::{FrontendClient, FrontendEndpoints};
use super::packager::{app_name, package_app};
use super::progress::{wait_for_bundle, DEFAULT_POLL_INTERVAL};

/// Pushes an app folder to the frontend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPushPipeline {
    endpoints: FrontendEndpoints,
    filter: EventFilter,
    poll_interval: Duration,
}

impl HttpPushPipeline {
    pub fn new(endpoints: FrontendEndpoints, filter: EventFilter) -> Self {
        Self {
            endpoints,
            filter,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn endpoints(&self) -> &FrontendEndpoints {
        &self.endpoints
    }
}

impl PushPipeline for HttpPushPipeline {
    fn push(&self, request: &PushRequest) -> Result<PushReport, PushError> {
        let upload_uri = self.endpoints.upload_uri(request.use_local_frontend)?;
        let name = app_name(&request.app_path)?;

        let package = package_app(&request.app_path, &self.filter)?;
        if request.verbose {
            log::info!(
                "Packaged {} files into {} ({} bytes)",
                package.files(),
                package.path().display(),
                package.bytes()
            );
        }

        let client = FrontendClient::new(request.request_timeout)?;
        let progress = client.upload(upload_uri, package.path(), &name, request.verbose)?;
        let progress = resolve_link(upload_uri, &progress);

        let done = wait_for_bundle(
            &client,
            &progress,
            self.poll_interval,
            request.idle_timeout,
            request.verbose,
        )?;

        let app_url = done.links.app.map(|app| resolve_link(upload_uri, &app));
        if request.open_browser {
            match &app_url {
                Some(url) => {
                    if let Err(e) = open::that(url) {
                        log::warn!("could not open browser at {url}: {e}");
                    }
                }
                None => log::warn!("the frontend did not report an app link to open"),
            }
        }

        Ok(PushReport {
            files: package.files(),
            bytes: package.bytes(),
            app_url,
        })
    }
}

/// Resolve a link from the frontend against the upload URI; absolute links
/// are returned as is.
fn resolve_link(base: &str, link: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(link)) {
        Ok(url) => url.to_string(),
        Err(_) => link.to_string(),
    }
}
