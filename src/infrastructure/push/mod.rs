//! Push pipeline adapter
//!
//! - `packager` - Zips the app folder into a `.zap`
//! - `frontend` - Multipart upload, upload response parsing
//! - `progress` - Polls the bundling progress document
//! - `pipeline` - `HttpPushPipeline`, the `PushPipeline` implementation

mod frontend;
mod packager;
mod pipeline;
mod progress;

pub use frontend::{
    parse_upload_response, FrontendClient, FrontendEndpoints, DEFAULT_LOCAL_FRONTEND_URL,
};
pub use packager::{app_name, package_app, Package, ZAP_EXTENSION};
pub use pipeline::HttpPushPipeline;
pub use progress::{
    wait_for_bundle, BundleStatus, ProgressDocument, ProgressTracker, DEFAULT_POLL_INTERVAL,
};
