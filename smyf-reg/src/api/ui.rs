//! Form and static asset serving
//!
//! The entry page and every other asset are read from the public directory
//! on each request; nothing is embedded in the binary.

use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Entry form page name inside the public directory
pub const INDEX_FILE: &str = "index.html";

/// GET /
///
/// Serves the registration form
pub fn index_service(public_dir: &Path) -> ServeFile {
    ServeFile::new(public_dir.join(INDEX_FILE))
}

/// GET /<asset path>
///
/// Serves any file under the public directory verbatim, 404 when absent
pub fn asset_service(public_dir: &Path) -> ServeDir {
    ServeDir::new(public_dir)
}
