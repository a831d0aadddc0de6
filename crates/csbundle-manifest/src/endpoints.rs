//! Remote endpoint configuration.
//!
//! The three URL templates the pipeline talks to are injected rather than
//! hard-coded at the call sites, so tests can point the fetchers at a local
//! stub server.

/// URL templates for the marketplace and the release index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Extension download template. Placeholders: `{publisher}`, `{name}`,
    /// `{version}`.
    pub extension_download: String,
    /// Release-index template. Placeholder: `{release}` (a tag, or the
    /// path segment `latest`).
    pub release_index: String,
    /// Asset-download template. Placeholder: `{asset_id}`.
    pub asset_download: String,
}

impl Endpoints {
    /// Builds the download URL for one extension descriptor's fields.
    pub fn extension_url(&self, publisher: &str, name: &str, version: &str) -> String {
        self.extension_download
            .replace("{publisher}", publisher)
            .replace("{name}", name)
            .replace("{version}", version)
    }

    /// Builds the release-index URL for a release tag or `latest`.
    pub fn release_url(&self, release: &str) -> String {
        self.release_index.replace("{release}", release)
    }

    /// Builds the asset-download URL for a numeric asset id.
    pub fn asset_url(&self, asset_id: u64) -> String {
        self.asset_download
            .replace("{asset_id}", &asset_id.to_string())
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            extension_download: "https://{publisher}.gallery.vsassets.io/_apis/public/gallery/publisher/{publisher}/extension/{name}/{version}/assetbyname/Microsoft.VisualStudio.Services.VSIXPackage".to_string(),
            release_index: "https://api.github.com/repos/cdr/code-server/releases/{release}".to_string(),
            asset_download: "https://api.github.com/repos/cdr/code-server/releases/assets/{asset_id}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extension_url_substitution() {
        let endpoints = Endpoints::default();
        let url = endpoints.extension_url("ms-python", "python", "2021.1.0");
        assert_eq!(
            url,
            "https://ms-python.gallery.vsassets.io/_apis/public/gallery/publisher/ms-python/extension/python/2021.1.0/assetbyname/Microsoft.VisualStudio.Services.VSIXPackage"
        );
    }

    #[test]
    fn test_release_url_latest() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.release_url("latest"),
            "https://api.github.com/repos/cdr/code-server/releases/latest"
        );
    }

    #[test]
    fn test_asset_url() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.asset_url(12345),
            "https://api.github.com/repos/cdr/code-server/releases/assets/12345"
        );
    }

    #[test]
    fn test_injected_endpoints() {
        let endpoints = Endpoints {
            extension_download: "http://127.0.0.1:9/ext/{publisher}/{name}/{version}".to_string(),
            release_index: "http://127.0.0.1:9/releases/{release}".to_string(),
            asset_download: "http://127.0.0.1:9/assets/{asset_id}".to_string(),
        };
        assert_eq!(endpoints.extension_url("p", "n", "1"), "http://127.0.0.1:9/ext/p/n/1");
        assert_eq!(endpoints.asset_url(7), "http://127.0.0.1:9/assets/7");
    }
}
