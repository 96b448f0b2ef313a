use std::sync::Arc;

use golink_directory::Directory;
use golink_redirector::Redirector;
use typed_builder::TypedBuilder;

/// Settings consumed only when rendering responses.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RenderConfig {
    /// Public address of the service, used in the OpenSearch descriptor.
    #[builder(default = "http://go".to_string(), setter(into))]
    pub public_base_url: String,
    /// Short name shown by browsers for the search engine.
    #[builder(default = "Go".to_string(), setter(into))]
    pub short_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub(crate) directory: Arc<dyn Directory>,
    pub(crate) redirector: Arc<dyn Redirector>,
    pub(crate) render: Arc<RenderConfig>,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn Directory>,
        redirector: Arc<dyn Redirector>,
        render: RenderConfig,
    ) -> Self {
        Self {
            directory,
            redirector,
            render: Arc::new(render),
        }
    }
}
