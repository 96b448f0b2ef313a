use crate::state::{AppState, RenderConfig};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

const CONTENT_TYPE_OPENSEARCH: &str = "application/opensearchdescription+xml";

/// OpenSearch descriptor that lets browsers use the service as a search
/// engine with suggestions.
pub async fn opensearch_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, CONTENT_TYPE_OPENSEARCH)],
        render_descriptor(&state.render),
    )
}

fn render_descriptor(config: &RenderConfig) -> String {
    let base = escape_xml(config.public_base_url.trim_end_matches('/'));
    let short_name = escape_xml(&config.short_name);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/">
  <ShortName>{short_name}</ShortName>
  <Description>Search {short_name}</Description>
  <InputEncoding>UTF-8</InputEncoding>
  <OutputEncoding>UTF-8</OutputEncoding>
  <Url type="application/x-suggestions+json" method="GET" template="{base}/links/suggest?q={{searchTerms}}"/>
  <Url type="text/html" method="GET" template="{base}/links/search?q={{searchTerms}}"/>
</OpenSearchDescription>
"#
    )
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_uses_configured_base_url() {
        let config = RenderConfig::builder()
            .public_base_url("https://go.example.com/")
            .build();

        let xml = render_descriptor(&config);

        assert!(xml.contains(
            r#"template="https://go.example.com/links/suggest?q={searchTerms}""#
        ));
        assert!(xml.contains("<ShortName>Go</ShortName>"));
    }

    #[test]
    fn descriptor_escapes_markup() {
        let config = RenderConfig::builder().short_name("Go & <Co>").build();

        let xml = render_descriptor(&config);
        assert!(xml.contains("<ShortName>Go &amp; &lt;Co&gt;</ShortName>"));
    }
}
