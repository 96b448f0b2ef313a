use golink_core::{Link, LinkId};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Form body of `POST /links`. Absent fields are reported by validation.
#[derive(Debug, Deserialize)]
pub struct CreateLinkForm {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    /// Pre-fills the create form, e.g. after a missing link was requested.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditLinkParams {
    pub action: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl EditLinkParams {
    pub const DO_EDIT: &'static str = "do_edit";

    pub fn is_submit(&self) -> bool {
        self.action.as_deref() == Some(Self::DO_EDIT)
    }
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: LinkId,
    pub name: String,
    pub url: String,
    pub hits: u64,
    pub created_at: Timestamp,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            name: link.name,
            url: link.url,
            hits: link.hits,
            created_at: link.created_at,
        }
    }
}

fn into_responses(links: Vec<Link>) -> Vec<LinkResponse> {
    links.into_iter().map(LinkResponse::from).collect()
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub name: Option<String>,
    pub links: Vec<LinkResponse>,
}

impl IndexResponse {
    pub fn new(name: Option<String>, links: Vec<Link>) -> Self {
        Self {
            name,
            links: into_responses(links),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub query: String,
    pub links: Vec<LinkResponse>,
}

impl ListingResponse {
    pub fn new(query: String, links: Vec<Link>) -> Self {
        Self {
            query,
            links: into_responses(links),
        }
    }
}

/// Body of the 404 for an unknown name, offering to create it.
#[derive(Debug, Serialize)]
pub struct MissingLinkResponse {
    pub name: String,
    pub message: String,
    pub create_url: String,
}

impl MissingLinkResponse {
    pub fn new(name: String) -> Self {
        Self {
            message: format!("Link \"go/{name}\" not found!"),
            create_url: format!("/?name={}", urlencoding::encode(&name)),
            name,
        }
    }
}
