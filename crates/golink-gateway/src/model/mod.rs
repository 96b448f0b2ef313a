mod health;
mod link;

pub use health::HealthResponse;
pub use link::{
    CreateLinkForm, EditLinkParams, IndexParams, IndexResponse, LinkResponse, ListingResponse,
    MissingLinkResponse, SearchParams,
};
