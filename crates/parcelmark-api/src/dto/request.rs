use serde::Deserialize;

/// Completed drawing: ring vertices as `[lat, lon]` pairs
#[derive(Debug, Deserialize)]
pub struct CreateDraftRequest {
    pub vertices: Vec<[f64; 2]>,
}

/// Rename request body
#[derive(Debug, Deserialize)]
pub struct RenameDraftRequest {
    pub name: String,
}

/// Commit request body; omitting `name` keeps the draft's current name
#[derive(Debug, Default, Deserialize)]
pub struct CommitDraftRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Location search query string
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}
