use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Video {
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}?autoplay=1", self.key)
    }
}

/// Body of `/movie/{id}/videos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

impl VideoList {
    /// First YouTube trailer, if the movie has one.
    pub fn trailer(&self) -> Option<&Video> {
        self.results
            .iter()
            .find(|v| v.kind == "Trailer" && v.site == "YouTube")
    }
}
