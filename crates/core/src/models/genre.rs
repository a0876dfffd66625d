use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Body of `/genre/movie/list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Read-only id to name lookup, kept in API order for the genre picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenreCatalog {
    genres: Vec<Genre>,
}

impl GenreCatalog {
    pub fn new(genres: Vec<Genre>) -> Self {
        Self { genres }
    }

    pub fn name(&self, id: i32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

impl From<GenreList> for GenreCatalog {
    fn from(list: GenreList) -> Self {
        Self::new(list.genres)
    }
}
