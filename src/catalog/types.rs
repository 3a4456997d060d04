//! Wire types of the movie catalog API.
//!
//! Unknown fields are ignored and most nested objects are optional: the
//! API omits or nulls them freely.

use serde::{Deserialize, Serialize};

/// One page of titles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TitlesPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub entries: u32,
    #[serde(default)]
    pub results: Vec<TitleInfo>,
}

impl TitlesPage {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleInfo {
    #[serde(rename = "_id", default)]
    pub internal_id: String,
    pub id: String,
    pub primary_image: Option<ImageData>,
    pub title_type: Option<TitleType>,
    pub title_text: Option<TitleText>,
    pub original_title_text: Option<TitleText>,
    pub release_year: Option<ReleaseYear>,
    pub release_date: Option<ReleaseDate>,
}

impl TitleInfo {
    /// Title to show, falling back to the original title and then the id.
    pub fn display_title(&self) -> &str {
        self.title_text
            .as_ref()
            .or(self.original_title_text.as_ref())
            .map(|t| t.text.as_str())
            .unwrap_or(&self.id)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.primary_image.as_ref().map(|image| image.url.as_str())
    }

    pub fn year(&self) -> Option<i32> {
        self.release_year
            .as_ref()
            .map(|y| y.year)
            .or_else(|| self.release_date.as_ref().map(|d| d.year))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    pub url: String,
    pub caption: Option<ImageCaption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCaption {
    pub plain_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleType {
    pub text: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub is_series: bool,
    #[serde(default)]
    pub is_episode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseYear {
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDate {
    pub day: Option<u8>,
    pub month: Option<u8>,
    pub year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenresResponse {
    #[serde(default)]
    pub results: Vec<Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListsResponse {
    #[serde(default)]
    pub results: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RandomResponse {
    #[serde(default)]
    pub results: Vec<TitleInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TitleResponse {
    pub results: Option<TitleInfo>,
}

/// Optional filters for the title listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    pub genre: Option<String>,
    pub list: Option<String>,
}
