use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

const WEDDING_ALTS: [&str; 26] = [
    "Elegant wedding ceremony setup",
    "Bride and groom first dance",
    "Bridal portrait in natural light",
    "Wedding reception details",
    "Couple portrait at golden hour",
    "Wedding party celebration",
    "Intimate moment between newlyweds",
    "Wedding venue decoration",
    "Bride walking down the aisle",
    "Ring exchange ceremony",
    "Wedding cake cutting moment",
    "Bridesmaids group photo",
    "Groomsmen celebration",
    "Wedding bouquet toss",
    "Couple exit with sparklers",
    "Wedding rings close-up",
    "Father daughter dance",
    "Mother son dance moment",
    "Wedding dress details",
    "Couple portrait in garden",
    "First look reaction",
    "Wedding vows exchange",
    "Reception table settings",
    "Dance floor moments",
    "Sunset couple portrait",
    "Final send-off celebration",
];

const AUTOMOTIVE_COUNT: u32 = 13;
const VIDEO_COUNT: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub id: u32,
    pub src: String,
    pub alt: String,
    pub kind: MediaKind,
    /// Poster shown in the grid. Videos use their own source, photos have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl MediaItem {
    fn photo(id: u32, src: String, alt: impl Into<String>) -> Self {
        Self {
            id,
            src,
            alt: alt.into(),
            kind: MediaKind::Photo,
            thumbnail: None,
        }
    }

    fn video(id: u32, src: String, alt: impl Into<String>) -> Self {
        Self {
            id,
            thumbnail: Some(src.clone()),
            src,
            alt: alt.into(),
            kind: MediaKind::Video,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub cover: &'static str,
    pub items: Vec<MediaItem>,
}

#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub cover: &'static str,
    pub href: String,
    pub count: usize,
}

impl From<&Section> for SectionSummary {
    fn from(section: &Section) -> Self {
        Self {
            slug: section.slug,
            title: section.title,
            description: section.description,
            cover: section.cover,
            href: format!("/gallery/{}", section.slug),
            count: section.items.len(),
        }
    }
}

/// The fixed portfolio. Sections keep the order they are shown in.
pub struct Gallery {
    sections: Vec<Section>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::portfolio()
    }
}

impl Gallery {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn portfolio() -> Self {
        let weddings = WEDDING_ALTS
            .iter()
            .zip(1u32..)
            .map(|(alt, id)| MediaItem::photo(id, format!("/wedding-photos/wedding{id}.jpg"), *alt))
            .collect();

        let automotive = (1..=AUTOMOTIVE_COUNT)
            .map(|id| {
                MediaItem::photo(
                    id,
                    format!("/automotive-photos/auto{id}.jpg"),
                    format!("Automotive photography {id}"),
                )
            })
            .collect();

        let videos = (1..=VIDEO_COUNT)
            .map(|id| MediaItem::video(id, format!("/videos/video{id}.mp4"), format!("Video {id}")))
            .collect();

        Self::new(vec![
            Section {
                slug: "weddings",
                title: "Weddings",
                description: "Capturing your special moments with elegance and emotion",
                cover: "/wedding1.jpg",
                items: weddings,
            },
            Section {
                slug: "sports",
                title: "Sports",
                description: "Freezing the action in its most dramatic moments",
                cover: "/sports1.jpg",
                items: Vec::new(),
            },
            Section {
                slug: "portraits",
                title: "Portraits",
                description: "Professional portraits that tell your story",
                cover: "/portraits1.jpg",
                items: Vec::new(),
            },
            Section {
                slug: "automotive",
                title: "Automotive",
                description: "Showcasing the beauty and power of automobiles",
                cover: "/auto1.jpg",
                items: automotive,
            },
            Section {
                slug: "engagements",
                title: "Engagements",
                description: "Engagements are a special moment in your life, and I am here to capture it.",
                cover: "/engagements/engagements2.jpg",
                items: Vec::new(),
            },
            Section {
                slug: "videos",
                title: "Videos",
                description: "Videos are a special moment in your life, and I am here to capture it.",
                cover: "/v1.jpg",
                items: videos,
            },
        ])
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, slug: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.slug == slug)
    }
}

/// Full-screen viewer over one section's items.
#[derive(Debug)]
pub struct Lightbox<'a> {
    items: &'a [MediaItem],
    selected: Option<usize>,
    direction: i8,
}

impl<'a> Lightbox<'a> {
    pub fn new(items: &'a [MediaItem]) -> Self {
        Self {
            items,
            selected: None,
            direction: 0,
        }
    }

    pub fn open(&mut self, id: u32) -> Option<&'a MediaItem> {
        self.selected = self.items.iter().position(|item| item.id == id);
        self.current()
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn current(&self) -> Option<&'a MediaItem> {
        let items = self.items;
        self.selected.and_then(|index| items.get(index))
    }

    /// Advances to the next item, wrapping from the last to the first.
    pub fn next(&mut self) -> Option<&'a MediaItem> {
        let index = self.selected?;
        self.selected = Some(if index + 1 < self.items.len() { index + 1 } else { 0 });
        self.direction = 1;
        self.current()
    }

    /// Steps back, wrapping from the first to the last.
    pub fn previous(&mut self) -> Option<&'a MediaItem> {
        let index = self.selected?;
        self.selected = Some(if index > 0 { index - 1 } else { self.items.len() - 1 });
        self.direction = -1;
        self.current()
    }

    /// One-based position and total, e.g. `(3, 26)` for "3 / 26".
    pub fn position(&self) -> Option<(usize, usize)> {
        self.selected.map(|index| (index + 1, self.items.len()))
    }

    /// Last move: 1 forward, -1 back, 0 before any navigation. Opening and
    /// closing leave it untouched.
    pub fn direction(&self) -> i8 {
        self.direction
    }
}

async fn handle_sections(State(gallery): State<Arc<Gallery>>) -> Json<Vec<SectionSummary>> {
    Json(gallery.sections().iter().map(SectionSummary::from).collect())
}

async fn handle_section(
    State(gallery): State<Arc<Gallery>>,
    Path(slug): Path<String>,
) -> Result<Json<Section>, StatusCode> {
    debug!("Gallery section requested: {}", slug);
    gallery
        .section(&slug)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub fn gallery_api(gallery: Arc<Gallery>) -> Router {
    Router::new()
        .route("/", get(handle_sections))
        .route("/:slug", get(handle_section))
        .with_state(gallery)
}
