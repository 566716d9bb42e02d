use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Literary Arts")]
    LiteraryArts,
    #[serde(rename = "Print Media")]
    PrintMedia,
    #[serde(rename = "Visual Arts")]
    VisualArts,
    #[serde(rename = "Photography")]
    Photography,
    #[serde(rename = "Media & Mixed Arts")]
    MediaAndMixedArts,
    #[serde(rename = "Radio & Podcasts")]
    RadioAndPodcasts,
    #[serde(rename = "Blogs")]
    Blogs,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::LiteraryArts,
        Category::PrintMedia,
        Category::VisualArts,
        Category::Photography,
        Category::MediaAndMixedArts,
        Category::RadioAndPodcasts,
        Category::Blogs,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::LiteraryArts => "Literary Arts",
            Category::PrintMedia => "Print Media",
            Category::VisualArts => "Visual Arts",
            Category::Photography => "Photography",
            Category::MediaAndMixedArts => "Media & Mixed Arts",
            Category::RadioAndPodcasts => "Radio & Podcasts",
            Category::Blogs => "Blogs",
        }
    }

    /// One fixed bucket per category.
    pub fn bucket(self) -> &'static str {
        match self {
            Category::LiteraryArts => "literary-arts",
            Category::PrintMedia => "print-media",
            Category::VisualArts => "visual-arts",
            Category::Photography => "photography",
            Category::MediaAndMixedArts => "media-mixed-arts",
            Category::RadioAndPodcasts => "radio-podcasts",
            Category::Blogs => "blogs",
        }
    }

    pub fn info(self) -> &'static CategoryInfo {
        CATALOG
            .iter()
            .find(|entry| entry.category == self)
            .unwrap_or(&FALLBACK_INFO)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = crate::error::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.display_name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| crate::error::Error::Config(format!("unknown category: {value}")))
    }
}

/// Static catalog entry backing the category index screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: Category,
    pub image: &'static str,
    pub items: &'static [&'static str],
    pub icon: &'static str,
    pub color: &'static str,
}

static FALLBACK_INFO: CategoryInfo = CategoryInfo {
    category: Category::Blogs,
    image: "",
    items: &[],
    icon: "📄",
    color: "#9AA0A6",
};

pub static CATALOG: [CategoryInfo; 7] = [
    CategoryInfo {
        category: Category::LiteraryArts,
        image: "https://images.unsplash.com/photo-1519791883288-dc8bd696e667?auto=format&fit=crop&w=600&q=80",
        items: &["Poetry", "Short Stories", "Novels"],
        icon: "📚",
        color: "#FF6B6B",
    },
    CategoryInfo {
        category: Category::PrintMedia,
        image: "https://images.unsplash.com/photo-1616873065098-9bdc6fda9c68?auto=format&fit=crop&w=600&q=80",
        items: &["Newspapers", "Magazines"],
        icon: "📰",
        color: "#4ECDC4",
    },
    CategoryInfo {
        category: Category::VisualArts,
        image: "https://images.unsplash.com/photo-1570804606950-8b2eb25a2d68?auto=format&fit=crop&w=600&q=80",
        items: &["Mural Art", "Contemporary Painting", "Sketches & Illustrations"],
        icon: "🎨",
        color: "#45B7D1",
    },
    CategoryInfo {
        category: Category::Photography,
        image: "https://images.unsplash.com/photo-1541516160071-4bb0c5af65ba?auto=format&fit=crop&w=600&q=80",
        items: &["Documentary Photography", "Artistic Photography"],
        icon: "📸",
        color: "#96CEB4",
    },
    CategoryInfo {
        category: Category::MediaAndMixedArts,
        image: "https://images.unsplash.com/photo-1519125323398-675f0ddb6308?auto=format&fit=crop&w=600&q=80",
        items: &["Film & Television", "Short Films", "Documentaries", "TV Serials"],
        icon: "🎬",
        color: "#FFEAA7",
    },
    CategoryInfo {
        category: Category::RadioAndPodcasts,
        image: "https://images.unsplash.com/photo-1627667050025-be23c83837e9?auto=format&fit=crop&w=600&q=80",
        items: &["Radio Plays", "Literary Podcasts"],
        icon: "🎵",
        color: "#DDA0DD",
    },
    CategoryInfo {
        category: Category::Blogs,
        image: "https://images.unsplash.com/photo-1502086223501-7ea6ecd79368?auto=format&fit=crop&w=600&q=80",
        items: &["Tech Blogs", "Travel Blogs", "Lifestyle Blogs", "Educational Blogs"],
        icon: "✍️",
        color: "#A0E7E5",
    },
];
