//! Curated per-category keyword tables.

use indexmap::IndexMap;
use serde::Serialize;

/// Category label → keywords, with one designated default category.
///
/// Declaration order is significant: it breaks ties between non-default
/// categories. Labels are stored lower case; keywords are matched
/// case-insensitively as literal substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryKeywordTable {
    default_category: String,
    categories: IndexMap<String, Vec<String>>,
}

impl CategoryKeywordTable {
    /// Create a table holding only the default category.
    pub fn new(
        default_category: impl Into<String>,
        default_keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let default_category = normalize_label(&default_category.into());
        let mut categories = IndexMap::new();
        categories.insert(default_category.clone(), clean_keywords(default_keywords));
        Self {
            default_category,
            categories,
        }
    }

    /// Declare a category. Redeclaring a label replaces its keywords but
    /// keeps its original position.
    pub fn with_category(
        mut self,
        label: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.categories
            .insert(normalize_label(&label.into()), clean_keywords(keywords));
        self
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Labels in declaration order, default included.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// `(label, keywords)` pairs in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(label, keywords)| (label.as_str(), keywords.as_slice()))
    }

    pub fn keywords(&self, label: &str) -> Option<&[String]> {
        self.categories
            .get(&normalize_label(label))
            .map(Vec::as_slice)
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, label: &str) -> bool {
        self.categories.contains_key(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The newsroom's built-in table: five topical desks with `news` as
    /// the default.
    pub fn editorial() -> Self {
        Self::new("news", NEWS.iter().copied())
            .with_category("sports", SPORTS.iter().copied())
            .with_category("business", BUSINESS.iter().copied())
            .with_category("entertainment", ENTERTAINMENT.iter().copied())
            .with_category("lifestyle", LIFESTYLE.iter().copied())
            .with_category("outdoors", OUTDOORS.iter().copied())
    }
}

impl Default for CategoryKeywordTable {
    fn default() -> Self {
        Self::editorial()
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

// Blank keywords would match at every position.
fn clean_keywords(keywords: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    keywords
        .into_iter()
        .map(Into::into)
        .filter(|k| !k.trim().is_empty())
        .collect()
}

const SPORTS: &[&str] = &[
    "football", "basketball", "baseball", "soccer", "hockey", "golf", "tennis",
    "athlete", "team", "game", "coach", "player", "championship", "tournament",
    "nfl", "nba", "mlb", "nhl", "ncaa", "college football", "score", "win", "lose",
    "playoff", "super bowl", "world series", "march madness", "olympics",
    "running", "marathon", "triathlon", "cycling", "swimming", "wrestling",
    "boxing", "mma", "ufc", "racing", "nascar", "stadium", "arena", "appalachian state",
    "unc", "duke", "nc state", "wake forest", "panthers", "hornets", "hurricanes",
    "braves", "falcons", "titans", "volunteers", "tarheels", "wolfpack", "mountaineers",
];

const BUSINESS: &[&str] = &[
    "economy", "economic", "business", "market", "stock", "investment", "investor",
    "company", "corporation", "startup", "entrepreneur", "ceo", "executive",
    "revenue", "profit", "sales", "retail", "commerce", "trade", "finance",
    "bank", "banking", "loan", "mortgage", "real estate", "property", "housing",
    "employment", "jobs", "hiring", "layoff", "unemployment", "workforce",
    "manufacturing", "industry", "factory", "agriculture", "farm", "tourism",
    "hotel", "restaurant", "brewery", "winery", "development", "construction",
    "downtown", "chamber of commerce", "small business",
];

const ENTERTAINMENT: &[&str] = &[
    "movie", "film", "cinema", "theater", "theatre", "concert", "music", "band",
    "singer", "actor", "actress", "celebrity", "hollywood", "broadway", "show",
    "performance", "festival", "art", "artist", "gallery", "museum", "exhibit",
    "television", "tv", "streaming", "netflix", "disney", "hulu", "amazon prime",
    "award", "grammy", "oscar", "emmy", "tony", "biltmore", "orange peel",
    "asheville music", "bluegrass", "folk", "jazz", "symphony", "opera",
    "comedy", "comedian", "standup", "podcast", "radio", "dj",
];

const LIFESTYLE: &[&str] = &[
    "health", "wellness", "fitness", "diet", "nutrition", "exercise", "yoga",
    "meditation", "mental health", "therapy", "counseling", "self-care",
    "food", "recipe", "cooking", "chef", "dining", "wine", "beer", "craft",
    "fashion", "style", "beauty", "skincare", "makeup", "hair",
    "home", "decor", "interior", "garden", "gardening", "diy", "renovation",
    "family", "parenting", "children", "kids", "baby", "wedding", "marriage",
    "travel", "vacation", "destination", "resort", "getaway", "adventure",
    "pets", "dog", "cat", "animal", "veterinary", "shelter", "adoption",
    "community", "volunteer", "nonprofit", "charity", "fundraiser", "donation",
];

const OUTDOORS: &[&str] = &[
    "hiking", "trail", "mountain", "camping", "backpacking", "wilderness",
    "nature", "wildlife", "park", "forest", "river", "lake", "waterfall",
    "fishing", "hunting", "kayaking", "rafting", "canoeing", "paddleboard",
    "climbing", "rock climbing", "bouldering", "skiing", "snowboarding",
    "blue ridge", "parkway", "appalachian", "smoky", "pisgah", "nantahala",
    "linville", "grandfather", "chimney rock", "dupont", "gorges",
    "conservation", "environment", "ecosystem", "sustainability", "green",
    "birding", "bird watching", "photography", "scenic", "overlook",
];

const NEWS: &[&str] = &[
    "police", "sheriff", "arrest", "crime", "court", "trial", "judge", "attorney",
    "government", "governor", "mayor", "city council", "county commission",
    "election", "vote", "ballot", "candidate", "politics", "political", "democrat", "republican",
    "legislation", "bill", "law", "regulation", "policy", "ordinance",
    "school", "education", "teacher", "student", "university", "college",
    "hospital", "medical", "healthcare", "doctor", "nurse", "patient",
    "fire", "firefighter", "emergency", "rescue", "accident", "crash",
    "weather", "storm", "hurricane", "tornado", "flood", "snow", "ice",
    "breaking", "update", "report", "investigation", "official", "announce",
];
