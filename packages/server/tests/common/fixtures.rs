//! Article fixtures shared by the API tests.

use newsdesk::ArticleRecord;

pub fn sports_article() -> ArticleRecord {
    ArticleRecord::new("sports-1", "Hurricanes Win Championship Game")
        .with_slug("hurricanes-win-championship-game")
        .with_content("The team held on in overtime as the coach praised the defense.")
        .with_category("News")
}

pub fn civic_article() -> ArticleRecord {
    ArticleRecord::new("civic-1", "Mayor Signs Ordinance")
        .with_content("The mayor signed the ordinance after a public hearing.")
        .with_category("News")
}

pub fn trail_article() -> ArticleRecord {
    ArticleRecord::new("trail-1", "New Trail Opens at State Park")
        .with_content("Hikers can reach the lake by the new trail this fall.")
        .with_tags(["hiking"])
}

pub fn corpus() -> Vec<ArticleRecord> {
    vec![sports_article(), civic_article(), trail_article()]
}
