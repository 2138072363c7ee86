/// Where to look for listing fields on a given results surface.
#[derive(Debug, Clone)]
pub struct SelectorStrategy {
    /// Item block selectors, in priority order. The first one that matches
    /// anything on the page wins.
    pub items: Vec<&'static str>,
    /// Name selectors, tried in order inside each item.
    pub names: Vec<&'static str>,
    /// Anchor whose `href` may carry `@lat,lon`.
    pub link: &'static str,
    pub image: &'static str,
    /// Names longer than this are cut and marked with `...`.
    pub name_limit: Option<usize>,
}

impl SelectorStrategy {
    /// Maps search results feed.
    pub fn maps() -> Self {
        Self {
            items: vec!["div[role='article']", "div.Nv2PK"],
            names: vec!["div.fontHeadlineSmall", "div.qBF1Pd"],
            link: "a.hfpxzc",
            image: "img",
            name_limit: None,
        }
    }

    /// General web search: local pack first, then generic result blocks.
    pub fn organic() -> Self {
        Self {
            items: vec!["div.VkpGBb", "div.g"],
            names: vec!["div[role='heading']", "h3"],
            link: "a[href*='/maps']",
            image: "img",
            name_limit: Some(50),
        }
    }
}
