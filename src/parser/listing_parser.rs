// Strategy-driven listing extraction
use crate::model::{Listing, ParserError};
use crate::parser::strategy::SelectorStrategy;
use crate::utils::{extract_coordinates, extract_phone, flatten_text, truncate_name};
use scraper::{ElementRef, Html, Selector};

pub const UNKNOWN_NAME: &str = "Unknown";

pub trait Parser {
    fn parse(&self, html: &str, page: u32) -> Vec<Listing>;
}

/// One extractor for every surface; the strategy decides where fields live.
pub struct ListingParser {
    items: Vec<Selector>,
    names: Vec<Selector>,
    link: Selector,
    image: Selector,
    name_limit: Option<usize>,
}

fn compile(selector: &str) -> Result<Selector, ParserError> {
    Selector::parse(selector).map_err(|e| ParserError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

impl ListingParser {
    pub fn new(strategy: &SelectorStrategy) -> Result<Self, ParserError> {
        Ok(Self {
            items: strategy
                .items
                .iter()
                .map(|s| compile(s))
                .collect::<Result<_, _>>()?,
            names: strategy
                .names
                .iter()
                .map(|s| compile(s))
                .collect::<Result<_, _>>()?,
            link: compile(strategy.link)?,
            image: compile(strategy.image)?,
            name_limit: strategy.name_limit,
        })
    }

    fn item_blocks<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for selector in &self.items {
            let found: Vec<_> = document.select(selector).collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    fn extract(&self, item: ElementRef<'_>, page: u32) -> Listing {
        let name = self
            .names
            .iter()
            .find_map(|selector| item.select(selector).next())
            .map(|node| flatten_text(&node))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let name = match self.name_limit {
            Some(limit) => truncate_name(&name, limit),
            None => name,
        };

        let phone = extract_phone(&flatten_text(&item));

        let (latitude, longitude) = item
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(extract_coordinates)
            .map_or((None, None), |(lat, lon)| (Some(lat), Some(lon)));

        let image = item
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(String::from);

        Listing {
            name,
            phone,
            latitude,
            longitude,
            image,
            source_page: page,
        }
    }
}

impl Parser for ListingParser {
    fn parse(&self, html: &str, page: u32) -> Vec<Listing> {
        let document = Html::parse_document(html);
        self.item_blocks(&document)
            .into_iter()
            .map(|item| self.extract(item, page))
            .collect()
    }
}
