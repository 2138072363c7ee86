use crate::model::Listing;
use std::collections::HashSet;

/// Listings in discovery order, unique on `(name, phone)`.
#[derive(Debug, Default, Clone)]
pub struct ListingSet {
    seen: HashSet<(String, Option<String>)>,
    listings: Vec<Listing>,
}

impl ListingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `listing` unless one with the same name and phone is already held.
    /// Returns whether it was added.
    pub fn insert(&mut self, listing: Listing) -> bool {
        let key = (listing.name.clone(), listing.phone.clone());
        if !self.seen.insert(key) {
            return false;
        }
        self.listings.push(listing);
        true
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn as_slice(&self) -> &[Listing] {
        &self.listings
    }

    pub fn into_vec(self) -> Vec<Listing> {
        self.listings
    }
}
