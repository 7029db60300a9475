//! Display-ready view of a search session.
//!
//! [`render`] is a pure function of the session state. The view never changes
//! state itself; pagination controls hand back [`PageChangeIntent`]s for the
//! caller to feed into the session.

use std::fmt;

use bigdecimal::BigDecimal;
use serde::Serialize;
use uuid::Uuid;

use crate::features::{
    rentals::models::Rental,
    search::{
        page::SearchResultPage,
        session::{SearchSessionState, SearchStatus},
    },
};

pub const DEFAULT_RENTAL_IMAGE: &str = "https://images.unsplash.com/photo-1566073771259-6a8506099945";

/// Amenities shown on a card before collapsing the rest into a count.
pub const CARD_AMENITIES: usize = 3;

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResultView {
    /// Nothing has been searched yet.
    Hidden,
    Loading {
        message: String,
    },
    Empty {
        title: String,
        hint: String,
    },
    Results {
        heading: String,
        cards: Vec<RentalCard>,
        pagination: PaginationControls,
    },
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RentalCard {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub price_per_night: BigDecimal,
    pub image_url: String,
    pub amenities: Vec<String>,
    pub more_amenities: usize,
    pub href: String,
}

impl From<&Rental> for RentalCard {
    fn from(rental: &Rental) -> Self {
        let image_url = rental
            .image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_RENTAL_IMAGE)
            .to_string();

        Self {
            id: rental.id,
            title: rental.title.clone(),
            location: rental.location.clone(),
            price_per_night: rental.price_per_night.clone(),
            image_url,
            amenities: rental.amenities.iter().take(CARD_AMENITIES).cloned().collect(),
            more_amenities: rental.amenities.len().saturating_sub(CARD_AMENITIES),
            href: format!("/rentals/{}", rental.id),
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PageChangeIntent {
    pub target_page: i64,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaginationControls {
    pub page_number: i64,
    pub total_pages: i64,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// Controls are only drawn when there is more than one page.
    pub visible: bool,
}

impl PaginationControls {
    pub fn for_page(result: &SearchResultPage) -> Self {
        let total_pages = result.total_pages.max(1);
        let page_number = result.page_number;

        Self {
            page_number,
            total_pages,
            previous_enabled: page_number > 1,
            next_enabled: page_number < total_pages,
            visible: total_pages > 1,
        }
    }

    pub fn previous(&self) -> Option<PageChangeIntent> {
        self.previous_enabled.then(|| PageChangeIntent {
            target_page: self.page_number - 1,
        })
    }

    pub fn next(&self) -> Option<PageChangeIntent> {
        self.next_enabled.then(|| PageChangeIntent {
            target_page: self.page_number + 1,
        })
    }
}

pub fn render(state: &SearchSessionState) -> ResultView {
    match (state.status, &state.last_result) {
        (SearchStatus::NotSearched, _) => ResultView::Hidden,
        (SearchStatus::Loading, _) => ResultView::Loading {
            message: "Searching rentals...".to_string(),
        },
        (SearchStatus::Loaded, Some(result)) if !result.is_empty() => ResultView::Results {
            heading: match result.total_count {
                1 => "1 rental found".to_string(),
                n => format!("{n} rentals found"),
            },
            cards: result.items.iter().map(RentalCard::from).collect(),
            pagination: PaginationControls::for_page(result),
        },
        (SearchStatus::Loaded, _) => ResultView::Empty {
            title: "No rentals found".to_string(),
            hint: "Try adjusting the search filters".to_string(),
        },
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultView::Hidden => Ok(()),
            ResultView::Loading { message } => writeln!(f, "{message}"),
            ResultView::Empty { title, hint } => {
                writeln!(f, "{title}")?;
                writeln!(f, "{hint}")
            }
            ResultView::Results {
                heading,
                cards,
                pagination,
            } => {
                writeln!(f, "{heading}")?;
                for card in cards {
                    writeln!(
                        f,
                        "  {} | {} | ${} per night",
                        card.title, card.location, card.price_per_night
                    )?;
                    if !card.amenities.is_empty() {
                        write!(f, "    {}", card.amenities.join(", "))?;
                        if card.more_amenities > 0 {
                            write!(f, " +{} more", card.more_amenities)?;
                        }
                        writeln!(f)?;
                    }
                }
                if pagination.visible {
                    writeln!(
                        f,
                        "{} Page {} of {} {}",
                        if pagination.previous_enabled { "<" } else { " " },
                        pagination.page_number,
                        pagination.total_pages,
                        if pagination.next_enabled { ">" } else { " " },
                    )?;
                }
                Ok(())
            }
        }
    }
}
