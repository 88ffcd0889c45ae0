//! UI Components
//!
//! Leptos components for the rendered digest.

mod chip_bar;
mod digest_section;
mod item_card;

pub use chip_bar::ChipBar;
pub use digest_section::DigestSectionView;
pub use item_card::ItemCard;
