//! Domain model of the tab database.
//!
//! This crate provides the records the pipeline works on:
//! - [`CatalogItem`] and [`Catalog`] for the tabbed songs
//! - [`PlayRecord`] / [`PlayEvent`] for the play log before and after ordering
//! - [`RequestEvent`] for the request log
//! - [`ArtistType`] and [`Requester`] value objects

pub mod catalog;
pub mod columns;
pub mod events;
pub mod value_objects;

pub use catalog::{Catalog, CatalogItem};
pub use events::{PlayEvent, PlayRecord, RequestEvent};
pub use value_objects::{ArtistType, ParseArtistTypeError, Requester};
