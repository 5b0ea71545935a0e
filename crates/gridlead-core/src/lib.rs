//! Core library for `gridlead`.
//!
//! Contains the lead-capture pipeline for The Grid's early-access page:
//! field collection, validation, inline error presentation, the two
//! delivery strategies (mailto and HTTP), outcome reporting, and the form
//! controller that ties them together. The supporting page behaviours
//! (anchor scrolling, mobile nav, reveal-on-scroll, logo fallback, footer
//! year) live here too. This crate depends on `gridlead-surface` for the
//! rendering surface trait and knows nothing about any particular front end.

pub mod anchor;
pub mod config;
pub mod controller;
pub mod delivery;
pub mod error;
pub mod footer;
pub mod lead;
pub mod logo;
pub mod nav;
pub mod present;
pub mod report;
pub mod reveal;
pub mod validate;

pub use controller::{FormController, FormState, SubmitOutcome};
pub use lead::LeadRecord;
