//! A terminal yes/no oracle.
//!
//! The heart of the crate is [`presenter::LoadController`], which drives a
//! [`view::View`] through load, success and failure using a
//! [`loader::Loader`] and an [`alert::AlertPresenter`]. Everything else is a
//! concrete collaborator for the terminal binary or a test double.

pub mod alert;
pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod loader;
pub mod presenter;
pub mod spinner;
pub mod ui;
pub mod view;
