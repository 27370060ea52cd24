/// Module containing the mailing service for campaigns and contact uploads
pub mod mailing_service;

pub use crate::application::interfaces::mailing::*;
pub use mailing_service::*;
