/// Mailing service interface
pub mod mailing;
