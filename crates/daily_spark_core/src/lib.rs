pub mod domain;
pub mod ports;
pub mod selection;
pub mod service;

pub use domain::{validity_window, Assignment, DailyQuote, Quote, Session, RECENT_WINDOW};
pub use ports::{PortError, PortResult, QuoteStore};
pub use service::{DailyQuoteService, ServiceError};
