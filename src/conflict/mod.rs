//! Equipment reservation conflict detector

pub mod detector;
pub mod report;

pub use detector::{classify, detect, ConflictStatus, RemoteBookings};
pub use report::{Classification, ConflictContribution, ConflictReport, ContributionSource};
