pub mod dashboard;
pub mod explore;
pub mod panels;
