pub mod assessments;
pub mod catalog;
pub mod health;
pub mod selection;
pub mod session;
