pub(crate) mod catalog;
pub(crate) mod dashboard;
pub(crate) mod health;
pub(crate) mod page;
