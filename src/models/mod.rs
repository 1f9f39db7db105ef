pub mod action;
pub mod coordinates;
pub mod event;
pub mod queued;
