pub mod capture;
pub mod controller;
pub mod notify;
pub mod queue;
