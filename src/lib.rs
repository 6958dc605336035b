// Shipbox - shipping box calculator core
pub mod config;
pub mod form;
pub mod logger;
pub mod notifications;
pub mod route;
pub mod shipping;
pub mod storage;
