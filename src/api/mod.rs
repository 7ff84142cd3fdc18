pub mod models;
pub mod pages;
pub mod response;
pub mod routes;
