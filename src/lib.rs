// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
