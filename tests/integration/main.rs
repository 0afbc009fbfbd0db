//! Integration tests for scrapmon
//!
//! `scrapper_tests` drive full passes against an in-memory database, a
//! temporary folder and a scripted fetcher. `fetcher_tests` exercise the HTTP
//! fetcher against a wiremock server.

mod scrapper_tests;
