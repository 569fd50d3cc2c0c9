//! Page Behaviors
//!
//! Each module attaches one behavior to the server-rendered page through its
//! `wire` function. The controllers behind them are generic over the element
//! type so they run against in-memory elements in tests.

pub mod backdrop;
pub mod contact;
pub mod faq;
pub mod nav_spy;
pub mod reveal;
pub mod work_tabs;
