//! Reactive UI state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` wraps each struct in an `RwSignal` and provides it through Leptos
//! context; components read and update them with `expect_context`.

pub mod session;
pub mod ui;
