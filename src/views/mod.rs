//! Overlay widgets. Each one owns its state and writes into the shared document.

pub mod components;
