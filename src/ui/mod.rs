//! UI module - contains UI rendering components

pub mod components;
pub mod folder_tree;
