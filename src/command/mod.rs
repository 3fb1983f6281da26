pub mod add;
pub mod clear;
pub mod delete;
pub mod draw;
pub mod import;
pub mod list;
pub mod search;
pub mod show;
pub mod update;
