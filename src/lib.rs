pub mod assignment;
pub mod board;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod error;
pub mod facts;
pub mod interaction;
pub mod order_rule;
pub mod presentation;
pub mod round;
pub mod rules;
pub mod serial;
pub mod simulation;
// cmd and reports belong to the binary (see main.rs).
