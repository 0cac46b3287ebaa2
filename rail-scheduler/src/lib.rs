//! Rail schedule server.
//!
//! Loads a fixed timetable of stations and trips and answers: "what is the
//! quickest way from station A to station B, and can I get there at all?"

pub mod config;
pub mod domain;
pub mod network;
pub mod schedule;
pub mod timetable;
pub mod web;
