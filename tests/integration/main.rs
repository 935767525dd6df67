mod booking_flow;
mod cli;
mod common;
mod config;
