//! Movie catalog browser core.
//!
//! Every screen is a [`mvi::Container`] driven by a screen reducer from
//! [`screens`]; reducers talk to the remote [`catalog`] and the local
//! [`store`] through injected [`services::Services`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod live;
pub mod logging;
pub mod mvi;
pub mod navigation;
pub mod screens;
pub mod services;
pub mod shutdown;
pub mod store;
