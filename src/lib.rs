#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
pub mod config;
mod controller;
mod resource;

pub use config::Config;
pub use controller::{
    handle_ingress, run, Creation, Error, ExtractionError, IstioApi, KubeIstioApi, Outcome,
};
pub use resource::{
    Destination, Gateway, GatewaySpec, HttpMatchRequest, HttpRoute, HttpRouteDestination,
    PortSelector, Server, ServerPort, StringMatch, VirtualService, VirtualServiceSpec,
};
