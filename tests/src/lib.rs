//! End-to-end scenarios driven through the public core API.

mod fixture;
mod progression;
mod routing;
