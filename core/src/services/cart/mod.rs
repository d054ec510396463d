//! Shopping cart service module.

mod service;

pub use service::{AddCartItem, CartService};

#[cfg(test)]
mod tests;
