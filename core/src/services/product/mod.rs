//! Product catalogue service module.

mod service;

pub use service::{
    default_product_sort, CreateProduct, ProductSearch, ProductService, ProductServiceConfig,
    UpdateProduct, PRODUCT_SORT_FIELDS,
};
