pub mod arrivals;
pub mod customer;
pub mod server_pool;
