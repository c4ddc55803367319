//! Catalog application core: database handle, unit of work, repositories
//! and domain services.

pub mod context;
pub mod database;
pub mod domain;
pub mod unit_of_work;

#[cfg(test)]
mod test;
