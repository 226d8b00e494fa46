//! Resource-specific queries that fall outside the generic list and
//! mutation paths.

pub mod brand_repo;
pub mod category_repo;

pub use brand_repo::BrandRepo;
pub use category_repo::CategoryRepo;
