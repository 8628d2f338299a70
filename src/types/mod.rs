pub mod date_range;
pub mod field_value;
pub mod frames;
pub mod merged;
pub mod options;
pub mod product;
