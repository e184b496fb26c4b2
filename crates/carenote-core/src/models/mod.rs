pub mod field_group;
pub mod form;
pub mod kb;
pub mod preview;
